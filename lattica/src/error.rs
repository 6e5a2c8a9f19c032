//! Error type for geometry generation and buffer management

use thiserror::Error;

/// Errors returned by the generation engine and the buffer model
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed or out-of-range parameter, or mismatched attribute/buffer typing
    #[error("invalid argument `{field}`: {reason}")]
    InvalidArgument {
        /// Name of the offending field or argument
        field: &'static str,
        /// What was wrong with it
        reason: String,
    },

    /// Unrecognized shape kind or attribute combination
    #[error("not supported: {0}")]
    NoSupport(String),

    /// An invariant the engine guarantees was violated (a bug, not caller misuse)
    #[error("internal error: {0}")]
    Internal(String),

    /// Buffer allocation failed
    #[error("failed to allocate {bytes} bytes for {what}")]
    Allocation {
        /// Buffer that could not be allocated
        what: &'static str,
        /// Requested size in bytes
        bytes: usize,
    },
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Whether this error reports caller misuse rather than an engine fault
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. } | Self::NoSupport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_field() {
        let err = Error::invalid("div_x", "must be at least 1, got 0");
        assert_eq!(
            err.to_string(),
            "invalid argument `div_x`: must be at least 1, got 0"
        );
    }

    #[test]
    fn test_caller_error_classification() {
        assert!(Error::invalid("radius", "negative").is_caller_error());
        assert!(Error::NoSupport("shape 42".into()).is_caller_error());
        assert!(!Error::internal("index out of range").is_caller_error());
        assert!(
            !Error::Allocation {
                what: "position stream",
                bytes: 12
            }
            .is_caller_error()
        );
    }
}
