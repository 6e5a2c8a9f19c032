//! Generation entry points
//!
//! Dispatch is a single `match` over [`ShapeConfig`]; every arm runs the same
//! pipeline for its record:
//!
//! 1. Validate the request and the record's parameters
//! 2. Compute the closed-form vertex/index counts and pick the index width
//! 3. Allocate exactly the requested streams
//! 4. Emit, then check the filled counts against the closed form
//!
//! Nothing is returned (or written to a caller's output) unless every step
//! succeeded.

use tracing::debug;

use crate::config::ShapeConfig;
use crate::error::{Error, Result};
use crate::geometry::Geometry;
use crate::shapes::{MeshCounts, Shape};
use crate::types::{AttribFlags, IndexSize, ShapeKind, UvMapping};
use crate::writer::MeshWriter;

/// What to generate besides the shape itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GenerateRequest {
    /// Streams to produce; must include [`AttribFlags::POSITION`]
    pub attributes: AttribFlags,
    /// Index width; `None` picks the narrowest width that fits
    pub index_size: Option<IndexSize>,
}

impl Default for GenerateRequest {
    fn default() -> Self {
        Self {
            attributes: AttribFlags::POSITION | AttribFlags::NORMAL | AttribFlags::TEXCOORD,
            index_size: None,
        }
    }
}

impl From<AttribFlags> for GenerateRequest {
    fn from(attributes: AttribFlags) -> Self {
        Self {
            attributes,
            index_size: None,
        }
    }
}

impl GenerateRequest {
    fn validate(&self) -> Result<()> {
        let unknown = self.attributes.bits() & !AttribFlags::all().bits();
        if unknown != 0 {
            return Err(Error::NoSupport(format!("unknown attribute bits {unknown:#x}")));
        }
        if !self.attributes.contains(AttribFlags::POSITION) {
            return Err(Error::invalid("attributes", "position must be requested"));
        }
        Ok(())
    }
}

macro_rules! dispatch {
    ($config:expr, $shape:ident => $body:expr) => {
        match $config {
            ShapeConfig::Plane($shape) => $body,
            ShapeConfig::Cuboid($shape) => $body,
            ShapeConfig::Sphere($shape) => $body,
            ShapeConfig::Cylinder($shape) => $body,
            ShapeConfig::Cone($shape) => $body,
            ShapeConfig::Prism($shape) => $body,
            ShapeConfig::Pyramid($shape) => $body,
            ShapeConfig::Tube($shape) => $body,
            ShapeConfig::Capsule($shape) => $body,
            ShapeConfig::Torus($shape) => $body,
            ShapeConfig::TorusKnot($shape) => $body,
        }
    };
}

impl ShapeConfig {
    /// Check every parameter against its legal range
    ///
    /// # Errors
    /// `InvalidArgument` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        dispatch!(self, shape => shape.validate())
    }

    /// Closed-form vertex and index counts of the shape
    ///
    /// # Errors
    /// Same as [`ShapeConfig::validate`]; counts are never computed for an
    /// invalid record.
    pub fn counts(&self) -> Result<MeshCounts> {
        dispatch!(self, shape => {
            shape.validate()?;
            Ok(shape.counts())
        })
    }
}

/// Generate `config` with the given attribute streams and an automatic index
/// width
pub fn generate(config: &ShapeConfig, attributes: AttribFlags) -> Result<Geometry> {
    generate_with(config, &GenerateRequest::from(attributes))
}

/// Generate `config` as described by `request`
///
/// # Errors
/// - `InvalidArgument` for out-of-range parameters, a request without
///   positions, counts beyond 32 bits or beyond the requested index width
/// - `NoSupport` for unknown attribute bits
/// - `Allocation` when a stream cannot be allocated
/// - `Internal` when the generator breaks its own sizing
pub fn generate_with(config: &ShapeConfig, request: &GenerateRequest) -> Result<Geometry> {
    let result = dispatch!(config, shape => build(shape, request));
    match &result {
        Ok(geometry) => debug!(
            shape = config.kind().as_str(),
            vertices = geometry.num_vertices(),
            indices = geometry.num_indices(),
            index_size = ?geometry.index_buffer().map(|b| b.size()),
            attributes = ?request.attributes,
            "generated geometry"
        ),
        Err(err) => debug!(shape = config.kind().as_str(), %err, "rejected geometry request"),
    }
    result
}

/// Generate into `output`, replacing its contents only on success
pub fn generate_into(
    config: &ShapeConfig,
    request: &GenerateRequest,
    output: &mut Geometry,
) -> Result<()> {
    *output = generate_with(config, request)?;
    Ok(())
}

/// Generate the default record of `kind`
///
/// # Errors
/// `NoSupport` for [`ShapeKind::None`], otherwise as [`generate_with`].
pub fn generate_default(kind: ShapeKind, request: &GenerateRequest) -> Result<Geometry> {
    generate_with(&ShapeConfig::from_kind(kind)?, request)
}

fn build<S: Shape>(shape: &S, request: &GenerateRequest) -> Result<Geometry> {
    request.validate()?;
    shape.validate()?;

    let common = shape.common();
    if common.uv_mapping != UvMapping::None {
        return Err(Error::NoSupport(format!(
            "uv mapping {:?} for {}",
            common.uv_mapping,
            S::KIND
        )));
    }

    let counts = shape.counts();
    let vertices = u32::try_from(counts.vertices);
    let (vertices, indices) = match (vertices, u32::try_from(counts.indices)) {
        (Ok(v), Ok(i)) => (v, i),
        _ => {
            return Err(Error::invalid(
                "divisions",
                format!(
                    "{} needs {} vertices and {} indices, beyond the 32-bit range",
                    S::KIND,
                    counts.vertices,
                    counts.indices
                ),
            ));
        }
    };

    let index_size = match request.index_size {
        Some(size) if counts.vertices > size.max_vertices() => {
            return Err(Error::invalid(
                "index_size",
                format!(
                    "{} vertices cannot be addressed with {}-byte indices",
                    counts.vertices,
                    size.bytes()
                ),
            ));
        }
        Some(size) => size,
        None => IndexSize::for_vertex_count(counts.vertices).unwrap_or(IndexSize::U32),
    };

    let mut writer = MeshWriter::new(
        request.attributes,
        index_size,
        common.winding_order,
        vertices,
        indices,
    )?;
    shape.emit(&mut writer)?;
    writer.finish()
}
