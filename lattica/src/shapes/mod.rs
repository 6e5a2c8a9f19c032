//! Per-shape generators
//!
//! Every parameter record implements [`Shape`]: range validation, closed-form
//! sizing and emission into a pre-sized [`MeshWriter`].
//!
//! # Adding a Shape
//!
//! 1. Add the record to `config.rs` and a variant to `ShapeConfig`
//! 2. Add the kind to `ShapeKind` (and `ShapeKind::ALL`)
//! 3. Implement [`Shape`] for the record in one of the submodules
//! 4. Add the arm to the `dispatch!` match in `generate.rs`
//! 5. The compiler flags every missed match arm

mod faceted;
mod flat;
mod revolved;
mod round;
mod toroidal;


use crate::config::CommonConfig;
use crate::error::Result;
use crate::types::ShapeKind;
use crate::writer::MeshWriter;

/// Exact buffer sizes of a shape, computed before anything is generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshCounts {
    pub vertices: u64,
    pub indices: u64,
}

impl MeshCounts {
    pub fn triangles(&self) -> u64 {
        self.indices / 3
    }
}

pub(crate) trait Shape {
    const KIND: ShapeKind;

    fn common(&self) -> &CommonConfig;

    /// Reject out-of-range parameters
    fn validate(&self) -> Result<()>;

    /// Closed-form counts; only meaningful once [`Shape::validate`] passed
    fn counts(&self) -> MeshCounts;

    /// Push exactly [`Shape::counts`] vertices and indices into `writer`
    fn emit(&self, writer: &mut MeshWriter) -> Result<()>;
}
