//! Lattica - procedural geometry generation
//!
//! Generates renderable meshes for a fixed set of parametric primitives
//! (plane, cuboid, sphere, cylinder, cone, prism, pyramid, tube, capsule,
//! torus, torus knot). Each shape is described by its own config record;
//! [`generate`] validates the record, sizes every buffer from closed-form
//! vertex/index counts, and fills the requested attribute streams.
//!
//! # Ownership
//!
//! The engine allocates and transfers ownership: [`generate`] returns an owned
//! [`Geometry`]. Nothing is handed across the API by pointer and nothing is
//! returned on failure.
//!
//! # Example
//!
//! ```
//! use lattica::{AttribFlags, ShapeConfig, SphereConfig, generate};
//!
//! let config = ShapeConfig::from(SphereConfig { radius: 2.0, ..Default::default() });
//! let geometry = generate(&config, AttribFlags::POSITION | AttribFlags::NORMAL).unwrap();
//!
//! assert_eq!(geometry.num_vertices(), 79);
//! assert_eq!(geometry.num_indices(), 336);
//! assert!(geometry.texcoords().is_none());
//! ```

mod config;
mod error;
mod generate;
mod geometry;
mod shapes;
mod surface;
mod types;
mod validate;
mod writer;

pub use config::{
    CapsuleConfig, CommonConfig, ConeConfig, CuboidConfig, CylinderConfig, PlaneConfig,
    PrismConfig, PyramidConfig, ShapeConfig, SphereConfig, TorusConfig, TorusKnotConfig,
    TubeConfig,
};
pub use error::{Error, Result};
pub use generate::{GenerateRequest, generate, generate_default, generate_into, generate_with};
pub use geometry::{Geometry, IndexBuffer, IndexData, VertexAttribBuffer};
pub use shapes::MeshCounts;
pub use types::{
    AttribFlags, AttribKind, AttribSize, IndexSize, ShapeKind, UvMapping, WindingOrder,
};
