//! Shape parameter records
//!
//! One record per shape kind, each embedding the shared [`CommonConfig`]
//! header. `Default` on every record yields a valid, non-degenerate shape.
//! Records deserialize with missing fields taking their defaults:
//!
//! ```toml
//! shape = "sphere"
//! div_longitude = 16
//! radius = 1.0
//!
//! [common]
//! winding_order = "clockwise"
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{ShapeKind, UvMapping, WindingOrder};

/// Settings shared by every shape
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommonConfig {
    pub winding_order: WindingOrder,
    pub uv_mapping: UvMapping,
}

/// Subdivided rectangle in the XY plane, facing +Z
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaneConfig {
    pub div_x: u16,
    pub div_y: u16,
    pub size_x: f32,
    pub size_y: f32,
    pub common: CommonConfig,
}

impl Default for PlaneConfig {
    fn default() -> Self {
        Self {
            div_x: 1,
            div_y: 1,
            size_x: 1.0,
            size_y: 1.0,
            common: CommonConfig::default(),
        }
    }
}

/// Axis-aligned box with independently subdivided faces
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CuboidConfig {
    pub div_x: u16,
    pub div_y: u16,
    pub div_z: u16,
    pub size_x: f32,
    pub size_y: f32,
    pub size_z: f32,
    pub common: CommonConfig,
}

impl Default for CuboidConfig {
    fn default() -> Self {
        Self {
            div_x: 1,
            div_y: 1,
            div_z: 1,
            size_x: 1.0,
            size_y: 1.0,
            size_z: 1.0,
            common: CommonConfig::default(),
        }
    }
}

/// UV sphere
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereConfig {
    pub div_longitude: u16,
    pub div_latitude: u16,
    pub radius: f32,
    pub common: CommonConfig,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            div_longitude: 8,
            div_latitude: 8,
            radius: 0.5,
            common: CommonConfig::default(),
        }
    }
}

/// Capped cylinder along Y
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CylinderConfig {
    pub div_radial: u16,
    pub div_axial: u16,
    pub div_rings: u16,
    pub length: f32,
    pub radius: f32,
    pub common: CommonConfig,
}

impl Default for CylinderConfig {
    fn default() -> Self {
        Self {
            div_radial: 8,
            div_axial: 1,
            div_rings: 1,
            length: 1.0,
            radius: 0.5,
            common: CommonConfig::default(),
        }
    }
}

/// Cone with its apex on +Y and a capped base
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConeConfig {
    pub div_radial: u16,
    pub div_axial: u16,
    pub div_rings: u16,
    pub radius: f32,
    pub length: f32,
    pub common: CommonConfig,
}

impl Default for ConeConfig {
    fn default() -> Self {
        Self {
            div_radial: 8,
            div_axial: 1,
            div_rings: 1,
            radius: 0.5,
            length: 1.0,
            common: CommonConfig::default(),
        }
    }
}

/// Regular polygonal prism along Y
///
/// `radius` is the circumradius of the polygon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrismConfig {
    pub num_facets: u16,
    pub div_per_facet_radial: u16,
    pub div_axial: u16,
    pub div_rings: u16,
    pub radius: f32,
    pub length: f32,
    pub common: CommonConfig,
}

impl Default for PrismConfig {
    fn default() -> Self {
        Self {
            num_facets: 3,
            div_per_facet_radial: 8,
            div_axial: 1,
            div_rings: 1,
            radius: 0.5,
            length: 1.0,
            common: CommonConfig::default(),
        }
    }
}

/// Regular polygonal pyramid with its apex on +Y
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PyramidConfig {
    pub num_facets: u16,
    pub div_per_facet_radial: u16,
    pub div_axial: u16,
    pub div_rings: u16,
    pub radius: f32,
    pub length: f32,
    pub common: CommonConfig,
}

impl Default for PyramidConfig {
    fn default() -> Self {
        Self {
            num_facets: 3,
            div_per_facet_radial: 8,
            div_axial: 1,
            div_rings: 1,
            radius: 0.5,
            length: 1.0,
            common: CommonConfig::default(),
        }
    }
}

/// Hollow cylinder with annular caps
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TubeConfig {
    pub div_radial: u16,
    pub div_axial: u16,
    pub div_rings: u16,
    pub length: f32,
    pub outer_radius: f32,
    pub inner_radius: f32,
    pub common: CommonConfig,
}

impl Default for TubeConfig {
    fn default() -> Self {
        Self {
            div_radial: 8,
            div_axial: 1,
            div_rings: 1,
            length: 1.0,
            outer_radius: 0.5,
            inner_radius: 0.25,
            common: CommonConfig::default(),
        }
    }
}

/// Cylinder closed by two hemispheres
///
/// `div_latitude` counts the latitude bands of each hemisphere and
/// `cylinder_length` excludes the caps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapsuleConfig {
    pub div_radial: u16,
    pub div_axial: u16,
    pub div_latitude: u16,
    pub radius: f32,
    pub cylinder_length: f32,
    pub common: CommonConfig,
}

impl Default for CapsuleConfig {
    fn default() -> Self {
        Self {
            div_radial: 8,
            div_axial: 1,
            div_latitude: 1,
            radius: 0.25,
            cylinder_length: 0.5,
            common: CommonConfig::default(),
        }
    }
}

/// Ring torus lying in the XZ plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorusConfig {
    pub div_radial_minor: u16,
    pub div_radial_major: u16,
    pub minor_radius: f32,
    pub major_radius: f32,
    pub common: CommonConfig,
}

impl Default for TorusConfig {
    fn default() -> Self {
        Self {
            div_radial_minor: 6,
            div_radial_major: 8,
            minor_radius: 0.125,
            major_radius: 0.5,
            common: CommonConfig::default(),
        }
    }
}

/// Tube swept along a (p, q) torus knot
///
/// The curve winds `p` times around the Y axis and `q` times through the
/// hole of a torus with radii `radius` and `torus_radius`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorusKnotConfig {
    pub div_radial: u16,
    pub div_tubular: u16,
    pub radius: f32,
    pub torus_radius: f32,
    pub tube_radius: f32,
    pub p: i32,
    pub q: i32,
    pub common: CommonConfig,
}

impl Default for TorusKnotConfig {
    fn default() -> Self {
        Self {
            div_radial: 8,
            div_tubular: 64,
            radius: 0.5,
            torus_radius: 0.25,
            tube_radius: 0.05,
            p: 2,
            q: 3,
            common: CommonConfig::default(),
        }
    }
}

/// Parameter record of any shape, tagged by kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ShapeConfig {
    Plane(PlaneConfig),
    Cuboid(CuboidConfig),
    Sphere(SphereConfig),
    Cylinder(CylinderConfig),
    Cone(ConeConfig),
    Prism(PrismConfig),
    Pyramid(PyramidConfig),
    Tube(TubeConfig),
    Capsule(CapsuleConfig),
    Torus(TorusConfig),
    TorusKnot(TorusKnotConfig),
}

macro_rules! shape_configs {
    ($($variant:ident($record:ident)),+ $(,)?) => {
        impl ShapeConfig {
            /// Kind tag of the wrapped record
            pub fn kind(&self) -> ShapeKind {
                match self {
                    $(ShapeConfig::$variant(_) => ShapeKind::$variant,)+
                }
            }

            /// Shared settings of the wrapped record
            pub fn common(&self) -> &CommonConfig {
                match self {
                    $(ShapeConfig::$variant(config) => &config.common,)+
                }
            }

            pub fn common_mut(&mut self) -> &mut CommonConfig {
                match self {
                    $(ShapeConfig::$variant(config) => &mut config.common,)+
                }
            }

            /// Default record for `kind`
            ///
            /// # Errors
            /// `NoSupport` for [`ShapeKind::None`].
            pub fn from_kind(kind: ShapeKind) -> Result<Self> {
                match kind {
                    $(ShapeKind::$variant => Ok(ShapeConfig::$variant($record::default())),)+
                    ShapeKind::None => Err(Error::NoSupport("shape kind `none`".into())),
                }
            }
        }

        $(
            impl From<$record> for ShapeConfig {
                fn from(config: $record) -> Self {
                    ShapeConfig::$variant(config)
                }
            }
        )+
    };
}

shape_configs! {
    Plane(PlaneConfig),
    Cuboid(CuboidConfig),
    Sphere(SphereConfig),
    Cylinder(CylinderConfig),
    Cone(ConeConfig),
    Prism(PrismConfig),
    Pyramid(PyramidConfig),
    Tube(TubeConfig),
    Capsule(CapsuleConfig),
    Torus(TorusConfig),
    TorusKnot(TorusKnotConfig),
}
