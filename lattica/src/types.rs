//! Wire enumerations
//!
//! Discriminants match the values used by external collaborators (viewer,
//! config files, FFI-style callers). Every enum converts from its raw `u32`
//! value through `TryFrom`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Shape kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum ShapeKind {
    /// Invalid/unset shape, never generatable
    None = 0,
    Plane = 1,
    Cuboid = 2,
    Sphere = 3,
    Cylinder = 4,
    Cone = 5,
    Prism = 6,
    Pyramid = 7,
    Tube = 8,
    Capsule = 9,
    Torus = 10,
    TorusKnot = 11,
}

impl ShapeKind {
    /// All generatable shape kinds, in viewer order
    pub const ALL: [ShapeKind; 11] = [
        ShapeKind::Plane,
        ShapeKind::Cuboid,
        ShapeKind::Sphere,
        ShapeKind::Cylinder,
        ShapeKind::Cone,
        ShapeKind::Prism,
        ShapeKind::Pyramid,
        ShapeKind::Tube,
        ShapeKind::Capsule,
        ShapeKind::Torus,
        ShapeKind::TorusKnot,
    ];

    /// Identifier used in config files (`shape = "torus_knot"`)
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::None => "none",
            ShapeKind::Plane => "plane",
            ShapeKind::Cuboid => "cuboid",
            ShapeKind::Sphere => "sphere",
            ShapeKind::Cylinder => "cylinder",
            ShapeKind::Cone => "cone",
            ShapeKind::Prism => "prism",
            ShapeKind::Pyramid => "pyramid",
            ShapeKind::Tube => "tube",
            ShapeKind::Capsule => "capsule",
            ShapeKind::Torus => "torus",
            ShapeKind::TorusKnot => "torus_knot",
        }
    }

    /// Human readable name for selection controls
    pub fn label(self) -> &'static str {
        match self {
            ShapeKind::None => "None",
            ShapeKind::Plane => "Plane",
            ShapeKind::Cuboid => "Cuboid",
            ShapeKind::Sphere => "Sphere",
            ShapeKind::Cylinder => "Cylinder",
            ShapeKind::Cone => "Cone",
            ShapeKind::Prism => "Prism",
            ShapeKind::Pyramid => "Pyramid",
            ShapeKind::Tube => "Tube",
            ShapeKind::Capsule => "Capsule",
            ShapeKind::Torus => "Torus",
            ShapeKind::TorusKnot => "Torus Knot",
        }
    }
}

impl TryFrom<u32> for ShapeKind {
    type Error = Error;

    /// Only generatable kinds convert; 0 (`None`) is `NoSupport` like any
    /// unknown value.
    fn try_from(value: u32) -> Result<Self> {
        ShapeKind::ALL
            .iter()
            .copied()
            .find(|kind| *kind as u32 == value)
            .ok_or_else(|| Error::NoSupport(format!("unknown shape kind {value}")))
    }
}

impl FromStr for ShapeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ShapeKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::NoSupport(format!("unknown shape `{s}`")))
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Semantic channel of a vertex attribute stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum AttribKind {
    Position = 0x1,
    Normal = 0x2,
    Texcoord = 0x4,
    /// Tangent direction in xyz, handedness (+1/-1) in w
    Tangent = 0x8,
    Bitangent = 0x10,
}

impl AttribKind {
    /// All attribute kinds, in stream order
    pub const ALL: [AttribKind; 5] = [
        AttribKind::Position,
        AttribKind::Normal,
        AttribKind::Texcoord,
        AttribKind::Tangent,
        AttribKind::Bitangent,
    ];

    /// Element size a buffer of this kind must declare
    pub fn size(self) -> AttribSize {
        match self {
            AttribKind::Position | AttribKind::Normal | AttribKind::Bitangent => AttribSize::Float3,
            AttribKind::Texcoord => AttribSize::Float2,
            AttribKind::Tangent => AttribSize::Float4,
        }
    }

    /// Single-bit flag for this kind
    pub fn flag(self) -> AttribFlags {
        AttribFlags::from_bits_retain(self as u32)
    }

    pub fn name(self) -> &'static str {
        match self {
            AttribKind::Position => "position",
            AttribKind::Normal => "normal",
            AttribKind::Texcoord => "texcoord",
            AttribKind::Tangent => "tangent",
            AttribKind::Bitangent => "bitangent",
        }
    }
}

impl TryFrom<u32> for AttribKind {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        AttribKind::ALL
            .iter()
            .copied()
            .find(|kind| *kind as u32 == value)
            .ok_or_else(|| Error::NoSupport(format!("unknown attribute kind {value:#x}")))
    }
}

impl fmt::Display for AttribKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags::bitflags! {
    /// Set of requested attribute streams
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AttribFlags: u32 {
        const POSITION = 0x1;
        const NORMAL = 0x2;
        const TEXCOORD = 0x4;
        const TANGENT = 0x8;
        const BITANGENT = 0x10;
    }
}

impl AttribFlags {
    /// Convert a raw bit set, rejecting bits that name no attribute
    pub fn from_wire(bits: u32) -> Result<Self> {
        AttribFlags::from_bits(bits).ok_or_else(|| {
            Error::NoSupport(format!(
                "unknown attribute bits {:#x}",
                bits & !AttribFlags::all().bits()
            ))
        })
    }

    /// Whether the stream of `kind` is part of this set
    pub fn has(self, kind: AttribKind) -> bool {
        self.contains(kind.flag())
    }

    /// Attribute kinds in this set, in stream order
    pub fn kinds(self) -> impl Iterator<Item = AttribKind> {
        AttribKind::ALL.into_iter().filter(move |kind| self.has(*kind))
    }
}

/// Number of floats per attribute element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum AttribSize {
    Float = 1,
    Float2 = 2,
    Float3 = 3,
    Float4 = 4,
}

impl AttribSize {
    /// Float components per element
    pub fn components(self) -> usize {
        self as usize
    }

    /// Bytes per element
    pub fn bytes(self) -> u32 {
        self as u32 * 4
    }
}

impl TryFrom<u32> for AttribSize {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            1 => Ok(AttribSize::Float),
            2 => Ok(AttribSize::Float2),
            3 => Ok(AttribSize::Float3),
            4 => Ok(AttribSize::Float4),
            _ => Err(Error::invalid(
                "attrib_size",
                format!("element size must be 1-4 floats, got {value}"),
            )),
        }
    }
}

/// Width of packed index values, tagged by byte size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum IndexSize {
    U8 = 1,
    U16 = 2,
    U32 = 4,
}

impl IndexSize {
    pub fn bytes(self) -> usize {
        self as usize
    }

    /// Largest vertex count addressable at this width
    pub fn max_vertices(self) -> u64 {
        match self {
            IndexSize::U8 => 1 << 8,
            IndexSize::U16 => 1 << 16,
            IndexSize::U32 => 1 << 32,
        }
    }

    /// Narrowest width able to address `vertices` vertices
    pub fn for_vertex_count(vertices: u64) -> Option<Self> {
        [IndexSize::U8, IndexSize::U16, IndexSize::U32]
            .into_iter()
            .find(|size| vertices <= size.max_vertices())
    }
}

impl TryFrom<u32> for IndexSize {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            1 => Ok(IndexSize::U8),
            2 => Ok(IndexSize::U16),
            4 => Ok(IndexSize::U32),
            _ => Err(Error::invalid(
                "index_size",
                format!("index size must be 1, 2 or 4 bytes, got {value}"),
            )),
        }
    }
}

/// Vertex ordering that marks a triangle as front facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum WindingOrder {
    #[default]
    CounterClockwise = 0,
    Clockwise = 1,
}

impl TryFrom<u32> for WindingOrder {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            0 => Ok(WindingOrder::CounterClockwise),
            1 => Ok(WindingOrder::Clockwise),
            _ => Err(Error::invalid(
                "winding_order",
                format!("unknown winding order {value}"),
            )),
        }
    }
}

/// Texture coordinate projection mode
///
/// Only the default parametric mapping exists; the enumeration is reserved
/// for projection modes that are not implemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
#[repr(u32)]
pub enum UvMapping {
    #[default]
    None = 0,
}

impl TryFrom<u32> for UvMapping {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            0 => Ok(UvMapping::None),
            _ => Err(Error::NoSupport(format!("uv mapping mode {value}"))),
        }
    }
}
