//! Vertex and index sink used by the shape generators
//!
//! A [`MeshWriter`] is sized up front from the closed-form counts and only
//! owns the streams that were requested. Generators push whole vertices and
//! triangles; the writer scatters them into the attribute streams, applies
//! the winding order and refuses anything that would break the [`Geometry`]
//! invariants.

use glam::{Vec2, Vec3};

use crate::error::{Error, Result};
use crate::geometry::{Geometry, IndexBuffer, VertexAttribBuffer, try_vec};
use crate::types::{AttribFlags, AttribKind, IndexSize, WindingOrder};

/// One generated vertex with its full shading frame
#[derive(Clone, Copy, Debug)]
pub(crate) struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
    pub tangent: Vec3,
    pub bitangent: Vec3,
}

impl Vertex {
    /// Vertex without a tangent frame
    pub fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position,
            normal,
            uv,
            tangent: Vec3::ZERO,
            bitangent: Vec3::ZERO,
        }
    }

    pub fn with_frame(self, tangent: Vec3, bitangent: Vec3) -> Self {
        Self {
            tangent,
            bitangent,
            ..self
        }
    }

    /// +1 when (tangent, bitangent, normal) is right-handed, -1 otherwise
    fn handedness(&self) -> f32 {
        if self.normal.cross(self.tangent).dot(self.bitangent) < 0.0 {
            -1.0
        } else {
            1.0
        }
    }
}

/// Per-vertex quantities the requested streams depend on. Generators skip
/// whatever is not needed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Needs {
    /// Normal stream, or tangent handedness
    pub normal: bool,
    pub uv: bool,
    pub frame: bool,
}

pub(crate) struct MeshWriter {
    attributes: AttribFlags,
    winding: WindingOrder,
    streams: Vec<(AttribKind, Vec<f32>)>,
    indices: IndexBuffer,
    num_vertices: u32,
    num_indices: u32,
    expected_vertices: u32,
    expected_indices: u32,
}

impl MeshWriter {
    /// Allocate the requested streams for exactly `vertices` vertices and
    /// `indices` indices
    pub fn new(
        attributes: AttribFlags,
        index_size: IndexSize,
        winding: WindingOrder,
        vertices: u32,
        indices: u32,
    ) -> Result<Self> {
        let mut streams = Vec::with_capacity(AttribKind::ALL.len());
        for kind in attributes.kinds() {
            let floats = vertices as usize * kind.size().components();
            streams.push((kind, try_vec(kind.name(), floats)?));
        }

        Ok(Self {
            attributes,
            winding,
            streams,
            indices: IndexBuffer::with_capacity(index_size, indices as usize)?,
            num_vertices: 0,
            num_indices: 0,
            expected_vertices: vertices,
            expected_indices: indices,
        })
    }

    pub fn wants(&self, kind: AttribKind) -> bool {
        self.attributes.contains(kind.flag())
    }

    /// Whether tangent or bitangent streams need a frame per vertex
    pub fn wants_frame(&self) -> bool {
        self.attributes
            .intersects(AttribFlags::TANGENT | AttribFlags::BITANGENT)
    }

    pub fn needs(&self) -> Needs {
        Needs {
            normal: self.wants(AttribKind::Normal) || self.wants(AttribKind::Tangent),
            uv: self.wants(AttribKind::Texcoord),
            frame: self.wants_frame(),
        }
    }

    /// Index the next pushed vertex will receive
    pub fn next_index(&self) -> u32 {
        self.num_vertices
    }

    /// Append a vertex and return its index
    pub fn vertex(&mut self, vertex: Vertex) -> Result<u32> {
        if self.num_vertices >= self.expected_vertices {
            return Err(Error::internal(format!(
                "vertex {} exceeds the sized count of {}",
                self.num_vertices, self.expected_vertices
            )));
        }

        for (kind, data) in &mut self.streams {
            match kind {
                AttribKind::Position => data.extend_from_slice(&vertex.position.to_array()),
                AttribKind::Normal => data.extend_from_slice(&vertex.normal.to_array()),
                AttribKind::Texcoord => data.extend_from_slice(&vertex.uv.to_array()),
                AttribKind::Tangent => {
                    data.extend_from_slice(&vertex.tangent.to_array());
                    data.push(vertex.handedness());
                }
                AttribKind::Bitangent => data.extend_from_slice(&vertex.bitangent.to_array()),
            }
        }

        let index = self.num_vertices;
        self.num_vertices += 1;
        Ok(index)
    }

    /// Append a counter-clockwise triangle, reordered for the winding setting
    pub fn triangle(&mut self, a: u32, b: u32, c: u32) -> Result<()> {
        if [a, b, c].iter().any(|&i| i >= self.expected_vertices) {
            return Err(Error::internal(format!(
                "triangle ({a}, {b}, {c}) out of range for {} vertices",
                self.expected_vertices
            )));
        }
        if a == b || b == c || a == c {
            return Err(Error::internal(format!("degenerate triangle ({a}, {b}, {c})")));
        }
        if self.num_indices + 3 > self.expected_indices {
            return Err(Error::internal(format!(
                "index count exceeds the sized count of {}",
                self.expected_indices
            )));
        }

        let (b, c) = match self.winding {
            WindingOrder::CounterClockwise => (b, c),
            WindingOrder::Clockwise => (c, b),
        };
        self.indices.push(a)?;
        self.indices.push(b)?;
        self.indices.push(c)?;
        self.num_indices += 3;
        Ok(())
    }

    /// Triangulate a row-major grid of `(columns + 1) x (rows + 1)` vertices
    /// starting at `base`
    pub fn grid(&mut self, base: u32, columns: u32, rows: u32) -> Result<()> {
        let stride = columns + 1;
        for row in 0..rows {
            for column in 0..columns {
                let a = base + row * stride + column;
                let b = a + 1;
                let c = a + stride;
                let d = c + 1;
                self.triangle(a, b, c)?;
                self.triangle(b, d, c)?;
            }
        }
        Ok(())
    }

    /// Check the filled counts and hand the streams over to a [`Geometry`]
    pub fn finish(self) -> Result<Geometry> {
        if self.num_vertices != self.expected_vertices
            || self.num_indices != self.expected_indices
        {
            return Err(Error::internal(format!(
                "generated {} vertices and {} indices, sized for {} and {}",
                self.num_vertices, self.num_indices, self.expected_vertices, self.expected_indices
            )));
        }

        let mut geometry = Geometry::new(self.num_vertices);
        for (kind, data) in self.streams {
            let buffer = VertexAttribBuffer::new(kind, kind.size(), data)?;
            geometry
                .attach(buffer)
                .map_err(|err| Error::internal(format!("{kind} stream rejected: {err}")))?;
        }
        geometry
            .set_index_buffer(self.indices)
            .map_err(|err| Error::internal(format!("index stream rejected: {err}")))?;
        Ok(geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad(winding: WindingOrder) -> Geometry {
        let mut writer =
            MeshWriter::new(AttribFlags::all(), IndexSize::U8, winding, 4, 6).unwrap();
        for (x, y) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)] {
            let vertex = Vertex::new(Vec3::new(x, y, 0.0), Vec3::Z, Vec2::new(x, y))
                .with_frame(Vec3::X, Vec3::Y);
            writer.vertex(vertex).unwrap();
        }
        writer.grid(0, 1, 1).unwrap();
        writer.finish().unwrap()
    }

    #[test]
    fn test_grid_cell_order() {
        let geometry = quad(WindingOrder::CounterClockwise);
        let triangles: Vec<_> = geometry.triangles().collect();
        assert_eq!(triangles, vec![[0, 1, 2], [1, 3, 2]]);
    }

    #[test]
    fn test_clockwise_swaps_last_two() {
        let geometry = quad(WindingOrder::Clockwise);
        let triangles: Vec<_> = geometry.triangles().collect();
        assert_eq!(triangles, vec![[0, 2, 1], [1, 2, 3]]);
    }

    #[test]
    fn test_tangent_handedness() {
        let geometry = quad(WindingOrder::CounterClockwise);
        assert!(geometry.tangents().unwrap().iter().all(|t| t[3] == 1.0));

        let mirrored = Vertex::new(Vec3::ZERO, Vec3::Z, Vec2::ZERO).with_frame(Vec3::X, -Vec3::Y);
        assert_eq!(mirrored.handedness(), -1.0);
    }

    #[test]
    fn test_only_requested_streams() {
        let writer = MeshWriter::new(
            AttribFlags::POSITION | AttribFlags::TEXCOORD,
            IndexSize::U16,
            WindingOrder::CounterClockwise,
            3,
            3,
        )
        .unwrap();
        assert!(!writer.wants_frame());
        assert!(writer.wants(AttribKind::Texcoord));
        assert!(!writer.wants(AttribKind::Normal));
        assert_eq!(
            writer.needs(),
            Needs {
                normal: false,
                uv: true,
                frame: false,
            }
        );

        let mut writer = writer;
        for i in 0..3 {
            writer
                .vertex(Vertex::new(Vec3::splat(i as f32), Vec3::Y, Vec2::ZERO))
                .unwrap();
        }
        writer.triangle(0, 1, 2).unwrap();
        let geometry = writer.finish().unwrap();

        assert_eq!(
            geometry.attribute_flags(),
            AttribFlags::POSITION | AttribFlags::TEXCOORD
        );
        assert!(geometry.normals().is_none());
    }

    #[test]
    fn test_rejects_bad_triangles() {
        let mut writer = MeshWriter::new(
            AttribFlags::POSITION,
            IndexSize::U8,
            WindingOrder::CounterClockwise,
            3,
            3,
        )
        .unwrap();
        assert!(matches!(writer.triangle(0, 1, 3), Err(Error::Internal(_))));
        assert!(matches!(writer.triangle(0, 1, 1), Err(Error::Internal(_))));
    }

    #[test]
    fn test_finish_checks_counts() {
        let mut writer = MeshWriter::new(
            AttribFlags::POSITION,
            IndexSize::U8,
            WindingOrder::CounterClockwise,
            3,
            3,
        )
        .unwrap();
        writer
            .vertex(Vertex::new(Vec3::ZERO, Vec3::Y, Vec2::ZERO))
            .unwrap();
        assert!(matches!(writer.finish(), Err(Error::Internal(_))));
    }
}
