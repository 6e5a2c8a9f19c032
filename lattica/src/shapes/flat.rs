//! Flat shapes built from rectangular grids (plane, cuboid)

use glam::{Vec2, Vec3};

use super::{MeshCounts, Shape};
use crate::config::{CommonConfig, CuboidConfig, PlaneConfig};
use crate::error::Result;
use crate::types::ShapeKind;
use crate::validate::{check_dimension, check_divisions};
use crate::writer::{MeshWriter, Vertex};

/// One subdivided rectangle; `u_axis x v_axis` is its normal
struct Face {
    center: Vec3,
    normal: Vec3,
    u_axis: Vec3,
    v_axis: Vec3,
    extent: Vec2,
    columns: u32,
    rows: u32,
}

impl Face {
    fn emit(&self, writer: &mut MeshWriter) -> Result<()> {
        let base = writer.next_index();
        for row in 0..=self.rows {
            let v = row as f32 / self.rows as f32;
            for column in 0..=self.columns {
                let u = column as f32 / self.columns as f32;
                let position = self.center
                    + self.u_axis * ((u - 0.5) * self.extent.x)
                    + self.v_axis * ((v - 0.5) * self.extent.y);
                let vertex = Vertex::new(position, self.normal, Vec2::new(u, v))
                    .with_frame(self.u_axis, self.v_axis);
                writer.vertex(vertex)?;
            }
        }
        writer.grid(base, self.columns, self.rows)
    }
}

fn grid_counts(columns: u64, rows: u64) -> MeshCounts {
    MeshCounts {
        vertices: (columns + 1) * (rows + 1),
        indices: 6 * columns * rows,
    }
}

impl Shape for PlaneConfig {
    const KIND: ShapeKind = ShapeKind::Plane;

    fn common(&self) -> &CommonConfig {
        &self.common
    }

    fn validate(&self) -> Result<()> {
        check_divisions("div_x", self.div_x, 1)?;
        check_divisions("div_y", self.div_y, 1)?;
        check_dimension("size_x", self.size_x)?;
        check_dimension("size_y", self.size_y)
    }

    fn counts(&self) -> MeshCounts {
        grid_counts(self.div_x.into(), self.div_y.into())
    }

    fn emit(&self, writer: &mut MeshWriter) -> Result<()> {
        Face {
            center: Vec3::ZERO,
            normal: Vec3::Z,
            u_axis: Vec3::X,
            v_axis: Vec3::Y,
            extent: Vec2::new(self.size_x, self.size_y),
            columns: self.div_x.into(),
            rows: self.div_y.into(),
        }
        .emit(writer)
    }
}

impl Shape for CuboidConfig {
    const KIND: ShapeKind = ShapeKind::Cuboid;

    fn common(&self) -> &CommonConfig {
        &self.common
    }

    fn validate(&self) -> Result<()> {
        check_divisions("div_x", self.div_x, 1)?;
        check_divisions("div_y", self.div_y, 1)?;
        check_divisions("div_z", self.div_z, 1)?;
        check_dimension("size_x", self.size_x)?;
        check_dimension("size_y", self.size_y)?;
        check_dimension("size_z", self.size_z)
    }

    fn counts(&self) -> MeshCounts {
        let (x, y, z) = (
            u64::from(self.div_x),
            u64::from(self.div_y),
            u64::from(self.div_z),
        );
        let faces = [grid_counts(z, y), grid_counts(x, z), grid_counts(x, y)];
        MeshCounts {
            vertices: 2 * faces.iter().map(|c| c.vertices).sum::<u64>(),
            indices: 2 * faces.iter().map(|c| c.indices).sum::<u64>(),
        }
    }

    fn emit(&self, writer: &mut MeshWriter) -> Result<()> {
        let size = Vec3::new(self.size_x, self.size_y, self.size_z);
        let (x, y, z) = (
            u32::from(self.div_x),
            u32::from(self.div_y),
            u32::from(self.div_z),
        );

        // (normal, u axis, v axis, u divisions, v divisions)
        let faces = [
            (Vec3::X, Vec3::NEG_Z, Vec3::Y, z, y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y, z, y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z, x, z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z, x, z),
            (Vec3::Z, Vec3::X, Vec3::Y, x, y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y, x, y),
        ];

        for (normal, u_axis, v_axis, columns, rows) in faces {
            Face {
                center: normal * size * 0.5,
                normal,
                u_axis,
                v_axis,
                extent: Vec2::new(u_axis.abs().dot(size), v_axis.abs().dot(size)),
                columns,
                rows,
            }
            .emit(writer)?;
        }
        Ok(())
    }
}
