//! Straight-sided solids of revolution (cylinder, cone, tube)

use glam::Vec2;

use super::{MeshCounts, Shape};
use crate::config::{CommonConfig, ConeConfig, CylinderConfig, TubeConfig};
use crate::error::Result;
use crate::surface::{Mapping, Run, line, sweep};
use crate::types::ShapeKind;
use crate::validate::{check_dimension, check_divisions, check_less};
use crate::writer::MeshWriter;

impl Shape for CylinderConfig {
    const KIND: ShapeKind = ShapeKind::Cylinder;

    fn common(&self) -> &CommonConfig {
        &self.common
    }

    fn validate(&self) -> Result<()> {
        check_divisions("div_radial", self.div_radial, 3)?;
        check_divisions("div_axial", self.div_axial, 1)?;
        check_divisions("div_rings", self.div_rings, 1)?;
        check_dimension("length", self.length)?;
        check_dimension("radius", self.radius)
    }

    fn counts(&self) -> MeshCounts {
        let l = u64::from(self.div_radial);
        let a = u64::from(self.div_axial);
        let g = u64::from(self.div_rings);
        MeshCounts {
            vertices: (a + 1) * (l + 1) + 2 * (g * (l + 1) + l),
            indices: 6 * l * (a + 2 * g - 1),
        }
    }

    fn emit(&self, writer: &mut MeshWriter) -> Result<()> {
        let run = Run::circle(self.div_radial.into());
        let (r, h) = (self.radius, self.length * 0.5);
        let (axial, rings) = (u32::from(self.div_axial), u32::from(self.div_rings));

        let bottom = line(Vec2::new(0.0, -h), Vec2::new(r, -h), rings);
        let side = line(Vec2::new(r, -h), Vec2::new(r, h), axial);
        let top = line(Vec2::new(r, h), Vec2::new(0.0, h), rings);

        sweep(writer, &run, &bottom, Mapping::PlanarBottom(r))?;
        sweep(writer, &run, &side, Mapping::Wrapped)?;
        sweep(writer, &run, &top, Mapping::PlanarTop(r))
    }
}

impl Shape for ConeConfig {
    const KIND: ShapeKind = ShapeKind::Cone;

    fn common(&self) -> &CommonConfig {
        &self.common
    }

    fn validate(&self) -> Result<()> {
        check_divisions("div_radial", self.div_radial, 3)?;
        check_divisions("div_axial", self.div_axial, 1)?;
        check_divisions("div_rings", self.div_rings, 1)?;
        check_dimension("radius", self.radius)?;
        check_dimension("length", self.length)
    }

    fn counts(&self) -> MeshCounts {
        let l = u64::from(self.div_radial);
        let a = u64::from(self.div_axial);
        let g = u64::from(self.div_rings);
        MeshCounts {
            vertices: (a + g) * (l + 1) + 2 * l,
            indices: 6 * l * (a + g - 1),
        }
    }

    fn emit(&self, writer: &mut MeshWriter) -> Result<()> {
        let run = Run::circle(self.div_radial.into());
        let (r, h) = (self.radius, self.length * 0.5);

        let bottom = line(Vec2::new(0.0, -h), Vec2::new(r, -h), self.div_rings.into());
        let side = line(Vec2::new(r, -h), Vec2::new(0.0, h), self.div_axial.into());

        sweep(writer, &run, &bottom, Mapping::PlanarBottom(r))?;
        sweep(writer, &run, &side, Mapping::Wrapped)
    }
}

impl Shape for TubeConfig {
    const KIND: ShapeKind = ShapeKind::Tube;

    fn common(&self) -> &CommonConfig {
        &self.common
    }

    fn validate(&self) -> Result<()> {
        check_divisions("div_radial", self.div_radial, 3)?;
        check_divisions("div_axial", self.div_axial, 1)?;
        check_divisions("div_rings", self.div_rings, 1)?;
        check_dimension("length", self.length)?;
        check_dimension("outer_radius", self.outer_radius)?;
        check_dimension("inner_radius", self.inner_radius)?;
        check_less(
            "inner_radius",
            self.inner_radius,
            "outer_radius",
            self.outer_radius,
        )
    }

    fn counts(&self) -> MeshCounts {
        let l = u64::from(self.div_radial);
        let a = u64::from(self.div_axial);
        let g = u64::from(self.div_rings);
        MeshCounts {
            vertices: 2 * (l + 1) * (a + g + 2),
            indices: 12 * l * (a + g),
        }
    }

    /// Outer wall up, top annulus inwards, inner wall down, bottom annulus
    /// outwards
    fn emit(&self, writer: &mut MeshWriter) -> Result<()> {
        let run = Run::circle(self.div_radial.into());
        let (outer, inner, h) = (self.outer_radius, self.inner_radius, self.length * 0.5);
        let (axial, rings) = (u32::from(self.div_axial), u32::from(self.div_rings));

        let outer_wall = line(Vec2::new(outer, -h), Vec2::new(outer, h), axial);
        let top = line(Vec2::new(outer, h), Vec2::new(inner, h), rings);
        let inner_wall = line(Vec2::new(inner, h), Vec2::new(inner, -h), axial);
        let bottom = line(Vec2::new(inner, -h), Vec2::new(outer, -h), rings);

        sweep(writer, &run, &outer_wall, Mapping::Wrapped)?;
        sweep(writer, &run, &top, Mapping::PlanarTop(outer))?;
        sweep(writer, &run, &inner_wall, Mapping::Wrapped)?;
        sweep(writer, &run, &bottom, Mapping::PlanarBottom(outer))
    }
}
