//! Regular polygonal solids (prism, pyramid)
//!
//! Each facet is its own patch so neighbouring facets never share vertices,
//! giving hard edges. The caps sweep the whole polygon outline.

use glam::Vec2;

use super::{MeshCounts, Shape};
use crate::config::{CommonConfig, PrismConfig, PyramidConfig};
use crate::error::Result;
use crate::surface::{Mapping, Run, line, sweep};
use crate::types::ShapeKind;
use crate::validate::{check_dimension, check_divisions};
use crate::writer::MeshWriter;

fn validate_polygon(
    num_facets: u16,
    div_per_facet_radial: u16,
    div_axial: u16,
    div_rings: u16,
    radius: f32,
    length: f32,
) -> Result<()> {
    check_divisions("num_facets", num_facets, 3)?;
    check_divisions("div_per_facet_radial", div_per_facet_radial, 1)?;
    check_divisions("div_axial", div_axial, 1)?;
    check_divisions("div_rings", div_rings, 1)?;
    check_dimension("radius", radius)?;
    check_dimension("length", length)
}

impl Shape for PrismConfig {
    const KIND: ShapeKind = ShapeKind::Prism;

    fn common(&self) -> &CommonConfig {
        &self.common
    }

    fn validate(&self) -> Result<()> {
        validate_polygon(
            self.num_facets,
            self.div_per_facet_radial,
            self.div_axial,
            self.div_rings,
            self.radius,
            self.length,
        )
    }

    fn counts(&self) -> MeshCounts {
        let f = u64::from(self.num_facets);
        let d = u64::from(self.div_per_facet_radial);
        let a = u64::from(self.div_axial);
        let g = u64::from(self.div_rings);
        let c = f * d;
        MeshCounts {
            vertices: f * (a + 1) * (d + 1) + 2 * (g * (c + 1) + c),
            indices: 6 * c * (a + 2 * g - 1),
        }
    }

    fn emit(&self, writer: &mut MeshWriter) -> Result<()> {
        let facets = u32::from(self.num_facets);
        let divisions = u32::from(self.div_per_facet_radial);
        let (r, h) = (self.radius, self.length * 0.5);
        let rings = u32::from(self.div_rings);

        let side = line(Vec2::new(r, -h), Vec2::new(r, h), self.div_axial.into());
        for facet in 0..facets {
            let run = Run::facet(facets, facet, divisions);
            sweep(writer, &run, &side, Mapping::Wrapped)?;
        }

        let outline = Run::polygon(facets, divisions);
        let bottom = line(Vec2::new(0.0, -h), Vec2::new(r, -h), rings);
        let top = line(Vec2::new(r, h), Vec2::new(0.0, h), rings);
        sweep(writer, &outline, &bottom, Mapping::PlanarBottom(r))?;
        sweep(writer, &outline, &top, Mapping::PlanarTop(r))
    }
}

impl Shape for PyramidConfig {
    const KIND: ShapeKind = ShapeKind::Pyramid;

    fn common(&self) -> &CommonConfig {
        &self.common
    }

    fn validate(&self) -> Result<()> {
        validate_polygon(
            self.num_facets,
            self.div_per_facet_radial,
            self.div_axial,
            self.div_rings,
            self.radius,
            self.length,
        )
    }

    fn counts(&self) -> MeshCounts {
        let f = u64::from(self.num_facets);
        let d = u64::from(self.div_per_facet_radial);
        let a = u64::from(self.div_axial);
        let g = u64::from(self.div_rings);
        let c = f * d;
        MeshCounts {
            vertices: f * (a * (d + 1) + d) + g * (c + 1) + c,
            indices: 6 * c * (a + g - 1),
        }
    }

    fn emit(&self, writer: &mut MeshWriter) -> Result<()> {
        let facets = u32::from(self.num_facets);
        let divisions = u32::from(self.div_per_facet_radial);
        let (r, h) = (self.radius, self.length * 0.5);

        let side = line(Vec2::new(r, -h), Vec2::new(0.0, h), self.div_axial.into());
        for facet in 0..facets {
            let run = Run::facet(facets, facet, divisions);
            sweep(writer, &run, &side, Mapping::Wrapped)?;
        }

        let outline = Run::polygon(facets, divisions);
        let bottom = line(Vec2::new(0.0, -h), Vec2::new(r, -h), self.div_rings.into());
        sweep(writer, &outline, &bottom, Mapping::PlanarBottom(r))
    }
}
