//! Shapes with spherical caps (sphere, capsule)

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;

use super::{MeshCounts, Shape};
use crate::config::{CapsuleConfig, CommonConfig, SphereConfig};
use crate::error::Result;
use crate::surface::{Mapping, ProfilePoint, Run, latitude, sweep};
use crate::types::ShapeKind;
use crate::validate::{check_dimension, check_divisions};
use crate::writer::MeshWriter;

impl Shape for SphereConfig {
    const KIND: ShapeKind = ShapeKind::Sphere;

    fn common(&self) -> &CommonConfig {
        &self.common
    }

    fn validate(&self) -> Result<()> {
        check_divisions("div_longitude", self.div_longitude, 3)?;
        check_divisions("div_latitude", self.div_latitude, 2)?;
        check_dimension("radius", self.radius)
    }

    fn counts(&self) -> MeshCounts {
        let l = u64::from(self.div_longitude);
        let m = u64::from(self.div_latitude);
        MeshCounts {
            vertices: (m - 1) * (l + 1) + 2 * l,
            indices: 6 * l * (m - 1),
        }
    }

    fn emit(&self, writer: &mut MeshWriter) -> Result<()> {
        let bands = u32::from(self.div_latitude);
        let r = self.radius;

        let mut profile = Vec::with_capacity(bands as usize + 1);
        profile.push(ProfilePoint::pole(-r, Vec2::X, 0.0));
        for k in 1..bands {
            let t = k as f32 / bands as f32;
            profile.push(latitude(0.0, r, -FRAC_PI_2 + PI * t, t));
        }
        profile.push(ProfilePoint::pole(r, Vec2::NEG_X, 1.0));

        sweep(
            writer,
            &Run::circle(self.div_longitude.into()),
            &profile,
            Mapping::Wrapped,
        )
    }
}

impl Shape for CapsuleConfig {
    const KIND: ShapeKind = ShapeKind::Capsule;

    fn common(&self) -> &CommonConfig {
        &self.common
    }

    fn validate(&self) -> Result<()> {
        check_divisions("div_radial", self.div_radial, 3)?;
        check_divisions("div_axial", self.div_axial, 1)?;
        check_divisions("div_latitude", self.div_latitude, 1)?;
        check_dimension("radius", self.radius)?;
        check_dimension("cylinder_length", self.cylinder_length)
    }

    fn counts(&self) -> MeshCounts {
        let l = u64::from(self.div_radial);
        let a = u64::from(self.div_axial);
        let m = u64::from(self.div_latitude);
        let rings = 2 * m + a - 1;
        MeshCounts {
            vertices: rings * (l + 1) + 2 * l,
            indices: 6 * l * rings,
        }
    }

    /// One continuous profile: south cap, body, north cap. Each cap's equator
    /// is the body's end ring, and v follows arc length.
    fn emit(&self, writer: &mut MeshWriter) -> Result<()> {
        let bands = u32::from(self.div_latitude);
        let axial = u32::from(self.div_axial);
        let r = self.radius;
        let body = self.cylinder_length;
        let half = body * 0.5;
        let arc = PI * r + body;
        let quarter = FRAC_PI_2 * r;

        let mut profile = Vec::with_capacity((2 * bands + axial + 1) as usize);
        profile.push(ProfilePoint::pole(-half - r, Vec2::X, 0.0));
        for k in 1..=bands {
            let t = k as f32 / bands as f32;
            let beta = if k == bands { 0.0 } else { -FRAC_PI_2 + FRAC_PI_2 * t };
            profile.push(latitude(-half, r, beta, quarter * t / arc));
        }
        for k in 1..=axial {
            let t = k as f32 / axial as f32;
            let y = if k == axial { half } else { -half + body * t };
            profile.push(ProfilePoint::ring(r, y, Vec2::Y, (quarter + body * t) / arc));
        }
        for k in 1..bands {
            let t = k as f32 / bands as f32;
            let v = (quarter + body + quarter * t) / arc;
            profile.push(latitude(half, r, FRAC_PI_2 * t, v));
        }
        profile.push(ProfilePoint::pole(half + r, Vec2::NEG_X, 1.0));

        sweep(
            writer,
            &Run::circle(self.div_radial.into()),
            &profile,
            Mapping::Wrapped,
        )
    }
}
