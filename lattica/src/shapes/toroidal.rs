//! Closed tubes (torus, torus knot)

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use super::{MeshCounts, Shape};
use crate::config::{CommonConfig, TorusConfig, TorusKnotConfig};
use crate::error::Result;
use crate::surface::{Mapping, ProfilePoint, Run, sweep};
use crate::types::ShapeKind;
use crate::validate::{check_dimension, check_divisions, check_frequency, check_less};
use crate::writer::{MeshWriter, Vertex};

impl Shape for TorusConfig {
    const KIND: ShapeKind = ShapeKind::Torus;

    fn common(&self) -> &CommonConfig {
        &self.common
    }

    fn validate(&self) -> Result<()> {
        check_divisions("div_radial_minor", self.div_radial_minor, 3)?;
        check_divisions("div_radial_major", self.div_radial_major, 3)?;
        check_dimension("minor_radius", self.minor_radius)?;
        check_dimension("major_radius", self.major_radius)?;
        check_less(
            "minor_radius",
            self.minor_radius,
            "major_radius",
            self.major_radius,
        )
    }

    fn counts(&self) -> MeshCounts {
        let major = u64::from(self.div_radial_major);
        let minor = u64::from(self.div_radial_minor);
        MeshCounts {
            vertices: (major + 1) * (minor + 1),
            indices: 6 * major * minor,
        }
    }

    /// The tube cross-section is the profile, swept around Y. The last
    /// profile point repeats the first so the minor seam is bit-identical.
    fn emit(&self, writer: &mut MeshWriter) -> Result<()> {
        let minor = u32::from(self.div_radial_minor);
        let (major_radius, minor_radius) = (self.major_radius, self.minor_radius);

        let profile: Vec<ProfilePoint> = (0..=minor)
            .map(|j| {
                let phi = TAU * (j % minor) as f32 / minor as f32;
                let (sin, cos) = phi.sin_cos();
                ProfilePoint::ring(
                    major_radius + minor_radius * cos,
                    minor_radius * sin,
                    Vec2::new(-sin, cos),
                    j as f32 / minor as f32,
                )
            })
            .collect();

        sweep(
            writer,
            &Run::circle(self.div_radial_major.into()),
            &profile,
            Mapping::Wrapped,
        )
    }
}

impl TorusKnotConfig {
    /// Point on the knot curve and its derivative at `phi`
    fn curve(&self, phi: f32) -> (Vec3, Vec3) {
        let (p, q) = (self.p as f32, self.q as f32);
        let (big, small) = (self.radius, self.torus_radius);
        let (sin_p, cos_p) = (p * phi).sin_cos();
        let (sin_q, cos_q) = (q * phi).sin_cos();

        let rho = big + small * cos_q;
        let rho_prime = -small * q * sin_q;

        let position = Vec3::new(rho * cos_p, small * sin_q, -rho * sin_p);
        let derivative = Vec3::new(
            rho_prime * cos_p - rho * p * sin_p,
            small * q * cos_q,
            -rho_prime * sin_p - rho * p * cos_p,
        );
        (position, derivative)
    }
}

impl Shape for TorusKnotConfig {
    const KIND: ShapeKind = ShapeKind::TorusKnot;

    fn common(&self) -> &CommonConfig {
        &self.common
    }

    fn validate(&self) -> Result<()> {
        check_divisions("div_radial", self.div_radial, 3)?;
        check_divisions("div_tubular", self.div_tubular, 3)?;
        check_dimension("radius", self.radius)?;
        check_dimension("torus_radius", self.torus_radius)?;
        check_dimension("tube_radius", self.tube_radius)?;
        check_frequency("p", self.p)?;
        check_frequency("q", self.q)?;
        check_less("torus_radius", self.torus_radius, "radius", self.radius)
    }

    fn counts(&self) -> MeshCounts {
        let radial = u64::from(self.div_radial);
        let tubular = u64::from(self.div_tubular);
        MeshCounts {
            vertices: (tubular + 1) * (radial + 1),
            indices: 6 * tubular * radial,
        }
    }

    /// Rows follow the curve, columns go around the tube. The frame uses the
    /// curve tangent and the position vector, both periodic in `phi`, so the
    /// last row repeats the first exactly.
    fn emit(&self, writer: &mut MeshWriter) -> Result<()> {
        let radial = u32::from(self.div_radial);
        let tubular = u32::from(self.div_tubular);
        let needs = writer.needs();
        let base = writer.next_index();

        for i in 0..=tubular {
            let phi = TAU * (i % tubular) as f32 / tubular as f32;
            let (center, derivative) = self.curve(phi);
            let tangent = derivative.normalize();
            let binormal = tangent.cross(center).normalize();
            let normal = binormal.cross(tangent);
            let v = i as f32 / tubular as f32;

            for j in 0..=radial {
                let alpha = TAU * (j % radial) as f32 / radial as f32;
                let (sin, cos) = alpha.sin_cos();
                let offset = normal * cos + binormal * sin;
                let uv = if needs.uv {
                    Vec2::new(j as f32 / radial as f32, v)
                } else {
                    Vec2::ZERO
                };

                let mut vertex = Vertex::new(center + offset * self.tube_radius, offset, uv);
                if needs.frame {
                    vertex = vertex.with_frame(binormal * cos - normal * sin, tangent);
                }
                writer.vertex(vertex)?;
            }
        }

        writer.grid(base, radial, tubular)
    }
}
