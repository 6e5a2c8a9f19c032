//! Swept surface patches
//!
//! Every revolved or faceted shape is assembled from patches: a horizontal
//! outline [`Run`] (a circle, one polygon facet or a whole polygon) swept
//! along a vertical profile of [`ProfilePoint`]s given in (radius, height)
//! coordinates. A vertex sits at
//!
//! ```text
//! position = (radius * offset.x, y, radius * offset.y)
//! ```
//!
//! with u running along the run and v along the profile, oriented so that
//! `dP/du x dP/dv` points out of the solid.
//!
//! A profile point with zero radius is a pole. Instead of a full ring it gets
//! one vertex per run segment, placed at the pole and carrying the segment's
//! midpoint u and normal, and each pole-adjacent cell emits a single triangle.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use tracing::trace;

use crate::error::{Error, Result};
use crate::writer::{MeshWriter, Needs, Vertex};

/// One sample of an outline run
#[derive(Clone, Copy, Debug)]
pub(crate) struct Column {
    /// Point of the unit outline in (x, z)
    pub offset: Vec2,
    /// Outward unit normal of the outline in (x, z)
    pub normal: Vec2,
    /// Unit direction of increasing u in (x, z)
    pub tangent: Vec2,
    pub u: f32,
}

/// Horizontal outline swept by a patch
#[derive(Clone, Debug)]
pub(crate) struct Run {
    /// `segments + 1` samples; the last one closes the seam at u = 1
    pub columns: Vec<Column>,
    /// Segment midpoints, used by pole rows
    pub midpoints: Vec<Column>,
}

impl Run {
    /// Unit circle split into `segments` arcs, starting on +X and turning
    /// towards -Z
    pub fn circle(segments: u32) -> Self {
        let column = |s: f32| {
            let theta = TAU * s / segments as f32;
            let (sin, cos) = theta.sin_cos();
            let offset = Vec2::new(cos, -sin);
            Column {
                offset,
                normal: offset,
                tangent: Vec2::new(-sin, -cos),
                u: s / segments as f32,
            }
        };

        let mut columns: Vec<Column> = (0..segments).map(|s| column(s as f32)).collect();
        columns.push(Column { u: 1.0, ..columns[0] });
        let midpoints = (0..segments).map(|s| column(s as f32 + 0.5)).collect();

        Self { columns, midpoints }
    }

    /// Edge `facet` of the regular `facets`-gon inscribed in the unit circle,
    /// split into `divisions` segments
    pub fn facet(facets: u32, facet: u32, divisions: u32) -> Self {
        let start = corner(facets, facet);
        let end = corner(facets, facet + 1);
        let tangent = (end - start).normalize();
        let normal = Vec2::new(-tangent.y, tangent.x);

        let column = |t: f32, offset: Vec2| Column {
            offset,
            normal,
            tangent,
            u: (facet as f32 + t) / facets as f32,
        };

        let mut columns: Vec<Column> = (0..divisions)
            .map(|i| {
                let t = i as f32 / divisions as f32;
                column(t, start.lerp(end, t))
            })
            .collect();
        columns.push(column(1.0, end));

        let midpoints = (0..divisions)
            .map(|i| {
                let t = (i as f32 + 0.5) / divisions as f32;
                column(t, start.lerp(end, t))
            })
            .collect();

        Self { columns, midpoints }
    }

    /// Whole regular polygon, every facet split into `divisions` segments
    pub fn polygon(facets: u32, divisions: u32) -> Self {
        let mut columns = Vec::with_capacity((facets * divisions + 1) as usize);
        let mut midpoints = Vec::with_capacity((facets * divisions) as usize);
        for facet in 0..facets {
            let run = Run::facet(facets, facet, divisions);
            columns.extend_from_slice(&run.columns[..divisions as usize]);
            midpoints.extend(run.midpoints);
        }
        columns.push(Column { u: 1.0, ..columns[0] });

        Self { columns, midpoints }
    }

    pub fn segments(&self) -> u32 {
        self.midpoints.len() as u32
    }
}

/// Polygon corner `index` (taken modulo `facets`) on the unit circle
fn corner(facets: u32, index: u32) -> Vec2 {
    let theta = TAU * (index % facets) as f32 / facets as f32;
    let (sin, cos) = theta.sin_cos();
    Vec2::new(cos, -sin)
}

/// One sample of a patch profile
#[derive(Clone, Copy, Debug)]
pub(crate) struct ProfilePoint {
    pub radius: f32,
    pub y: f32,
    /// Unit direction of increasing v in (radius, y)
    pub slope: Vec2,
    pub v: f32,
    pub pole: bool,
}

impl ProfilePoint {
    pub fn ring(radius: f32, y: f32, slope: Vec2, v: f32) -> Self {
        Self {
            radius,
            y,
            slope,
            v,
            pole: false,
        }
    }

    pub fn pole(y: f32, slope: Vec2, v: f32) -> Self {
        Self {
            radius: 0.0,
            y,
            slope,
            v,
            pole: true,
        }
    }
}

/// Straight profile from `from` to `to`, both (radius, y), in `steps` steps
///
/// Endpoints with zero radius become poles.
pub(crate) fn line(from: Vec2, to: Vec2, steps: u32) -> Vec<ProfilePoint> {
    let slope = (to - from).normalize();
    (0..=steps)
        .map(|k| {
            let t = k as f32 / steps as f32;
            let point = if k == steps { to } else { from.lerp(to, t) };
            let at_end = k == 0 || k == steps;
            if at_end && point.x == 0.0 {
                ProfilePoint::pole(point.y, slope, t)
            } else {
                ProfilePoint::ring(point.x, point.y, slope, t)
            }
        })
        .collect()
}

/// Ring at latitude `beta` of a sphere of `radius` centred at `center_y`
pub(crate) fn latitude(center_y: f32, radius: f32, beta: f32, v: f32) -> ProfilePoint {
    let (sin, cos) = beta.sin_cos();
    ProfilePoint::ring(radius * cos, center_y + radius * sin, Vec2::new(-sin, cos), v)
}

/// Texture coordinate layout of a patch
#[derive(Clone, Copy, Debug)]
pub(crate) enum Mapping {
    /// u along the run, v along the profile
    Wrapped,
    /// Upward facing disc or annulus projected onto XZ
    PlanarTop(f32),
    /// Downward facing disc or annulus projected onto XZ
    PlanarBottom(f32),
}

fn surface_vertex(
    column: &Column,
    point: &ProfilePoint,
    mapping: Mapping,
    needs: Needs,
) -> Vertex {
    let o = column.offset;
    let s = point.slope;

    let position = Vec3::new(point.radius * o.x, point.y, point.radius * o.y);
    let normal = if needs.normal {
        let m = column.normal;
        Vec3::new(s.y * m.x, -s.x * o.dot(m), s.y * m.y).normalize()
    } else {
        Vec3::ZERO
    };

    match mapping {
        Mapping::Wrapped => {
            let uv = if needs.uv { Vec2::new(column.u, point.v) } else { Vec2::ZERO };
            let vertex = Vertex::new(position, normal, uv);
            if needs.frame {
                let tangent = Vec3::new(column.tangent.x, 0.0, column.tangent.y);
                let bitangent = Vec3::new(s.x * o.x, s.y, s.x * o.y).normalize();
                vertex.with_frame(tangent, bitangent)
            } else {
                vertex
            }
        }
        Mapping::PlanarTop(extent) => {
            let uv = if needs.uv {
                Vec2::new(0.5 + 0.5 * position.x / extent, 0.5 - 0.5 * position.z / extent)
            } else {
                Vec2::ZERO
            };
            Vertex::new(position, normal, uv).with_frame(Vec3::X, Vec3::NEG_Z)
        }
        Mapping::PlanarBottom(extent) => {
            let uv = if needs.uv {
                Vec2::new(0.5 + 0.5 * position.x / extent, 0.5 + 0.5 * position.z / extent)
            } else {
                Vec2::ZERO
            };
            Vertex::new(position, normal, uv).with_frame(Vec3::X, Vec3::Z)
        }
    }
}

/// Sweep `run` along `profile`, emitting vertices row by row and the band
/// of triangles between consecutive rows
pub(crate) fn sweep(
    writer: &mut MeshWriter,
    run: &Run,
    profile: &[ProfilePoint],
    mapping: Mapping,
) -> Result<()> {
    let needs = writer.needs();
    let segments = run.segments();
    let first = writer.next_index();
    let mut previous: Option<(u32, bool)> = None;

    for point in profile {
        let row = writer.next_index();
        let columns = if point.pole { &run.midpoints } else { &run.columns };
        for column in columns {
            writer.vertex(surface_vertex(column, point, mapping, needs))?;
        }

        if let Some((lower, lower_pole)) = previous {
            band(writer, segments, (lower, lower_pole), (row, point.pole))?;
        }
        previous = Some((row, point.pole));
    }

    trace!(
        segments,
        rows = profile.len(),
        vertices = writer.next_index() - first,
        ?mapping,
        "swept patch"
    );
    Ok(())
}

fn band(
    writer: &mut MeshWriter,
    segments: u32,
    (lower, lower_pole): (u32, bool),
    (upper, upper_pole): (u32, bool),
) -> Result<()> {
    match (lower_pole, upper_pole) {
        (false, false) => writer.grid(lower, segments, 1),
        (true, false) => {
            (0..segments).try_for_each(|s| writer.triangle(lower + s, upper + s + 1, upper + s))
        }
        (false, true) => {
            (0..segments).try_for_each(|s| writer.triangle(lower + s, lower + s + 1, upper + s))
        }
        (true, true) => Err(Error::internal("profile joins two poles")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_seam_is_bit_identical() {
        let run = Run::circle(7);
        assert_eq!(run.columns.len(), 8);
        assert_eq!(run.segments(), 7);

        let first = run.columns[0];
        let last = run.columns[7];
        assert_eq!(first.offset, last.offset);
        assert_eq!(first.u, 0.0);
        assert_eq!(last.u, 1.0);
    }

    #[test]
    fn test_circle_turns_outward() {
        let run = Run::circle(4);
        // dP/du x up must point along the outward normal
        for column in &run.columns {
            let tangent = Vec3::new(column.tangent.x, 0.0, column.tangent.y);
            let outward = tangent.cross(Vec3::Y);
            let expected = Vec3::new(column.normal.x, 0.0, column.normal.y);
            assert!((outward - expected).length() < 1e-6);
        }
    }

    #[test]
    fn test_polygon_closes_on_corner() {
        let run = Run::polygon(5, 3);
        assert_eq!(run.columns.len(), 16);
        assert_eq!(run.midpoints.len(), 15);
        assert_eq!(run.columns[0].offset, run.columns[15].offset);

        // facet normals point away from the centre
        for column in &run.midpoints {
            assert!(column.offset.dot(column.normal) > 0.0);
        }
    }

    #[test]
    fn test_facet_ends_on_exact_corners() {
        let a = Run::facet(4, 0, 3);
        let b = Run::facet(4, 1, 3);
        assert_eq!(a.columns[3].offset, b.columns[0].offset);

        let last = Run::facet(4, 3, 3);
        assert_eq!(last.columns[3].offset, a.columns[0].offset);
    }

    #[test]
    fn test_line_marks_poles() {
        let cap = line(Vec2::new(0.0, -1.0), Vec2::new(2.0, -1.0), 3);
        assert_eq!(cap.len(), 4);
        assert!(cap[0].pole);
        assert!(cap[1..].iter().all(|p| !p.pole));
        assert_eq!(cap[3].radius, 2.0);

        let side = line(Vec2::new(1.0, -1.0), Vec2::new(0.0, 1.0), 2);
        assert!(side[2].pole);
        assert_eq!(side[2].y, 1.0);
    }

    #[test]
    fn test_skips_unrequested_quantities() {
        let run = Run::circle(4);
        let point = latitude(0.0, 1.0, 0.4, 0.7);
        let column = &run.columns[1];

        let bare = surface_vertex(column, &point, Mapping::Wrapped, Needs::default());
        assert_eq!(bare.normal, Vec3::ZERO);
        assert_eq!(bare.uv, Vec2::ZERO);
        assert_eq!(bare.tangent, Vec3::ZERO);

        let all = Needs {
            normal: true,
            uv: true,
            frame: true,
        };
        let full = surface_vertex(column, &point, Mapping::Wrapped, all);
        assert_eq!(bare.position, full.position);
        assert!((full.normal.length() - 1.0).abs() < 1e-6);
        assert_eq!(full.uv, Vec2::new(column.u, 0.7));
        assert!((full.bitangent.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_latitude_slope_is_tangent() {
        let point = latitude(0.0, 2.0, 0.3, 0.5);
        let radial = Vec2::new(point.radius, point.y);
        assert!(radial.dot(point.slope).abs() < 1e-6);
        assert!((radial.length() - 2.0).abs() < 1e-6);
    }
}
