//! Property tests: structural invariants of every generator over random
//! valid parameters.

use lattica::*;
use proptest::prelude::*;

fn dimension() -> impl Strategy<Value = f32> {
    0.05f32..4.0
}

fn common() -> impl Strategy<Value = CommonConfig> {
    prop_oneof![Just(WindingOrder::CounterClockwise), Just(WindingOrder::Clockwise)].prop_map(
        |winding_order| CommonConfig {
            winding_order,
            ..Default::default()
        },
    )
}

fn plane() -> impl Strategy<Value = ShapeConfig> {
    (1u16..12, 1u16..12, dimension(), dimension(), common()).prop_map(
        |(div_x, div_y, size_x, size_y, common)| PlaneConfig {
            div_x,
            div_y,
            size_x,
            size_y,
            common,
        }
        .into()
    )
}

fn cuboid() -> impl Strategy<Value = ShapeConfig> {
    (1u16..6, 1u16..6, 1u16..6, dimension(), dimension(), dimension(), common()).prop_map(
        |(div_x, div_y, div_z, size_x, size_y, size_z, common)| CuboidConfig {
            div_x,
            div_y,
            div_z,
            size_x,
            size_y,
            size_z,
            common,
        }
        .into()
    )
}

fn sphere() -> impl Strategy<Value = ShapeConfig> {
    (3u16..24, 2u16..16, dimension(), common()).prop_map(
        |(div_longitude, div_latitude, radius, common)| SphereConfig {
            div_longitude,
            div_latitude,
            radius,
            common,
        }
        .into()
    )
}

fn cylinder() -> impl Strategy<Value = ShapeConfig> {
    (3u16..16, 1u16..5, 1u16..5, dimension(), dimension(), common()).prop_map(
        |(div_radial, div_axial, div_rings, length, radius, common)| CylinderConfig {
            div_radial,
            div_axial,
            div_rings,
            length,
            radius,
            common,
        }
        .into()
    )
}

fn cone() -> impl Strategy<Value = ShapeConfig> {
    (3u16..16, 1u16..5, 1u16..5, dimension(), dimension(), common()).prop_map(
        |(div_radial, div_axial, div_rings, radius, length, common)| ConeConfig {
            div_radial,
            div_axial,
            div_rings,
            radius,
            length,
            common,
        }
        .into()
    )
}

fn prism() -> impl Strategy<Value = ShapeConfig> {
    (3u16..9, 1u16..4, 1u16..4, 1u16..4, dimension(), dimension(), common()).prop_map(
        |(num_facets, div_per_facet_radial, div_axial, div_rings, radius, length, common)| {
            PrismConfig {
                num_facets,
                div_per_facet_radial,
                div_axial,
                div_rings,
                radius,
                length,
                common,
            }
            .into()
        }
    )
}

fn pyramid() -> impl Strategy<Value = ShapeConfig> {
    (3u16..9, 1u16..4, 1u16..4, 1u16..4, dimension(), dimension(), common()).prop_map(
        |(num_facets, div_per_facet_radial, div_axial, div_rings, radius, length, common)| {
            PyramidConfig {
                num_facets,
                div_per_facet_radial,
                div_axial,
                div_rings,
                radius,
                length,
                common,
            }
            .into()
        }
    )
}

fn tube() -> impl Strategy<Value = ShapeConfig> {
    (3u16..16, 1u16..5, 1u16..5, dimension(), 0.2f32..4.0, 0.1f32..0.95, common()).prop_map(
        |(div_radial, div_axial, div_rings, length, outer_radius, ratio, common)| TubeConfig {
            div_radial,
            div_axial,
            div_rings,
            length,
            outer_radius,
            inner_radius: outer_radius * ratio,
            common,
        }
        .into()
    )
}

fn capsule() -> impl Strategy<Value = ShapeConfig> {
    (3u16..16, 1u16..5, 1u16..8, dimension(), dimension(), common()).prop_map(
        |(div_radial, div_axial, div_latitude, radius, cylinder_length, common)| {
            CapsuleConfig {
                div_radial,
                div_axial,
                div_latitude,
                radius,
                cylinder_length,
                common,
            }
            .into()
        }
    )
}

fn torus() -> impl Strategy<Value = ShapeConfig> {
    (3u16..16, 3u16..24, 0.2f32..4.0, 0.1f32..0.9, common()).prop_map(
        |(div_radial_minor, div_radial_major, major_radius, ratio, common)| TorusConfig {
            div_radial_minor,
            div_radial_major,
            minor_radius: major_radius * ratio,
            major_radius,
            common,
        }
        .into()
    )
}

fn torus_knot() -> impl Strategy<Value = ShapeConfig> {
    (3u16..12, 3u16..96, 0.2f32..4.0, 0.1f32..0.9, 0.01f32..0.2, 1i32..6, 1i32..6, common())
        .prop_map(
            |(div_radial, div_tubular, radius, ratio, tube_radius, p, q, common)| {
                TorusKnotConfig {
                    div_radial,
                    div_tubular,
                    radius,
                    torus_radius: radius * ratio,
                    tube_radius,
                    p,
                    q,
                    common,
                }
                .into()
            }
        )
}

fn shape() -> impl Strategy<Value = ShapeConfig> {
    prop_oneof![
        plane(),
        cuboid(),
        sphere(),
        cylinder(),
        cone(),
        prism(),
        pyramid(),
        tube(),
        capsule(),
        torus(),
        torus_knot(),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_indices_in_range_and_distinct(config in shape()) {
        let geometry = generate(&config, AttribFlags::POSITION).unwrap();
        let vertices = geometry.num_vertices();

        for [a, b, c] in geometry.triangles() {
            prop_assert!(a < vertices && b < vertices && c < vertices);
            prop_assert!(a != b && b != c && a != c);
        }
        prop_assert_eq!(geometry.num_indices() % 3, 0);
    }

    #[test]
    fn prop_counts_match_closed_form(config in shape()) {
        let counts = config.counts().unwrap();
        let geometry = generate(&config, AttribFlags::POSITION | AttribFlags::NORMAL).unwrap();

        prop_assert_eq!(u64::from(geometry.num_vertices()), counts.vertices);
        prop_assert_eq!(u64::from(geometry.num_indices()), counts.indices);
        prop_assert_eq!(geometry.positions().unwrap().len() as u64, counts.vertices);
        prop_assert_eq!(
            geometry.index_buffer().unwrap().size(),
            IndexSize::for_vertex_count(counts.vertices).unwrap()
        );
    }

    #[test]
    fn prop_shading_frame_is_unit(config in shape()) {
        let geometry = generate(&config, AttribFlags::all()).unwrap();

        for n in geometry.normals().unwrap() {
            let length = glam::Vec3::from_array(*n).length();
            prop_assert!((length - 1.0).abs() < 1e-4, "normal length {}", length);
        }
        for t in geometry.tangents().unwrap() {
            let length = glam::Vec3::new(t[0], t[1], t[2]).length();
            prop_assert!((length - 1.0).abs() < 1e-4, "tangent length {}", length);
            prop_assert!(t[3] == 1.0 || t[3] == -1.0);
        }
        for uv in geometry.texcoords().unwrap() {
            prop_assert!((-1e-6..=1.0 + 1e-6).contains(&uv[0]));
            prop_assert!((-1e-6..=1.0 + 1e-6).contains(&uv[1]));
        }
    }

    #[test]
    fn prop_winding_only_reorders(config in shape()) {
        let mut flipped = config;
        flipped.common_mut().winding_order = match config.common().winding_order {
            WindingOrder::CounterClockwise => WindingOrder::Clockwise,
            WindingOrder::Clockwise => WindingOrder::CounterClockwise,
        };

        let a = generate(&config, AttribFlags::POSITION).unwrap();
        let b = generate(&flipped, AttribFlags::POSITION).unwrap();
        prop_assert_eq!(a.positions(), b.positions());
        for ([x, y, z], reversed) in a.triangles().zip(b.triangles()) {
            prop_assert_eq!(reversed, [x, z, y]);
        }
    }
}
