use tracery::algorithms::{bold, BoldOptions};
use tracery::geom::{Arc, ArcFlags, SvgArc};
use tracery::math::{point, vector, Angle, Point};
use tracery::path::{BoundingBox, Curve, CurveKind, Matrix3, ParametricCurve, Path2D};
use tracery::svg::{parse_commands, parse_path, path_to_string, serialize_commands, SerializerOptions};

use std::f64::consts::{PI, TAU};

fn assert_near(a: Point, b: Point, epsilon: f64) {
    assert!((a - b).length() <= epsilon, "{:?} != {:?}", a, b);
}

#[test]
fn full_circle_quarters() {
    let mut path = Path2D::new();
    path.arc(point(0.0, 0.0), 1.0, Angle::zero(), Angle::radians(TAU), true);
    let circle = &path.subpaths()[0].segments()[0];

    assert_near(circle.sample(0.0), point(1.0, 0.0), 1e-9);
    assert_near(circle.sample(0.25), point(0.0, 1.0), 1e-9);
    assert_near(circle.sample(0.5), point(-1.0, 0.0), 1e-9);
    assert_near(circle.sample(0.75), point(0.0, -1.0), 1e-9);
}

#[test]
fn closed_triangle() {
    let path = parse_path("M0 0 L10 0 L10 10 Z").unwrap();
    assert_eq!(path.subpaths().len(), 1);

    let segments = path.subpaths()[0].segments();
    assert_eq!(segments.len(), 3);
    assert!(segments
        .iter()
        .all(|s| matches!(s.kind(), CurveKind::Line(_))));
    assert_eq!(
        path.bounding_box(),
        Some(BoundingBox::new(0.0, 0.0, 10.0, 10.0))
    );
}

#[test]
fn svg_half_circle() {
    let path = parse_path("M0 0 A5 5 0 0 1 10 0").unwrap();
    let segments = path.subpaths()[0].segments();
    assert_eq!(segments.len(), 1);

    let CurveKind::Arc(arc) = segments[0].kind() else {
        panic!("expected an arc, got {:?}", segments[0]);
    };
    assert_near(arc.center, point(5.0, 0.0), 1e-9);
    assert!((arc.radii - vector(5.0, 5.0)).length() < 1e-9);
    assert!(arc.clockwise);
    assert!((arc.start_angle.radians.rem_euclid(TAU) - PI).abs() < 1e-9);
    let end = arc.end_angle.radians.rem_euclid(TAU);
    assert!(end < 1e-9 || TAU - end < 1e-9);
    assert!((arc.sweep_angle().radians - PI).abs() < 1e-9);
}

#[test]
fn bold_square() {
    let mut path = Path2D::new();
    path.rect(0.0, 0.0, 10.0, 10.0);
    assert_eq!(
        path.bounding_box(),
        Some(BoundingBox::new(0.0, 0.0, 10.0, 10.0))
    );

    let outline = bold(&path, 2.0, &BoldOptions::DEFAULT);
    let bbox = outline.bounding_box().unwrap();
    assert!(bbox.approx_eq_eps(&BoundingBox::new(-2.0, -2.0, 14.0, 14.0), 1e-9));
}

#[test]
fn bold_zero_is_identity() {
    let path = parse_path("M0 0 L10 0 Q15 5 10 10 C5 15 0 15 0 10 A5 5 0 0 1 -5 5 Z").unwrap();
    let outline = bold(&path, 0.0, &BoldOptions::DEFAULT);

    let (a, b) = (&path.subpaths()[0], &outline.subpaths()[0]);
    assert_eq!(a.segments().len(), b.segments().len());
    for (c1, c2) in a.segments().iter().zip(b.segments()) {
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            assert_near(c1.sample(t), c2.sample(t), 1e-9);
        }
    }
}

#[test]
fn path_data_round_trip() {
    let src = "M0 0 L10 0 Q15 5 10 10 C5 15 0 15 0 10 A5 5 0 0 1 -5 5 Z";
    let commands = parse_commands(src).unwrap();
    assert_eq!(serialize_commands(&commands, &SerializerOptions::DEFAULT), src);

    let path = parse_path(src).unwrap();
    let reparsed = parse_path(&path_to_string(&path)).unwrap();
    assert_eq!(path.subpaths().len(), reparsed.subpaths().len());

    for (s1, s2) in path.subpaths().iter().zip(reparsed.subpaths()) {
        assert_eq!(s1.segments().len(), s2.segments().len());
        for (c1, c2) in s1.segments().iter().zip(s2.segments()) {
            for i in 0..=16 {
                let t = i as f64 / 16.0;
                assert_near(c1.sample(t), c2.sample(t), 1e-6);
            }
        }
    }
}

#[test]
fn arc_flag_combinations() {
    let from = point(1.0, 2.0);
    let to = point(6.0, 4.0);
    for &(large_arc, sweep) in &[(false, false), (false, true), (true, false), (true, true)] {
        let svg_arc = SvgArc {
            from,
            to,
            radii: vector(4.0, 3.0),
            x_rotation: Angle::degrees(20.0),
            flags: ArcFlags { large_arc, sweep },
        };

        let arc = svg_arc.to_arc().unwrap();
        assert_eq!(arc.clockwise, sweep);
        assert_eq!(arc.sweep_angle().radians.abs() > PI, large_arc);
        assert_near(arc.sample(0.0), from, 1e-9);
        assert_near(arc.sample(1.0), to, 1e-9);

        let back = arc.to_svg_arcs();
        assert_near(back[0].from, from, 1e-9);
        assert_near(back[back.len() - 1].to, to, 1e-9);
        assert!(back.iter().all(|a| a.flags.sweep == sweep));
    }
}

#[test]
fn sheared_circle() {
    let circle = Arc::circle(point(3.0, 4.0), 2.0);
    let shear = Matrix3::affine(1.0, 0.0, 0.5, 1.0, 2.0, -1.0);
    let sheared = circle.transformed(&shear);
    assert!(sheared.is_full());

    for i in 0..8 {
        let t = i as f64 / 8.0;
        assert_near(sheared.sample(t), shear.transform_point(circle.sample(t)), 1e-9);
    }

    let mut curve = Curve::arc(circle);
    curve.transform(&shear);
    assert!(matches!(curve.kind(), CurveKind::Arc(_)));
    assert_near(curve.sample(0.3), shear.transform_point(circle.sample(0.3)), 1e-9);
}

#[test]
fn arc_length_mapping() {
    let curves = [
        Curve::line(point(0.0, 0.0), point(10.0, 5.0)),
        Curve::quadratic(point(0.0, 0.0), point(10.0, 20.0), point(20.0, 0.0)),
        Curve::cubic(
            point(0.0, 0.0),
            point(0.0, 10.0),
            point(20.0, 10.0),
            point(20.0, 0.0),
        ),
        Curve::arc(Arc::new(
            point(0.0, 0.0),
            vector(10.0, 4.0),
            Angle::degrees(30.0),
            Angle::zero(),
            Angle::radians(2.0),
            false,
        )),
        Curve::spline(vec![
            point(0.0, 0.0),
            point(5.0, 5.0),
            point(10.0, 0.0),
            point(15.0, 10.0),
        ]),
        Curve::polygon(vec![point(0.0, 0.0), point(1.0, 0.0), point(1.0, 8.0)], true),
        Curve::rectangle(0.0, 0.0, 4.0, 1.0),
        Curve::composite(vec![
            Curve::line(point(0.0, 0.0), point(1.0, 0.0)),
            Curve::quadratic(point(1.0, 0.0), point(2.0, 2.0), point(3.0, 0.0)),
        ]),
    ];

    for curve in &curves {
        assert_eq!(curve.u_to_t(0.0), 0.0, "{:?}", curve);
        assert_eq!(curve.u_to_t(1.0), 1.0, "{:?}", curve);

        let mut previous = 0.0;
        for i in 0..=20 {
            let t = curve.u_to_t(i as f64 / 20.0);
            assert!(t >= previous, "{:?}", curve);
            previous = t;
        }
    }

    let path = parse_path("M0 0 L10 0 Q15 5 10 10 A5 5 0 0 1 0 10 Z").unwrap();
    let subpath = &path.subpaths()[0];
    assert_eq!(subpath.u_to_t(0.0), 0.0);
    assert_eq!(subpath.u_to_t(1.0), 1.0);
}
