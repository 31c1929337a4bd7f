// Compute the winding of a sub-path.

use crate::geom::parametric::DEFAULT_CURVE_DIVISIONS;
use crate::math::{vector, Point};
use crate::path::{CurvePath, ParametricCurve, Path2D, Winding};

/// Signed area of a polygon, positive when its points go clockwise on screen.
///
/// The polygon is implicitly closed.
pub fn polygon_area(points: &[Point]) -> f64 {
    let Some(&first) = points.first() else {
        return 0.0;
    };

    let mut area = 0.0;
    let mut v0 = vector(0.0, 0.0);
    for p in &points[1..] {
        let v1 = *p - first;
        area += v0.cross(v1);
        v0 = v1;
    }

    area * 0.5
}

/// Signed area enclosed by a sub-path, approximated with its adaptive points.
///
/// Open sub-paths are treated as if they were closed.
pub fn signed_area(subpath: &CurvePath) -> f64 {
    polygon_area(&subpath.adaptive_points(DEFAULT_CURVE_DIVISIONS))
}

/// Compute the winding of a sub-path.
///
/// The sub-path is expected to have a non-null area and no self-intersections, otherwise
/// the result is unspecified.
pub fn winding(subpath: &CurvePath) -> Winding {
    if signed_area(subpath) > 0.0 {
        Winding::Positive
    } else {
        Winding::Negative
    }
}

/// Iterator over the windings of the non-empty sub-paths of a path.
pub struct Windings<'l> {
    subpaths: core::slice::Iter<'l, CurvePath>,
}

impl<'l> Windings<'l> {
    pub fn new(path: &'l Path2D) -> Self {
        Windings {
            subpaths: path.subpaths().iter(),
        }
    }
}

impl<'l> Iterator for Windings<'l> {
    type Item = Winding;
    fn next(&mut self) -> Option<Winding> {
        self.subpaths.find(|s| !s.is_empty()).map(winding)
    }
}

#[cfg(test)]
use crate::math::point;
#[cfg(test)]
use crate::math::Angle;

#[test]
fn path_winding() {
    let mut path = Path2D::new();
    path.move_to(point(0.0, 0.0));
    path.line_to(point(1.0, 0.0));
    path.line_to(point(1.0, 1.0));
    path.line_to(point(0.0, 1.0));
    path.close_path();

    path.move_to(point(0.0, 0.0));
    path.line_to(point(0.0, 1.0));
    path.line_to(point(1.0, 1.0));
    path.line_to(point(1.0, 0.0));
    path.close_path();

    // Empty sub-paths are skipped.
    path.move_to(point(5.0, 5.0));

    path.move_to(point(0.0, 0.0));
    path.line_to(point(1.0, 0.0));
    path.line_to(point(1.0, 1.0));
    path.line_to(point(0.0, 1.0));
    // Not closed on purpose.

    let windings: Vec<Winding> = Windings::new(&path).collect();
    assert_eq!(
        windings,
        vec![Winding::Positive, Winding::Negative, Winding::Positive]
    );
    assert!((signed_area(&path.subpaths()[0]) - 1.0).abs() < 1e-12);
    assert!((signed_area(&path.subpaths()[1]) + 1.0).abs() < 1e-12);
}

#[test]
fn arc_winding() {
    let mut path = Path2D::new();
    path.arc(
        point(0.0, 0.0),
        5.0,
        Angle::zero(),
        Angle::radians(core::f64::consts::TAU),
        true,
    );
    path.close_path();
    assert_eq!(winding(&path.subpaths()[0]), Winding::Positive);

    let mut path = Path2D::new();
    path.arc(
        point(0.0, 0.0),
        5.0,
        Angle::zero(),
        Angle::radians(core::f64::consts::TAU),
        false,
    );
    path.close_path();
    assert_eq!(winding(&path.subpaths()[0]), Winding::Negative);
}

#[test]
fn polygon_areas() {
    assert_eq!(polygon_area(&[]), 0.0);
    assert_eq!(polygon_area(&[point(1.0, 1.0), point(2.0, 2.0)]), 0.0);
    let triangle = [point(0.0, 0.0), point(4.0, 0.0), point(0.0, 3.0)];
    assert_eq!(polygon_area(&triangle), 6.0);
}
