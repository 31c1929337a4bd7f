//! Outline offset ("bold").
//!
//! Every curve of a sub-path is displaced independently along its normal, then the
//! joints between adjoining curves are reconciled by intersecting the lines formed by
//! the control points on each side of the joint, which approximates a mitered join.
//!
//! The displacement is `offset` for sub-paths with a positive winding and `-offset`
//! otherwise, so that a positive offset always inflates a closed shape.
//!
//! # Examples
//!
//! ```
//! use tracery_algorithms::{bold, BoldOptions};
//! use tracery_algorithms::path::{BoundingBox, Path2D};
//!
//! let mut square = Path2D::new();
//! square.rect(0.0, 0.0, 10.0, 10.0);
//!
//! let outline = bold(&square, 2.0, &BoldOptions::DEFAULT);
//! let bbox = outline.bounding_box().unwrap();
//! assert!(bbox.approx_eq_eps(&BoundingBox::new(-2.0, -2.0, 14.0, 14.0), 1e-9));
//! ```

use crate::geom::{Line, Polygon};
use crate::math::{vector, Point};
use crate::path::{same_point, Curve, CurveKind, CurvePath, ParametricCurve, Path2D, Winding};
use crate::winding::winding;

// Precision of the parameter search for the normal at a control point.
const T_EPSILON: f64 = 1e-9;

/// Parameters for the outline offset.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct BoldOptions {
    /// Lines meeting at a joint are considered parallel when the sine of the angle
    /// between them is below this value.
    ///
    /// Default value: `BoldOptions::DEFAULT_PARALLEL_TOLERANCE`.
    pub parallel_tolerance: f64,

    /// Largest distance of a mitered corner from the segment that ends at the joint,
    /// in multiples of that segment's length.
    ///
    /// Joints beyond it fall back to the midpoint of the two displaced corners.
    ///
    /// Default value: `BoldOptions::DEFAULT_MAX_JOIN_T`.
    pub max_join_t: f64,
}

impl BoldOptions {
    pub const DEFAULT_PARALLEL_TOLERANCE: f64 = 1e-9;
    pub const DEFAULT_MAX_JOIN_T: f64 = 4.0;

    pub const DEFAULT: Self = BoldOptions {
        parallel_tolerance: Self::DEFAULT_PARALLEL_TOLERANCE,
        max_join_t: Self::DEFAULT_MAX_JOIN_T,
    };

    #[inline]
    pub fn with_parallel_tolerance(mut self, tolerance: f64) -> Self {
        self.parallel_tolerance = tolerance;
        self
    }

    #[inline]
    pub fn with_max_join_t(mut self, max_join_t: f64) -> Self {
        self.max_join_t = max_join_t;
        self
    }
}

impl Default for BoldOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Offsets the outline of every non-empty sub-path of a path by `offset`.
pub fn bold(path: &Path2D, offset: f64, options: &BoldOptions) -> Path2D {
    let mut output = Path2D::with_options(*path.options());
    for subpath in path.subpaths().iter().filter(|s| !s.is_empty()) {
        output.push_subpath(bold_subpath(subpath, offset, options));
    }

    output
}

/// Offsets the outline of a single sub-path by `offset`.
pub fn bold_subpath(subpath: &CurvePath, offset: f64, options: &BoldOptions) -> CurvePath {
    let d = match winding(subpath) {
        Winding::Positive => offset,
        Winding::Negative => -offset,
    };

    let mut curves = offset_curves(subpath.segments(), subpath.is_closed(), d, options);
    // Both ends of the closing line are snapped to the neighbouring joints, so
    // `close_path` rebuilds the same line.
    if subpath.has_closing_line() {
        curves.pop();
    }

    let mut output = CurvePath::from_curves(curves);
    if subpath.is_closed() {
        output.close_path();
    }

    output
}

/// Intersection of the infinite lines through `a0, a1` and through `b0, b1`.
///
/// Returns `None` if the lines are parallel within `options.parallel_tolerance`, or if
/// the intersection is further than `options.max_join_t` times the length of `a0, a1`
/// from that segment.
pub fn line_intersection(
    a0: Point,
    a1: Point,
    b0: Point,
    b1: Point,
    options: &BoldOptions,
) -> Option<Point> {
    let a = Line::through(a0, a1);
    let b = Line::through(b0, b1);
    let t = a.intersection_t(&b, options.parallel_tolerance)?;
    if t < -options.max_join_t || t > 1.0 + options.max_join_t {
        return None;
    }

    Some(a.point + a.vector * t)
}

fn offset_curves(curves: &[Curve], closed: bool, d: f64, options: &BoldOptions) -> Vec<Curve> {
    let mut output: Vec<Curve> = curves.iter().map(|c| displaced(c, d, options)).collect();

    let n = curves.len();
    let joints = if closed { n } else { n.saturating_sub(1) };
    for i in 0..joints {
        let j = (i + 1) % n;
        if i == j {
            continue;
        }

        // Joints are found on the curves before displacement.
        if !same_point(curves[i].to(), curves[j].from()) {
            continue;
        }

        join(&mut output, i, j, options);
    }

    output
}

fn displaced(curve: &Curve, d: f64, options: &BoldOptions) -> Curve {
    let shift = |p: Point| p + curve.normal(curve.t_for_point(p, T_EPSILON)) * d;

    let output = match curve.kind() {
        CurveKind::Line(l) => Curve::line(shift(l.from), shift(l.to)),
        CurveKind::Quadratic(q) => Curve::quadratic(shift(q.from), shift(q.ctrl), shift(q.to)),
        CurveKind::Cubic(c) => Curve::cubic(
            shift(c.from),
            shift(c.ctrl1),
            shift(c.ctrl2),
            shift(c.to),
        ),
        CurveKind::Arc(arc) => {
            // The normal points away from the center along positive sweeps.
            let delta = if arc.clockwise { d } else { -d };
            let mut arc = *arc;
            arc.radii = vector(
                (arc.radii.x + delta).max(0.0),
                (arc.radii.y + delta).max(0.0),
            );
            Curve::arc(arc)
        }
        CurveKind::Spline(s) => Curve::spline(s.points.iter().map(|p| shift(*p)).collect()),
        CurveKind::Polygon(p) => Curve::polygon(offset_polygon(p, d, options), p.closed),
        CurveKind::Rectangle(r) => Curve::polygon(offset_polygon(&r.to_polygon(), d, options), true),
        CurveKind::Composite(c) => Curve::composite(offset_curves(&c.curves, false, d, options)),
    };

    output.with_arc_length_divisions(curve.arc_length_divisions())
}

// Offsets each edge along its normal and miters the vertices.
fn offset_polygon(polygon: &Polygon, d: f64, options: &BoldOptions) -> Vec<Point> {
    let points = &polygon.points;
    let n = points.len();
    if n < 2 {
        return points.clone();
    }

    let edges: Vec<Line> = polygon.edges().map(|e| e.to_line().offset(d)).collect();
    let corner = |before: &Line, after: &Line| {
        let end = before.point + before.vector;
        line_intersection(before.point, end, after.point, after.point + after.vector, options)
            .unwrap_or_else(|| end.lerp(after.point, 0.5))
    };

    if polygon.closed {
        return (0..n)
            .map(|k| corner(&edges[(k + n - 1) % n], &edges[k]))
            .collect();
    }

    let mut output = Vec::with_capacity(n);
    output.push(edges[0].point);
    for k in 1..n - 1 {
        output.push(corner(&edges[k - 1], &edges[k]));
    }
    let last = &edges[n - 2];
    output.push(last.point + last.vector);

    output
}

// Snaps the end of `curves[i]` and the start of `curves[j]` to a common corner.
//
// Arcs and closed shapes keep their end points: the other side of the joint is moved
// onto them instead.
fn join(curves: &mut [Curve], i: usize, j: usize, options: &BoldOptions) {
    let before = &curves[i];
    let after = &curves[j];
    let corner = match (tail_line(before), head_line(after)) {
        (None, None) => return,
        (None, Some(_)) => before.to(),
        (Some(_), None) => after.from(),
        (Some((a0, a1)), Some((b0, b1))) => line_intersection(a0, a1, b0, b1, options)
            .unwrap_or_else(|| {
                log::debug!("Offset joint at {:?} falls back to a midpoint.", a1);
                a1.lerp(b0, 0.5)
            }),
    };

    set_end(&mut curves[i], corner);
    set_start(&mut curves[j], corner);
}

// The line formed by the first two control points, for curves with a movable start.
fn head_line(curve: &Curve) -> Option<(Point, Point)> {
    match curve.kind() {
        CurveKind::Line(l) => Some((l.from, l.to)),
        CurveKind::Quadratic(q) => Some((q.from, q.ctrl)),
        CurveKind::Cubic(c) => Some((c.from, c.ctrl1)),
        CurveKind::Spline(s) if s.points.len() >= 2 => Some((s.points[0], s.points[1])),
        CurveKind::Polygon(p) if !p.closed && p.points.len() >= 2 => {
            Some((p.points[0], p.points[1]))
        }
        CurveKind::Composite(c) => c.curves.first().and_then(head_line),
        _ => None,
    }
}

// The line formed by the last two control points, for curves with a movable end.
fn tail_line(curve: &Curve) -> Option<(Point, Point)> {
    let last_two = |points: &[Point]| {
        let n = points.len();
        (points[n - 2], points[n - 1])
    };

    match curve.kind() {
        CurveKind::Line(l) => Some((l.from, l.to)),
        CurveKind::Quadratic(q) => Some((q.ctrl, q.to)),
        CurveKind::Cubic(c) => Some((c.ctrl2, c.to)),
        CurveKind::Spline(s) if s.points.len() >= 2 => Some(last_two(&s.points)),
        CurveKind::Polygon(p) if !p.closed && p.points.len() >= 2 => Some(last_two(&p.points)),
        CurveKind::Composite(c) => c.curves.last().and_then(tail_line),
        _ => None,
    }
}

fn set_start(curve: &mut Curve, at: Point) {
    if head_line(curve).is_none() {
        return;
    }

    match curve.kind_mut() {
        CurveKind::Line(l) => l.from = at,
        CurveKind::Quadratic(q) => q.from = at,
        CurveKind::Cubic(c) => c.from = at,
        CurveKind::Spline(s) => s.points[0] = at,
        CurveKind::Polygon(p) => p.points[0] = at,
        CurveKind::Composite(c) => {
            if let Some(first) = c.curves.first_mut() {
                set_start(first, at);
            }
        }
        _ => {}
    }
}

fn set_end(curve: &mut Curve, at: Point) {
    if tail_line(curve).is_none() {
        return;
    }

    match curve.kind_mut() {
        CurveKind::Line(l) => l.to = at,
        CurveKind::Quadratic(q) => q.to = at,
        CurveKind::Cubic(c) => c.to = at,
        CurveKind::Spline(s) => {
            if let Some(last) = s.points.last_mut() {
                *last = at;
            }
        }
        CurveKind::Polygon(p) => {
            if let Some(last) = p.points.last_mut() {
                *last = at;
            }
        }
        CurveKind::Composite(c) => {
            if let Some(last) = c.curves.last_mut() {
                set_end(last, at);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
use crate::math::{point, Angle};
#[cfg(test)]
use crate::path::BoundingBox;

#[cfg(test)]
fn assert_bbox_eq(path: &Path2D, expected: BoundingBox) {
    let bbox = path.bounding_box().unwrap();
    assert!(
        bbox.approx_eq_eps(&expected, 1e-9),
        "{:?} != {:?}",
        bbox,
        expected
    );
}

#[test]
fn zero_offset() {
    let mut path = Path2D::new();
    path.move_to(point(0.0, 0.0));
    path.line_to(point(10.0, 0.0));
    path.bezier_curve_to(point(15.0, 0.0), point(15.0, 10.0), point(10.0, 10.0));
    path.quadratic_curve_to(point(5.0, 15.0), point(0.0, 10.0));
    path.close_path();

    let outline = bold(&path, 0.0, &BoldOptions::DEFAULT);
    let (a, b) = (&path.subpaths()[0], &outline.subpaths()[0]);
    assert_eq!(a.segments().len(), b.segments().len());
    assert!(b.is_closed());
    for (c1, c2) in a.segments().iter().zip(b.segments()) {
        for i in 0..=8 {
            let t = i as f64 / 8.0;
            assert!((c1.sample(t) - c2.sample(t)).length() < 1e-9);
        }
    }
}

#[test]
fn squares_inflate_whatever_their_winding() {
    let mut path = Path2D::new();
    path.rect(0.0, 0.0, 10.0, 10.0);
    let outline = bold(&path, 2.0, &BoldOptions::DEFAULT);
    assert_bbox_eq(&outline, BoundingBox::new(-2.0, -2.0, 14.0, 14.0));
    let segments = outline.subpaths()[0].segments();
    assert_eq!(segments.len(), 4);
    assert!((segments[0].from() - point(-2.0, -2.0)).length() < 1e-9);
    assert!((segments[1].from() - point(12.0, -2.0)).length() < 1e-9);
    assert!(outline.subpaths()[0].has_closing_line());

    // An explicit line back to the start stays explicit.
    let mut path = Path2D::new();
    path.rect(0.0, 0.0, 10.0, 10.0);
    path.move_to(point(0.0, 0.0));
    path.line_to(point(10.0, 0.0));
    path.line_to(point(10.0, 10.0));
    path.line_to(point(0.0, 10.0));
    path.line_to(point(0.0, 0.0));
    path.close_path();
    let outline = bold(&path, 2.0, &BoldOptions::DEFAULT);
    let explicit = &outline.subpaths()[1];
    assert!(!explicit.has_closing_line());
    assert_eq!(explicit.segments().len(), 4);
    assert_eq!(explicit.explicit_segments(), outline.subpaths()[0].segments());

    let mut path = Path2D::new();
    path.move_to(point(0.0, 0.0));
    path.line_to(point(0.0, 10.0));
    path.line_to(point(10.0, 10.0));
    path.line_to(point(10.0, 0.0));
    path.close_path();
    let outline = bold(&path, 2.0, &BoldOptions::DEFAULT);
    assert_bbox_eq(&outline, BoundingBox::new(-2.0, -2.0, 14.0, 14.0));

    let shrunk = bold(&path, -1.0, &BoldOptions::DEFAULT);
    assert_bbox_eq(&shrunk, BoundingBox::new(1.0, 1.0, 8.0, 8.0));
}

#[test]
fn rectangle_and_polygon_curves() {
    let mut path = Path2D::new();
    path.push_curve(Curve::rectangle(0.0, 0.0, 10.0, 5.0));
    let outline = bold(&path, 1.0, &BoldOptions::DEFAULT);
    assert_bbox_eq(&outline, BoundingBox::new(-1.0, -1.0, 12.0, 7.0));
    assert!(matches!(
        outline.subpaths()[0].segments()[0].kind(),
        CurveKind::Polygon(p) if p.closed && p.points.len() == 4
    ));

    let triangle = Polygon::new(vec![point(0.0, 0.0), point(4.0, 0.0), point(4.0, 4.0)], false);
    let points = offset_polygon(&triangle, -1.0, &BoldOptions::DEFAULT);
    assert_eq!(points, vec![point(0.0, 1.0), point(3.0, 1.0), point(3.0, 4.0)]);
}

#[test]
fn circles_change_radius() {
    let mut path = Path2D::new();
    path.arc(point(0.0, 0.0), 5.0, Angle::zero(), Angle::radians(core::f64::consts::TAU), true);
    path.close_path();

    let outline = bold(&path, 1.0, &BoldOptions::DEFAULT);
    assert_bbox_eq(&outline, BoundingBox::new(-6.0, -6.0, 12.0, 12.0));

    let collapsed = bold(&path, -10.0, &BoldOptions::DEFAULT);
    let CurveKind::Arc(arc) = collapsed.subpaths()[0].segments()[0].kind() else {
        panic!("expected an arc");
    };
    assert_eq!(arc.radii, vector(0.0, 0.0));
}

#[test]
fn lines_snap_to_arcs() {
    let mut path = Path2D::new();
    path.round_rect(0.0, 0.0, 20.0, 10.0, 2.0);
    let outline = bold(&path, 1.0, &BoldOptions::DEFAULT);
    assert_bbox_eq(&outline, BoundingBox::new(-1.0, -1.0, 22.0, 12.0));

    let segments = outline.subpaths()[0].segments();
    assert_eq!(segments.len(), 8);
    for pair in segments.windows(2) {
        assert!((pair[0].to() - pair[1].from()).length() < 1e-9);
    }
}

#[test]
fn collinear_joints_use_the_midpoint() {
    let mut path = Path2D::new();
    path.move_to(point(0.0, 0.0));
    path.line_to(point(5.0, 0.0));
    path.line_to(point(10.0, 0.0));

    // Zero area: the winding is negative and the lines move along -normal.
    let outline = bold(&path, 1.0, &BoldOptions::DEFAULT);
    let segments = outline.subpaths()[0].segments();
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].from(), point(0.0, 1.0));
    assert_eq!(segments[0].to(), point(5.0, 1.0));
    assert_eq!(segments[1].to(), point(10.0, 1.0));
}

#[test]
fn intersections() {
    let options = BoldOptions::DEFAULT;
    assert_eq!(
        line_intersection(
            point(0.0, 0.0),
            point(1.0, 0.0),
            point(3.0, -1.0),
            point(3.0, 1.0),
            &options
        ),
        Some(point(3.0, 0.0))
    );
    // Parallel.
    assert_eq!(
        line_intersection(
            point(0.0, 0.0),
            point(1.0, 0.0),
            point(0.0, 1.0),
            point(1.0, 1.0),
            &options
        ),
        None
    );
    // Too far from the first segment.
    assert_eq!(
        line_intersection(
            point(0.0, 0.0),
            point(1.0, 0.0),
            point(10.0, -1.0),
            point(10.0, 1.0),
            &options
        ),
        None
    );
    assert!(line_intersection(
        point(0.0, 0.0),
        point(1.0, 0.0),
        point(10.0, -1.0),
        point(10.0, 1.0),
        &options.with_max_join_t(10.0)
    )
    .is_some());
}
