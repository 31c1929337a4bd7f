//! A contiguous sequence of curves.

use crate::curve::{append_points, cumulative_lengths, sample_sequence, Curve};
use crate::geom::parametric::DEFAULT_ARC_LENGTH_DIVISIONS;
use crate::geom::{Arc, BoundingBox, Matrix3, ParametricCurve};
use crate::math::{Angle, Point, Vector};
use crate::same_point;

use std::borrow::Cow;

/// One sub-path: a sequence of curves where each curve starts where the previous one
/// ends.
///
/// The builder methods keep the sequence contiguous by inserting connecting lines. The
/// pen (`current_point`) always ends up at the target of the last call, even when the
/// call produces no segment.
///
/// As a parametric curve, a `CurvePath` is parameterized by arc length over all of its
/// segments.
#[derive(Clone, Debug, PartialEq)]
pub struct CurvePath {
    curves: Vec<Curve>,
    first_point: Option<Point>,
    start_point: Option<Point>,
    current_point: Option<Point>,
    auto_close: bool,
    // The last curve is the line added by `close_path`.
    closing_line: bool,
    arc_length_divisions: usize,
}

impl Default for CurvePath {
    fn default() -> Self {
        CurvePath::new()
    }
}

impl CurvePath {
    pub fn new() -> Self {
        CurvePath {
            curves: Vec::new(),
            first_point: None,
            start_point: None,
            current_point: None,
            auto_close: false,
            closing_line: false,
            arc_length_divisions: DEFAULT_ARC_LENGTH_DIVISIONS,
        }
    }

    /// Creates a sub-path from existing curves, joining them with lines where they are
    /// not contiguous.
    pub fn from_curves<Iter>(curves: Iter) -> Self
    where
        Iter: IntoIterator<Item = Curve>,
    {
        let mut path = CurvePath::new();
        for curve in curves {
            path.push(curve);
        }

        path
    }

    /// Sets the arc-length resolution of this sub-path and of the curves it receives.
    pub fn with_arc_length_divisions(mut self, divisions: usize) -> Self {
        self.arc_length_divisions = divisions.max(1);
        for curve in &mut self.curves {
            curve.set_arc_length_divisions(self.arc_length_divisions);
        }
        self
    }

    /// Appends a curve, preceded by a line from the pen if the curve does not start
    /// there.
    pub fn push(&mut self, mut curve: Curve) {
        curve.set_arc_length_divisions(self.arc_length_divisions);
        let start = curve.from();
        match self.current_point {
            Some(pen) if !same_point(pen, start) => {
                self.push_contiguous(Curve::line(pen, start));
            }
            Some(_) => {}
            None => self.set_origin(start),
        }

        self.current_point = Some(curve.to());
        self.closing_line = false;
        self.curves.push(curve);
    }

    /// Moves the pen without drawing.
    ///
    /// This only makes sense on an empty sub-path, `Path2D` starts a new sub-path
    /// otherwise.
    pub fn move_to(&mut self, to: Point) {
        self.set_origin(to);
        self.current_point = Some(to);
    }

    fn set_origin(&mut self, at: Point) {
        self.first_point = Some(at);
        self.start_point = Some(at);
    }

    // The pen position. Moves to `to` first if there is none.
    fn pen_or_move_to(&mut self, to: Point) -> Point {
        match self.current_point {
            Some(p) => p,
            None => {
                self.move_to(to);
                to
            }
        }
    }

    pub fn line_to(&mut self, to: Point) {
        let from = self.pen_or_move_to(to);
        if from != to {
            self.push_contiguous(Curve::line(from, to));
        }
        self.current_point = Some(to);
    }

    pub fn quadratic_curve_to(&mut self, ctrl: Point, to: Point) {
        let from = self.pen_or_move_to(ctrl);
        if from != to {
            self.push_contiguous(Curve::quadratic(from, ctrl, to));
        }
        self.current_point = Some(to);
    }

    pub fn bezier_curve_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        let from = self.pen_or_move_to(ctrl1);
        if from != to {
            self.push_contiguous(Curve::cubic(from, ctrl1, ctrl2, to));
        }
        self.current_point = Some(to);
    }

    /// Adds an elliptic arc, with a line from the pen to the start of the arc if they
    /// differ.
    ///
    /// An arc with a zero radius is replaced with a line to its end point.
    #[allow(clippy::too_many_arguments)]
    pub fn ellipse(
        &mut self,
        center: Point,
        radii: Vector,
        x_rotation: Angle,
        start_angle: Angle,
        end_angle: Angle,
        clockwise: bool,
    ) {
        let arc = Arc::new(center, radii, x_rotation, start_angle, end_angle, clockwise);
        if arc.is_degenerate() {
            log::debug!("zero radius arc at {:?} drawn as a line", center);
            self.line_to(arc.sample(1.0));
            return;
        }

        let start = arc.sample(0.0);
        match self.current_point {
            None => self.move_to(start),
            Some(p) if !same_point(p, start) => self.line_to(start),
            Some(_) => {}
        }

        self.push(Curve::arc(arc));
    }

    pub fn arc(
        &mut self,
        center: Point,
        radius: f64,
        start_angle: Angle,
        end_angle: Angle,
        clockwise: bool,
    ) {
        self.ellipse(
            center,
            Vector::new(radius, radius),
            Angle::zero(),
            start_angle,
            end_angle,
            clockwise,
        );
    }

    /// Adds a Catmull-Rom spline from the pen through the given points.
    pub fn spline_thru(&mut self, points: &[Point]) {
        let Some(&last) = points.last() else {
            return;
        };
        let mut spline_points = Vec::with_capacity(points.len() + 1);
        match self.current_point {
            Some(p) => spline_points.push(p),
            None => self.move_to(points[0]),
        }
        spline_points.extend_from_slice(points);
        if spline_points.len() < 2 {
            return;
        }

        self.push_contiguous(Curve::spline(spline_points));
        self.current_point = Some(last);
    }

    /// Closes the sub-path with a line back to its start point if the pen is elsewhere.
    pub fn close_path(&mut self) {
        let Some(start) = self.start_point.or(self.first_point) else {
            return;
        };
        if let Some(current) = self.current_point {
            if !same_point(current, start) {
                self.push_contiguous(Curve::line(current, start));
                self.closing_line = true;
            }
        }

        self.current_point = Some(start);
        self.start_point = None;
        self.auto_close = true;
    }

    fn push_contiguous(&mut self, mut curve: Curve) {
        curve.set_arc_length_divisions(self.arc_length_divisions);
        if self.first_point.is_none() {
            self.set_origin(curve.from());
        }
        self.closing_line = false;
        self.curves.push(curve);
    }

    #[inline]
    pub fn segments(&self) -> &[Curve] {
        &self.curves
    }

    /// The segments without the line that `close_path` added to reach the start point.
    ///
    /// Lines that were explicitly drawn back to the start are kept.
    pub fn explicit_segments(&self) -> &[Curve] {
        match self.closing_line {
            true => &self.curves[..self.curves.len() - 1],
            false => &self.curves,
        }
    }

    /// Whether `close_path` added a line to reach the start point.
    #[inline]
    pub fn has_closing_line(&self) -> bool {
        self.closing_line
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Whether `close_path` was called on this sub-path.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.auto_close
    }

    /// The pen position.
    #[inline]
    pub fn current_point(&self) -> Option<Point> {
        self.current_point
    }

    /// The start of the sub-path, cleared by `close_path`.
    #[inline]
    pub fn start_point(&self) -> Option<Point> {
        self.start_point
    }

    /// Where the sub-path begins: its move-to position, or the start of its first
    /// curve if it was built without one.
    #[inline]
    pub fn first_point(&self) -> Option<Point> {
        self.first_point
    }

    /// The cumulative lengths of the segments.
    pub fn curve_lengths(&self) -> Vec<f64> {
        cumulative_lengths(&self.curves)
    }

    pub fn transform(&mut self, m: &Matrix3) {
        for curve in &mut self.curves {
            curve.transform(m);
        }
        self.first_point = self.first_point.map(|p| m.transform_point(p));
        self.start_point = self.start_point.map(|p| m.transform_point(p));
        self.current_point = self.current_point.map(|p| m.transform_point(p));
    }

    /// Bounding box of the curves, `None` for an empty sub-path.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        if self.curves.is_empty() {
            return None;
        }

        Some(ParametricCurve::bounding_box(self))
    }
}

impl ParametricCurve for CurvePath {
    fn sample(&self, t: f64) -> Point {
        sample_sequence(&self.curves, &self.curve_lengths(), t)
    }

    fn from(&self) -> Point {
        self.first_point().unwrap_or_else(Point::origin)
    }

    fn to(&self) -> Point {
        self.curves.last().map(|c| c.to()).unwrap_or_else(|| self.from())
    }

    fn is_closed(&self) -> bool {
        self.auto_close
    }

    fn arc_length_divisions(&self) -> usize {
        self.arc_length_divisions
    }

    fn lengths(&self) -> Cow<'_, [f64]> {
        let mut lengths = vec![0.0];
        lengths.extend(self.curve_lengths());
        Cow::Owned(lengths)
    }

    fn length(&self) -> f64 {
        self.curves.iter().fold(0.0, |sum, c| sum + c.length())
    }

    // The parameter is already proportional to arc length.
    fn u_to_t(&self, u: f64) -> f64 {
        u
    }

    fn points(&self, divisions: usize) -> Vec<Point> {
        self.adaptive_points(divisions)
    }

    fn spaced_points(&self, divisions: usize) -> Vec<Point> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|i| self.sample(i as f64 / divisions as f64))
            .collect()
    }

    /// Concatenated adaptive points of the segments, without repeating the shared end
    /// points, and back to the first point if the sub-path is closed.
    fn adaptive_points(&self, divisions: usize) -> Vec<Point> {
        let mut points = Vec::new();
        for curve in &self.curves {
            append_points(&mut points, curve.adaptive_points(divisions));
        }

        if self.auto_close {
            if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
                if first != last {
                    points.push(first);
                }
            }
        }

        points
    }

    fn min_max(&self, min: &mut Point, max: &mut Point) {
        for curve in &self.curves {
            curve.min_max(min, max);
        }
    }
}

#[cfg(test)]
use crate::math::point;
#[cfg(test)]
use crate::CurveKind;

#[test]
fn builder_skips_degenerate_segments() {
    let mut path = CurvePath::new();
    path.line_to(point(1.0, 1.0));
    assert!(path.is_empty());
    assert_eq!(path.current_point(), Some(point(1.0, 1.0)));

    path.line_to(point(1.0, 1.0));
    path.bezier_curve_to(point(2.0, 2.0), point(3.0, 2.0), point(1.0, 1.0));
    assert!(path.is_empty());

    path.line_to(point(5.0, 1.0));
    path.quadratic_curve_to(point(6.0, 3.0), point(7.0, 1.0));
    assert_eq!(path.segments().len(), 2);
    assert_eq!(path.current_point(), Some(point(7.0, 1.0)));
}

#[test]
fn arc_bridges_from_pen() {
    let mut path = CurvePath::new();
    path.move_to(point(0.0, 0.0));
    path.arc(point(10.0, 0.0), 2.0, Angle::zero(), Angle::radians(1.0), true);

    assert_eq!(path.segments().len(), 2);
    assert!(matches!(path.segments()[0].kind(), CurveKind::Line(l) if (l.to - point(12.0, 0.0)).length() < 1e-12));
    assert!(matches!(path.segments()[1].kind(), CurveKind::Arc(_)));

    // Already at the start of the next arc: no bridge.
    let end = path.current_point().unwrap();
    let mut other = CurvePath::new();
    other.move_to(end);
    other.arc(point(10.0, 0.0), 2.0, Angle::radians(1.0), Angle::radians(2.0), true);
    assert_eq!(other.segments().len(), 1);
}

#[test]
fn zero_radius_arc_is_a_line() {
    let mut path = CurvePath::new();
    path.move_to(point(0.0, 0.0));
    path.arc(point(5.0, 5.0), 0.0, Angle::zero(), Angle::radians(1.0), true);
    assert_eq!(path.segments().len(), 1);
    assert_eq!(path.current_point(), Some(point(5.0, 5.0)));
}

#[test]
fn close_path_adds_closing_line() {
    let mut path = CurvePath::new();
    path.move_to(point(0.0, 0.0));
    path.line_to(point(10.0, 0.0));
    path.line_to(point(10.0, 10.0));
    path.close_path();

    assert_eq!(path.segments().len(), 3);
    assert!(path.is_closed());
    assert_eq!(path.start_point(), None);
    assert_eq!(path.current_point(), Some(point(0.0, 0.0)));
    assert_eq!(path.bounding_box(), Some(BoundingBox::new(0.0, 0.0, 10.0, 10.0)));
    assert!((path.length() - (20.0 + 200f64.sqrt())).abs() < 1e-9);
    assert_eq!(
        path.adaptive_points(12),
        vec![point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0), point(0.0, 0.0)]
    );

    let mut already_closed = CurvePath::new();
    already_closed.move_to(point(0.0, 0.0));
    already_closed.line_to(point(10.0, 0.0));
    already_closed.line_to(point(0.0, 0.0));
    already_closed.close_path();
    assert_eq!(already_closed.segments().len(), 2);
    assert!(!already_closed.has_closing_line());
    assert_eq!(already_closed.explicit_segments().len(), 2);

    assert!(path.has_closing_line());
    assert_eq!(path.explicit_segments().len(), 2);
}

#[test]
fn arc_length_parameterization() {
    let mut path = CurvePath::new();
    path.move_to(point(0.0, 0.0));
    path.line_to(point(30.0, 0.0));
    path.line_to(point(30.0, 10.0));

    assert_eq!(path.curve_lengths(), vec![30.0, 40.0]);
    assert!((path.sample(0.5) - point(20.0, 0.0)).length() < 1e-9);
    assert!((path.point_at(0.875) - point(30.0, 5.0)).length() < 1e-9);
    assert_eq!(path.u_to_t(0.0), 0.0);
    assert_eq!(path.u_to_t(1.0), 1.0);

    let spaced = path.spaced_points(4);
    assert_eq!(spaced.len(), 5);
    assert!((spaced[1] - point(10.0, 0.0)).length() < 1e-9);
}

#[test]
fn push_joins_curves() {
    let path = CurvePath::from_curves(vec![
        Curve::line(point(0.0, 0.0), point(1.0, 0.0)),
        Curve::line(point(2.0, 0.0), point(3.0, 0.0)),
    ]);
    assert_eq!(path.segments().len(), 3);
    assert_eq!(path.first_point(), Some(point(0.0, 0.0)));
    assert_eq!(path.current_point(), Some(point(3.0, 0.0)));
}

#[test]
fn transform_moves_pen() {
    let mut path = CurvePath::new();
    path.move_to(point(1.0, 1.0));
    path.line_to(point(2.0, 1.0));
    path.transform(&Matrix3::translation(1.0, 0.0));
    assert_eq!(path.current_point(), Some(point(3.0, 1.0)));
    assert_eq!(path.first_point(), Some(point(2.0, 1.0)));
}
