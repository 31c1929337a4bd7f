//! The closed set of curve types a path is made of.

use crate::commands::PathCommand;
use crate::context::DrawingContext;
use crate::geom::parametric::{ParametricCurve, DEFAULT_ARC_LENGTH_DIVISIONS};
use crate::geom::{
    Arc, CatmullRomSpline, CubicBezierSegment, LineSegment, Matrix3, Polygon,
    QuadraticBezierSegment, Rectangle,
};
use crate::math::{Point, Vector};

use std::borrow::Cow;
use std::cell::OnceCell;

/// The geometry of a curve segment.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum CurveKind {
    Line(LineSegment),
    Quadratic(QuadraticBezierSegment),
    Cubic(CubicBezierSegment),
    Arc(Arc),
    Spline(CatmullRomSpline),
    Polygon(Polygon),
    Rectangle(Rectangle),
    Composite(CompositeCurve),
}

/// A curve segment with its lazily computed arc-length table.
///
/// The table is computed on the first length-dependent query and cached until the
/// geometry changes. Every mutation going through `Curve` (`kind_mut`, `transform`,
/// `set_arc_length_divisions`) drops it.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Curve {
    kind: CurveKind,
    arc_length_divisions: usize,
    #[cfg_attr(feature = "serialization", serde(skip))]
    lengths: OnceCell<Vec<f64>>,
}

impl Curve {
    pub fn new(kind: CurveKind) -> Self {
        Curve {
            kind,
            arc_length_divisions: DEFAULT_ARC_LENGTH_DIVISIONS,
            lengths: OnceCell::new(),
        }
    }

    pub fn line(from: Point, to: Point) -> Self {
        Curve::new(CurveKind::Line(LineSegment { from, to }))
    }

    pub fn quadratic(from: Point, ctrl: Point, to: Point) -> Self {
        Curve::new(CurveKind::Quadratic(QuadraticBezierSegment { from, ctrl, to }))
    }

    pub fn cubic(from: Point, ctrl1: Point, ctrl2: Point, to: Point) -> Self {
        Curve::new(CurveKind::Cubic(CubicBezierSegment {
            from,
            ctrl1,
            ctrl2,
            to,
        }))
    }

    pub fn arc(arc: Arc) -> Self {
        Curve::new(CurveKind::Arc(arc))
    }

    pub fn spline(points: Vec<Point>) -> Self {
        Curve::new(CurveKind::Spline(CatmullRomSpline::new(points)))
    }

    pub fn polygon(points: Vec<Point>, closed: bool) -> Self {
        Curve::new(CurveKind::Polygon(Polygon::new(points, closed)))
    }

    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Self {
        Curve::new(CurveKind::Rectangle(Rectangle::new(x, y, width, height)))
    }

    pub fn composite(curves: Vec<Curve>) -> Self {
        Curve::new(CurveKind::Composite(CompositeCurve::new(curves)))
    }

    #[inline]
    pub fn with_arc_length_divisions(mut self, divisions: usize) -> Self {
        self.set_arc_length_divisions(divisions);
        self
    }

    pub fn set_arc_length_divisions(&mut self, divisions: usize) {
        self.arc_length_divisions = divisions.max(1);
        self.invalidate_lengths();
    }

    #[inline]
    pub fn kind(&self) -> &CurveKind {
        &self.kind
    }

    /// Mutable access to the geometry. Drops the cached arc-length table.
    pub fn kind_mut(&mut self) -> &mut CurveKind {
        self.invalidate_lengths();
        &mut self.kind
    }

    pub fn into_kind(self) -> CurveKind {
        self.kind
    }

    /// Marks the arc-length table as stale.
    #[inline]
    pub fn invalidate_lengths(&mut self) {
        self.lengths.take();
    }

    fn as_parametric(&self) -> &dyn ParametricCurve {
        match &self.kind {
            CurveKind::Line(c) => c,
            CurveKind::Quadratic(c) => c,
            CurveKind::Cubic(c) => c,
            CurveKind::Arc(c) => c,
            CurveKind::Spline(c) => c,
            CurveKind::Polygon(c) => c,
            CurveKind::Rectangle(c) => c,
            CurveKind::Composite(c) => c,
        }
    }

    /// Applies an affine transformation in place.
    ///
    /// Rectangles stay rectangles under maps that keep the axes aligned and turn into
    /// closed polygons otherwise.
    pub fn transform(&mut self, m: &Matrix3) {
        self.invalidate_lengths();
        let kind = match &self.kind {
            CurveKind::Line(c) => CurveKind::Line(c.transformed(m)),
            CurveKind::Quadratic(c) => CurveKind::Quadratic(c.transformed(m)),
            CurveKind::Cubic(c) => CurveKind::Cubic(c.transformed(m)),
            CurveKind::Arc(c) => CurveKind::Arc(c.transformed(m)),
            CurveKind::Spline(c) => CurveKind::Spline(c.transformed(m)),
            CurveKind::Polygon(c) => CurveKind::Polygon(c.transformed(m)),
            CurveKind::Rectangle(r) if m.m12 == 0.0 && m.m21 == 0.0 => {
                let corners = r.corners();
                let a = m.transform_point(corners[0]);
                let b = m.transform_point(corners[2]);
                let min = a.min(b);
                let max = a.max(b);
                CurveKind::Rectangle(Rectangle::new(min.x, min.y, max.x - min.x, max.y - min.y))
            }
            CurveKind::Rectangle(r) => CurveKind::Polygon(r.to_polygon().transformed(m)),
            CurveKind::Composite(_) => {
                if let CurveKind::Composite(c) = &mut self.kind {
                    for curve in &mut c.curves {
                        curve.transform(m);
                    }
                }
                return;
            }
        };

        self.kind = kind;
    }

    /// The same curve traversed in the opposite direction.
    pub fn reversed(&self) -> Curve {
        let kind = match &self.kind {
            CurveKind::Line(c) => CurveKind::Line(c.flip()),
            CurveKind::Quadratic(c) => CurveKind::Quadratic(c.flip()),
            CurveKind::Cubic(c) => CurveKind::Cubic(c.flip()),
            CurveKind::Arc(c) => CurveKind::Arc(c.flip()),
            CurveKind::Spline(c) => {
                let mut points = c.points.clone();
                points.reverse();
                CurveKind::Spline(CatmullRomSpline::new(points))
            }
            CurveKind::Polygon(c) => CurveKind::Polygon(reversed_polygon(c)),
            CurveKind::Rectangle(r) => CurveKind::Polygon(reversed_polygon(&r.to_polygon())),
            CurveKind::Composite(c) => CurveKind::Composite(CompositeCurve::new(
                c.curves.iter().rev().map(Curve::reversed).collect(),
            )),
        };

        Curve::new(kind).with_arc_length_divisions(self.arc_length_divisions)
    }

    /// Appends the absolute commands drawing this curve from its start point.
    ///
    /// The start point itself is not emitted: it is the end of the previous curve or
    /// the sub-path's move-to.
    pub fn to_commands(&self, output: &mut Vec<PathCommand>) {
        match &self.kind {
            CurveKind::Line(c) => output.push(PathCommand::line_to(c.to)),
            CurveKind::Quadratic(c) => output.push(PathCommand::quadratic_to(c.ctrl, c.to)),
            CurveKind::Cubic(c) => output.push(PathCommand::cubic_to(c.ctrl1, c.ctrl2, c.to)),
            CurveKind::Arc(arc) => {
                if arc.is_degenerate() {
                    output.push(PathCommand::line_to(arc.sample(1.0)));
                    return;
                }
                for svg_arc in arc.to_svg_arcs() {
                    output.push(PathCommand::arc_to(
                        svg_arc.radii,
                        svg_arc.x_rotation,
                        svg_arc.flags,
                        svg_arc.to,
                    ));
                }
            }
            CurveKind::Spline(c) => {
                for bezier in c.to_cubic_beziers() {
                    output.push(PathCommand::cubic_to(bezier.ctrl1, bezier.ctrl2, bezier.to));
                }
            }
            CurveKind::Polygon(c) => {
                for edge in c.edges() {
                    output.push(PathCommand::line_to(edge.to));
                }
            }
            CurveKind::Rectangle(r) => {
                let corners = r.corners();
                for corner in corners[1..].iter().chain(&corners[..1]) {
                    output.push(PathCommand::line_to(*corner));
                }
            }
            CurveKind::Composite(c) => {
                for curve in &c.curves {
                    curve.to_commands(output);
                }
            }
        }
    }

    /// Emits the drawing instructions of this curve, from its start point.
    pub fn draw<C: DrawingContext + ?Sized>(&self, ctx: &mut C) {
        match &self.kind {
            CurveKind::Line(c) => ctx.line_to(c.to),
            CurveKind::Quadratic(c) => ctx.quadratic_curve_to(c.ctrl, c.to),
            CurveKind::Cubic(c) => ctx.bezier_curve_to(c.ctrl1, c.ctrl2, c.to),
            CurveKind::Arc(a) => ctx.ellipse(
                a.center,
                a.radii,
                a.x_rotation,
                a.start_angle,
                a.end_angle,
                a.clockwise,
            ),
            CurveKind::Spline(c) => {
                for b in c.to_cubic_beziers() {
                    ctx.bezier_curve_to(b.ctrl1, b.ctrl2, b.to);
                }
            }
            CurveKind::Polygon(c) => {
                for edge in c.edges() {
                    ctx.line_to(edge.to);
                }
            }
            CurveKind::Rectangle(r) => {
                let corners = r.corners();
                for corner in corners[1..].iter().chain(&corners[..1]) {
                    ctx.line_to(*corner);
                }
            }
            CurveKind::Composite(c) => {
                for curve in &c.curves {
                    curve.draw(ctx);
                }
            }
        }
    }
}

fn reversed_polygon(polygon: &Polygon) -> Polygon {
    let mut points = polygon.points.clone();
    points.reverse();
    if polygon.closed && !points.is_empty() {
        // Keep starting at the same vertex.
        points.rotate_right(1);
    }

    Polygon::new(points, polygon.closed)
}

impl PartialEq for Curve {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl ParametricCurve for Curve {
    fn sample(&self, t: f64) -> Point {
        self.as_parametric().sample(t)
    }

    fn from(&self) -> Point {
        self.as_parametric().from()
    }

    fn to(&self) -> Point {
        self.as_parametric().to()
    }

    fn is_closed(&self) -> bool {
        self.as_parametric().is_closed()
    }

    fn tangent(&self, t: f64) -> Vector {
        self.as_parametric().tangent(t)
    }

    fn arc_length_divisions(&self) -> usize {
        self.arc_length_divisions
    }

    fn compute_lengths(&self, divisions: usize) -> Vec<f64> {
        self.as_parametric().compute_lengths(divisions)
    }

    fn lengths(&self) -> Cow<'_, [f64]> {
        Cow::Borrowed(
            self.lengths
                .get_or_init(|| self.compute_lengths(self.arc_length_divisions)),
        )
    }

    fn adaptive_points(&self, divisions: usize) -> Vec<Point> {
        self.as_parametric().adaptive_points(divisions)
    }

    fn min_max(&self, min: &mut Point, max: &mut Point) {
        self.as_parametric().min_max(min, max)
    }

    fn t_for_point(&self, target: Point, epsilon: f64) -> f64 {
        self.as_parametric().t_for_point(target, epsilon)
    }
}

/// An ordered sequence of curves behaving as a single curve.
///
/// The parameter is distributed along the children by arc length.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CompositeCurve {
    pub curves: Vec<Curve>,
}

impl CompositeCurve {
    pub fn new(curves: Vec<Curve>) -> Self {
        CompositeCurve { curves }
    }
}

impl ParametricCurve for CompositeCurve {
    fn sample(&self, t: f64) -> Point {
        sample_sequence(&self.curves, &cumulative_lengths(&self.curves), t)
    }

    fn from(&self) -> Point {
        self.curves.first().map(|c| c.from()).unwrap_or_else(Point::origin)
    }

    fn to(&self) -> Point {
        self.curves.last().map(|c| c.to()).unwrap_or_else(Point::origin)
    }

    fn length(&self) -> f64 {
        self.curves.iter().fold(0.0, |sum, c| sum + c.length())
    }

    fn adaptive_points(&self, divisions: usize) -> Vec<Point> {
        let mut points = Vec::new();
        for curve in &self.curves {
            append_points(&mut points, curve.adaptive_points(divisions));
        }

        points
    }

    fn min_max(&self, min: &mut Point, max: &mut Point) {
        for curve in &self.curves {
            curve.min_max(min, max);
        }
    }
}

/// Running sum of the lengths of a sequence of curves.
pub(crate) fn cumulative_lengths(curves: &[Curve]) -> Vec<f64> {
    let mut sum = 0.0;
    curves
        .iter()
        .map(|curve| {
            sum += curve.length();
            sum
        })
        .collect()
}

/// Samples a sequence of curves at a fraction `t` of its total length.
pub(crate) fn sample_sequence(curves: &[Curve], cumulative: &[f64], t: f64) -> Point {
    let (Some(first), Some(&total)) = (curves.first(), cumulative.last()) else {
        return Point::origin();
    };
    if total <= 0.0 {
        return first.from();
    }

    let d = t * total;
    let index = cumulative
        .partition_point(|&l| l < d)
        .min(curves.len() - 1);
    let before = if index == 0 { 0.0 } else { cumulative[index - 1] };
    let segment_length = cumulative[index] - before;
    let u = if segment_length > 0.0 {
        ((d - before) / segment_length).clamp(0.0, 1.0)
    } else {
        0.0
    };

    curves[index].point_at(u)
}

/// Appends points, skipping the first one if it repeats the last point of the output.
pub(crate) fn append_points(output: &mut Vec<Point>, points: Vec<Point>) {
    let mut iter = points.into_iter().peekable();
    if let (Some(last), Some(first)) = (output.last(), iter.peek()) {
        if last == first {
            iter.next();
        }
    }
    output.extend(iter);
}

#[cfg(test)]
use crate::math::{point, vector};
#[cfg(test)]
use crate::geom::math::Angle;

#[test]
fn length_cache_invalidation() {
    let mut curve = Curve::line(point(0.0, 0.0), point(3.0, 4.0));
    assert_eq!(curve.length(), 5.0);

    if let CurveKind::Line(line) = curve.kind_mut() {
        line.to = point(6.0, 8.0);
    }
    assert_eq!(curve.length(), 10.0);

    curve.transform(&Matrix3::scale(0.5, 0.5));
    assert!((curve.length() - 5.0).abs() < 1e-12);
}

#[test]
fn u_to_t_endpoints_for_every_kind() {
    let curves = vec![
        Curve::line(point(0.0, 0.0), point(10.0, 0.0)),
        Curve::quadratic(point(0.0, 0.0), point(5.0, 10.0), point(10.0, 0.0)),
        Curve::cubic(point(0.0, 0.0), point(0.0, 10.0), point(10.0, 10.0), point(10.0, 0.0)),
        Curve::arc(Arc::circle(point(0.0, 0.0), 3.0)),
        Curve::spline(vec![point(0.0, 0.0), point(4.0, 3.0), point(8.0, -2.0)]),
        Curve::polygon(vec![point(0.0, 0.0), point(4.0, 0.0), point(4.0, 4.0)], true),
        Curve::rectangle(0.0, 0.0, 3.0, 2.0),
        Curve::composite(vec![
            Curve::line(point(0.0, 0.0), point(1.0, 0.0)),
            Curve::quadratic(point(1.0, 0.0), point(2.0, 1.0), point(3.0, 0.0)),
        ]),
    ];

    for curve in &curves {
        assert_eq!(curve.u_to_t(0.0), 0.0);
        assert_eq!(curve.u_to_t(1.0), 1.0);
        let mut prev = 0.0;
        for i in 0..=50 {
            let t = curve.u_to_t(i as f64 / 50.0);
            assert!(t >= prev, "{:?}", curve.kind());
            prev = t;
        }
    }
}

#[test]
fn composite_sampling() {
    let composite = Curve::composite(vec![
        Curve::line(point(0.0, 0.0), point(10.0, 0.0)),
        Curve::line(point(10.0, 0.0), point(10.0, 30.0)),
    ]);
    assert!((composite.length() - 40.0).abs() < 1e-9);
    assert!((composite.sample(0.25) - point(10.0, 0.0)).length() < 1e-9);
    assert!((composite.sample(0.5) - point(10.0, 10.0)).length() < 1e-9);
    assert_eq!(composite.from(), point(0.0, 0.0));
    assert_eq!(composite.to(), point(10.0, 30.0));
    assert_eq!(
        composite.adaptive_points(12),
        vec![point(0.0, 0.0), point(10.0, 0.0), point(10.0, 30.0)]
    );
}

#[test]
fn reversed_curves() {
    let arc = Curve::arc(Arc::new(
        point(0.0, 0.0),
        vector(2.0, 1.0),
        Angle::radians(0.0),
        Angle::radians(0.0),
        Angle::radians(1.0),
        true,
    ));
    let cubic = Curve::cubic(point(0.0, 0.0), point(1.0, 3.0), point(4.0, 3.0), point(5.0, 0.0));
    let polygon = Curve::polygon(vec![point(0.0, 0.0), point(4.0, 0.0), point(4.0, 4.0)], true);

    for curve in [arc, cubic, polygon] {
        let reversed = curve.reversed();
        for i in 0..=4 {
            let t = i as f64 / 4.0;
            assert!((reversed.sample(t) - curve.sample(1.0 - t)).length() < 1e-9);
        }
    }
}

#[test]
fn rectangle_transform() {
    let mut rect = Curve::rectangle(0.0, 0.0, 2.0, 1.0);
    rect.transform(&Matrix3::translation(1.0, 1.0).then_scale(2.0, 2.0));
    assert_eq!(rect.kind(), &CurveKind::Rectangle(Rectangle::new(2.0, 2.0, 4.0, 2.0)));

    rect.transform(&Matrix3::rotation(Angle::degrees(45.0)));
    assert!(matches!(rect.kind(), CurveKind::Polygon(p) if p.closed && p.points.len() == 4));
}

#[test]
fn commands_of_curves() {
    let mut commands = Vec::new();
    Curve::arc(Arc::circle(point(0.0, 0.0), 1.0)).to_commands(&mut commands);
    assert_eq!(commands.len(), 2);

    commands.clear();
    Curve::spline(vec![point(0.0, 0.0), point(1.0, 1.0), point(2.0, 0.0)]).to_commands(&mut commands);
    assert_eq!(commands.len(), 2);

    commands.clear();
    Curve::rectangle(0.0, 0.0, 1.0, 1.0).to_commands(&mut commands);
    assert_eq!(commands.last(), Some(&PathCommand::line_to(point(0.0, 0.0))));
}
