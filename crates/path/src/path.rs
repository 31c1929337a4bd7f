//! The multi sub-path data structure.

use crate::commands::{replay, PathCommand};
use crate::context::DrawingContext;
use crate::curve::Curve;
use crate::curve_path::CurvePath;
use crate::geom::{BoundingBox, Matrix3, ParametricCurve};
use crate::math::{point, Angle, Point, Vector};
use crate::SamplingOptions;

use core::f64::consts::{FRAC_PI_2, PI};

/// A sequence of sub-paths, built with a pen-based API.
///
/// `move_to` starts a new sub-path only if the current one already has segments,
/// otherwise it relocates the start of the (still empty) current sub-path. Drawing after
/// `close_path` starts a new sub-path at the pen position, which is the start of the
/// closed sub-path.
///
/// # Examples
///
/// ```
/// use tracery_path::{BoundingBox, Path2D};
/// use tracery_path::math::point;
///
/// let mut path = Path2D::new();
/// path.rect(0.0, 0.0, 10.0, 5.0);
/// path.move_to(point(20.0, 0.0));
/// path.line_to(point(30.0, 10.0));
///
/// assert_eq!(path.subpaths().len(), 2);
/// assert_eq!(path.bounding_box(), Some(BoundingBox::new(0.0, 0.0, 30.0, 10.0)));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path2D {
    subpaths: Vec<CurvePath>,
    options: SamplingOptions,
}

impl Path2D {
    pub fn new() -> Self {
        Path2D::default()
    }

    pub fn with_options(options: SamplingOptions) -> Self {
        Path2D {
            subpaths: Vec::new(),
            options,
        }
    }

    /// Builds a path by replaying path-data commands.
    pub fn from_commands(commands: &[PathCommand]) -> Self {
        let mut path = Path2D::new();
        replay(commands, &mut path);

        path
    }

    /// Builds a path from already constructed sub-paths.
    pub fn from_subpaths(subpaths: Vec<CurvePath>) -> Self {
        Path2D {
            subpaths,
            options: SamplingOptions::DEFAULT,
        }
    }

    #[inline]
    pub fn options(&self) -> &SamplingOptions {
        &self.options
    }

    #[inline]
    pub fn subpaths(&self) -> &[CurvePath] {
        &self.subpaths
    }

    pub fn is_empty(&self) -> bool {
        self.subpaths.iter().all(CurvePath::is_empty)
    }

    /// The pen position.
    pub fn current_point(&self) -> Option<Point> {
        self.subpaths.last().and_then(CurvePath::current_point)
    }

    fn new_subpath(&self) -> CurvePath {
        CurvePath::new().with_arc_length_divisions(self.options.arc_length_divisions)
    }

    // The sub-path receiving drawing commands.
    fn active(&mut self) -> &mut CurvePath {
        let needs_new = match self.subpaths.last() {
            Some(subpath) => subpath.is_closed(),
            None => true,
        };

        if needs_new {
            let mut subpath = self.new_subpath();
            if let Some(pen) = self.current_point() {
                subpath.move_to(pen);
            }
            self.subpaths.push(subpath);
        }

        let last = self.subpaths.len() - 1;
        &mut self.subpaths[last]
    }

    pub fn move_to(&mut self, to: Point) {
        match self.subpaths.last_mut() {
            Some(subpath) if subpath.is_empty() && !subpath.is_closed() => subpath.move_to(to),
            _ => {
                let mut subpath = self.new_subpath();
                subpath.move_to(to);
                self.subpaths.push(subpath);
            }
        }
    }

    pub fn line_to(&mut self, to: Point) {
        self.active().line_to(to);
    }

    pub fn quadratic_curve_to(&mut self, ctrl: Point, to: Point) {
        self.active().quadratic_curve_to(ctrl, to);
    }

    pub fn bezier_curve_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.active().bezier_curve_to(ctrl1, ctrl2, to);
    }

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
        self.active()
            .ellipse(center, radii, x_rotation, start_angle, end_angle, clockwise);
    }

    pub fn arc(
        &mut self,
        center: Point,
        radius: f64,
        start_angle: Angle,
        end_angle: Angle,
        clockwise: bool,
    ) {
        self.active()
            .arc(center, radius, start_angle, end_angle, clockwise);
    }

    pub fn spline_thru(&mut self, points: &[Point]) {
        self.active().spline_thru(points);
    }

    /// Appends a curve to the current sub-path, see `CurvePath::push`.
    pub fn push_curve(&mut self, curve: Curve) {
        self.active().push(curve);
    }

    pub fn push_subpath(&mut self, subpath: CurvePath) {
        self.subpaths.push(subpath);
    }

    /// Closes the current sub-path. Does nothing if it is already closed.
    pub fn close_path(&mut self) {
        if let Some(subpath) = self.subpaths.last_mut() {
            if !subpath.is_closed() {
                subpath.close_path();
            }
        }
    }

    /// Adds a closed sub-path made of four lines.
    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.move_to(point(x, y));
        self.line_to(point(x + width, y));
        self.line_to(point(x + width, y + height));
        self.line_to(point(x, y + height));
        self.close_path();
    }

    /// Adds a closed rectangle with rounded corners: four lines and four quarter
    /// circles.
    ///
    /// The radius is clamped to half of the smallest side.
    pub fn round_rect(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64) {
        let r = radius.min(width.abs() * 0.5).min(height.abs() * 0.5).max(0.0);
        if r == 0.0 {
            self.rect(x, y, width, height);
            return;
        }

        let quarter = |path: &mut Path2D, center: Point, start: f64| {
            path.ellipse(
                center,
                Vector::new(r, r),
                Angle::zero(),
                Angle::radians(start),
                Angle::radians(start + FRAC_PI_2),
                true,
            );
        };

        // Sides shorter than two radii have no straight part.
        let horizontal = width.abs() > 2.0 * r;
        let vertical = height.abs() > 2.0 * r;
        let (right, bottom) = (x + width, y + height);

        self.move_to(point(x + r, y));
        if horizontal {
            self.line_to(point(right - r, y));
        }
        quarter(self, point(right - r, y + r), -FRAC_PI_2);
        if vertical {
            self.line_to(point(right, bottom - r));
        }
        quarter(self, point(right - r, bottom - r), 0.0);
        if horizontal {
            self.line_to(point(x + r, bottom));
        }
        quarter(self, point(x + r, bottom - r), FRAC_PI_2);
        if vertical {
            self.line_to(point(x, y + r));
        }
        quarter(self, point(x + r, y + r), PI);
        self.close_path();
    }

    /// Bounding box of all sub-paths, `None` if there is no segment.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.subpaths
            .iter()
            .filter_map(CurvePath::bounding_box)
            .reduce(|a, b| a.union(&b))
    }

    /// Sum of the lengths of the sub-paths.
    pub fn length(&self) -> f64 {
        self.subpaths.iter().fold(0.0, |sum, s| sum + s.length())
    }

    pub fn transform(&mut self, m: &Matrix3) {
        for subpath in &mut self.subpaths {
            subpath.transform(m);
        }
    }

    pub fn transformed(&self, m: &Matrix3) -> Self {
        let mut path = self.clone();
        path.transform(m);

        path
    }

    /// Approximates each non-empty sub-path with points, see
    /// `CurvePath::adaptive_points`.
    pub fn flattened(&self, divisions: usize) -> Vec<Vec<Point>> {
        self.subpaths
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.adaptive_points(divisions))
            .collect()
    }

    /// Approximates each non-empty sub-path with the configured curve resolution.
    pub fn points(&self) -> Vec<Vec<Point>> {
        self.flattened(self.options.curve_divisions)
    }

    /// Emits the sub-paths to a drawing context.
    pub fn draw<C: DrawingContext + ?Sized>(&self, ctx: &mut C) {
        for subpath in &self.subpaths {
            let Some(first) = subpath.first_point() else {
                continue;
            };
            ctx.move_to(first);
            for curve in subpath.explicit_segments() {
                curve.draw(ctx);
            }
            if subpath.is_closed() {
                ctx.close_path();
            }
        }
    }

    /// Converts the path to absolute path-data commands.
    ///
    /// The line that `close_path` added to reach the start point is left out since the
    /// close command draws it. Lines explicitly drawn back to the start are kept.
    pub fn to_commands(&self) -> Vec<PathCommand> {
        let mut commands = Vec::new();
        for subpath in &self.subpaths {
            let Some(first) = subpath.first_point() else {
                continue;
            };
            commands.push(PathCommand::move_to(first));

            for curve in subpath.explicit_segments() {
                curve.to_commands(&mut commands);
            }

            if subpath.is_closed() {
                commands.push(PathCommand::close_path());
            }
        }

        commands
    }
}

impl DrawingContext for Path2D {
    fn move_to(&mut self, to: Point) {
        Path2D::move_to(self, to);
    }

    fn line_to(&mut self, to: Point) {
        Path2D::line_to(self, to);
    }

    fn quadratic_curve_to(&mut self, ctrl: Point, to: Point) {
        Path2D::quadratic_curve_to(self, ctrl, to);
    }

    fn bezier_curve_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        Path2D::bezier_curve_to(self, ctrl1, ctrl2, to);
    }

    fn ellipse(
        &mut self,
        center: Point,
        radii: Vector,
        x_rotation: Angle,
        start_angle: Angle,
        end_angle: Angle,
        clockwise: bool,
    ) {
        Path2D::ellipse(self, center, radii, x_rotation, start_angle, end_angle, clockwise);
    }

    fn close_path(&mut self) {
        Path2D::close_path(self);
    }
}

#[cfg(test)]
use crate::context::{DrawEvent, Recorder};
#[cfg(test)]
use crate::curve::CurveKind;
#[cfg(test)]
use crate::geom::ArcFlags;

#[test]
fn move_to_reuses_empty_subpath() {
    let mut path = Path2D::new();
    path.move_to(point(0.0, 0.0));
    path.move_to(point(5.0, 5.0));
    assert_eq!(path.subpaths().len(), 1);

    path.line_to(point(10.0, 5.0));
    path.move_to(point(0.0, 0.0));
    assert_eq!(path.subpaths().len(), 2);
    assert_eq!(path.subpaths()[0].first_point(), Some(point(5.0, 5.0)));
}

#[test]
fn drawing_after_close_starts_a_subpath() {
    let mut path = Path2D::new();
    path.move_to(point(0.0, 0.0));
    path.line_to(point(10.0, 0.0));
    path.line_to(point(10.0, 10.0));
    path.close_path();
    path.line_to(point(0.0, 10.0));

    assert_eq!(path.subpaths().len(), 2);
    assert!(path.subpaths()[0].is_closed());
    assert_eq!(path.subpaths()[0].segments().len(), 3);
    assert_eq!(path.subpaths()[1].first_point(), Some(point(0.0, 0.0)));
    assert_eq!(path.current_point(), Some(point(0.0, 10.0)));
}

#[test]
fn rectangles() {
    let mut path = Path2D::new();
    path.rect(1.0, 2.0, 3.0, 4.0);
    let subpath = &path.subpaths()[0];
    assert_eq!(subpath.segments().len(), 4);
    assert!(subpath
        .segments()
        .iter()
        .all(|c| matches!(c.kind(), CurveKind::Line(_))));
    assert_eq!(path.bounding_box(), Some(BoundingBox::new(1.0, 2.0, 3.0, 4.0)));

    let mut rounded = Path2D::new();
    rounded.round_rect(0.0, 0.0, 20.0, 10.0, 2.0);
    let segments = rounded.subpaths()[0].segments();
    let arcs = segments
        .iter()
        .filter(|c| matches!(c.kind(), CurveKind::Arc(_)))
        .count();
    assert_eq!((segments.len(), arcs), (8, 4));
    let bbox = rounded.bounding_box().unwrap();
    assert!(bbox.approx_eq_eps(&BoundingBox::new(0.0, 0.0, 20.0, 10.0), 1e-9));

    // The radius is clamped and the vertical lines disappear.
    let mut pill = Path2D::new();
    pill.round_rect(0.0, 0.0, 20.0, 10.0, 50.0);
    assert_eq!(pill.subpaths()[0].segments().len(), 6);
}

#[test]
fn command_roundtrip() {
    let commands = vec![
        PathCommand::move_to(point(0.0, 0.0)),
        PathCommand::line_to(point(10.0, 0.0)),
        PathCommand::quadratic_to(point(15.0, 5.0), point(10.0, 10.0)),
        PathCommand::cubic_to(point(8.0, 12.0), point(2.0, 12.0), point(0.0, 10.0)),
        PathCommand::close_path(),
        PathCommand::move_to(point(20.0, 0.0)),
        PathCommand::arc_to(
            Vector::new(5.0, 5.0),
            Angle::zero(),
            ArcFlags {
                large_arc: false,
                sweep: true,
            },
            point(30.0, 0.0),
        ),
    ];

    let path = Path2D::from_commands(&commands);
    assert_eq!(path.subpaths().len(), 2);
    assert_eq!(path.subpaths()[0].segments().len(), 4);

    let output = path.to_commands();
    assert_eq!(output.len(), commands.len());
    assert_eq!(&output[..6], &commands[..6]);
    match output[6] {
        PathCommand::ArcTo { radii, flags, to, .. } => {
            assert!((radii - Vector::new(5.0, 5.0)).length() < 1e-9);
            assert!(flags.sweep);
            assert!((to - point(30.0, 0.0)).length() < 1e-9);
        }
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn draw_emits_subpaths() {
    let mut path = Path2D::new();
    path.move_to(point(0.0, 0.0));
    path.line_to(point(1.0, 0.0));
    path.close_path();

    let mut recorder = Recorder::default();
    path.draw(&mut recorder);
    assert_eq!(
        recorder.events,
        vec![
            DrawEvent::MoveTo(point(0.0, 0.0)),
            DrawEvent::LineTo(point(1.0, 0.0)),
            DrawEvent::ClosePath,
        ]
    );

    // Drawing into another path reproduces it.
    let mut copy = Path2D::new();
    path.draw(&mut copy);
    assert_eq!(copy, path);
}

#[test]
fn transform_and_flatten() {
    let mut path = Path2D::new();
    path.move_to(point(0.0, 0.0));
    path.line_to(point(1.0, 0.0));
    path.quadratic_curve_to(point(2.0, 0.0), point(2.0, 1.0));
    path.move_to(point(5.0, 5.0));

    let flattened = path.flattened(4);
    assert_eq!(flattened.len(), 1);
    assert_eq!(flattened[0].len(), 6);

    let moved = path.transformed(&Matrix3::translation(10.0, 0.0));
    assert_eq!(moved.bounding_box(), Some(BoundingBox::new(10.0, 0.0, 2.0, 1.0)));
    assert_eq!(moved.current_point(), Some(point(15.0, 5.0)));
}

#[test]
fn explicit_closing_line_is_kept() {
    let explicit = [
        PathCommand::move_to(point(0.0, 0.0)),
        PathCommand::line_to(point(10.0, 0.0)),
        PathCommand::line_to(point(0.0, 0.0)),
        PathCommand::close_path(),
    ];
    let path = Path2D::from_commands(&explicit);
    assert!(!path.subpaths()[0].has_closing_line());
    assert_eq!(path.to_commands(), explicit);

    let implicit = [
        PathCommand::move_to(point(0.0, 0.0)),
        PathCommand::line_to(point(10.0, 0.0)),
        PathCommand::line_to(point(10.0, 10.0)),
        PathCommand::close_path(),
    ];
    let path = Path2D::from_commands(&implicit);
    assert_eq!(path.subpaths()[0].segments().len(), 3);
    assert_eq!(path.to_commands(), implicit);
}
