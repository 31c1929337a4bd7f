//! The pen-based drawing interface paths are emitted to and built from.

use crate::math::{Angle, Point, Vector};

/// A sink for drawing instructions, modeled after the canvas 2D context.
///
/// Rendering surfaces implement this to receive the curves of a path (see
/// `Path2D::draw`). `Path2D` implements it as well so that any emitter can build a
/// path.
///
/// Angles follow the y-down convention: with `clockwise` set the ellipse is traversed
/// in the direction of increasing angles.
pub trait DrawingContext {
    /// Starts a new sub-path at the given position.
    fn move_to(&mut self, to: Point);

    /// Adds a line segment from the current position.
    fn line_to(&mut self, to: Point);

    /// Adds a quadratic bézier segment from the current position.
    fn quadratic_curve_to(&mut self, ctrl: Point, to: Point);

    /// Adds a cubic bézier segment from the current position.
    fn bezier_curve_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point);

    /// Adds an elliptic arc, connected to the current position with a line if needed.
    #[allow(clippy::too_many_arguments)]
    fn ellipse(
        &mut self,
        center: Point,
        radii: Vector,
        x_rotation: Angle,
        start_angle: Angle,
        end_angle: Angle,
        clockwise: bool,
    );

    /// Adds a circular arc, connected to the current position with a line if needed.
    fn arc(
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
            Angle::radians(0.0),
            start_angle,
            end_angle,
            clockwise,
        );
    }

    /// Closes the current sub-path with a line back to its first point.
    fn close_path(&mut self);
}

/// A drawing context that records the instructions it receives.
///
/// Mostly useful to inspect what a path emits.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Recorder {
    pub events: Vec<DrawEvent>,
}

/// One instruction received by a `Recorder`.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawEvent {
    MoveTo(Point),
    LineTo(Point),
    QuadraticCurveTo(Point, Point),
    BezierCurveTo(Point, Point, Point),
    Ellipse {
        center: Point,
        radii: Vector,
        x_rotation: Angle,
        start_angle: Angle,
        end_angle: Angle,
        clockwise: bool,
    },
    ClosePath,
}

impl DrawingContext for Recorder {
    fn move_to(&mut self, to: Point) {
        self.events.push(DrawEvent::MoveTo(to));
    }

    fn line_to(&mut self, to: Point) {
        self.events.push(DrawEvent::LineTo(to));
    }

    fn quadratic_curve_to(&mut self, ctrl: Point, to: Point) {
        self.events.push(DrawEvent::QuadraticCurveTo(ctrl, to));
    }

    fn bezier_curve_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.events.push(DrawEvent::BezierCurveTo(ctrl1, ctrl2, to));
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
        self.events.push(DrawEvent::Ellipse {
            center,
            radii,
            x_rotation,
            start_angle,
            end_angle,
            clockwise,
        });
    }

    fn close_path(&mut self) {
        self.events.push(DrawEvent::ClosePath);
    }
}

// Automatically implement DrawingContext for all &mut DrawingContext.
impl<'l, C: DrawingContext + ?Sized> DrawingContext for &'l mut C {
    fn move_to(&mut self, to: Point) {
        (**self).move_to(to)
    }

    fn line_to(&mut self, to: Point) {
        (**self).line_to(to)
    }

    fn quadratic_curve_to(&mut self, ctrl: Point, to: Point) {
        (**self).quadratic_curve_to(ctrl, to)
    }

    fn bezier_curve_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        (**self).bezier_curve_to(ctrl1, ctrl2, to)
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
        (**self).ellipse(center, radii, x_rotation, start_angle, end_angle, clockwise)
    }

    fn arc(
        &mut self,
        center: Point,
        radius: f64,
        start_angle: Angle,
        end_angle: Angle,
        clockwise: bool,
    ) {
        (**self).arc(center, radius, start_angle, end_angle, clockwise)
    }

    fn close_path(&mut self) {
        (**self).close_path()
    }
}
