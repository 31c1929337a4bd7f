//! The path-data instruction set.
//!
//! A `PathCommand` is one instruction of the SVG path `d` attribute grammar, in its
//! absolute or relative form. This is the representation paths are converted from and
//! to text with (see the `tracery_svg` crate).
//!
//! # Examples
//!
//! ```
//! use tracery_path::PathCommand;
//! use tracery_path::commands::relative_to_absolute;
//! use tracery_path::math::point;
//!
//! let commands = [
//!     PathCommand::MoveTo { abs: false, to: point(1.0, 1.0) },
//!     PathCommand::LineTo { abs: false, to: point(2.0, 0.0) },
//!     PathCommand::VerticalLineTo { abs: false, y: 3.0 },
//! ];
//!
//! let absolute = relative_to_absolute(&commands);
//! assert_eq!(absolute[1], PathCommand::line_to(point(3.0, 1.0)));
//! assert_eq!(absolute[2], PathCommand::VerticalLineTo { abs: true, y: 4.0 });
//! ```

use crate::context::DrawingContext;
use crate::geom::{ArcFlags, SvgArc};
use crate::math::{point, Angle, Point, Vector};

use arrayvec::ArrayVec;

/// One path-data instruction.
///
/// When `abs` is false, positions are relative to the current point (for `ArcTo`, only
/// the end point is).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum PathCommand {
    MoveTo {
        abs: bool,
        to: Point,
    },
    LineTo {
        abs: bool,
        to: Point,
    },
    HorizontalLineTo {
        abs: bool,
        x: f64,
    },
    VerticalLineTo {
        abs: bool,
        y: f64,
    },
    CubicTo {
        abs: bool,
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
    SmoothCubicTo {
        abs: bool,
        ctrl2: Point,
        to: Point,
    },
    QuadraticTo {
        abs: bool,
        ctrl: Point,
        to: Point,
    },
    SmoothQuadraticTo {
        abs: bool,
        to: Point,
    },
    ArcTo {
        abs: bool,
        radii: Vector,
        x_rotation: Angle,
        flags: ArcFlags,
        to: Point,
    },
    ClosePath {
        abs: bool,
    },
}

impl PathCommand {
    pub fn move_to(to: Point) -> Self {
        PathCommand::MoveTo { abs: true, to }
    }

    pub fn line_to(to: Point) -> Self {
        PathCommand::LineTo { abs: true, to }
    }

    pub fn quadratic_to(ctrl: Point, to: Point) -> Self {
        PathCommand::QuadraticTo { abs: true, ctrl, to }
    }

    pub fn cubic_to(ctrl1: Point, ctrl2: Point, to: Point) -> Self {
        PathCommand::CubicTo {
            abs: true,
            ctrl1,
            ctrl2,
            to,
        }
    }

    pub fn arc_to(radii: Vector, x_rotation: Angle, flags: ArcFlags, to: Point) -> Self {
        PathCommand::ArcTo {
            abs: true,
            radii,
            x_rotation,
            flags,
            to,
        }
    }

    pub fn close_path() -> Self {
        PathCommand::ClosePath { abs: true }
    }

    /// The command letter, upper case for absolute commands.
    pub fn letter(&self) -> char {
        let letter = match self {
            PathCommand::MoveTo { .. } => 'm',
            PathCommand::LineTo { .. } => 'l',
            PathCommand::HorizontalLineTo { .. } => 'h',
            PathCommand::VerticalLineTo { .. } => 'v',
            PathCommand::CubicTo { .. } => 'c',
            PathCommand::SmoothCubicTo { .. } => 's',
            PathCommand::QuadraticTo { .. } => 'q',
            PathCommand::SmoothQuadraticTo { .. } => 't',
            PathCommand::ArcTo { .. } => 'a',
            PathCommand::ClosePath { .. } => 'z',
        };

        if self.is_absolute() {
            letter.to_ascii_uppercase()
        } else {
            letter
        }
    }

    pub fn is_absolute(&self) -> bool {
        match *self {
            PathCommand::MoveTo { abs, .. }
            | PathCommand::LineTo { abs, .. }
            | PathCommand::HorizontalLineTo { abs, .. }
            | PathCommand::VerticalLineTo { abs, .. }
            | PathCommand::CubicTo { abs, .. }
            | PathCommand::SmoothCubicTo { abs, .. }
            | PathCommand::QuadraticTo { abs, .. }
            | PathCommand::SmoothQuadraticTo { abs, .. }
            | PathCommand::ArcTo { abs, .. }
            | PathCommand::ClosePath { abs } => abs,
        }
    }

    /// The numeric arguments in path-data order. Arc flags are `0.0` or `1.0` and the
    /// rotation is in degrees.
    pub fn arguments(&self) -> ArrayVec<f64, 7> {
        let mut args = ArrayVec::new();
        match *self {
            PathCommand::MoveTo { to, .. }
            | PathCommand::LineTo { to, .. }
            | PathCommand::SmoothQuadraticTo { to, .. } => {
                args.push(to.x);
                args.push(to.y);
            }
            PathCommand::HorizontalLineTo { x, .. } => args.push(x),
            PathCommand::VerticalLineTo { y, .. } => args.push(y),
            PathCommand::CubicTo {
                ctrl1, ctrl2, to, ..
            } => {
                args.extend([ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y]);
            }
            PathCommand::SmoothCubicTo { ctrl2, to, .. } => {
                args.extend([ctrl2.x, ctrl2.y, to.x, to.y]);
            }
            PathCommand::QuadraticTo { ctrl, to, .. } => {
                args.extend([ctrl.x, ctrl.y, to.x, to.y]);
            }
            PathCommand::ArcTo {
                radii,
                x_rotation,
                flags,
                to,
                ..
            } => {
                args.extend([
                    radii.x,
                    radii.y,
                    x_rotation.to_degrees(),
                    flag_value(flags.large_arc),
                    flag_value(flags.sweep),
                    to.x,
                    to.y,
                ]);
            }
            PathCommand::ClosePath { .. } => {}
        }

        args
    }

    /// The end point of the command, if it is expressed as a point.
    pub fn to(&self) -> Option<Point> {
        match *self {
            PathCommand::MoveTo { to, .. }
            | PathCommand::LineTo { to, .. }
            | PathCommand::CubicTo { to, .. }
            | PathCommand::SmoothCubicTo { to, .. }
            | PathCommand::QuadraticTo { to, .. }
            | PathCommand::SmoothQuadraticTo { to, .. }
            | PathCommand::ArcTo { to, .. } => Some(to),
            PathCommand::HorizontalLineTo { .. }
            | PathCommand::VerticalLineTo { .. }
            | PathCommand::ClosePath { .. } => None,
        }
    }

    /// The same command with every position offset by `by`.
    fn translated(&self, by: Vector) -> Self {
        match *self {
            PathCommand::MoveTo { abs, to } => PathCommand::MoveTo { abs, to: to + by },
            PathCommand::LineTo { abs, to } => PathCommand::LineTo { abs, to: to + by },
            PathCommand::HorizontalLineTo { abs, x } => {
                PathCommand::HorizontalLineTo { abs, x: x + by.x }
            }
            PathCommand::VerticalLineTo { abs, y } => {
                PathCommand::VerticalLineTo { abs, y: y + by.y }
            }
            PathCommand::CubicTo {
                abs,
                ctrl1,
                ctrl2,
                to,
            } => PathCommand::CubicTo {
                abs,
                ctrl1: ctrl1 + by,
                ctrl2: ctrl2 + by,
                to: to + by,
            },
            PathCommand::SmoothCubicTo { abs, ctrl2, to } => PathCommand::SmoothCubicTo {
                abs,
                ctrl2: ctrl2 + by,
                to: to + by,
            },
            PathCommand::QuadraticTo { abs, ctrl, to } => PathCommand::QuadraticTo {
                abs,
                ctrl: ctrl + by,
                to: to + by,
            },
            PathCommand::SmoothQuadraticTo { abs, to } => {
                PathCommand::SmoothQuadraticTo { abs, to: to + by }
            }
            PathCommand::ArcTo {
                abs,
                radii,
                x_rotation,
                flags,
                to,
            } => PathCommand::ArcTo {
                abs,
                radii,
                x_rotation,
                flags,
                to: to + by,
            },
            PathCommand::ClosePath { abs } => PathCommand::ClosePath { abs },
        }
    }

    fn with_abs(self, value: bool) -> Self {
        let mut cmd = self;
        match &mut cmd {
            PathCommand::MoveTo { abs, .. }
            | PathCommand::LineTo { abs, .. }
            | PathCommand::HorizontalLineTo { abs, .. }
            | PathCommand::VerticalLineTo { abs, .. }
            | PathCommand::CubicTo { abs, .. }
            | PathCommand::SmoothCubicTo { abs, .. }
            | PathCommand::QuadraticTo { abs, .. }
            | PathCommand::SmoothQuadraticTo { abs, .. }
            | PathCommand::ArcTo { abs, .. }
            | PathCommand::ClosePath { abs } => *abs = value,
        }

        cmd
    }
}

fn flag_value(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

/// Tracks the pen while walking a command list.
#[derive(Copy, Clone, Debug, Default)]
struct Cursor {
    first: Point,
    current: Point,
}

impl Cursor {
    /// Converts a command to its absolute form and advances the pen.
    fn absolute(&mut self, cmd: &PathCommand) -> PathCommand {
        let cmd = if cmd.is_absolute() {
            *cmd
        } else {
            cmd.translated(self.current.to_vector()).with_abs(true)
        };

        match cmd {
            PathCommand::MoveTo { to, .. } => {
                self.first = to;
                self.current = to;
            }
            PathCommand::HorizontalLineTo { x, .. } => self.current.x = x,
            PathCommand::VerticalLineTo { y, .. } => self.current.y = y,
            PathCommand::ClosePath { .. } => self.current = self.first,
            _ => {
                if let Some(to) = cmd.to() {
                    self.current = to;
                }
            }
        }

        cmd
    }
}

/// Converts every command to its absolute form.
///
/// Shorthand commands (`H`, `V`, `S`, `T`) are kept as such.
pub fn relative_to_absolute(commands: &[PathCommand]) -> Vec<PathCommand> {
    let mut cursor = Cursor::default();
    commands.iter().map(|cmd| cursor.absolute(cmd)).collect()
}

/// Emits a command list to a drawing context.
///
/// Relative and shorthand commands are resolved: smooth curves reflect the control
/// point of the previous curve of the same kind (or use the current point if there is
/// none), and arcs are converted to the center parameterization. Arcs that are straight
/// lines (see `SvgArc::is_straight_line`) are drawn as lines.
pub fn replay<C: DrawingContext + ?Sized>(commands: &[PathCommand], ctx: &mut C) {
    let mut cursor = Cursor::default();
    let mut last_cubic_ctrl: Option<Point> = None;
    let mut last_quadratic_ctrl: Option<Point> = None;

    for cmd in commands {
        let from = cursor.current;
        let cmd = cursor.absolute(cmd);
        log::trace!("replay {:?}", cmd);

        let mut cubic_ctrl = None;
        let mut quadratic_ctrl = None;
        match cmd {
            PathCommand::MoveTo { to, .. } => ctx.move_to(to),
            PathCommand::LineTo { to, .. } => ctx.line_to(to),
            PathCommand::HorizontalLineTo { x, .. } => ctx.line_to(point(x, from.y)),
            PathCommand::VerticalLineTo { y, .. } => ctx.line_to(point(from.x, y)),
            PathCommand::CubicTo {
                ctrl1, ctrl2, to, ..
            } => {
                ctx.bezier_curve_to(ctrl1, ctrl2, to);
                cubic_ctrl = Some(ctrl2);
            }
            PathCommand::SmoothCubicTo { ctrl2, to, .. } => {
                let ctrl1 = reflect(last_cubic_ctrl, from);
                ctx.bezier_curve_to(ctrl1, ctrl2, to);
                cubic_ctrl = Some(ctrl2);
            }
            PathCommand::QuadraticTo { ctrl, to, .. } => {
                ctx.quadratic_curve_to(ctrl, to);
                quadratic_ctrl = Some(ctrl);
            }
            PathCommand::SmoothQuadraticTo { to, .. } => {
                let ctrl = reflect(last_quadratic_ctrl, from);
                ctx.quadratic_curve_to(ctrl, to);
                quadratic_ctrl = Some(ctrl);
            }
            PathCommand::ArcTo {
                radii,
                x_rotation,
                flags,
                to,
                ..
            } => {
                let svg_arc = SvgArc {
                    from,
                    to,
                    radii,
                    x_rotation,
                    flags,
                };
                match svg_arc.to_arc() {
                    Some(arc) => ctx.ellipse(
                        arc.center,
                        arc.radii,
                        arc.x_rotation,
                        arc.start_angle,
                        arc.end_angle,
                        arc.clockwise,
                    ),
                    None => {
                        log::debug!("arc from {:?} to {:?} drawn as a line", from, to);
                        ctx.line_to(to);
                    }
                }
            }
            PathCommand::ClosePath { .. } => ctx.close_path(),
        }

        last_cubic_ctrl = cubic_ctrl;
        last_quadratic_ctrl = quadratic_ctrl;
    }
}

fn reflect(ctrl: Option<Point>, around: Point) -> Point {
    match ctrl {
        Some(ctrl) => around + (around - ctrl),
        None => around,
    }
}

#[cfg(test)]
use crate::context::{DrawEvent, Recorder};

#[test]
fn letters_and_arguments() {
    let arc = PathCommand::ArcTo {
        abs: false,
        radii: Vector::new(5.0, 4.0),
        x_rotation: Angle::degrees(30.0),
        flags: ArcFlags {
            large_arc: true,
            sweep: false,
        },
        to: point(10.0, 0.0),
    };
    assert_eq!(arc.letter(), 'a');
    let args = arc.arguments();
    assert_eq!(args.len(), 7);
    assert!((args[2] - 30.0).abs() < 1e-9);
    assert_eq!(&args[3..], &[1.0, 0.0, 10.0, 0.0]);

    assert_eq!(PathCommand::close_path().letter(), 'Z');
    assert!(PathCommand::close_path().arguments().is_empty());
    assert_eq!(PathCommand::HorizontalLineTo { abs: true, x: 2.0 }.letter(), 'H');
}

#[test]
fn relative_commands_after_close() {
    let commands = [
        PathCommand::MoveTo {
            abs: true,
            to: point(10.0, 10.0),
        },
        PathCommand::LineTo {
            abs: false,
            to: point(5.0, 0.0),
        },
        PathCommand::ClosePath { abs: false },
        PathCommand::LineTo {
            abs: false,
            to: point(0.0, 5.0),
        },
    ];

    let absolute = relative_to_absolute(&commands);
    assert_eq!(absolute[1], PathCommand::line_to(point(15.0, 10.0)));
    assert_eq!(absolute[2], PathCommand::close_path());
    assert_eq!(absolute[3], PathCommand::line_to(point(10.0, 15.0)));
}

#[test]
fn replay_smooth_curves() {
    let commands = [
        PathCommand::move_to(point(0.0, 0.0)),
        PathCommand::cubic_to(point(0.0, 10.0), point(10.0, 10.0), point(10.0, 0.0)),
        PathCommand::SmoothCubicTo {
            abs: true,
            ctrl2: point(20.0, -10.0),
            to: point(20.0, 0.0),
        },
        PathCommand::SmoothQuadraticTo {
            abs: false,
            to: point(10.0, 0.0),
        },
    ];

    let mut recorder = Recorder::default();
    replay(&commands, &mut recorder);

    assert_eq!(
        recorder.events,
        vec![
            DrawEvent::MoveTo(point(0.0, 0.0)),
            DrawEvent::BezierCurveTo(point(0.0, 10.0), point(10.0, 10.0), point(10.0, 0.0)),
            DrawEvent::BezierCurveTo(point(10.0, -10.0), point(20.0, -10.0), point(20.0, 0.0)),
            // No previous quadratic: the control point is the current point.
            DrawEvent::QuadraticCurveTo(point(20.0, 0.0), point(30.0, 0.0)),
        ]
    );
}

#[test]
fn replay_arcs() {
    let commands = [
        PathCommand::move_to(point(0.0, 0.0)),
        PathCommand::arc_to(
            Vector::new(5.0, 5.0),
            Angle::zero(),
            ArcFlags {
                large_arc: false,
                sweep: true,
            },
            point(10.0, 0.0),
        ),
        PathCommand::arc_to(Vector::new(0.0, 5.0), Angle::zero(), ArcFlags::default(), point(10.0, 5.0)),
    ];

    let mut recorder = Recorder::default();
    replay(&commands, &mut recorder);

    assert_eq!(recorder.events.len(), 3);
    match recorder.events[1] {
        DrawEvent::Ellipse {
            center, clockwise, ..
        } => {
            assert!((center - point(5.0, 0.0)).length() < 1e-9);
            assert!(clockwise);
        }
        ref other => panic!("unexpected event {:?}", other),
    }
    assert_eq!(recorder.events[2], DrawEvent::LineTo(point(10.0, 5.0)));
}
