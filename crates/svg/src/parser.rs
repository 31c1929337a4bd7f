//! Reading path data into commands.

use crate::tokenizer::Tokenizer;
use crate::ParseError;

use tracery_path::geom::ArcFlags;
use tracery_path::math::{point, vector, Angle};
use tracery_path::{Path2D, PathCommand};

#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub struct ParserOptions {
    /// Fail on unknown command letters instead of skipping them.
    ///
    /// Default value: `false`.
    pub strict: bool,
}

impl ParserOptions {
    pub const DEFAULT: ParserOptions = ParserOptions { strict: false };

    pub fn strict() -> Self {
        ParserOptions { strict: true }
    }
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Number of arguments of each repetition of a command.
fn arity(command: char) -> Option<usize> {
    match command.to_ascii_lowercase() {
        'm' | 'l' | 't' => Some(2),
        'h' | 'v' => Some(1),
        'c' => Some(6),
        's' | 'q' => Some(4),
        'a' => Some(7),
        'z' => Some(0),
        _ => None,
    }
}

fn is_arc_flag(index: usize) -> bool {
    let i = index % 7;
    i == 3 || i == 4
}

/// Expands a command letter and its arguments into commands, following the implicit
/// repetition rules of the path-data grammar.
///
/// A move-to followed by several points is a move-to followed by line-tos. Other
/// commands repeat themselves.
pub fn expand_command(
    command: char,
    index: usize,
    args: &[f64],
    output: &mut Vec<PathCommand>,
) -> Result<(), ParseError> {
    let Some(arity) = arity(command) else {
        return Err(ParseError::UnknownCommand { command, index });
    };

    let abs = command.is_ascii_uppercase();
    if arity == 0 {
        if !args.is_empty() {
            return Err(ParseError::MissingArguments {
                command,
                index,
                expected: 0,
                found: args.len(),
            });
        }
        output.push(PathCommand::ClosePath { abs });
        return Ok(());
    }

    if args.is_empty() || args.len() % arity != 0 {
        return Err(ParseError::MissingArguments {
            command,
            index,
            expected: arity,
            found: args.len(),
        });
    }

    for (i, a) in args.chunks_exact(arity).enumerate() {
        let cmd = match command.to_ascii_lowercase() {
            'm' if i == 0 => PathCommand::MoveTo {
                abs,
                to: point(a[0], a[1]),
            },
            'm' | 'l' => PathCommand::LineTo {
                abs,
                to: point(a[0], a[1]),
            },
            'h' => PathCommand::HorizontalLineTo { abs, x: a[0] },
            'v' => PathCommand::VerticalLineTo { abs, y: a[0] },
            'c' => PathCommand::CubicTo {
                abs,
                ctrl1: point(a[0], a[1]),
                ctrl2: point(a[2], a[3]),
                to: point(a[4], a[5]),
            },
            's' => PathCommand::SmoothCubicTo {
                abs,
                ctrl2: point(a[0], a[1]),
                to: point(a[2], a[3]),
            },
            'q' => PathCommand::QuadraticTo {
                abs,
                ctrl: point(a[0], a[1]),
                to: point(a[2], a[3]),
            },
            't' => PathCommand::SmoothQuadraticTo {
                abs,
                to: point(a[0], a[1]),
            },
            _ => PathCommand::ArcTo {
                abs,
                radii: vector(a[0], a[1]),
                x_rotation: Angle::degrees(a[2]),
                flags: ArcFlags {
                    large_arc: a[3] != 0.0,
                    sweep: a[4] != 0.0,
                },
                to: point(a[5], a[6]),
            },
        };

        log::trace!("{:?}", cmd);
        output.push(cmd);
    }

    Ok(())
}

// Command letters exclude the exponent markers of numbers.
fn is_command_letter(c: char) -> bool {
    c.is_ascii_alphabetic() && c != 'e' && c != 'E'
}

/// Parses path data (the `d` attribute of an SVG path) into commands.
///
/// Unknown command letters are skipped along with their arguments.
pub fn parse_commands(src: &str) -> Result<Vec<PathCommand>, ParseError> {
    parse_commands_with_options(src, &ParserOptions::DEFAULT)
}

pub fn parse_commands_with_options(
    src: &str,
    options: &ParserOptions,
) -> Result<Vec<PathCommand>, ParseError> {
    let mut output = Vec::new();

    // Byte index of each command letter.
    let letters: Vec<(usize, char)> = src
        .char_indices()
        .filter(|&(_, c)| is_command_letter(c))
        .collect();

    let leading_end = letters.first().map_or(src.len(), |&(i, _)| i);
    if let Some((i, c)) = src[..leading_end]
        .char_indices()
        .find(|&(_, c)| !c.is_whitespace())
    {
        return Err(ParseError::MissingMoveTo {
            command: c,
            index: i,
        });
    }

    let mut started = false;
    for (n, &(index, command)) in letters.iter().enumerate() {
        let args_start = index + command.len_utf8();
        let args_end = letters.get(n + 1).map_or(src.len(), |&(i, _)| i);
        let args_src = &src[args_start..args_end];

        if arity(command).is_none() {
            if options.strict {
                return Err(ParseError::UnknownCommand { command, index });
            }
            log::warn!("Skipping unknown path command {:?} at index {}.", command, index);
            continue;
        }

        if !started && command != 'M' && command != 'm' {
            return Err(ParseError::MissingMoveTo { command, index });
        }
        started = true;

        let tokenizer = Tokenizer::new(args_src, args_start);
        let args = if command == 'a' || command == 'A' {
            tokenizer.with_flags(&is_arc_flag).tokenize()?
        } else {
            tokenizer.tokenize()?
        };

        expand_command(command, index, &args, &mut output)?;
    }

    Ok(output)
}

/// Parses path data into a `Path2D`.
pub fn parse_path(src: &str) -> Result<Path2D, ParseError> {
    Ok(Path2D::from_commands(&parse_commands(src)?))
}

#[cfg(test)]
use tracery_path::{CurveKind, ParametricCurve};

#[test]
fn empty() {
    assert_eq!(parse_commands(""), Ok(Vec::new()));
    assert_eq!(parse_commands("  \n"), Ok(Vec::new()));
}

#[test]
fn implicit_repetitions() {
    let commands = parse_commands("M0 0 10 0 10 10 l 1 1 2 2 h5 6 z").unwrap();
    assert_eq!(
        commands,
        vec![
            PathCommand::move_to(point(0.0, 0.0)),
            PathCommand::line_to(point(10.0, 0.0)),
            PathCommand::line_to(point(10.0, 10.0)),
            PathCommand::LineTo {
                abs: false,
                to: point(1.0, 1.0)
            },
            PathCommand::LineTo {
                abs: false,
                to: point(2.0, 2.0)
            },
            PathCommand::HorizontalLineTo { abs: false, x: 5.0 },
            PathCommand::HorizontalLineTo { abs: false, x: 6.0 },
            PathCommand::ClosePath { abs: false },
        ]
    );

    let arcs = parse_commands("M0 0a5 5 0 0110 0 5 5 0 1 0-10 0").unwrap();
    assert_eq!(arcs.len(), 3);
    assert_eq!(
        arcs[1],
        PathCommand::ArcTo {
            abs: false,
            radii: vector(5.0, 5.0),
            x_rotation: Angle::degrees(0.0),
            flags: ArcFlags {
                large_arc: false,
                sweep: true
            },
            to: point(10.0, 0.0),
        }
    );
    assert!(matches!(arcs[2], PathCommand::ArcTo { flags: ArcFlags { large_arc: true, sweep: false }, .. }));
}

#[test]
fn errors() {
    assert_eq!(
        parse_commands("L 10 10"),
        Err(ParseError::MissingMoveTo {
            command: 'L',
            index: 0
        })
    );
    assert_eq!(
        parse_commands("10 M 0 0"),
        Err(ParseError::MissingMoveTo {
            command: '1',
            index: 0
        })
    );
    assert_eq!(
        parse_commands("M 0 0 L 10"),
        Err(ParseError::MissingArguments {
            command: 'L',
            index: 6,
            expected: 2,
            found: 1,
        })
    );
    assert_eq!(
        parse_commands("M 0 0 Z 1"),
        Err(ParseError::MissingArguments {
            command: 'Z',
            index: 6,
            expected: 0,
            found: 1,
        })
    );
    assert!(matches!(
        parse_commands("M 0 0 L 1..0 2"),
        Err(ParseError::Syntax { character: '.', index: 10, .. })
    ));
    assert!(matches!(
        parse_commands("M 0 0 A 1 1 0 2 0 1 1"),
        Err(ParseError::InvalidFlag { character: '2', index: 14 })
    ));
    assert!(matches!(
        parse_commands("M0 0 L1e400 2"),
        Err(ParseError::Syntax { character: '0', index: 10, .. })
    ));
}

#[test]
fn unknown_commands() {
    let commands = parse_commands("M 0 0 X 1 2 L 5 5").unwrap();
    assert_eq!(commands.len(), 2);
    assert_eq!(commands[1], PathCommand::line_to(point(5.0, 5.0)));

    assert_eq!(
        parse_commands_with_options("M 0 0 X 1 2 L 5 5", &ParserOptions::strict()),
        Err(ParseError::UnknownCommand {
            command: 'X',
            index: 6
        })
    );
}

#[test]
fn exponents_are_not_commands() {
    let commands = parse_commands("M1e1 2E-1").unwrap();
    assert_eq!(commands, vec![PathCommand::move_to(point(10.0, 0.2))]);
}

#[test]
fn closed_triangle() {
    let path = parse_path("M0 0 L10 0 L10 10 Z").unwrap();
    assert_eq!(path.subpaths().len(), 1);
    let segments = path.subpaths()[0].segments();
    assert_eq!(segments.len(), 3);
    assert!(segments.iter().all(|c| matches!(c.kind(), CurveKind::Line(_))));
}

#[test]
fn half_circle_arc() {
    let path = parse_path("M0 0 A5 5 0 0 1 10 0").unwrap();
    let segments = path.subpaths()[0].segments();
    assert_eq!(segments.len(), 1);
    let CurveKind::Arc(arc) = segments[0].kind() else {
        panic!("expected an arc, got {:?}", segments[0]);
    };
    assert!((arc.center - point(5.0, 0.0)).length() < 1e-9);
    assert!(arc.clockwise);
    // Positive sweep with y pointing down: over the top of the circle.
    assert!((segments[0].sample(0.5) - point(5.0, -5.0)).length() < 1e-9);
}
