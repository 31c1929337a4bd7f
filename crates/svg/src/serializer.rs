//! Writing commands as path data.

use tracery_path::{Path2D, PathCommand};


#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub struct SerializerOptions {
    /// Maximum number of decimals. Trailing zeros are never written.
    ///
    /// `None` writes the shortest representation that reads back to the same number.
    ///
    /// Default value: `SerializerOptions::DEFAULT_PRECISION`.
    pub precision: Option<usize>,

    /// Separator between numbers and between commands.
    ///
    /// Default value: `' '`.
    pub separator: char,
}

impl SerializerOptions {
    pub const DEFAULT_PRECISION: Option<usize> = Some(9);

    pub const DEFAULT: Self = SerializerOptions {
        precision: Self::DEFAULT_PRECISION,
        separator: ' ',
    };

    #[inline]
    pub fn with_precision(mut self, precision: Option<usize>) -> Self {
        self.precision = precision;
        self
    }

    #[inline]
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }
}

impl Default for SerializerOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Writes commands as path data, for example `M0 0 L10 0 Z`.
///
/// Commands are written as they are: relative commands stay relative.
pub fn serialize_commands(commands: &[PathCommand], options: &SerializerOptions) -> String {
    let mut output = String::new();
    for (i, cmd) in commands.iter().enumerate() {
        if i > 0 {
            output.push(options.separator);
        }
        output.push(cmd.letter());
        for (j, value) in cmd.arguments().iter().enumerate() {
            if j > 0 {
                output.push(options.separator);
            }
            write_number(&mut output, *value, options.precision);
        }
    }

    output
}

/// Writes a path as absolute path data with the default options.
pub fn path_to_string(path: &Path2D) -> String {
    serialize_commands(&path.to_commands(), &SerializerOptions::DEFAULT)
}

// Non-finite values have no path-data representation: they are written as `inf` or
// `NaN`, which do not read back. The parser never produces them.
fn write_number(output: &mut String, value: f64, precision: Option<usize>) {
    if !value.is_finite() {
        log::warn!("Writing the non-finite value {} in path data.", value);
    }

    let start = output.len();
    match precision {
        Some(p) => output.push_str(&format!("{:.*}", p, value)),
        None => output.push_str(&format!("{}", value)),
    }

    if precision.is_some() && output[start..].contains('.') {
        let trimmed = output[start..].trim_end_matches('0').trim_end_matches('.').len();
        output.truncate(start + trimmed);
    }

    if &output[start..] == "-0" {
        output.truncate(start);
        output.push('0');
    }
}

#[cfg(test)]
use crate::parser::parse_commands;
#[cfg(test)]
use tracery_path::math::point;

#[test]
fn numbers() {
    let mut s = String::new();
    write_number(&mut s, 10.0, Some(3));
    s.push(' ');
    write_number(&mut s, 0.1 + 0.2, Some(9));
    s.push(' ');
    write_number(&mut s, -0.0000000001, Some(9));
    s.push(' ');
    write_number(&mut s, 2.5, None);
    s.push(' ');
    write_number(&mut s, 1500.0, Some(2));
    assert_eq!(s, "10 0.3 0 2.5 1500");

    let mut s = String::new();
    write_number(&mut s, f64::INFINITY, Some(3));
    assert_eq!(s, "inf");
}

#[test]
fn roundtrip() {
    for src in [
        "M0 0 L10 0 L10 10 Z",
        "M1.5 -2 C1 2 3 4 5 6 S7 8 9 10 Q1 1 2 2 T3 3",
        "M0 0 A5 5 30 0 1 10 0 a5 4 0 1 0 -3 2",
        "m1 1 h5 v-5 l2 2 z M20 20 L25 25",
    ] {
        let commands = parse_commands(src).unwrap();
        assert_eq!(serialize_commands(&commands, &SerializerOptions::DEFAULT), src);
    }
}

#[test]
fn separators() {
    let commands = [
        PathCommand::move_to(point(1.0, 2.0)),
        PathCommand::line_to(point(3.0, 4.0)),
    ];
    let options = SerializerOptions::DEFAULT.with_separator(',');
    assert_eq!(serialize_commands(&commands, &options), "M1,2,L3,4");
}

#[test]
fn closing_line_is_left_out() {
    let path = crate::parse_path("M0 0 L10 0 L10 10 Z").unwrap();
    assert_eq!(path_to_string(&path), "M0 0 L10 0 L10 10 Z");
}

#[test]
fn explicit_closing_line_is_written() {
    let path = crate::parse_path("M0 0 L10 0 L0 0 Z").unwrap();
    assert_eq!(path_to_string(&path), "M0 0 L10 0 L0 0 Z");
}
