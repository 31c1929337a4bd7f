use crate::commands::{CliError, FlattenCmd};
use std::io::Write;
use tracery::path::PathCommand;
use tracery::svg::serialize_commands;

pub fn flatten(cmd: &FlattenCmd, output: &mut dyn Write) -> Result<(), CliError> {
    let subpaths: Vec<_> = cmd.path.subpaths().iter().filter(|s| !s.is_empty()).collect();
    let polylines = cmd.path.flattened(cmd.divisions);

    if cmd.count {
        let num_vertices: usize = polylines.iter().map(Vec::len).sum();
        writeln!(output, "vertices: {}", num_vertices)?;
        writeln!(output, "paths: {}", polylines.len())?;

        return Ok(());
    }

    let mut commands = Vec::new();
    for (subpath, points) in subpaths.iter().zip(&polylines) {
        for (i, p) in points.iter().enumerate() {
            commands.push(if i == 0 {
                PathCommand::move_to(*p)
            } else {
                PathCommand::line_to(*p)
            });
        }
        if subpath.is_closed() {
            commands.push(PathCommand::close_path());
        }
    }
    writeln!(output, "{}", serialize_commands(&commands, &cmd.options))?;

    Ok(())
}

#[cfg(test)]
use tracery::svg::{parse_path, SerializerOptions};

#[cfg(test)]
fn run(src: &str, count: bool) -> String {
    let cmd = FlattenCmd {
        path: parse_path(src).unwrap(),
        divisions: 4,
        count,
        options: SerializerOptions::DEFAULT.with_precision(Some(3)),
    };
    let mut output = Vec::new();
    flatten(&cmd, &mut output).unwrap();
    String::from_utf8(output).unwrap()
}

#[test]
fn polylines() {
    assert_eq!(
        run("M0 0 L10 0 L10 10 Z M20 0 L30 0", false),
        "M0 0 L10 0 L10 10 L0 0 Z M20 0 L30 0\n"
    );
    assert_eq!(run("M0 0 Q5 10 10 0", false), "M0 0 L2.5 3.75 L5 5 L7.5 3.75 L10 0\n");
}

#[test]
fn count() {
    assert_eq!(run("M0 0 L10 0 L10 10 Z M20 0 L30 0", true), "vertices: 6\npaths: 2\n");
}
