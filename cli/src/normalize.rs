use crate::commands::{CliError, NormalizeCmd};
use std::io::Write;
use tracery::path::commands::relative_to_absolute;
use tracery::svg::{parse_commands, serialize_commands};

/// Writes the path back with absolute commands.
pub fn normalize(cmd: &NormalizeCmd, output: &mut dyn Write) -> Result<(), CliError> {
    let commands = relative_to_absolute(&parse_commands(&cmd.input)?);
    writeln!(output, "{}", serialize_commands(&commands, &cmd.options))?;

    Ok(())
}

#[cfg(test)]
use tracery::svg::SerializerOptions;

#[test]
fn relative_commands() {
    let cmd = NormalizeCmd {
        input: "m1 1 h5 v-5 l2 2 z".to_string(),
        options: SerializerOptions::DEFAULT,
    };
    let mut output = Vec::new();
    normalize(&cmd, &mut output).unwrap();
    assert_eq!(String::from_utf8(output).unwrap(), "M1 1 H6 V-4 L8 -2 Z\n");
}
