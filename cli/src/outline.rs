use crate::commands::{BoldCmd, CliError};
use std::io::Write;
use tracery::algorithms::bold;
use tracery::svg::serialize_commands;

/// Writes the outline of the path offset by `cmd.offset`.
pub fn outline(cmd: &BoldCmd, output: &mut dyn Write) -> Result<(), CliError> {
    let outline = bold(&cmd.path, cmd.offset, &cmd.bold_options);
    writeln!(
        output,
        "{}",
        serialize_commands(&outline.to_commands(), &cmd.options)
    )?;

    Ok(())
}

#[cfg(test)]
use tracery::algorithms::BoldOptions;
#[cfg(test)]
use tracery::svg::{parse_path, SerializerOptions};

#[test]
fn inflated_square() {
    let cmd = BoldCmd {
        path: parse_path("M0 0 L10 0 L10 10 L0 10 Z").unwrap(),
        offset: 2.0,
        bold_options: BoldOptions::DEFAULT,
        options: SerializerOptions::DEFAULT.with_precision(Some(6)),
    };
    let mut output = Vec::new();
    outline(&cmd, &mut output).unwrap();
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "M-2 -2 L12 -2 L12 12 L-2 12 Z\n"
    );
}
