use crate::commands::{CliError, MeasureCmd};
use std::io::Write;
use tracery::algorithms::winding;
use tracery::path::{ParametricCurve, Winding};

pub fn measure(cmd: &MeasureCmd, output: &mut dyn Write) -> Result<(), CliError> {
    let path = &cmd.path;
    match path.bounding_box() {
        Some(bbox) => writeln!(
            output,
            "bounding box: {} {} {} {}",
            bbox.left, bbox.top, bbox.width, bbox.height
        )?,
        None => writeln!(output, "bounding box: none")?,
    }
    writeln!(output, "length: {}", path.length())?;

    let subpaths = path.subpaths().iter().filter(|s| !s.is_empty());
    for (i, subpath) in subpaths.enumerate() {
        let winding = match winding(subpath) {
            Winding::Positive => "positive",
            Winding::Negative => "negative",
        };
        writeln!(
            output,
            "subpath {}: {} segments, {}, {} winding, length {}",
            i,
            subpath.segments().len(),
            if subpath.is_closed() { "closed" } else { "open" },
            winding,
            subpath.length(),
        )?;
    }

    Ok(())
}

#[cfg(test)]
use tracery::svg::parse_path;

#[test]
fn triangle() {
    let cmd = MeasureCmd {
        path: parse_path("M0 0 L10 0 L10 10 Z").unwrap(),
    };
    let mut output = Vec::new();
    measure(&cmd, &mut output).unwrap();
    let text = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "bounding box: 0 0 10 10");
    assert!(lines[1].starts_with("length: 34.14"));
    assert!(lines[2].starts_with("subpath 0: 3 segments, closed, positive winding"));
}

#[test]
fn empty_path() {
    let cmd = MeasureCmd {
        path: parse_path("").unwrap(),
    };
    let mut output = Vec::new();
    measure(&cmd, &mut output).unwrap();
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "bounding box: none\nlength: 0\n"
    );
}
