mod commands;
mod flatten;
mod measure;
mod normalize;
mod outline;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use commands::*;

use std::fs::File;
use std::io::prelude::*;
use std::io::stdout;
use std::str::FromStr;

use tracery::algorithms::BoldOptions;
use tracery::path::SamplingOptions;
use tracery::svg::{parse_path, SerializerOptions};

fn main() {
    env_logger::init();

    let precision = Arg::with_name("PRECISION")
        .short("p")
        .long("precision")
        .help("Sets the maximum number of decimals of the output (9 by default)")
        .value_name("DECIMALS")
        .takes_value(true);

    let matches = App::new("Tracery command-line interface")
        .version("0.1")
        .about("Reads, measures, offsets and flattens SVG paths")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(io_args(
            SubCommand::with_name("normalize")
                .about("Rewrites a path with absolute commands")
                .arg(precision.clone()),
        ))
        .subcommand(io_args(
            SubCommand::with_name("measure").about("Prints the bounding box and length of a path"),
        ))
        .subcommand(io_args(
            SubCommand::with_name("bold")
                .about("Offsets the outline of a path")
                .arg(
                    Arg::with_name("OFFSET")
                        .short("b")
                        .long("offset")
                        .help("Sets the offset distance, negative values shrink the shape")
                        .value_name("OFFSET")
                        .takes_value(true)
                        .allow_hyphen_values(true)
                        .required(true),
                )
                .arg(precision.clone()),
        ))
        .subcommand(io_args(
            SubCommand::with_name("flatten")
                .about("Approximates a path with polylines")
                .arg(
                    Arg::with_name("DIVISIONS")
                        .short("d")
                        .long("divisions")
                        .help("Sets the number of points per curve (12 by default)")
                        .value_name("DIVISIONS")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("COUNT")
                        .short("c")
                        .long("count")
                        .help("Prints the number of vertices"),
                )
                .arg(precision),
        ))
        .get_matches();

    if let Err(e) = run(&matches) {
        log::error!("{:?}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn io_args<'a, 'b>(cmd: App<'a, 'b>) -> App<'a, 'b> {
    cmd.arg(
        Arg::with_name("PATH")
            .value_name("PATH")
            .help("An SVG path")
            .takes_value(true)
            .allow_hyphen_values(true)
            .required(false),
    )
    .arg(
        Arg::with_name("INPUT")
            .help("Sets the input file to use")
            .short("i")
            .long("input")
            .value_name("FILE")
            .takes_value(true)
            .required(false),
    )
    .arg(
        Arg::with_name("OUTPUT")
            .help("Sets the output file to use")
            .value_name("FILE")
            .short("o")
            .long("output")
            .takes_value(true)
            .required(false),
    )
}

fn run(matches: &ArgMatches) -> Result<(), CliError> {
    let (name, Some(sub)) = matches.subcommand() else {
        return Ok(());
    };

    let input = read_input(sub)?;
    let mut output: Box<dyn Write> = match sub.value_of("OUTPUT") {
        Some(file) => Box::new(File::create(file)?),
        None => Box::new(stdout()),
    };
    let options = serializer_options(sub)?;

    match name {
        "normalize" => normalize::normalize(&NormalizeCmd { input, options }, &mut *output),
        "measure" => measure::measure(
            &MeasureCmd {
                path: parse_path(&input)?,
            },
            &mut *output,
        ),
        "bold" => outline::outline(
            &BoldCmd {
                path: parse_path(&input)?,
                offset: value_of(sub, "OFFSET")?.unwrap_or(0.0),
                bold_options: BoldOptions::DEFAULT,
                options,
            },
            &mut *output,
        ),
        "flatten" => flatten::flatten(
            &FlattenCmd {
                path: parse_path(&input)?,
                divisions: value_of(sub, "DIVISIONS")?
                    .unwrap_or(SamplingOptions::DEFAULT_CURVE_DIVISIONS),
                count: sub.is_present("COUNT"),
                options,
            },
            &mut *output,
        ),
        _ => Ok(()),
    }
}

fn read_input(matches: &ArgMatches) -> Result<String, CliError> {
    let mut input = matches.value_of("PATH").unwrap_or("").to_string();
    if let Some(input_file) = matches.value_of("INPUT") {
        File::open(input_file)?.read_to_string(&mut input)?;
    }

    Ok(input)
}

fn serializer_options(matches: &ArgMatches) -> Result<SerializerOptions, CliError> {
    let precision = value_of(matches, "PRECISION")?.or(SerializerOptions::DEFAULT_PRECISION);
    Ok(SerializerOptions::DEFAULT.with_precision(precision))
}

fn value_of<T: FromStr>(matches: &ArgMatches, name: &'static str) -> Result<Option<T>, CliError> {
    match matches.value_of(name) {
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| CliError::InvalidArgument {
                name,
                value: value.to_string(),
            }),
        None => Ok(None),
    }
}
