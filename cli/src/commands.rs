use std::io;
use thiserror::Error;
use tracery::algorithms::BoldOptions;
use tracery::path::Path2D;
use tracery::svg::{ParseError, SerializerOptions};

pub struct NormalizeCmd {
    pub input: String,
    pub options: SerializerOptions,
}

pub struct MeasureCmd {
    pub path: Path2D,
}

pub struct BoldCmd {
    pub path: Path2D,
    pub offset: f64,
    pub bold_options: BoldOptions,
    pub options: SerializerOptions,
}

pub struct FlattenCmd {
    pub path: Path2D,
    pub divisions: usize,
    pub count: bool,
    pub options: SerializerOptions,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Invalid path: {0}")]
    Parse(#[from] ParseError),
    #[error("Invalid value {value:?} for {name}.")]
    InvalidArgument { name: &'static str, value: String },
}
