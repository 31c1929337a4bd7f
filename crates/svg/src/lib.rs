#![deny(bare_trait_objects)]

//! Path data (the `d` attribute of SVG paths) reading and writing.
//!
//! Text is read in two steps: a tokenizer turns the arguments of each command letter
//! into numbers, then the expander applies the implicit repetition rules of the grammar
//! to produce [`PathCommand`]s. The serializer writes commands back.
//!
//! This crate is reexported in [tracery](https://docs.rs/tracery/).
//!
//! # Examples
//!
//! ```
//! use tracery_svg::{parse_commands, serialize_commands, SerializerOptions};
//!
//! let commands = parse_commands("M0 0 L10 0 10 10Z").unwrap();
//! assert_eq!(commands.len(), 4);
//! assert_eq!(
//!     serialize_commands(&commands, &SerializerOptions::DEFAULT),
//!     "M0 0 L10 0 L10 10 Z",
//! );
//! ```

pub use tracery_path as path;

mod error;
pub mod parser;
pub mod serializer;
pub mod shapes;
pub mod tokenizer;

pub use crate::error::ParseError;
pub use crate::parser::{
    expand_command, parse_commands, parse_commands_with_options, parse_path, ParserOptions,
};
pub use crate::serializer::{path_to_string, serialize_commands, SerializerOptions};
pub use crate::shapes::Shape;
pub use tracery_path::PathCommand;
