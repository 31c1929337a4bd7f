use thiserror::Error;

/// An error produced while reading path data.
///
/// Indices are byte offsets in the parsed string.
#[non_exhaustive]
#[derive(Error, Clone, Debug, PartialEq)]
pub enum ParseError {
    #[error("Index {index}: unexpected character {character:?} (parsed so far: {partial:?}).")]
    Syntax {
        character: char,
        index: usize,
        partial: Vec<f64>,
    },
    #[error("Index {index}: command {command:?} expects a multiple of {expected} arguments, got {found}.")]
    MissingArguments {
        command: char,
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("Index {index}: expected flag (0/1), got {character:?}.")]
    InvalidFlag { character: char, index: usize },
    #[error("Index {index}: expected move-to command, got {command:?}.")]
    MissingMoveTo { command: char, index: usize },
    #[error("Index {index}: unknown command {command:?}.")]
    UnknownCommand { command: char, index: usize },
}
