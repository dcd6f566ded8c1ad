//! Errors surfaced by the engine crate: malformed UCI input and bad option values. Board-level
//! errors (illegal FEN, ...) are `chess_core::BoardError` and pass through unchanged.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("unrecognized UCI command: '{0}'")]
    UnknownCommand(String),
    #[error("malformed 'go' argument: '{0}'")]
    MalformedGoArgument(String),
    #[error(transparent)]
    BadMove(#[from] chess_core::BoardError),
    #[error("unknown UCI option: '{0}'")]
    UnknownOption(String),
    #[error("value '{value}' out of range for option '{name}' ({min}..={max})")]
    OptionOutOfRange {
        name: String,
        value: i64,
        min: i64,
        max: i64,
    },
    #[error("move '{0}' is not legal in the current position")]
    IllegalMove(String),
}
