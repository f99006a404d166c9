//! Crate-level error type
//!
//! Syntax errors carry their own rendering (see [`SyntaxError`]); this enum
//! only adds the I/O failures around reading the input and writing output.

use crate::parser::parse::SyntaxError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot read input file `{}`: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Cannot open output file `{}`: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("unrecognized input '{text}' at line {line}, column {column}")]
    Lexical {
        text: String,
        line: usize,
        column: usize,
    },

    #[error("{0}")]
    Syntax(#[from] SyntaxError),
}

pub type Result<T> = std::result::Result<T, Error>;
