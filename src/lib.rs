//! # Introduction
//!
//! cfmt parses a small C-like language and re-emits it in one canonical
//! style. It can also list the token stream and dump the syntax tree with
//! labelled node roles for grammar debugging.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Formatter / Dump
//! ```
//!
//! 1. [`parser`]: tokenises the source and builds an AST. The first
//!    syntax error aborts the parse; no partial tree is returned.
//! 2. [`formatter`]: renders the AST back to source text with fixed
//!    indentation and operator spacing.
//! 3. [`dump`]: renders the AST as an indented role-labelled outline.
//! 4. [`error`]: the crate-level [`Error`] for I/O and syntax failures.
//!
//! ## Example
//!
//! ```
//! let program = cfmt::parser::parse_source("int main() { int x = 1; return x; }").unwrap();
//! assert_eq!(
//!     cfmt::formatter::render(&program),
//!     "int main()\n{\n    int x = 1;\n    return x;\n}\n"
//! );
//! ```

pub mod dump;
pub mod error;
pub mod formatter;
pub mod parser;

pub use error::{Error, Result};
