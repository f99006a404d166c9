//! Source parser for the C-like language
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parser core (cursor, errors, entry point)
//! - [`ast`]: AST node definitions
//!
//! Productions are split by grammar area into `declarations`, `statements`
//! and `expressions`, each an `impl Parser` block.
//!
//! # Supported Language
//!
//! - Types: `int`, `float`, `char`, `long`, `void`, fixed-size arrays
//! - Top level: function definitions and declarations, global variables, comments
//! - Statements: blocks, `if`/`else`, `while`, `for`, `return`, `break`, `continue`
//! - Expressions: assignment, logical, equality, relational, arithmetic,
//!   unary `+ - !`, calls, array indexing, parentheses
//! - No preprocessor, pointers, structs or typedefs
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with bounded backtracking over a
//! fully materialized token sequence.
//! No external parser generator dependencies.

pub mod ast;
pub mod lexer;
pub mod parse;

mod declarations;
mod expressions;
mod statements;

pub use parse::{parse_source, Parser, SyntaxError};
