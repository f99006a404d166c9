//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure:
//! the token cursor, the syntax error type, and the program entry point.
//!
//! # Parser Architecture
//!
//! The Parser is a recursive descent engine over a materialized token
//! sequence with a single integer cursor:
//! - This module: Parser struct, cursor helpers, and coordination
//! - `declarations`: external declarations, functions, parameters, types
//! - `statements`: compound blocks and statements
//! - `expressions`: the expression precedence ladder
//!
//! # Backtracking
//!
//! Every production returns [`PResult`]:
//! - `Ok(Some(node))`: matched, cursor advanced past the consumed tokens
//! - `Ok(None)`: no match, cursor restored to where the production started
//! - `Err(SyntaxError)`: a committed prefix was followed by broken input
//!
//! `Ok(None)` is ordinary control flow between sibling alternatives and is
//! never reported. `Err` is fatal: it propagates with `?` straight out of
//! [`Parser::parse_program`] and no partial tree survives it.
//!
//! # Comments
//!
//! Comment tokens are only meaningful where an external declaration may
//! start. Everywhere else the cursor helpers step over them.

use crate::parser::ast::*;
use crate::parser::lexer::{Lexer, Token, TokenKind};
use std::fmt;
use tracing::{debug, instrument, trace};

/// Outcome of one grammar production
pub(crate) type PResult<T> = Result<Option<T>, SyntaxError>;

/// Number of tokens shown on each side of the cursor in error context
const CONTEXT_RADIUS: usize = 2;

/// Deepest nesting of parentheses, unary prefixes and statements accepted
pub const MAX_NESTING: usize = 256;

/// One token of the context window attached to a [`SyntaxError`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextToken {
    pub token: Token,
    pub is_current: bool,
}

/// Fatal syntax error raised by a committed production
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// Grammar production that failed, e.g. `var_decl`
    pub production: &'static str,
    pub message: String,
    pub location: SourceLocation,
    /// Cursor position (token index) at the failure
    pub position: usize,
    pub context: Vec<ContextToken>,
}

impl SyntaxError {
    /// The token under the cursor when the error was raised
    pub fn current_token(&self) -> Option<&Token> {
        self.context
            .iter()
            .find(|ctx| ctx.is_current)
            .map(|ctx| &ctx.token)
    }

    /// True when the offending token is a lexical error-marker
    pub fn is_lexical(&self) -> bool {
        self.current_token()
            .is_some_and(|token| token.kind == TokenKind::Error)
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Parse error at line {}, column {}: {}: {}",
            self.location.line, self.location.column, self.production, self.message
        )?;
        if let Some(token) = self.current_token().filter(|_| self.is_lexical()) {
            writeln!(f, "caused by lexical error near '{}'", token.text)?;
        }
        write!(f, "Context tokens (pos={}):", self.position)?;
        for ctx in &self.context {
            write!(
                f,
                "\n  [{}] '{}' (line {}, col {}){}",
                ctx.token.kind.name(),
                ctx.token.text,
                ctx.token.location.line,
                ctx.token.location.column,
                if ctx.is_current { " <-- current" } else { "" }
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for SyntaxError {}

/// Recursive descent parser for the C-like language
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    /// Open parentheses, unary prefixes and statements on the descent stack
    pub(crate) depth: usize,
}

impl Parser {
    /// Build a parser over a materialized token sequence.
    ///
    /// The sequence is expected to end in an end-marker or error-marker; an
    /// end-marker is appended when it does not.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(|t| t.kind.is_terminal()) {
            let location = tokens.last().map(|t| t.location).unwrap_or_default();
            tokens.push(Token::new(TokenKind::Eof, "", location));
        }
        Self {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    /// Tokenize `source` and build a parser over the result.
    pub fn from_source(source: &str) -> Self {
        let tokens = Lexer::new(source).tokenize();
        debug!(count = tokens.len(), "tokenized source");
        Self::new(tokens)
    }

    /// All tokens the parser was built with, comments included.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Parse the entire program (top-level declarations)
    #[instrument(level = "trace", skip_all)]
    pub fn parse_program(&mut self) -> Result<Program, SyntaxError> {
        let mut program = Program::new();

        while let Some(decl) = self.parse_external_decl()? {
            program.decls.push(decl);
        }

        debug!(decls = program.decls.len(), "parsed program");
        Ok(program)
    }

    // ===== Cursor helpers =====

    /// Index of the last token (the terminal marker)
    fn last_index(&self) -> usize {
        self.tokens.len() - 1
    }

    /// Index of the next non-comment token at or after the cursor
    fn significant_index(&self) -> usize {
        let mut index = self.position;
        while index < self.last_index() && self.tokens[index].kind.is_comment() {
            index += 1;
        }
        index
    }

    /// Token under the cursor, comments skipped
    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.significant_index()]
    }

    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    /// Kind of the `n`th significant token after the current one
    pub(crate) fn peek_ahead(&self, n: usize) -> TokenKind {
        let mut index = self.significant_index();
        for _ in 0..n {
            if index >= self.last_index() {
                break;
            }
            index += 1;
            while index < self.last_index() && self.tokens[index].kind.is_comment() {
                index += 1;
            }
        }
        self.tokens[index].kind
    }

    /// Token under the cursor without skipping comments
    pub(crate) fn peek_raw(&self) -> &Token {
        &self.tokens[self.position.min(self.last_index())]
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// Consume the current token. The terminal marker is never stepped past.
    pub(crate) fn advance(&mut self) -> Token {
        let index = self.significant_index();
        let token = self.tokens[index].clone();
        trace!(kind = token.kind.name(), text = %token.text, pos = index, "consume");
        if index < self.last_index() {
            self.position = index + 1;
        } else {
            self.position = index;
        }
        token
    }

    /// Consume a raw token (used for top-level comments)
    pub(crate) fn advance_raw(&mut self) -> Token {
        let token = self.peek_raw().clone();
        if self.position < self.last_index() {
            self.position += 1;
        }
        token
    }

    /// Consume the current token if it has the given kind
    pub(crate) fn match_token(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Consume a token of the given kind or raise a committed error
    pub(crate) fn expect_token(
        &mut self,
        kind: TokenKind,
        production: &'static str,
        message: &str,
    ) -> Result<Token, SyntaxError> {
        self.match_token(kind)
            .ok_or_else(|| self.error(production, message))
    }

    pub(crate) fn expect_identifier(
        &mut self,
        production: &'static str,
        message: &str,
    ) -> Result<Ident, SyntaxError> {
        let token = self.expect_token(TokenKind::Ident, production, message)?;
        Ok(Ident::new(token.text))
    }

    /// Run `f` one nesting level deeper.
    ///
    /// Past [`MAX_NESTING`] levels this is a committed error instead of a
    /// stack overflow. The level is released on every exit path.
    pub(crate) fn nested<T>(
        &mut self,
        production: &'static str,
        message: &str,
        f: impl FnOnce(&mut Self) -> Result<T, SyntaxError>,
    ) -> Result<T, SyntaxError> {
        if self.depth >= MAX_NESTING {
            return Err(self.error(production, message));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Restore the cursor and report "no match"
    pub(crate) fn backtrack<T>(&mut self, start: usize, production: &'static str) -> PResult<T> {
        debug!(production, from = self.position, to = start, "backtrack");
        self.position = start;
        Ok(None)
    }

    /// Build a committed syntax error at the current cursor
    pub(crate) fn error(&self, production: &'static str, message: &str) -> SyntaxError {
        let current = self.significant_index();
        let start = current.saturating_sub(CONTEXT_RADIUS);
        let end = (current + CONTEXT_RADIUS).min(self.last_index());
        let context = (start..=end)
            .map(|i| ContextToken {
                token: self.tokens[i].clone(),
                is_current: i == current,
            })
            .collect();

        SyntaxError {
            production,
            message: message.to_string(),
            location: self.tokens[current].location,
            position: current,
            context,
        }
    }
}

/// Parse `source` into a [`Program`].
pub fn parse_source(source: &str) -> Result<Program, SyntaxError> {
    Parser::from_source(source).parse_program()
}
