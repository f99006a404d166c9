//! Lexer (tokenizer) for C-like source code
//!
//! Converts raw source text into a flat, finite [`Token`] sequence consumed by
//! the parser. Scanning never fails with an error value: malformed input
//! (unterminated strings or comments, stray characters, a bare `&` or `|`)
//! becomes a single [`TokenKind::Error`] token that ends the sequence, so the
//! parser can report it like any other unexpected token.
//!
//! Comments are kept as tokens; the parser decides which of them survive.

use super::ast::SourceLocation;
use std::fmt;

/// Token categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenKind {
    Error,
    Eof,

    // Identifiers and constants
    Ident,
    IntConst,
    LongConst,
    FloatConst,
    CharConst,
    StringConst,

    // Type keywords
    Int,
    Float,
    Char,
    Long,
    Void,

    // Control keywords
    If,
    Else,
    While,
    For,
    Return,
    Break,
    Continue,

    // Assignment
    Assign, // =

    // Equality and relational
    Eq,  // ==
    Neq, // !=
    Lt,  // <
    Gt,  // >
    Le,  // <=
    Ge,  // >=

    // Arithmetic
    Plus,  // +
    Minus, // -
    Mul,   // *
    Div,   // /
    Mod,   // %

    // Logical
    And, // &&
    Or,  // ||
    Not, // !

    // Delimiters
    LParen,    // (
    RParen,    // )
    LBracket,  // [
    RBracket,  // ]
    LBrace,    // {
    RBrace,    // }
    Semicolon, // ;
    Comma,     // ,

    // Comments
    LineComment,
    BlockComment,
}

impl TokenKind {
    /// Stable display name used by token listings and error context.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Error => "ERROR_TOKEN",
            TokenKind::Eof => "EOF_TOKEN",
            TokenKind::Ident => "IDENT",
            TokenKind::IntConst => "INT_CONST",
            TokenKind::LongConst => "LONG_CONST",
            TokenKind::FloatConst => "FLOAT_CONST",
            TokenKind::CharConst => "CHAR_CONST",
            TokenKind::StringConst => "STRING_CONST",
            TokenKind::Int => "INT",
            TokenKind::Float => "FLOAT",
            TokenKind::Char => "CHAR",
            TokenKind::Long => "LONG",
            TokenKind::Void => "VOID",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::While => "WHILE",
            TokenKind::For => "FOR",
            TokenKind::Return => "RETURN",
            TokenKind::Break => "BREAK",
            TokenKind::Continue => "CONTINUE",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Eq => "EQ",
            TokenKind::Neq => "NEQ",
            TokenKind::Lt => "LT",
            TokenKind::Gt => "GT",
            TokenKind::Le => "LE",
            TokenKind::Ge => "GE",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Mul => "MUL",
            TokenKind::Div => "DIV",
            TokenKind::Mod => "MOD",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Not => "NOT",
            TokenKind::LParen => "LP",
            TokenKind::RParen => "RP",
            TokenKind::LBracket => "LB",
            TokenKind::RBracket => "RB",
            TokenKind::LBrace => "LC",
            TokenKind::RBrace => "RC",
            TokenKind::Semicolon => "SEMI",
            TokenKind::Comma => "COMMA",
            TokenKind::LineComment => "LINE_COMMENT",
            TokenKind::BlockComment => "BLOCK_COMMENT",
        }
    }

    pub fn is_type_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Int
                | TokenKind::Float
                | TokenKind::Char
                | TokenKind::Long
                | TokenKind::Void
        )
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }

    /// End-marker or error-marker: nothing may be read past these.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TokenKind::Eof | TokenKind::Error)
    }

    /// Numeric code in declaration order, used by the compact token listing.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

/// A classified lexeme with its starting position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        text: impl Into<String>,
        location: SourceLocation,
    ) -> Self {
        Token {
            kind,
            text: text.into(),
            location,
        }
    }

    /// `Token(<kind code>, "text", line, col)`
    pub fn to_compact_string(&self) -> String {
        format!(
            "Token({}, \"{}\", {}, {})",
            self.kind.code(),
            self.text,
            self.location.line,
            self.location.column
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token({}, \"{}\", {}, {})",
            self.kind.name(),
            self.text,
            self.location.line,
            self.location.column
        )
    }
}

/// Lexer for C-like source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input.
    ///
    /// The result always ends in exactly one [`TokenKind::Eof`] or
    /// [`TokenKind::Error`] token.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();

            if self.is_at_end() {
                tokens.push(Token::new(
                    TokenKind::Eof,
                    "",
                    self.current_location(),
                ));
                break;
            }

            let token = self.next_token();
            let stop = token.kind == TokenKind::Error;
            tokens.push(token);
            if stop {
                break;
            }
        }

        tokens
    }

    /// Get next token
    fn next_token(&mut self) -> Token {
        let loc = self.current_location();
        let Some(ch) = self.advance() else {
            return Token::new(TokenKind::Eof, "", loc);
        };

        match ch {
            '"' => self.quoted_literal('"', TokenKind::StringConst, loc),
            '\'' => self.quoted_literal('\'', TokenKind::CharConst, loc),
            '0'..='9' => self.number_literal(ch, loc),
            'a'..='z' | 'A'..='Z' | '_' => self.identifier_or_keyword(ch, loc),

            '/' => {
                if self.peek() == Some('/') {
                    self.line_comment(loc)
                } else if self.peek() == Some('*') {
                    self.block_comment(loc)
                } else {
                    Token::new(TokenKind::Div, "/", loc)
                }
            }
            '=' => self.one_or_two('=', TokenKind::Assign, TokenKind::Eq, loc),
            '!' => self.one_or_two('!', TokenKind::Not, TokenKind::Neq, loc),
            '<' => self.one_or_two('<', TokenKind::Lt, TokenKind::Le, loc),
            '>' => self.one_or_two('>', TokenKind::Gt, TokenKind::Ge, loc),
            '&' => self.doubled('&', TokenKind::And, loc),
            '|' => self.doubled('|', TokenKind::Or, loc),

            '+' => Token::new(TokenKind::Plus, "+", loc),
            '-' => Token::new(TokenKind::Minus, "-", loc),
            '*' => Token::new(TokenKind::Mul, "*", loc),
            '%' => Token::new(TokenKind::Mod, "%", loc),
            '(' => Token::new(TokenKind::LParen, "(", loc),
            ')' => Token::new(TokenKind::RParen, ")", loc),
            '[' => Token::new(TokenKind::LBracket, "[", loc),
            ']' => Token::new(TokenKind::RBracket, "]", loc),
            '{' => Token::new(TokenKind::LBrace, "{", loc),
            '}' => Token::new(TokenKind::RBrace, "}", loc),
            ';' => Token::new(TokenKind::Semicolon, ";", loc),
            ',' => Token::new(TokenKind::Comma, ",", loc),

            other => Token::new(TokenKind::Error, other.to_string(), loc),
        }
    }

    /// `c` or `c=`
    fn one_or_two(
        &mut self,
        first: char,
        single: TokenKind,
        with_eq: TokenKind,
        loc: SourceLocation,
    ) -> Token {
        if self.peek() == Some('=') {
            self.advance();
            Token::new(with_eq, format!("{first}="), loc)
        } else {
            Token::new(single, first.to_string(), loc)
        }
    }

    /// `&&` / `||`; the single character is not an operator here
    fn doubled(&mut self, ch: char, kind: TokenKind, loc: SourceLocation) -> Token {
        if self.peek() == Some(ch) {
            self.advance();
            Token::new(kind, format!("{ch}{ch}"), loc)
        } else {
            Token::new(TokenKind::Error, ch.to_string(), loc)
        }
    }

    /// String or character constant, quotes and escapes kept verbatim
    fn quoted_literal(
        &mut self,
        quote: char,
        kind: TokenKind,
        loc: SourceLocation,
    ) -> Token {
        let mut text = String::new();
        text.push(quote);

        while let Some(ch) = self.advance() {
            text.push(ch);
            if ch == '\\' {
                match self.advance() {
                    Some(escaped) => text.push(escaped),
                    None => break,
                }
            } else if ch == quote {
                return Token::new(kind, text, loc);
            }
        }

        Token::new(TokenKind::Error, text, loc)
    }

    /// Parse numeric literal: decimal, octal, hex, float, `L` suffix
    fn number_literal(&mut self, first_digit: char, loc: SourceLocation) -> Token {
        let mut text = String::new();
        text.push(first_digit);
        let mut is_float = false;
        let mut radix_prefixed = false;

        if first_digit == '0' {
            match self.peek() {
                Some('x') | Some('X') => {
                    radix_prefixed = true;
                    self.push_advance(&mut text);
                    while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                        self.push_advance(&mut text);
                    }
                }
                Some(c) if c.is_ascii_digit() => {
                    radix_prefixed = true;
                    while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                        self.push_advance(&mut text);
                    }
                }
                _ => {}
            }
        }

        if !radix_prefixed {
            while let Some(ch) = self.peek() {
                if ch.is_ascii_digit() {
                    self.push_advance(&mut text);
                } else if ch == '.' && !is_float {
                    is_float = true;
                    self.push_advance(&mut text);
                } else {
                    break;
                }
            }
        }

        if matches!(self.peek(), Some('L') | Some('l')) {
            self.push_advance(&mut text);
            return Token::new(TokenKind::LongConst, text, loc);
        }

        let kind = if is_float {
            TokenKind::FloatConst
        } else {
            TokenKind::IntConst
        };
        Token::new(kind, text, loc)
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while self
            .peek()
            .is_some_and(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        {
            self.push_advance(&mut ident);
        }

        let kind = match ident.as_str() {
            "int" => TokenKind::Int,
            "float" => TokenKind::Float,
            "char" => TokenKind::Char,
            "long" => TokenKind::Long,
            "void" => TokenKind::Void,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "for" => TokenKind::For,
            "return" => TokenKind::Return,
            "break" => TokenKind::Break,
            "continue" => TokenKind::Continue,
            _ => TokenKind::Ident,
        };

        Token::new(kind, ident, loc)
    }

    /// Line comment (// ...), not including the newline
    fn line_comment(&mut self, loc: SourceLocation) -> Token {
        let mut text = String::from("/");
        while self.peek().is_some_and(|ch| ch != '\n') {
            self.push_advance(&mut text);
        }
        Token::new(TokenKind::LineComment, text.trim_end(), loc)
    }

    /// Block comment (/* ... */)
    fn block_comment(&mut self, loc: SourceLocation) -> Token {
        let mut text = String::from("/");
        self.push_advance(&mut text); // '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.push_advance(&mut text);
                self.push_advance(&mut text);
                return Token::new(TokenKind::BlockComment, text, loc);
            }
            self.push_advance(&mut text);
        }

        Token::new(TokenKind::Error, text, loc)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|ch| ch.is_whitespace()) {
            self.advance();
        }
    }

    fn push_advance(&mut self, text: &mut String) {
        if let Some(ch) = self.advance() {
            text.push(ch);
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = *self.input.get(self.position)?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

/// Tokenize `source` in one call.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}
