//! Statement parsing implementation
//!
//! This module handles parsing of all statement forms:
//!
//! - Compound statements: `{ declarations statements }`
//! - Control flow: `if`, `while`, `for`
//! - Jump statements: `return`, `break`, `continue`
//! - Expression statements, including the empty statement `;`
//! - Local variable declarations in statement position
//!
//! # Grammar
//!
//! ```text
//! compound_stmt  ::= "{" local_var_decl* stmt* "}"
//! stmt           ::= compound_stmt | if_stmt | while_stmt | for_stmt
//!                  | return_stmt | break_stmt | continue_stmt
//!                  | local_var_decl | expr_stmt
//! if_stmt        ::= "if" "(" expr ")" stmt ("else" stmt)?
//! while_stmt     ::= "while" "(" expr ")" stmt
//! for_stmt       ::= "for" "(" expr_stmt expr_stmt expr ")" stmt
//! return_stmt    ::= "return" expr? ";"
//! expr_stmt      ::= expr? ";"
//! ```
//!
//! Every form except `expr_stmt` starts with a keyword or `{`, so the first
//! token commits. `else` binds to the nearest `if`.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{PResult, Parser, SyntaxError};
use tracing::instrument;

impl Parser {
    /// Parse a `{ ... }` block; `Ok(None)` when the next token is not `{`
    #[instrument(level = "trace", skip_all, fields(pos = self.position))]
    pub(crate) fn parse_compound_stmt(&mut self) -> PResult<CompoundStmt> {
        if self.match_token(TokenKind::LBrace).is_none() {
            return Ok(None);
        }

        let mut block = CompoundStmt::default();

        // Leading declarations belong to the block header
        while let Some(decl) = self.parse_local_var_decl()? {
            block.decls.push(decl);
        }

        while let Some(stmt) = self.parse_stmt()? {
            block.stmts.push(stmt);
        }

        self.expect_token(
            TokenKind::RBrace,
            "compound_stmt",
            "expected '}' at end of block",
        )?;

        Ok(Some(block))
    }

    /// Parse a statement
    #[instrument(level = "trace", skip_all, fields(pos = self.position))]
    pub(crate) fn parse_stmt(&mut self) -> PResult<Stmt> {
        self.nested("stmt", "statement nested too deeply", Self::parse_stmt_form)
    }

    fn parse_stmt_form(&mut self) -> PResult<Stmt> {
        let kind = self.peek_kind();
        match kind {
            TokenKind::LBrace => Ok(self.parse_compound_stmt()?.map(Stmt::Compound)),
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::While => self.parse_while_stmt(),
            TokenKind::For => self.parse_for_stmt(),
            TokenKind::Return => self.parse_return_stmt(),
            TokenKind::Break => {
                self.advance();
                self.expect_token(TokenKind::Semicolon, "break_stmt", "expected ';' after 'break'")?;
                Ok(Some(Stmt::Break))
            }
            TokenKind::Continue => {
                self.advance();
                self.expect_token(
                    TokenKind::Semicolon,
                    "continue_stmt",
                    "expected ';' after 'continue'",
                )?;
                Ok(Some(Stmt::Continue))
            }
            _ if kind.is_type_keyword() => {
                Ok(self.parse_local_var_decl()?.map(Stmt::LocalVarDecl))
            }
            _ => Ok(self.parse_expr_stmt()?.map(Stmt::Expr)),
        }
    }

    /// Parse a statement that a committed construct requires
    fn require_stmt(&mut self, production: &'static str, message: &str) -> Result<Stmt, SyntaxError> {
        match self.parse_stmt()? {
            Some(stmt) => Ok(stmt),
            None => Err(self.error(production, message)),
        }
    }

    /// Parse a condition expression that a committed construct requires
    fn require_expr(&mut self, production: &'static str, message: &str) -> Result<Expr, SyntaxError> {
        match self.parse_expr()? {
            Some(expr) => Ok(expr),
            None => Err(self.error(production, message)),
        }
    }

    /// Parse if statement
    #[instrument(level = "trace", skip_all, fields(pos = self.position))]
    fn parse_if_stmt(&mut self) -> PResult<Stmt> {
        self.advance(); // 'if'
        self.expect_token(TokenKind::LParen, "if_stmt", "expected '(' after 'if'")?;
        let condition = self.require_expr("if_stmt", "expected condition expression")?;
        self.expect_token(TokenKind::RParen, "if_stmt", "expected ')' after condition")?;
        let then_branch = self.require_stmt("if_stmt", "expected statement after condition")?;

        let else_branch = if self.match_token(TokenKind::Else).is_some() {
            let stmt = self.require_stmt("if_stmt", "expected statement after 'else'")?;
            Some(Box::new(stmt))
        } else {
            None
        };

        Ok(Some(Stmt::If {
            condition,
            then_branch: Box::new(then_branch),
            else_branch,
        }))
    }

    /// Parse while loop
    #[instrument(level = "trace", skip_all, fields(pos = self.position))]
    fn parse_while_stmt(&mut self) -> PResult<Stmt> {
        self.advance(); // 'while'
        self.expect_token(TokenKind::LParen, "while_stmt", "expected '(' after 'while'")?;
        let condition = self.require_expr("while_stmt", "expected condition expression")?;
        self.expect_token(TokenKind::RParen, "while_stmt", "expected ')' after condition")?;
        let body = self.require_stmt("while_stmt", "expected statement after condition")?;

        Ok(Some(Stmt::While {
            condition,
            body: Box::new(body),
        }))
    }

    /// Parse for loop: `for (init; condition; step) body`
    #[instrument(level = "trace", skip_all, fields(pos = self.position))]
    fn parse_for_stmt(&mut self) -> PResult<Stmt> {
        self.advance(); // 'for'
        self.expect_token(TokenKind::LParen, "for_stmt", "expected '(' after 'for'")?;

        let Some(init) = self.parse_expr_stmt()? else {
            return Err(self.error("for_stmt", "expected init expr_stmt"));
        };
        let Some(condition) = self.parse_expr_stmt()? else {
            return Err(self.error("for_stmt", "expected condition expr_stmt"));
        };
        let step = self.require_expr("for_stmt", "expected step expression")?;

        self.expect_token(TokenKind::RParen, "for_stmt", "expected ')' after for header")?;
        let body = self.require_stmt("for_stmt", "expected statement after for header")?;

        Ok(Some(Stmt::For {
            init,
            condition,
            step,
            body: Box::new(body),
        }))
    }

    /// Parse return statement
    #[instrument(level = "trace", skip_all, fields(pos = self.position))]
    fn parse_return_stmt(&mut self) -> PResult<Stmt> {
        self.advance(); // 'return'
        let value = self.parse_expr()?;
        self.expect_token(
            TokenKind::Semicolon,
            "return_stmt",
            "expected ';' after return expression",
        )?;
        Ok(Some(Stmt::Return(value)))
    }

    /// Parse `expr? ";"`; `Ok(None)` when neither an expression nor `;` starts here
    #[instrument(level = "trace", skip_all, fields(pos = self.position))]
    pub(crate) fn parse_expr_stmt(&mut self) -> PResult<ExprStmt> {
        if self.match_token(TokenKind::Semicolon).is_some() {
            return Ok(Some(ExprStmt { expr: None }));
        }

        let Some(expr) = self.parse_expr()? else {
            return Ok(None);
        };
        self.expect_token(TokenKind::Semicolon, "expr_stmt", "expected ';' after expression")?;

        Ok(Some(ExprStmt { expr: Some(expr) }))
    }
}
