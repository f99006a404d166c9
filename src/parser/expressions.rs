//! Expression parsing implementation
//!
//! This module handles parsing of expressions with one recursive descent
//! method per precedence level, lowest binding first.
//!
//! # Supported Expressions
//!
//! - Assignment to an identifier (right-associative)
//! - Binary operators: `||`, `&&`, `==`, `!=`, `<`, `>`, `<=`, `>=`, `+`, `-`, `*`, `/`, `%`
//! - Unary prefix operators: `+`, `-`, `!`
//! - Postfix: function call `f(args)` and chained array access `a[i][j]`
//! - Primary: identifiers, constants, parenthesized expressions
//!
//! # Grammar
//!
//! ```text
//! expr           ::= assign_expr
//! assign_expr    ::= IDENT "=" assign_expr | logical_or_expr
//! logical_or     ::= logical_and ("||" logical_and)*
//! logical_and    ::= equality ("&&" equality)*
//! equality       ::= relational (("==" | "!=") relational)*
//! relational     ::= additive (("<" | ">" | "<=" | ">=") additive)*
//! additive       ::= multiplicative (("+" | "-") multiplicative)*
//! multiplicative ::= unary (("*" | "/" | "%") unary)*
//! unary          ::= ("+" | "-" | "!") unary | postfix
//! postfix        ::= IDENT "(" arg_list? ")" | primary ("[" expr "]")*
//! arg_list       ::= expr ("," expr)*
//! primary        ::= IDENT | constant | "(" expr ")"
//! ```
//!
//! Binary levels are left-associative. Once an operator is consumed its
//! right operand is required; a level that cannot start returns `Ok(None)`
//! without consuming anything.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{PResult, Parser, SyntaxError};
use tracing::instrument;

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expr(&mut self) -> PResult<Expr> {
        self.parse_assign_expr()
    }

    /// Parse assignment (right-associative). Only a bare identifier followed
    /// by `=` is an assignment target.
    #[instrument(level = "trace", skip_all, fields(pos = self.position))]
    fn parse_assign_expr(&mut self) -> PResult<Expr> {
        if !(self.check(TokenKind::Ident) && self.peek_ahead(1) == TokenKind::Assign) {
            return self.parse_logical_or();
        }

        let target = Ident::new(self.advance().text);
        self.advance(); // '='

        let Some(value) = self.parse_assign_expr()? else {
            return Err(self.error("assign_expr", "expected expression after '='"));
        };

        Ok(Some(Expr::Assign {
            target,
            value: Box::new(value),
        }))
    }

    /// Right operand of a binary operator that has already been consumed
    fn require_operand(
        &mut self,
        operand: PResult<Expr>,
        production: &'static str,
        op: BinOp,
    ) -> Result<Expr, SyntaxError> {
        match operand? {
            Some(expr) => Ok(expr),
            None => Err(self.error(
                production,
                &format!("expected expression after '{}'", op.as_str()),
            )),
        }
    }

    /// Parse logical OR (||)
    #[instrument(level = "trace", skip_all, fields(pos = self.position))]
    fn parse_logical_or(&mut self) -> PResult<Expr> {
        let Some(mut left) = self.parse_logical_and()? else {
            return Ok(None);
        };

        while self.match_token(TokenKind::Or).is_some() {
            let right = self.parse_logical_and();
            let right = self.require_operand(right, "logical_or_expr", BinOp::Or)?;
            left = Expr::LogicalOr(BinaryExpr::new(BinOp::Or, left, right));
        }

        Ok(Some(left))
    }

    /// Parse logical AND (&&)
    #[instrument(level = "trace", skip_all, fields(pos = self.position))]
    fn parse_logical_and(&mut self) -> PResult<Expr> {
        let Some(mut left) = self.parse_equality()? else {
            return Ok(None);
        };

        while self.match_token(TokenKind::And).is_some() {
            let right = self.parse_equality();
            let right = self.require_operand(right, "logical_and_expr", BinOp::And)?;
            left = Expr::LogicalAnd(BinaryExpr::new(BinOp::And, left, right));
        }

        Ok(Some(left))
    }

    /// Parse equality (== !=)
    #[instrument(level = "trace", skip_all, fields(pos = self.position))]
    fn parse_equality(&mut self) -> PResult<Expr> {
        let Some(mut left) = self.parse_relational()? else {
            return Ok(None);
        };

        loop {
            let op = match self.peek_kind() {
                TokenKind::Eq => BinOp::Eq,
                TokenKind::Neq => BinOp::Ne,
                _ => break,
            };
            self.advance();

            let right = self.parse_relational();
            let right = self.require_operand(right, "equality_expr", op)?;
            left = Expr::Equality(BinaryExpr::new(op, left, right));
        }

        Ok(Some(left))
    }

    /// Parse relational (< <= > >=)
    #[instrument(level = "trace", skip_all, fields(pos = self.position))]
    fn parse_relational(&mut self) -> PResult<Expr> {
        let Some(mut left) = self.parse_additive()? else {
            return Ok(None);
        };

        loop {
            let op = match self.peek_kind() {
                TokenKind::Lt => BinOp::Lt,
                TokenKind::Gt => BinOp::Gt,
                TokenKind::Le => BinOp::Le,
                TokenKind::Ge => BinOp::Ge,
                _ => break,
            };
            self.advance();

            let right = self.parse_additive();
            let right = self.require_operand(right, "relational_expr", op)?;
            left = Expr::Relational(BinaryExpr::new(op, left, right));
        }

        Ok(Some(left))
    }

    /// Parse additive (+ -)
    #[instrument(level = "trace", skip_all, fields(pos = self.position))]
    fn parse_additive(&mut self) -> PResult<Expr> {
        let Some(mut left) = self.parse_multiplicative()? else {
            return Ok(None);
        };

        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();

            let right = self.parse_multiplicative();
            let right = self.require_operand(right, "additive_expr", op)?;
            left = Expr::Additive(BinaryExpr::new(op, left, right));
        }

        Ok(Some(left))
    }

    /// Parse multiplicative (* / %)
    #[instrument(level = "trace", skip_all, fields(pos = self.position))]
    fn parse_multiplicative(&mut self) -> PResult<Expr> {
        let Some(mut left) = self.parse_unary()? else {
            return Ok(None);
        };

        loop {
            let op = match self.peek_kind() {
                TokenKind::Mul => BinOp::Mul,
                TokenKind::Div => BinOp::Div,
                TokenKind::Mod => BinOp::Mod,
                _ => break,
            };
            self.advance();

            let right = self.parse_unary();
            let right = self.require_operand(right, "multiplicative_expr", op)?;
            left = Expr::Multiplicative(BinaryExpr::new(op, left, right));
        }

        Ok(Some(left))
    }

    /// Parse unary prefix operators
    #[instrument(level = "trace", skip_all, fields(pos = self.position))]
    fn parse_unary(&mut self) -> PResult<Expr> {
        let op = match self.peek_kind() {
            TokenKind::Plus => UnOp::Plus,
            TokenKind::Minus => UnOp::Neg,
            TokenKind::Not => UnOp::Not,
            _ => return self.parse_postfix(),
        };
        self.advance();

        let operand = self.nested("unary_expr", "expression nested too deeply", |parser| {
            parser.parse_unary()
        })?;
        let Some(operand) = operand else {
            return Err(self.error("unary_expr", "expected expression after unary operator"));
        };

        Ok(Some(Expr::Unary {
            op,
            operand: Box::new(operand),
        }))
    }

    /// Parse a call, or a primary expression followed by any `[...]` suffixes
    #[instrument(level = "trace", skip_all, fields(pos = self.position))]
    fn parse_postfix(&mut self) -> PResult<Expr> {
        if self.check(TokenKind::Ident) && self.peek_ahead(1) == TokenKind::LParen {
            let callee = Ident::new(self.advance().text);
            self.advance(); // '('
            let args = self.parse_arg_list()?;
            self.expect_token(
                TokenKind::RParen,
                "postfix_expr",
                "expected ')' after function call arguments",
            )?;
            return Ok(Some(Expr::Call { callee, args }));
        }

        let Some(mut expr) = self.parse_primary()? else {
            return Ok(None);
        };

        while self.match_token(TokenKind::LBracket).is_some() {
            let Some(index) = self.parse_expr()? else {
                return Err(self.error("array_access", "expected expression inside []"));
            };
            self.expect_token(
                TokenKind::RBracket,
                "array_access",
                "expected ']' after expression",
            )?;
            expr = Expr::ArrayAccess {
                base: Box::new(expr),
                index: Box::new(index),
            };
        }

        Ok(Some(expr))
    }

    /// Parse call arguments; empty when no expression starts here
    fn parse_arg_list(&mut self) -> Result<Vec<Expr>, SyntaxError> {
        let mut args = Vec::new();
        let Some(first) = self.parse_expr()? else {
            return Ok(args);
        };
        args.push(first);

        while self.match_token(TokenKind::Comma).is_some() {
            let Some(arg) = self.parse_expr()? else {
                return Err(self.error("arg_list", "expected expression after ','"));
            };
            args.push(arg);
        }

        Ok(args)
    }

    /// Parse primary expressions (identifiers, constants, parenthesized)
    #[instrument(level = "trace", skip_all, fields(pos = self.position))]
    fn parse_primary(&mut self) -> PResult<Expr> {
        let expr = match self.peek_kind() {
            TokenKind::Ident => Expr::Identifier(Ident::new(self.advance().text)),
            TokenKind::IntConst => Expr::Const(Constant::Int(self.advance().text)),
            TokenKind::LongConst => Expr::Const(Constant::Long(self.advance().text)),
            TokenKind::FloatConst => Expr::Const(Constant::Float(self.advance().text)),
            TokenKind::CharConst => Expr::Const(Constant::Char(self.advance().text)),
            TokenKind::StringConst => Expr::Const(Constant::Str(self.advance().text)),
            TokenKind::LParen => {
                self.advance();
                let inner = self.nested("primary_expr", "expression nested too deeply", |parser| {
                    parser.parse_expr()
                })?;
                let Some(inner) = inner else {
                    return Err(self.error("primary_expr", "expected expression after '('"));
                };
                self.expect_token(
                    TokenKind::RParen,
                    "primary_expr",
                    "expected ')' after expression",
                )?;
                Expr::Parenthesized(Box::new(inner))
            }
            _ => return Ok(None),
        };

        Ok(Some(expr))
    }
}
