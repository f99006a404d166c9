//! Declaration parsing implementation
//!
//! This module handles parsing of top-level declarations:
//!
//! - Top-level comments, kept as leaves in program order
//! - Function definitions: `type name(params) { ... }`
//! - Function declarations: `type name(params);`
//! - Variable declarations: `type name[dims] = expr;`
//! - Parameters and array declarators
//!
//! # Grammar
//!
//! ```text
//! external_decl ::= comment | function_def | function_decl | var_decl
//! function_def  ::= type_spec IDENT "(" param_list? ")" compound_stmt
//! function_decl ::= type_spec IDENT "(" param_list? ")" ";"
//! param_list    ::= param ("," param)*
//! param         ::= type_spec IDENT array_type?
//! var_decl      ::= type_spec IDENT array_type? ("=" expr)? ";"
//! array_type    ::= ("[" (INT_CONST | IDENT) "]")+
//! ```
//!
//! The three declaration forms share the `type_spec IDENT` prefix and are
//! tried in order. The function forms back out silently until their last
//! distinguishing token; `var_decl` is the final alternative, so once it has
//! seen a type keyword every failure is a committed error.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{PResult, Parser, SyntaxError};
use tracing::instrument;

impl Parser {
    /// Parse one external declaration; `Ok(None)` at end of input
    #[instrument(level = "trace", skip_all, fields(pos = self.position))]
    pub(crate) fn parse_external_decl(&mut self) -> PResult<ExternalDecl> {
        // Comments are checked on the raw cursor; everything else skips them
        match self.peek_raw().kind {
            TokenKind::LineComment => {
                let token = self.advance_raw();
                return Ok(Some(ExternalDecl::LineComment(token.text)));
            }
            TokenKind::BlockComment => {
                let token = self.advance_raw();
                return Ok(Some(ExternalDecl::BlockComment(token.text)));
            }
            _ => {}
        }

        if self.check(TokenKind::Eof) {
            return Ok(None);
        }

        if let Some(def) = self.parse_function_def()? {
            return Ok(Some(ExternalDecl::FunctionDef(def)));
        }
        if let Some(decl) = self.parse_function_decl()? {
            return Ok(Some(ExternalDecl::FunctionDecl(decl)));
        }
        if let Some(var) = self.parse_var_decl()? {
            return Ok(Some(ExternalDecl::VarDecl(var)));
        }

        Err(self.error(
            "external_decl",
            "expected function_def/function_decl/var_decl",
        ))
    }

    /// Parse a type keyword, consuming it on success
    pub(crate) fn parse_type_spec(&mut self) -> Option<TypeSpec> {
        let spec = match self.peek_kind() {
            TokenKind::Int => TypeSpec::Int,
            TokenKind::Float => TypeSpec::Float,
            TokenKind::Char => TypeSpec::Char,
            TokenKind::Long => TypeSpec::Long,
            TokenKind::Void => TypeSpec::Void,
            _ => return None,
        };
        self.advance();
        Some(spec)
    }

    /// `type_spec IDENT "(" param_list? ")"`, shared by both function forms.
    ///
    /// Backs out silently unless the parameter list itself is malformed.
    fn parse_function_header(
        &mut self,
    ) -> PResult<(TypeSpec, Ident, Vec<Param>)> {
        let start = self.position;

        let Some(return_type) = self.parse_type_spec() else {
            return self.backtrack(start, "function_header");
        };
        if !self.check(TokenKind::Ident) || self.peek_ahead(1) != TokenKind::LParen {
            return self.backtrack(start, "function_header");
        }
        let name = Ident::new(self.advance().text);
        self.advance(); // '('

        let params = self.parse_param_list()?;
        if self.match_token(TokenKind::RParen).is_none() {
            return Err(self.error(
                "param_list",
                "expected ')' after function parameters",
            ));
        }

        Ok(Some((return_type, name, params)))
    }

    /// Function definition: header followed by a compound statement
    #[instrument(level = "trace", skip_all, fields(pos = self.position))]
    pub(crate) fn parse_function_def(&mut self) -> PResult<FunctionDef> {
        let start = self.position;

        let Some((return_type, name, params)) = self.parse_function_header()? else {
            return Ok(None);
        };
        let Some(body) = self.parse_compound_stmt()? else {
            return self.backtrack(start, "function_def");
        };

        Ok(Some(FunctionDef {
            return_type,
            name,
            params,
            body,
        }))
    }

    /// Function declaration: header followed by `;`
    #[instrument(level = "trace", skip_all, fields(pos = self.position))]
    pub(crate) fn parse_function_decl(&mut self) -> PResult<FunctionDecl> {
        let start = self.position;

        let Some((return_type, name, params)) = self.parse_function_header()? else {
            return Ok(None);
        };
        if self.match_token(TokenKind::Semicolon).is_none() {
            return self.backtrack(start, "function_decl");
        }

        Ok(Some(FunctionDecl {
            return_type,
            name,
            params,
        }))
    }

    /// Parameter list; empty when the next token is `)`
    #[instrument(level = "trace", skip_all, fields(pos = self.position))]
    fn parse_param_list(&mut self) -> Result<Vec<Param>, SyntaxError> {
        let mut params = Vec::new();
        if self.check(TokenKind::RParen) {
            return Ok(params);
        }

        loop {
            let Some(param) = self.parse_param()? else {
                let message = if params.is_empty() {
                    "expected parameter or ')'"
                } else {
                    "expected parameter after ','"
                };
                return Err(self.error("param_list", message));
            };
            params.push(param);

            if self.match_token(TokenKind::Comma).is_none() {
                return Ok(params);
            }
        }
    }

    /// Single parameter: `type_spec IDENT array_type?`
    #[instrument(level = "trace", skip_all, fields(pos = self.position))]
    fn parse_param(&mut self) -> PResult<Param> {
        let Some(param_type) = self.parse_type_spec() else {
            return Ok(None);
        };
        let name = self.expect_identifier("param", "expected identifier after type_spec")?;
        let array = self.parse_array_type()?;

        Ok(Some(Param {
            param_type,
            name,
            array,
        }))
    }

    /// File-scope variable declaration
    #[instrument(level = "trace", skip_all, fields(pos = self.position))]
    pub(crate) fn parse_var_decl(&mut self) -> PResult<VarDecl> {
        self.parse_var_decl_as("var_decl")
    }

    /// Block-scope variable declaration
    #[instrument(level = "trace", skip_all, fields(pos = self.position))]
    pub(crate) fn parse_local_var_decl(&mut self) -> PResult<VarDecl> {
        self.parse_var_decl_as("local_var_decl")
    }

    /// Shared body of both variable declaration forms.
    ///
    /// Only tried when no other alternative can start with a type keyword,
    /// so the type keyword commits.
    fn parse_var_decl_as(&mut self, production: &'static str) -> PResult<VarDecl> {
        let Some(var_type) = self.parse_type_spec() else {
            return Ok(None);
        };
        let name = self.expect_identifier(production, "expected identifier after type_spec")?;
        let array = self.parse_array_type()?;

        let init = if self.match_token(TokenKind::Assign).is_some() {
            match self.parse_expr()? {
                Some(expr) => Some(expr),
                None => return Err(self.error(production, "expected expression after '='")),
            }
        } else {
            None
        };

        self.expect_token(
            TokenKind::Semicolon,
            production,
            "expected ';' at end of declaration",
        )?;

        Ok(Some(VarDecl {
            var_type,
            name,
            array,
            init,
        }))
    }

    /// Array declarator; `None` when no `[` follows
    #[instrument(level = "trace", skip_all, fields(pos = self.position))]
    fn parse_array_type(&mut self) -> Result<Option<ArrayType>, SyntaxError> {
        let mut dims = Vec::new();

        while self.match_token(TokenKind::LBracket).is_some() {
            let dim = match self.peek_kind() {
                TokenKind::IntConst => Dimension::Const(self.advance().text),
                TokenKind::Ident => Dimension::Ident(Ident::new(self.advance().text)),
                _ => {
                    return Err(self.error(
                        "array_type",
                        "expected dimension inside []",
                    ))
                }
            };
            self.expect_token(
                TokenKind::RBracket,
                "array_type",
                "expected ']' after dimension",
            )?;
            dims.push(dim);
        }

        Ok((!dims.is_empty()).then_some(ArrayType { dims }))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::tests::parse;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_var_decl_with_array_and_init() {
        let program = parse("int grid[3][N]; long total = 10L;").unwrap();

        assert_eq!(
            program.decls,
            vec![
                ExternalDecl::VarDecl(VarDecl {
                    var_type: TypeSpec::Int,
                    name: Ident::new("grid"),
                    array: Some(ArrayType {
                        dims: vec![
                            Dimension::Const("3".into()),
                            Dimension::Ident(Ident::new("N")),
                        ],
                    }),
                    init: None,
                }),
                ExternalDecl::VarDecl(VarDecl {
                    var_type: TypeSpec::Long,
                    name: Ident::new("total"),
                    array: None,
                    init: Some(Expr::Const(Constant::Long("10L".into()))),
                }),
            ]
        );
    }

    #[test]
    fn test_function_decl_and_def() {
        let program = parse(
            "int add(int a, int b);\nint add(int a, int b) { return a + b; }",
        )
        .unwrap();

        assert_eq!(program.decls.len(), 2);
        let ExternalDecl::FunctionDecl(decl) = &program.decls[0] else {
            panic!("Expected function declaration");
        };
        assert_eq!(decl.name, Ident::new("add"));
        assert_eq!(decl.params.len(), 2);
        assert!(matches!(program.decls[1], ExternalDecl::FunctionDef(_)));
    }

    #[test]
    fn test_array_param() {
        let program = parse("void fill(int buf[16], char c);").unwrap();

        let ExternalDecl::FunctionDecl(decl) = &program.decls[0] else {
            panic!("Expected function declaration");
        };
        assert_eq!(
            decl.params[0],
            Param {
                param_type: TypeSpec::Int,
                name: Ident::new("buf"),
                array: Some(ArrayType {
                    dims: vec![Dimension::Const("16".into())]
                }),
            }
        );
        assert_eq!(decl.params[1].param_type, TypeSpec::Char);
    }

    #[test]
    fn test_top_level_comments_preserved_in_order() {
        let program = parse("// header\nint x;\n/* between */\nint y;\n// trailer").unwrap();

        assert_eq!(program.decls.len(), 5);
        assert_eq!(program.decls[0], ExternalDecl::LineComment("// header".into()));
        assert!(matches!(program.decls[1], ExternalDecl::VarDecl(_)));
        assert_eq!(program.decls[2], ExternalDecl::BlockComment("/* between */".into()));
        assert!(matches!(program.decls[3], ExternalDecl::VarDecl(_)));
        assert_eq!(program.decls[4], ExternalDecl::LineComment("// trailer".into()));
    }

    #[test]
    fn test_malformed_var_decl_references_var_decl() {
        let err = parse("int x = ;").unwrap_err();
        assert_eq!(err.production, "var_decl");
        assert!(err.message.contains("expected expression"));
    }

    #[test]
    fn test_missing_semicolon_after_var_decl() {
        let err = parse("int x = 1 int y;").unwrap_err();
        assert_eq!(err.production, "var_decl");
        assert!(err.message.contains("';'"));
    }

    #[test]
    fn test_bad_parameter_list_is_committed() {
        let err = parse("int f(int a, ) { return a; }").unwrap_err();
        assert_eq!(err.production, "param_list");
        assert!(err.message.contains("after ','"));
    }

    #[test]
    fn test_bad_array_dimension() {
        let err = parse("int a[1 + 2];").unwrap_err();
        assert_eq!(err.production, "array_type");
    }

    #[test]
    fn test_non_declaration_at_top_level() {
        let err = parse("x = 1;").unwrap_err();
        assert_eq!(err.production, "external_decl");
    }
}
