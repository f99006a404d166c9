//! AST debug dump
//!
//! Writes the tree one node per line, four spaces per level, naming the role
//! each child plays (type, name, condition, then-clause, ...) rather than
//! just its node kind. The output exists for grammar debugging only.

use crate::error::{Error, Result};
use crate::parser::ast::*;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Default destination for the dump
pub const DEFAULT_DUMP_PATH: &str = "ast.txt";

const INDENT: &str = "    ";

/// Render the dump of `program` as text
pub fn render_dump(program: &Program) -> String {
    let mut dumper = Dumper::default();
    dumper.program(program);
    dumper.out
}

/// Render the dump of `program` and write it to `path`
pub fn write_dump(program: &Program, path: &Path) -> Result<()> {
    let text = render_dump(program);
    fs::write(path, &text).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "wrote AST dump");
    Ok(())
}

fn decl_label(decl: &ExternalDecl) -> &'static str {
    match decl {
        ExternalDecl::FunctionDef(_) => "Function definition:",
        ExternalDecl::FunctionDecl(_) => "Function declaration:",
        ExternalDecl::VarDecl(_) => "External variable declaration:",
        ExternalDecl::LineComment(_) => "Line comment:",
        ExternalDecl::BlockComment(_) => "Block comment:",
    }
}

fn stmt_label(stmt: &Stmt) -> &'static str {
    match stmt {
        Stmt::Compound(_) => "Compound statement:",
        Stmt::Expr(_) => "Expression statement:",
        Stmt::If { .. } => "Conditional statement (IF_THEN_ELSE):",
        Stmt::While { .. } => "Loop statement (WHILE):",
        Stmt::For { .. } => "Loop statement (FOR):",
        Stmt::Return(_) => "Return statement:",
        Stmt::Break => "BREAK statement",
        Stmt::Continue => "CONTINUE statement",
        Stmt::LocalVarDecl(_) => "Local variable declaration:",
    }
}

fn binary_label(op: BinOp) -> &'static str {
    match op {
        BinOp::Or => "Logical OR expression",
        BinOp::And => "Logical AND expression",
        BinOp::Eq | BinOp::Ne => "Equality expression",
        BinOp::Lt | BinOp::Gt | BinOp::Le | BinOp::Ge => "Relational expression",
        BinOp::Add | BinOp::Sub => "Additive expression",
        BinOp::Mul | BinOp::Div | BinOp::Mod => "Multiplicative expression",
    }
}

fn const_label(constant: &Constant) -> &'static str {
    match constant {
        Constant::Int(_) => "INT_CONST",
        Constant::Long(_) => "LONG_CONST",
        Constant::Float(_) => "FLOAT_CONST",
        Constant::Char(_) => "CHAR_CONST",
        Constant::Str(_) => "STRING_CONST",
    }
}

#[derive(Default)]
struct Dumper {
    out: String,
}

impl Dumper {
    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn program(&mut self, program: &Program) {
        self.line(0, "Program:");
        for decl in &program.decls {
            self.external_decl(decl, 1);
        }
    }

    fn external_decl(&mut self, decl: &ExternalDecl, depth: usize) {
        self.line(depth, decl_label(decl));
        match decl {
            ExternalDecl::FunctionDef(def) => {
                self.function_header(def.return_type, &def.name, &def.params, depth + 1);
                self.line(depth + 1, "body:");
                self.compound(&def.body, depth + 2);
            }
            ExternalDecl::FunctionDecl(decl) => {
                self.function_header(decl.return_type, &decl.name, &decl.params, depth + 1);
            }
            ExternalDecl::VarDecl(var) => self.var_decl_fields(var, depth + 1),
            ExternalDecl::LineComment(text) | ExternalDecl::BlockComment(text) => {
                for line in text.lines() {
                    self.line(depth + 1, line);
                }
            }
        }
    }

    fn function_header(&mut self, return_type: TypeSpec, name: &Ident, params: &[Param], depth: usize) {
        self.line(depth, &format!("type: {}", return_type.as_str()));
        self.line(depth, &format!("function name: {}", name.name));
        if params.is_empty() {
            self.line(depth, "parameter list: (none)");
            return;
        }
        self.line(depth, "parameter list:");
        for param in params {
            let dims = param.array.as_ref().map(array_dims).unwrap_or_default();
            self.line(
                depth + 1,
                &format!(
                    "type: {}, parameter name: {}{}",
                    param.param_type.as_str(),
                    param.name.name,
                    dims
                ),
            );
        }
    }

    fn var_decl_fields(&mut self, var: &VarDecl, depth: usize) {
        self.line(depth, &format!("type: {}", var.var_type.as_str()));
        self.line(depth, "variable name:");
        self.line(depth + 1, &format!("ID: {}", var.name.name));
        if let Some(array) = &var.array {
            self.line(depth, &format!("array dimensions: {}", array_dims(array)));
        }
        if let Some(init) = &var.init {
            self.line(depth, "initializer:");
            self.expr(init, depth + 1);
        }
    }

    fn compound(&mut self, block: &CompoundStmt, depth: usize) {
        self.line(depth, "local declarations:");
        for decl in &block.decls {
            self.line(depth + 1, "Local variable declaration:");
            self.var_decl_fields(decl, depth + 2);
        }
        self.line(depth, "statements:");
        for stmt in &block.stmts {
            self.stmt(stmt, depth + 1);
        }
    }

    fn stmt(&mut self, stmt: &Stmt, depth: usize) {
        self.line(depth, stmt_label(stmt));
        let inner = depth + 1;

        match stmt {
            Stmt::Compound(block) => self.compound(block, inner),
            Stmt::Expr(expr_stmt) => self.expr_stmt(expr_stmt, inner),
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.line(inner, "condition:");
                self.expr(condition, inner + 1);
                self.line(inner, "then-clause:");
                self.stmt(then_branch, inner + 1);
                if let Some(else_branch) = else_branch {
                    self.line(inner, "else-clause:");
                    self.stmt(else_branch, inner + 1);
                }
            }
            Stmt::While { condition, body } => {
                self.line(inner, "condition:");
                self.expr(condition, inner + 1);
                self.line(inner, "loop body:");
                self.stmt(body, inner + 1);
            }
            Stmt::For {
                init,
                condition,
                step,
                body,
            } => {
                self.line(inner, "init:");
                self.expr_stmt(init, inner + 1);
                self.line(inner, "condition:");
                self.expr_stmt(condition, inner + 1);
                self.line(inner, "step:");
                self.expr(step, inner + 1);
                self.line(inner, "loop body:");
                self.stmt(body, inner + 1);
            }
            Stmt::Return(value) => {
                if let Some(value) = value {
                    self.expr(value, inner);
                }
            }
            Stmt::Break | Stmt::Continue => {}
            Stmt::LocalVarDecl(var) => self.var_decl_fields(var, inner),
        }
    }

    fn expr_stmt(&mut self, expr_stmt: &ExprStmt, depth: usize) {
        match &expr_stmt.expr {
            Some(expr) => self.expr(expr, depth),
            None => self.line(depth, "(empty)"),
        }
    }

    fn expr(&mut self, expr: &Expr, depth: usize) {
        match expr {
            Expr::LogicalOr(bin)
            | Expr::LogicalAnd(bin)
            | Expr::Equality(bin)
            | Expr::Relational(bin)
            | Expr::Additive(bin)
            | Expr::Multiplicative(bin) => {
                let label = binary_label(bin.op);
                self.line(depth, &format!("{label} ({}):", bin.op.as_str()));
                self.expr(&bin.left, depth + 1);
                self.expr(&bin.right, depth + 1);
            }
            Expr::Assign { target, value } => {
                self.line(depth, "Assignment expression (ASSIGNOP):");
                self.line(depth + 1, "lvalue:");
                self.line(depth + 2, &format!("ID: {}", target.name));
                self.line(depth + 1, "rvalue:");
                self.expr(value, depth + 2);
            }
            Expr::Unary { op, operand } => {
                self.line(depth, &format!("Unary expression ({}):", op.as_str()));
                self.expr(operand, depth + 1);
            }
            Expr::Call { callee, args } => {
                self.line(depth, "Function call:");
                self.line(depth + 1, &format!("function name: {}", callee.name));
                self.line(depth + 1, "argument list:");
                for arg in args {
                    self.expr(arg, depth + 2);
                }
            }
            Expr::ArrayAccess { base, index } => {
                self.line(depth, "Array access:");
                self.line(depth + 1, "array:");
                self.expr(base, depth + 2);
                self.line(depth + 1, "index:");
                self.expr(index, depth + 2);
            }
            Expr::Parenthesized(inner) => {
                self.line(depth, "Parenthesized expression:");
                self.expr(inner, depth + 1);
            }
            Expr::Identifier(ident) => self.line(depth, &format!("ID: {}", ident.name)),
            Expr::Const(constant) => {
                self.line(depth, &format!("{}: {}", const_label(constant), constant.text()))
            }
        }
    }
}

fn array_dims(array: &ArrayType) -> String {
    array
        .dims
        .iter()
        .map(|dim| format!("[{}]", dim.text()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::parse_source;
    use pretty_assertions::assert_eq;

    fn dump(source: &str) -> String {
        render_dump(&parse_source(source).unwrap())
    }

    #[test]
    fn test_function_with_locals() {
        let expected = "\
Program:
    Function definition:
        type: int
        function name: main
        parameter list: (none)
        body:
            local declarations:
                Local variable declaration:
                    type: int
                    variable name:
                        ID: x
                    initializer:
                        INT_CONST: 1
            statements:
                Return statement:
                    ID: x
";
        assert_eq!(dump("int main() { int x = 1; return x; }"), expected);
    }

    #[test]
    fn test_if_else_roles() {
        let text = dump("void f(int a, char s[8]) { if (a < 2) a = a + 1; else return; }");

        assert!(text.contains("type: int, parameter name: a\n"));
        assert!(text.contains("type: char, parameter name: s[8]\n"));
        assert!(text.contains("Conditional statement (IF_THEN_ELSE):"));
        assert!(text.contains(&format!(
            "condition:\n{}Relational expression (<):",
            INDENT.repeat(6)
        )));
        assert!(text.contains("then-clause:"));
        assert!(text.contains("else-clause:"));
        assert!(text.contains("Additive expression (+):"));
    }

    #[test]
    fn test_for_loop_slots() {
        let text = dump("void f() { for (; i < 3; i = i + 1) g(a[i]); }");

        assert!(text.contains(&format!("init:\n{}(empty)\n", INDENT.repeat(6))));
        assert!(text.contains("step:"));
        assert!(text.contains("Function call:"));
        assert!(text.contains("Array access:"));
    }

    #[test]
    fn test_top_level_comment_and_globals() {
        let text = dump("/* grid */ long g[2][N] = 5L;");

        assert!(text.contains("Block comment:\n        /* grid */\n"));
        assert!(text.contains("array dimensions: [2][N]"));
        assert!(text.contains("LONG_CONST: 5L"));
    }

    #[test]
    fn test_multi_line_block_comment_keeps_indentation() {
        let text = dump("/* first\n * second\nlast */\nint x;");

        assert!(text.contains(
            "Block comment:\n        /* first\n         * second\n        last */\n"
        ));
    }
}
