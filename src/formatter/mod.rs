//! Canonical source formatter
//!
//! Renders a parsed [`Program`] back to source text in one fixed style:
//! - 4 spaces per nesting level, braces on their own line at the owner's depth
//! - `" op "` around binary operators, nothing after a unary prefix unless
//!   the operand starts with the same sign (`- -x`)
//! - `", "` between parameters and arguments
//! - a blank line around every top-level function definition
//!
//! Statements and declarations go through the indented traversal in this
//! module. Expressions and `for` headers are rendered inline by
//! [`inline`], which never emits newlines or terminators.
//!
//! Rendering is pure; [`write_formatted`] renders first and only then
//! touches the filesystem.

mod inline;

use crate::error::{Error, Result};
use crate::parser::ast::*;
use std::fs;
use std::path::Path;
use tracing::debug;

pub use inline::{render_expr, render_for_header};

const INDENT: &str = "    ";

/// Render a whole program to canonical source text
pub fn render(program: &Program) -> String {
    let mut formatter = Formatter::new();
    formatter.program(program);
    formatter.finish()
}

/// Render `program` and write it to `path`
pub fn write_formatted(program: &Program, path: &Path) -> Result<()> {
    let text = render(program);
    fs::write(path, &text).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = text.len(), "wrote formatted source");
    Ok(())
}

/// Statement and declaration traversal with explicit depth tracking
pub struct Formatter {
    out: String,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Formatter { out: String::new() }
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn indent(&mut self, depth: usize) {
        for _ in 0..depth {
            self.out.push_str(INDENT);
        }
    }

    fn line(&mut self, depth: usize, text: &str) {
        self.indent(depth);
        self.out.push_str(text);
        self.out.push('\n');
    }

    pub fn program(&mut self, program: &Program) {
        let mut prev_was_function = false;

        for (i, decl) in program.decls.iter().enumerate() {
            let is_function = matches!(decl, ExternalDecl::FunctionDef(_));
            if i > 0 && (is_function || prev_was_function) {
                self.out.push('\n');
            }
            self.external_decl(decl);
            prev_was_function = is_function;
        }
    }

    fn external_decl(&mut self, decl: &ExternalDecl) {
        match decl {
            ExternalDecl::FunctionDef(def) => {
                let header = signature(def.return_type, &def.name, &def.params);
                self.line(0, &header);
                self.compound(&def.body, 0);
            }
            ExternalDecl::FunctionDecl(decl) => {
                let header = signature(decl.return_type, &decl.name, &decl.params);
                self.line(0, &format!("{header};"));
            }
            ExternalDecl::VarDecl(var) => self.var_decl(var, 0),
            ExternalDecl::LineComment(text) | ExternalDecl::BlockComment(text) => {
                self.line(0, text)
            }
        }
    }

    fn var_decl(&mut self, var: &VarDecl, depth: usize) {
        let mut text = format!("{} {}", var.var_type.as_str(), var.name.name);
        if let Some(array) = &var.array {
            text.push_str(&array_suffix(array));
        }
        if let Some(init) = &var.init {
            text.push_str(" = ");
            text.push_str(&render_expr(init));
        }
        text.push(';');
        self.line(depth, &text);
    }

    /// `{`, declarations, statements, `}`; braces sit at `depth`
    fn compound(&mut self, block: &CompoundStmt, depth: usize) {
        self.line(depth, "{");
        for decl in &block.decls {
            self.var_decl(decl, depth + 1);
        }
        for stmt in &block.stmts {
            self.stmt(stmt, depth + 1);
        }
        self.line(depth, "}");
    }

    /// Body of a control statement owned by a statement at `depth`
    fn body(&mut self, stmt: &Stmt, depth: usize) {
        match stmt {
            Stmt::Compound(block) => self.compound(block, depth),
            other => self.stmt(other, depth + 1),
        }
    }

    pub fn stmt(&mut self, stmt: &Stmt, depth: usize) {
        match stmt {
            Stmt::Compound(block) => self.compound(block, depth),
            Stmt::Expr(expr_stmt) => match &expr_stmt.expr {
                Some(expr) => self.line(depth, &format!("{};", render_expr(expr))),
                None => self.line(depth, ";"),
            },
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.indent(depth);
                self.if_chain(condition, then_branch, else_branch.as_deref(), depth);
            }
            Stmt::While { condition, body } => {
                self.line(depth, &format!("while ({})", render_expr(condition)));
                self.body(body, depth);
            }
            Stmt::For {
                init,
                condition,
                step,
                body,
            } => {
                let header = render_for_header(init, condition, step);
                self.line(depth, &format!("for ({header})"));
                self.body(body, depth);
            }
            Stmt::Return(Some(expr)) => {
                self.line(depth, &format!("return {};", render_expr(expr)))
            }
            Stmt::Return(None) => self.line(depth, "return;"),
            Stmt::Break => self.line(depth, "break;"),
            Stmt::Continue => self.line(depth, "continue;"),
            Stmt::LocalVarDecl(var) => self.var_decl(var, depth),
        }
    }

    /// `if (...)` with the indent already written; `else if` stays on one line
    fn if_chain(&mut self, condition: &Expr, then_branch: &Stmt, else_branch: Option<&Stmt>, depth: usize) {
        self.out.push_str(&format!("if ({})\n", render_expr(condition)));
        self.body(then_branch, depth);

        match else_branch {
            Some(Stmt::If {
                condition,
                then_branch,
                else_branch,
            }) => {
                self.indent(depth);
                self.out.push_str("else ");
                self.if_chain(condition, then_branch, else_branch.as_deref(), depth);
            }
            Some(other) => {
                self.line(depth, "else");
                self.body(other, depth);
            }
            None => {}
        }
    }
}

/// `type name(type a, type b[3])`
fn signature(return_type: TypeSpec, name: &Ident, params: &[Param]) -> String {
    let params: Vec<String> = params
        .iter()
        .map(|param| {
            let mut text = format!("{} {}", param.param_type.as_str(), param.name.name);
            if let Some(array) = &param.array {
                text.push_str(&array_suffix(array));
            }
            text
        })
        .collect();
    format!("{} {}({})", return_type.as_str(), name.name, params.join(", "))
}

fn array_suffix(array: &ArrayType) -> String {
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

    fn format_source(source: &str) -> String {
        render(&parse_source(source).unwrap())
    }

    #[test]
    fn test_simple_function() {
        assert_eq!(
            format_source("int main() { int x = 1; return x; }"),
            "int main()\n{\n    int x = 1;\n    return x;\n}\n"
        );
    }

    #[test]
    fn test_empty_program_renders_nothing() {
        assert_eq!(format_source(""), "");
    }

    #[test]
    fn test_declarations_and_comments() {
        let source = "// counters\nint  count=0 ;long big[4][N];\nint add(int a,int b);";
        assert_eq!(
            format_source(source),
            "// counters\nint count = 0;\nlong big[4][N];\nint add(int a, int b);\n"
        );
    }

    #[test]
    fn test_blank_lines_around_function_definitions() {
        let source = "int g; void a() {} void b() {} int h;";
        assert_eq!(
            format_source(source),
            "int g;\n\nvoid a()\n{\n}\n\nvoid b()\n{\n}\n\nint h;\n"
        );
    }

    #[test]
    fn test_control_flow_layout() {
        let source = "void f(int n) { while (n > 0) n = n - 1; \
                      if (n) { return; } else if (!n) ; else { n = 2; } }";
        let expected = "\
void f(int n)
{
    while (n > 0)
        n = n - 1;
    if (n)
    {
        return;
    }
    else if (!n)
        ;
    else
    {
        n = 2;
    }
}
";
        assert_eq!(format_source(source), expected);
    }

    #[test]
    fn test_for_header_and_nested_block() {
        let source = "void f() { int i; for (;i<10;i=i+1) { s = g(a[i], 2); } }";
        let expected = "\
void f()
{
    int i;
    for (; i < 10; i = i + 1)
    {
        s = g(a[i], 2);
    }
}
";
        assert_eq!(format_source(source), expected);
    }

    #[test]
    fn test_formatting_is_idempotent() {
        let source = "int v[2];\nint main(){int x=(1+2)*-v[0];if(x>=3&&x!=4||0)x=x%2;\
                      else{while(1){break;}}for(x=0;;x=x+1)continue;return f(x,\"s\",'c');}";
        let once = format_source(source);
        let twice = format_source(&once);
        assert_eq!(once, twice);
        assert_eq!(parse_source(&once).unwrap(), parse_source(source).unwrap());
    }

    #[test]
    fn test_write_to_missing_directory_fails_cleanly() {
        let program = parse_source("int x;").unwrap();
        let path = std::env::temp_dir()
            .join("cfmt-missing-dir-for-test")
            .join("out.c");

        let err = write_formatted(&program, &path).unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
        assert!(!path.exists());
    }
}
