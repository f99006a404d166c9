//! Inline rendering: expressions and `for` headers
//!
//! Nothing here emits indentation, newlines or statement terminators.

use crate::parser::ast::*;

/// Render an expression on a single line
pub fn render_expr(expr: &Expr) -> String {
    let mut out = String::new();
    write_expr(&mut out, expr);
    out
}

/// The three `for` slots joined by `"; "`; an empty slot renders as nothing
pub fn render_for_header(init: &ExprStmt, condition: &ExprStmt, step: &Expr) -> String {
    let slot = |stmt: &ExprStmt| stmt.expr.as_ref().map(render_expr).unwrap_or_default();
    format!("{}; {}; {}", slot(init), slot(condition), render_expr(step))
}

fn write_expr(out: &mut String, expr: &Expr) {
    match expr {
        Expr::Assign { target, value } => {
            out.push_str(&target.name);
            out.push_str(" = ");
            write_expr(out, value);
        }
        Expr::LogicalOr(bin)
        | Expr::LogicalAnd(bin)
        | Expr::Equality(bin)
        | Expr::Relational(bin)
        | Expr::Additive(bin)
        | Expr::Multiplicative(bin) => {
            write_expr(out, &bin.left);
            out.push(' ');
            out.push_str(bin.op.as_str());
            out.push(' ');
            write_expr(out, &bin.right);
        }
        Expr::Unary { op, operand } => {
            out.push_str(op.as_str());
            // `- -y` must not fuse into `--y`
            if matches!(operand.as_ref(), Expr::Unary { op: inner, .. } if inner == op && *op != UnOp::Not) {
                out.push(' ');
            }
            write_expr(out, operand);
        }
        Expr::Call { callee, args } => {
            out.push_str(&callee.name);
            out.push('(');
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_expr(out, arg);
            }
            out.push(')');
        }
        Expr::ArrayAccess { base, index } => {
            write_expr(out, base);
            out.push('[');
            write_expr(out, index);
            out.push(']');
        }
        Expr::Parenthesized(inner) => {
            out.push('(');
            write_expr(out, inner);
            out.push(')');
        }
        Expr::Identifier(ident) => out.push_str(&ident.name),
        Expr::Const(constant) => out.push_str(constant.text()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::Parser;
    use pretty_assertions::assert_eq;

    fn roundtrip(source: &str) -> String {
        let expr = Parser::from_source(source)
            .parse_expr()
            .unwrap()
            .expect("expression");
        render_expr(&expr)
    }

    #[test]
    fn test_repeated_sign_prefixes_stay_apart() {
        assert_eq!(roundtrip("x = - -y"), "x = - -y");
        assert_eq!(roundtrip("+ +w"), "+ +w");
        assert_eq!(roundtrip("- - -v"), "- - -v");
        assert_eq!(roundtrip("-+z"), "-+z");
        assert_eq!(roundtrip("!!f"), "!!f");
        assert_eq!(roundtrip("-!x"), "-!x");
    }

    #[test]
    fn test_operator_spacing() {
        assert_eq!(roundtrip("a+b*c-d/e%f"), "a + b * c - d / e % f");
        assert_eq!(roundtrip("a<=b||c!=d&&e>f"), "a <= b || c != d && e > f");
        assert_eq!(roundtrip("x=y=- z"), "x = y = -z");
    }

    #[test]
    fn test_calls_and_indexing() {
        assert_eq!(roundtrip("f( a,b [ 1 ][j] )"), "f(a, b[1][j])");
        assert_eq!(roundtrip("g()"), "g()");
    }

    #[test]
    fn test_parentheses_survive() {
        assert_eq!(roundtrip("!(a||b)"), "!(a || b)");
    }

    #[test]
    fn test_for_header_slots() {
        let step = Expr::Identifier(Ident::new("s"));
        let empty = ExprStmt { expr: None };
        let cond = ExprStmt {
            expr: Some(Expr::Identifier(Ident::new("c"))),
        };

        assert_eq!(render_for_header(&empty, &cond, &step), "; c; s");
        assert_eq!(render_for_header(&cond, &empty, &step), "c; ; s");
        assert_eq!(render_for_header(&empty, &empty, &step), "; ; s");
    }
}
