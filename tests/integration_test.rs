// Integration tests for the parser, formatter and dump

use cfmt::dump::{render_dump, write_dump};
use cfmt::formatter::{render, write_formatted};
use cfmt::parser::ast::*;
use cfmt::parser::lexer::{tokenize, TokenKind};
use cfmt::parser::{parse_source, Parser};
use cfmt::Error;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;

const SAMPLE: &str = r#"
/* sample program */
int limit = 10;
float ratio;
char names[4][16];

int sum(int values[8], int n);

int sum(int values[8], int n)
{
    int total = 0;
    int i;
    for (i = 0; i < n; i = i + 1)
        total = total + values[i];
    return total;
}

// entry point
int main()
{
    int data[8];
    long big = 0x7FL;
    if (limit >= 3 && !(ratio == 0.5))
    {
        limit = sum(data, limit) * -2 % 7 + data[0];
    }
    else if (limit)
        ;
    else
        while (limit > 0)
        {
            limit = limit - 1;
            if (limit == 2) break; else continue;
        }
    print("done\n", 'x');
    return 0;
}
"#;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("cfmt-test-{}-{name}", std::process::id()))
}

fn only_stmt(source: &str) -> Stmt {
    let program = parse_source(&format!("void f() {{ {source} }}")).unwrap();
    match program.decls.into_iter().next() {
        Some(ExternalDecl::FunctionDef(mut def)) => {
            assert_eq!(def.body.stmts.len(), 1);
            def.body.stmts.remove(0)
        }
        other => panic!("Expected function definition, got {other:?}"),
    }
}

#[test]
fn test_precedence_of_addition_and_multiplication() {
    let Stmt::Expr(ExprStmt { expr: Some(expr) }) = only_stmt("1 + 2 * 3;") else {
        panic!("Expected expression statement");
    };

    let Expr::Additive(add) = expr else {
        panic!("Expected additive expression at the root");
    };
    assert_eq!(*add.left, Expr::Const(Constant::Int("1".into())));
    assert!(matches!(*add.right, Expr::Multiplicative(_)));
}

#[test]
fn test_array_access_chains_left() {
    let Stmt::Expr(ExprStmt { expr: Some(expr) }) = only_stmt("a[1][2];") else {
        panic!("Expected expression statement");
    };

    let Expr::ArrayAccess { base, index } = expr else {
        panic!("Expected array access");
    };
    assert_eq!(*index, Expr::Const(Constant::Int("2".into())));
    assert!(matches!(*base, Expr::ArrayAccess { .. }));
}

#[test]
fn test_assignment_chains_right() {
    let stmt = only_stmt("x = y = 3;");

    assert_eq!(
        stmt,
        Stmt::Expr(ExprStmt {
            expr: Some(Expr::Assign {
                target: Ident::new("x"),
                value: Box::new(Expr::Assign {
                    target: Ident::new("y"),
                    value: Box::new(Expr::Const(Constant::Int("3".into()))),
                }),
            }),
        })
    );
}

#[test]
fn test_call_and_bare_identifier() {
    let call = only_stmt("foo(1, 2);");
    let bare = only_stmt("foo;");

    assert_eq!(
        call,
        Stmt::Expr(ExprStmt {
            expr: Some(Expr::Call {
                callee: Ident::new("foo"),
                args: vec![
                    Expr::Const(Constant::Int("1".into())),
                    Expr::Const(Constant::Int("2".into())),
                ],
            }),
        })
    );
    assert_eq!(
        bare,
        Stmt::Expr(ExprStmt {
            expr: Some(Expr::Identifier(Ident::new("foo"))),
        })
    );
}

#[test]
fn test_format_simple_main() {
    let program = parse_source("int main() { int x = 1; return x; }").unwrap();
    assert_eq!(render(&program), "int main()\n{\n    int x = 1;\n    return x;\n}\n");
}

#[test]
fn test_format_then_reparse_is_structurally_equal() {
    let original = parse_source(SAMPLE).unwrap();
    let formatted = render(&original);
    let reparsed = parse_source(&formatted).unwrap();

    assert_eq!(reparsed, original);
    assert_eq!(render(&reparsed), formatted);
}

#[test]
fn test_sample_keeps_top_level_comments() {
    let program = parse_source(SAMPLE).unwrap();

    let comments: Vec<_> = program
        .decls
        .iter()
        .filter_map(|decl| match decl {
            ExternalDecl::LineComment(text) | ExternalDecl::BlockComment(text) => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(comments, vec!["/* sample program */", "// entry point"]);
}

#[test]
fn test_malformed_var_decl_is_fatal() {
    let err = parse_source("int x = ;").unwrap_err();

    assert_eq!(err.production, "var_decl");
    let rendered = err.to_string();
    assert!(rendered.starts_with("Parse error at line 1, column 9: var_decl:"));
    assert!(rendered.contains("Context tokens (pos=3):"));
}

#[test]
fn test_failed_parse_writes_no_output() {
    let output = temp_path("never-written.c");
    let _ = fs::remove_file(&output);

    let result = Parser::from_source("int x = ;")
        .parse_program()
        .map_err(Error::from)
        .and_then(|program| write_formatted(&program, &output));

    assert!(matches!(result, Err(Error::Syntax(_))));
    assert!(!output.exists());
}

#[test]
fn test_unterminated_string_is_a_single_error_token() {
    let tokens = tokenize("\"abc");

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Error);
    assert_eq!(tokens[0].text, "\"abc");
}

#[test]
fn test_unterminated_string_inside_function_is_syntax_error() {
    let err = parse_source("int main() { print(\"abc); }").unwrap_err();
    assert!(err.is_lexical());
}

#[test]
fn test_write_formatted_and_dump_round_trip_through_files() {
    let program = parse_source(SAMPLE).unwrap();
    let formatted_path = temp_path("formatted.c");
    let dump_path = temp_path("ast.txt");

    write_formatted(&program, &formatted_path).unwrap();
    write_dump(&program, &dump_path).unwrap();

    assert_eq!(fs::read_to_string(&formatted_path).unwrap(), render(&program));
    assert_eq!(fs::read_to_string(&dump_path).unwrap(), render_dump(&program));

    let _ = fs::remove_file(formatted_path);
    let _ = fs::remove_file(dump_path);
}

#[test]
fn test_dump_to_missing_directory_reports_write_error() {
    let program = parse_source("int x;").unwrap();
    let path = temp_path("no-such-dir").join("ast.txt");

    let err = write_dump(&program, &path).unwrap_err();
    assert!(matches!(err, Error::Write { .. }));
    assert!(err.to_string().starts_with("Cannot open output file"));
}

#[test]
fn test_dump_labels_roles() {
    let program = parse_source(SAMPLE).unwrap();
    let text = render_dump(&program);

    for label in [
        "Function declaration:",
        "Function definition:",
        "External variable declaration:",
        "parameter list:",
        "then-clause:",
        "else-clause:",
        "Loop statement (FOR):",
        "Loop statement (WHILE):",
        "BREAK statement",
        "CONTINUE statement",
        "Unary expression (-):",
        "Multiplicative expression (%):",
        "STRING_CONST: \"done\\n\"",
        "CHAR_CONST: 'x'",
        "LONG_CONST: 0x7FL",
        "FLOAT_CONST: 0.5",
    ] {
        assert!(text.contains(label), "missing {label:?} in dump:\n{text}");
    }
}
