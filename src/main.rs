// cfmt: parser, AST dumper and canonical formatter for a small C-like language

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser as ClapParser, ValueEnum};
use crossterm::style::Stylize;
use tracing::debug;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

use cfmt::dump::{self, DEFAULT_DUMP_PATH};
use cfmt::formatter;
use cfmt::parser::lexer::{Lexer, Token, TokenKind};
use cfmt::parser::Parser;
use cfmt::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Print the token stream
    Lex,
    /// Parse and write the AST dump
    Parse,
    /// Parse and write canonically formatted source
    Format,
}

#[derive(Debug, ClapParser)]
#[command(author, version, about)]
struct Args {
    /// Source file to process
    #[arg(short, long)]
    file: PathBuf,

    /// What to do with the source
    #[arg(short, long, value_enum, default_value_t = Mode::Format)]
    mode: Mode,

    /// Output path (format: `formatted_<input>` next to the input, parse: `ast.txt`)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Sort the token listing by kind
    #[arg(long)]
    sort: bool,

    /// List tokens with kind names instead of numeric kind codes
    #[arg(short = 'P', long)]
    pretty: bool,

    /// Trace every grammar production on stderr; parse mode also lists the tokens
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

/// Diagnostics go to stderr; `--verbose` overrides `RUST_LOG`
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(span_events(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Production entry and exit are only logged when tracing everything
fn span_events(verbose: bool) -> FmtSpan {
    if verbose {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let source = fs::read_to_string(&args.file).map_err(|source| Error::Read {
        path: args.file.clone(),
        source,
    })?;
    debug!(path = %args.file.display(), bytes = source.len(), "read input");

    match args.mode {
        Mode::Lex => {
            let tokens = Lexer::new(&source).tokenize();
            print_tokens(&tokens, args.sort, args.pretty);
            check_lexical(&tokens)
        }
        Mode::Parse => {
            let mut parser = Parser::from_source(&source);
            if args.verbose {
                print_tokens(parser.tokens(), args.sort, args.pretty);
            }
            let program = parser.parse_program()?;
            let output = args
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DUMP_PATH));
            dump::write_dump(&program, &output)?;
            println!("AST output to file: {}", output.display());
            Ok(())
        }
        Mode::Format => {
            let program = Parser::from_source(&source).parse_program()?;
            let output = args
                .output
                .clone()
                .unwrap_or_else(|| default_format_output(&args.file));
            formatter::write_formatted(&program, &output)?;
            println!("Formatted output to file: {}", output.display());
            Ok(())
        }
    }
}

/// `dir/name.c` → `dir/formatted_name.c`
fn default_format_output(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("formatted_{name}"))
}

/// Print every token on stdout, in source order unless `sort` is set
fn print_tokens(tokens: &[Token], sort: bool, pretty: bool) {
    for line in token_listing(tokens, sort, pretty) {
        println!("{line}");
    }
}

fn token_listing(tokens: &[Token], sort: bool, pretty: bool) -> Vec<String> {
    let mut tokens: Vec<&Token> = tokens.iter().collect();
    if sort {
        tokens.sort_by_key(|token| token.kind);
    }
    tokens
        .into_iter()
        .map(|token| {
            if pretty {
                token.to_string()
            } else {
                token.to_compact_string()
            }
        })
        .collect()
}

/// A listing that ended in an error marker fails the run
fn check_lexical(tokens: &[Token]) -> Result<(), Error> {
    match tokens.iter().find(|token| token.kind == TokenKind::Error) {
        Some(token) => Err(Error::Lexical {
            text: token.text.clone(),
            line: token.location.line,
            column: token.location.column,
        }),
        None => Ok(()),
    }
}

fn report(err: &Error) {
    let header = match err {
        Error::Syntax(_) => "Syntax error:",
        Error::Lexical { .. } => "Lexical error:",
        Error::Read { .. } | Error::Write { .. } => "I/O error:",
    };
    eprintln!("{} {}", header.red().bold(), err);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_verbose_logs_production_entry_and_exit() {
        assert_eq!(span_events(true), FmtSpan::NEW | FmtSpan::CLOSE);
        assert_eq!(span_events(false), FmtSpan::NONE);
    }

    #[test]
    fn test_token_listing_forms() {
        let tokens = Lexer::new("x = 1;").tokenize();

        let pretty = token_listing(&tokens, false, true);
        assert_eq!(pretty[0], "Token(IDENT, \"x\", 1, 1)");
        assert_eq!(pretty[1], "Token(ASSIGN, \"=\", 1, 3)");

        let compact = token_listing(&tokens, false, false);
        assert_eq!(compact[0], "Token(2, \"x\", 1, 1)");
    }

    #[test]
    fn test_sorted_listing_orders_by_kind() {
        let tokens = Lexer::new("x = 1;").tokenize();
        let sorted = token_listing(&tokens, true, false);

        assert_eq!(sorted.first().map(String::as_str), Some("Token(1, \"\", 1, 7)"));
        assert_eq!(sorted.len(), tokens.len());
    }

    #[test]
    fn test_error_marker_fails_the_listing() {
        let tokens = Lexer::new("x = \"open").tokenize();
        assert!(matches!(check_lexical(&tokens), Err(Error::Lexical { .. })));
        assert!(check_lexical(&Lexer::new("x;").tokenize()).is_ok());
    }

    #[test]
    fn test_default_format_output_sits_next_to_input() {
        assert_eq!(
            default_format_output(Path::new("dir/name.c")),
            PathBuf::from("dir/formatted_name.c")
        );
    }
}
