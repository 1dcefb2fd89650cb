//! shale CLI - the shale C front end command line.

use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::{Parser, Subcommand};
use shale_input::InputBuffer;
use shale_scanner::{ScanError, Scanner, Token, TokenKind};
use shale_strings::Interner;
use std::process::ExitCode;

/// Main CLI structure.
#[derive(Parser)]
#[command(name = "shale")]
#[command(author, version, about = "shale - a small C compiler front end", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Print the token stream of a C source file.
    Tokens {
        /// The file to tokenize.
        file: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Tokens { file } => tokens(&file),
    }
}

fn tokens(file: &str) -> ExitCode {
    let mut input = match InputBuffer::open(file) {
        Ok(input) => input,
        Err(err) => {
            eprintln!("shale: {file}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let interner = Interner::new();
    let scanner = match Scanner::new(&interner) {
        Ok(scanner) => scanner,
        Err(err) => {
            eprintln!("shale: {err}");
            return ExitCode::FAILURE;
        }
    };

    loop {
        match scanner.next_token(&mut input) {
            Ok(Some(token)) => print_token(&token),
            Ok(None) => return ExitCode::SUCCESS,
            Err(ScanError::UnrecognizedInput { offset }) => {
                report_unrecognized(file, offset);
                return ExitCode::FAILURE;
            }
            Err(err) => {
                eprintln!("shale: {err}");
                return ExitCode::FAILURE;
            }
        }
    }
}

fn print_token(token: &Token<'_>) {
    let kind = match token.kind {
        TokenKind::Keyword => "keyword",
        TokenKind::Identifier => "identifier",
        TokenKind::IntConstant(_) => "int-constant",
        TokenKind::StrConstant => "str-constant",
        TokenKind::Operator => "operator",
    };

    match token.kind {
        TokenKind::IntConstant(int_type) => println!("{kind:<14} {} [{int_type:?}]", token.text),
        _ => println!("{kind:<14} {}", token.text),
    }
}

/// Render the "no matcher accepted" error against the source text.
fn report_unrecognized(file: &str, offset: usize) {
    let Ok(source) = std::fs::read_to_string(file) else {
        eprintln!("shale: {file}: no token matched at offset {offset}");
        return;
    };

    let end = (offset + 1).min(source.len());
    let report = Report::build(ReportKind::Error, file, offset)
        .with_message("no token matched")
        .with_label(
            Label::new((file, offset..end))
                .with_message("no matcher accepted the input here")
                .with_color(Color::Red),
        )
        .finish();

    if report.eprint((file, Source::from(source.as_str()))).is_err() {
        eprintln!("shale: {file}: no token matched at offset {offset}");
    }
}
