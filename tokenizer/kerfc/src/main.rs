//! kerf command-line driver.
//!
//! Thin client over `kerf_core`: tokenizes a file (or the built-in sample
//! script) with a demonstration punctuation set and prints the stream,
//! one token per line.

use kerf_core::{PunctTable, ScanOptions, Tokenizer};

/// Demonstration punctuation set. Multibyte patterns come before
/// single-byte ones so prefixes do not shadow them.
const PUNCTUATION: &[(&str, i32)] = &[
    ("<<", 0),
    (">>", 1),
    ("(", 2),
    (")", 3),
    ("[", 4),
    ("]", 5),
    ("+", 6),
    ("-", 7),
    ("*", 8),
    ("/", 9),
];

/// Built-in sample script for `kerf sample`.
const SAMPLE: &str = "( hello\t a>>b world + dingles)\n[and now]";

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    match args[1].as_str() {
        "tokens" => {
            if args.len() < 3 {
                eprintln!("Usage: kerf tokens <file>");
                std::process::exit(1);
            }
            let content = read_file(&args[2]);
            print_tokens(&args[2], &content);
        }
        "sample" => print_tokens("<sample>", SAMPLE),
        other => {
            eprintln!("error: unknown command '{other}'");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

/// Tokenize `source` with the demo set and list the tokens.
fn print_tokens(origin: &str, source: &str) {
    let table = match PunctTable::from_pairs(PUNCTUATION) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let options = ScanOptions::from_bits(
        ScanOptions::ACCEPT_SINGLE_QUOTES | ScanOptions::ACCEPT_DOUBLE_QUOTES,
    );

    let tokenizer = match Tokenizer::new(source, &table, options) {
        Ok(tokenizer) => tokenizer,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    println!("Tokens for '{}' ({} tokens):", origin, tokenizer.tokens().len());
    let mut cursor = tokenizer.cursor();
    loop {
        let token = cursor.get();
        if token.is_eof() {
            break;
        }
        let text = cursor.text(&token).unwrap_or("");
        let span = token.span.to_string();
        println!(
            "  id {:>3}  line {:>3}  {span:>9}  [{text}]",
            token.id(),
            token.line
        );
    }
}

fn print_usage() {
    eprintln!("kerf - punctuation-driven tokenizer");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  kerf tokens <file>   Tokenize a file and print its tokens");
    eprintln!("  kerf sample          Tokenize the built-in sample script");
}

/// Read a file from disk, exiting with a user-friendly error message on failure.
fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("error: {msg}");
            std::process::exit(1);
        }
    }
}

/// Install the tracing subscriber when logging is requested.
///
/// Enable with `RUST_LOG=kerf_core=debug` or `RUST_LOG=kerf_core=trace`.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Only initialize if RUST_LOG is set
    if std::env::var("RUST_LOG").is_ok() {
        let filter = EnvFilter::from_default_env();
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true))
            .with(filter)
            .init();
    }
}
