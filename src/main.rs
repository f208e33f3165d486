//! libload CLI - Normalize library CSV exports into relational tables
//!
//! # Main Command
//!
//! ```bash
//! libload normalize books.csv borrowers.csv -o output
//! ```
//!
//! # Debug Commands (for development)
//!
//! ```bash
//! libload parse books.csv          # Just parse one source to JSON
//! ```

use clap::{Parser, Subcommand};
use libload::{detect_delimiter, parse_bytes, run, RunOptions};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "libload")]
#[command(about = "Normalize library CSV exports into relational tables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a book catalog and borrower roster into four CSV tables
    Normalize {
        /// Books source, tab-separated
        #[arg(default_value = "books.csv")]
        books: PathBuf,

        /// Borrowers source, comma-separated
        #[arg(default_value = "borrowers.csv")]
        borrowers: PathBuf,

        /// Output directory (created if absent)
        #[arg(short, long, default_value = "output")]
        out_dir: PathBuf,
    },

    /// Parse a delimited source and output its raw records as JSON
    Parse {
        /// Input file
        input: PathBuf,

        /// Delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Normalize {
            books,
            borrowers,
            out_dir,
        } => cmd_normalize(books, borrowers, out_dir),

        Commands::Parse {
            input,
            delimiter,
            output,
        } => cmd_parse(&input, delimiter, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_normalize(
    books: PathBuf,
    borrowers: PathBuf,
    out_dir: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📖 Books source: {}", books.display());
    eprintln!("🪪  Borrowers source: {}", borrowers.display());

    let options = RunOptions {
        books,
        borrowers,
        out_dir,
        ..RunOptions::default()
    };
    let summary = run(&options)?;

    eprintln!(
        "   Books: {} rows ({}), {} skipped",
        summary.books_source.rows, summary.books_source.encoding, summary.books_source.skipped
    );
    eprintln!(
        "   Borrowers: {} rows ({}), {} skipped",
        summary.borrowers_source.rows,
        summary.borrowers_source.encoding,
        summary.borrowers_source.skipped
    );

    eprintln!(
        "\n⚙️  Normalized: {} books, {} authors, {} associations, {} borrowers",
        summary.book_count,
        summary.author_count,
        summary.association_count,
        summary.borrower_count
    );

    for path in &summary.written {
        eprintln!("   💾 {}", path.display());
    }

    eprintln!("\n✨ Done!");
    Ok(())
}

fn cmd_parse(
    input: &Path,
    delimiter: Option<char>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Parsing: {}", input.display());

    let bytes = fs::read(input)?;
    let delimiter = delimiter.unwrap_or_else(|| {
        detect_delimiter(&String::from_utf8_lossy(&bytes))
    });
    let result = parse_bytes(&bytes, delimiter)?;

    eprintln!("   Encoding: {}", result.encoding);
    eprintln!("   Delimiter: '{}'", format_delimiter(result.delimiter));
    eprintln!("   Columns: {}", result.headers.join(", "));
    eprintln!("✅ Parsed {} records", result.records.len());

    let json = serde_json::to_string_pretty(&result.records)?;
    write_output(&json, output)?;

    Ok(())
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
