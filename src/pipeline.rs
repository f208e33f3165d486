//! High-level pipeline API: parse both sources, normalize, write.
//!
//! One call, [`run`], performs the whole transformation:
//!
//! 1. Read the books source (tab-separated)
//! 2. Read the borrowers source (comma-separated)
//! 3. Fold both into a [`Catalog`]
//! 4. Write the four output tables
//!
//! The two reads are independent of each other; both complete before any
//! output is written. Malformed records are skipped and counted; an I/O
//! failure anywhere aborts the run with a [`PipelineError`], leaving any
//! tables already written on disk as-is.
//!
//! # Example
//!
//! ```rust,ignore
//! use libload::{run, RunOptions};
//!
//! let summary = run(&RunOptions::default())?;
//! println!("{} books, {} authors", summary.book_count, summary.author_count);
//! ```

use serde::Serialize;
use std::path::PathBuf;

use crate::error::{PipelineError, PipelineResult};
use crate::models::Catalog;
use crate::normalize::{absorb_books, absorb_borrowers, SourceStats};
use crate::parser::{read_source, ParseResult};
use crate::writer::write_catalog;

/// Delimiter of the books source.
pub const BOOKS_DELIMITER: char = '\t';

/// Delimiter of the borrowers source.
pub const BORROWERS_DELIMITER: char = ',';

/// Options for a normalization run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Books source path (tab-separated).
    pub books: PathBuf,

    /// Borrowers source path (comma-separated).
    pub borrowers: PathBuf,

    /// Output directory, created if absent.
    pub out_dir: PathBuf,

    /// Books delimiter override.
    pub books_delimiter: char,

    /// Borrowers delimiter override.
    pub borrowers_delimiter: char,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            books: PathBuf::from("books.csv"),
            borrowers: PathBuf::from("borrowers.csv"),
            out_dir: PathBuf::from("output"),
            books_delimiter: BOOKS_DELIMITER,
            borrowers_delimiter: BORROWERS_DELIMITER,
        }
    }
}

/// Metadata for one consumed source.
#[derive(Debug, Clone, Serialize)]
pub struct SourceInfo {
    pub encoding: String,
    pub delimiter: char,
    /// Non-blank records seen.
    pub rows: usize,
    /// Records dropped for having too few fields.
    pub skipped: usize,
}

impl SourceInfo {
    fn new(parse: &ParseResult, stats: SourceStats) -> Self {
        Self {
            encoding: parse.encoding.clone(),
            delimiter: parse.delimiter,
            rows: stats.rows,
            skipped: stats.skipped,
        }
    }
}

/// Result of a complete normalization run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub books_source: SourceInfo,
    pub borrowers_source: SourceInfo,
    pub book_count: usize,
    pub author_count: usize,
    pub association_count: usize,
    pub borrower_count: usize,
    /// Paths written, in output order.
    pub written: Vec<PathBuf>,
}

/// Fold two parsed sources into a catalog.
///
/// Exposed separately from [`run`] for callers that already hold parsed
/// records. Book absorption runs first, but the two sources touch disjoint
/// tables, so the order is not observable.
pub fn build_catalog(
    books: &ParseResult,
    borrowers: &ParseResult,
) -> (Catalog, SourceStats, SourceStats) {
    let mut catalog = Catalog::new();
    let book_stats = absorb_books(&mut catalog, &books.records);
    let borrower_stats = absorb_borrowers(&mut catalog, &borrowers.records);
    (catalog, book_stats, borrower_stats)
}

/// Run the full normalization: read, fold, write.
pub fn run(options: &RunOptions) -> PipelineResult<RunSummary> {
    let books_parse = read_source(&options.books, options.books_delimiter)
        .map_err(|e| PipelineError::csv("books source", e))?;
    let borrowers_parse = read_source(&options.borrowers, options.borrowers_delimiter)
        .map_err(|e| PipelineError::csv("borrowers source", e))?;

    let (catalog, book_stats, borrower_stats) = build_catalog(&books_parse, &borrowers_parse);

    let written = write_catalog(&options.out_dir, &catalog)?;

    Ok(RunSummary {
        books_source: SourceInfo::new(&books_parse, book_stats),
        borrowers_source: SourceInfo::new(&borrowers_parse, borrower_stats),
        book_count: catalog.book_count(),
        author_count: catalog.author_count(),
        association_count: catalog.association_count(),
        borrower_count: catalog.borrower_count(),
        written,
    })
}
