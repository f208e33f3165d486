//! # libload - library export normalization
//!
//! libload turns two denormalized library exports (a tab-separated book
//! catalog and a comma-separated borrower roster) into four relational CSV
//! tables, deduplicating entities and assigning surrogate author ids.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌─────────────┐     ┌─────────────┐     ┌──────────────────┐
//! │ books.csv    │────▶│   Parser    │────▶│  Normalize  │────▶│ book.csv         │
//! │ borrowers.csv│     │ (auto-enc)  │     │  (Catalog)  │     │ authors.csv      │
//! └──────────────┘     └─────────────┘     └─────────────┘     │ book_authors.csv │
//!                                                              │ borrower.csv     │
//!                                                              └──────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use libload::{run, RunOptions};
//!
//! let summary = run(&RunOptions::default()).unwrap();
//! println!("Normalized {} books", summary.book_count);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Domain entities (Book, Author, BookAuthor, Borrower, Catalog)
//! - [`parser`] - Delimited reading with encoding auto-detection
//! - [`normalize`] - First-seen-wins deduplication and surrogate ids
//! - [`writer`] - Field quoting and the generic table writer
//! - [`pipeline`] - End-to-end orchestration

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Normalization
pub mod normalize;

// Output
pub mod writer;

// Orchestration
pub mod pipeline;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    CsvError, CsvResult, PipelineError, PipelineResult, WriteError, WriteResult,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{Author, Book, BookAuthor, Borrower, Catalog};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{
    decode_content, detect_delimiter, detect_encoding, parse_bytes, parse_source, read_source,
    ParseResult,
};

// =============================================================================
// Re-exports - Normalization
// =============================================================================

pub use normalize::{
    absorb_book_record, absorb_books, absorb_borrower_record, absorb_borrowers, SourceStats,
    BOOK_MIN_FIELDS, BORROWER_MIN_FIELDS,
};

// =============================================================================
// Re-exports - Writer
// =============================================================================

pub use writer::{
    quote_field, write_catalog, write_table, AUTHORS_FILE, BOOK_AUTHORS_FILE, BOOK_FILE,
    BORROWER_FILE,
};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use pipeline::{
    build_catalog, run, RunOptions, RunSummary, SourceInfo, BOOKS_DELIMITER, BORROWERS_DELIMITER,
};
