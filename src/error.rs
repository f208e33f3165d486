//! Error types for the libload normalization pipeline.
//!
//! - [`CsvError`] - reading and decoding a delimited source
//! - [`WriteError`] - emitting the normalized output tables
//! - [`PipelineError`] - top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.
//!
//! Malformed records are deliberately NOT errors: a too-short or blank line
//! is skipped and counted, never surfaced through these types. Only I/O and
//! decoding failures abort a run.

use thiserror::Error;

// =============================================================================
// Source Reading Errors
// =============================================================================

/// Errors while reading a delimited source file.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to decode file contents.
    #[error("Failed to decode contents: {0}")]
    DecodeError(String),

    /// Empty file (not even a header line).
    #[error("Source file is empty")]
    EmptyFile,
}

// =============================================================================
// Output Writing Errors
// =============================================================================

/// Errors while writing the normalized output tables.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to create the output directory.
    #[error("Failed to create output directory '{dir}': {source}")]
    CreateDir {
        dir: String,
        source: std::io::Error,
    },

    /// Failed to write an output file.
    #[error("Failed to write '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline orchestration errors.
///
/// This is the main error type returned by [`crate::pipeline::run`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Reading a source failed.
    #[error("CSV error in {source_name}: {source}")]
    Csv {
        source_name: String,
        source: CsvError,
    },

    /// Writing an output table failed.
    #[error("Write error: {0}")]
    Write(#[from] WriteError),
}

impl PipelineError {
    /// Attach the logical source name ("books", "borrowers") to a read error.
    pub fn csv(source_name: impl Into<String>, source: CsvError) -> Self {
        Self::Csv {
            source_name: source_name.into(),
            source,
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for source reading.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for output writing.
pub type WriteResult<T> = Result<T, WriteError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
