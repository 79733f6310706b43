//! Error types for the Sieve library.

use thiserror::Error;

use crate::dates::CanonicalDate;

/// Main error type for Sieve operations.
///
/// Only structural problems and invalid caller input are errors. Rows whose
/// date cannot be read, rows outside the requested window and malformed
/// quoting degrade silently and show up in counters instead.
#[derive(Debug, Error)]
pub enum SieveError {
    /// No column of the table could be identified as holding dates.
    #[error("No date column found: none of the {columns} column(s) has a date-like header or a parseable first value")]
    NoDateColumn { columns: usize },

    /// Empty input or nothing to analyze.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Start bound is after the end bound.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange {
        start: CanonicalDate,
        end: CanonicalDate,
    },

    /// A caller-supplied date (e.g. a range bound) could not be read.
    #[error("Invalid date: '{0}'")]
    InvalidDate(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A paragraph source failed to produce paragraphs.
    #[error("Paragraph source error: {0}")]
    Source(String),

    /// Error from the CSV writer.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Sieve operations.
pub type Result<T> = std::result::Result<T, SieveError>;
