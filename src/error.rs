//! Error types for the extraction stage
//!
//! The scoring core is total and never fails; everything that can go wrong
//! happens while pulling rows out of an uploaded sheet, and is reported as a
//! single descriptive failure for the whole batch.

use thiserror::Error;

/// Errors raised while extracting questionnaire rows
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A data row carries fewer columns than the questionnaire layout requires
    #[error(
        "expected at least {min} columns but found {found}; check the export format",
        min = crate::extractor::MIN_COLUMNS
    )]
    ColumnCount { found: usize },

    /// The sheet contained a header row but nothing below it
    #[error("no data rows found in the input")]
    NoDataRows,

    /// The underlying CSV could not be read
    #[error("failed to read CSV input: {0}")]
    Csv(#[from] csv::Error),
}
