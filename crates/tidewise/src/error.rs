//! Error types for the tidewise library.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons an ingestion run stops.
///
/// These never escape the pipeline as `Err` values on their own; they are
/// attached to the failing diagnostic step and returned beside the trail.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IngestError {
    /// File name does not end in `.csv`.
    #[error("Unsupported file type '{file_name}': only .csv files are accepted.")]
    UnsupportedFileType { file_name: String },

    /// File exceeds the configured size ceiling.
    #[error("File is too large ({size_bytes} bytes); the limit is {limit_bytes} bytes.")]
    FileTooLarge { size_bytes: u64, limit_bytes: u64 },

    /// Bytes could not be decoded as text.
    #[error("File could not be read as UTF-8 text: {reason}")]
    UnreadableFile { reason: String },

    /// Content is empty or whitespace only.
    #[error("File is empty.")]
    EmptyFile,

    /// Fewer than a header line plus one data line.
    #[error("File must contain a header row and at least one data row (found {lines} non-blank line(s)).")]
    MissingHeaderOrData { lines: usize },

    /// Every header cell is empty, so no column can serve as the time axis.
    #[error("Header row has no usable time column ({columns} empty header cell(s)).")]
    MissingTimeColumn { columns: usize },

    /// Nothing left to plot after the exclusion rules.
    #[error("No variable columns found after the time column{}.", rec_note(.excluded_rec))]
    NoVariableColumns { excluded_rec: bool },

    /// Every data row was blank.
    #[error("No processable data rows found ({skipped} blank row(s) skipped).")]
    NoProcessableRows { skipped: usize },
}

fn rec_note(excluded_rec: &bool) -> &'static str {
    if *excluded_rec {
        " (trailing 'Rec' column excluded)"
    } else {
        ""
    }
}

/// Main error type for host-side tidewise operations.
#[derive(Debug, Error)]
pub enum TidewiseError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV writer.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Session file is structurally valid JSON but unusable.
    #[error("Session error: {0}")]
    Session(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for tidewise operations.
pub type Result<T> = std::result::Result<T, TidewiseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_variable_columns_message() {
        let plain = IngestError::NoVariableColumns { excluded_rec: false };
        let rec = IngestError::NoVariableColumns { excluded_rec: true };

        assert_eq!(plain.to_string(), "No variable columns found after the time column.");
        assert!(rec.to_string().contains("'Rec' column excluded"));
    }

    #[test]
    fn test_file_too_large_message() {
        let err = IngestError::FileTooLarge {
            size_bytes: 20,
            limit_bytes: 10,
        };
        assert!(err.to_string().contains("20 bytes"));
        assert!(err.to_string().contains("10 bytes"));
    }
}
