//! Metadata about the ingested source text.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::tokenizer::{dominant_separator, DelimiterRule};

/// Metadata about the source file of an ingestion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    /// File name as supplied by the caller.
    pub file_name: String,
    /// Size of the content in bytes.
    pub size_bytes: u64,
    /// SHA-256 hash of the content.
    pub hash: String,
    /// Detected format from the header's dominant separator
    /// (csv, csv-semicolon, tsv, whitespace).
    pub format: String,
    /// Delimiter rule used for tokenization.
    pub delimiter_rule: DelimiterRule,
}

impl SourceInfo {
    /// Describe `text` as read from `file_name`.
    pub fn describe(
        file_name: &str,
        size_bytes: u64,
        text: &str,
        header_line: &str,
        delimiter_rule: DelimiterRule,
    ) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        let hash = format!("sha256:{:x}", hasher.finalize());

        let format = match dominant_separator(header_line) {
            Some('\t') => "tsv",
            Some(';') => "csv-semicolon",
            Some(_) => "csv",
            None if delimiter_rule == DelimiterRule::PunctuationOrWhitespace => "whitespace",
            None => "delimited",
        }
        .to_string();

        Self {
            file_name: file_name.to_string(),
            size_bytes,
            hash,
            format,
            delimiter_rule,
        }
    }
}
