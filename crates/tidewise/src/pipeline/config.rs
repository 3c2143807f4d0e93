//! Pipeline configuration and variant presets.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TidewiseError};
use crate::input::DelimiterRule;

/// Size ceiling used by the plot-instance variant (10 MB).
pub const DEFAULT_MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Label used when the time column header is empty.
pub const DEFAULT_TIME_LABEL: &str = "Time";

/// Configuration for an ingestion pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// How lines are split into fields.
    pub delimiter_rule: DelimiterRule,
    /// Normalize time tokens to ISO-8601 timestamps.
    pub normalize_dates: bool,
    /// Maximum accepted content size in bytes (None = unlimited).
    pub max_file_bytes: Option<u64>,
    /// Drop a trailing column named `Rec` (record id).
    pub exclude_trailing_rec: bool,
    /// Time column label used when the header cell is empty.
    pub default_time_label: String,
}

impl PipelineConfig {
    /// The per-plot-instance variant: punctuation delimiters, date
    /// normalization, 10 MB ceiling.
    pub fn plot_instance() -> Self {
        Self {
            delimiter_rule: DelimiterRule::Punctuation,
            normalize_dates: true,
            max_file_bytes: Some(DEFAULT_MAX_FILE_BYTES),
            exclude_trailing_rec: true,
            default_time_label: DEFAULT_TIME_LABEL.to_string(),
        }
    }

    /// The standalone-upload variant: also splits on whitespace runs and keeps
    /// time tokens verbatim.
    pub fn standalone() -> Self {
        Self {
            delimiter_rule: DelimiterRule::PunctuationOrWhitespace,
            normalize_dates: false,
            max_file_bytes: None,
            exclude_trailing_rec: true,
            default_time_label: DEFAULT_TIME_LABEL.to_string(),
        }
    }

    /// Set the size ceiling.
    pub fn with_max_file_bytes(mut self, limit: Option<u64>) -> Self {
        self.max_file_bytes = limit;
        self
    }

    /// Check the configuration for values that would reject every file.
    pub fn validate(&self) -> Result<()> {
        if self.max_file_bytes == Some(0) {
            return Err(TidewiseError::Config(
                "max_file_bytes must be greater than zero".to_string(),
            ));
        }
        if self.default_time_label.trim().is_empty() {
            return Err(TidewiseError::Config(
                "default_time_label must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::plot_instance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let plot = PipelineConfig::plot_instance();
        assert!(plot.normalize_dates);
        assert_eq!(plot.max_file_bytes, Some(10 * 1024 * 1024));
        assert_eq!(PipelineConfig::default(), plot);

        let standalone = PipelineConfig::standalone();
        assert!(!standalone.normalize_dates);
        assert_eq!(standalone.delimiter_rule, DelimiterRule::PunctuationOrWhitespace);
    }

    #[test]
    fn test_validate() {
        assert!(PipelineConfig::default().validate().is_ok());
        assert!(PipelineConfig::default()
            .with_max_file_bytes(Some(0))
            .validate()
            .is_err());

        let mut config = PipelineConfig::default();
        config.default_time_label = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
