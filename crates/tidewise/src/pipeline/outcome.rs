//! Results of an ingestion run.

use serde::{Deserialize, Serialize};

use crate::dataset::TimeSeriesDataset;
use crate::dates::DateConsistency;
use crate::diagnostics::{DiagnosticTrail, StepId};
use crate::error::IngestError;
use crate::input::SourceInfo;

/// Maximum number of sample line numbers kept per warning.
pub const MAX_SAMPLE_LINES: usize = 5;

/// Counters collected while parsing rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestStats {
    /// Non-blank lines after the header.
    pub data_lines: usize,
    /// Rows kept in the dataset.
    pub rows_parsed: usize,
    /// Rows dropped for having no time and no numeric content.
    pub rows_skipped: usize,
    /// Rows whose time token did not parse as a date (kept raw).
    pub unparsable_dates: usize,
    /// Rows kept without any time token.
    pub missing_times: usize,
    /// Cells that were present but not numeric.
    pub non_numeric_cells: usize,
    /// Cells that were empty or absent.
    pub missing_cells: usize,
    /// A trailing `Rec` column was dropped.
    pub excluded_rec_column: bool,
    /// Headers that were renamed, as `(original, key)`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub renamed_series: Vec<(String, String)>,
    /// Sample source lines with unparsable dates.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unparsable_date_lines: Vec<usize>,
    /// Sample source lines with non-numeric cells.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub non_numeric_lines: Vec<usize>,
    /// How dates were interpreted (only when dates are normalized).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dates: Option<DateConsistency>,
}

impl IngestStats {
    pub(crate) fn note_unparsable_date(&mut self, line: usize) {
        self.unparsable_dates += 1;
        push_sample(&mut self.unparsable_date_lines, line);
    }

    pub(crate) fn note_non_numeric(&mut self, line: usize) {
        self.non_numeric_cells += 1;
        push_sample(&mut self.non_numeric_lines, line);
    }
}

fn push_sample(samples: &mut Vec<usize>, line: usize) {
    if samples.len() < MAX_SAMPLE_LINES && samples.last() != Some(&line) {
        samples.push(line);
    }
}

/// A successful run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestReport {
    pub dataset: TimeSeriesDataset,
    pub source: SourceInfo,
    pub stats: IngestStats,
}

/// A failed run: which step stopped it and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestFailure {
    pub step: StepId,
    pub error: IngestError,
}

impl IngestFailure {
    pub fn at(step: StepId, error: IngestError) -> Self {
        Self { step, error }
    }
}

impl std::fmt::Display for IngestFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.step, self.error)
    }
}

/// Everything one run produces: the trail, and either a report or a failure.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestOutcome {
    pub trail: DiagnosticTrail,
    pub result: std::result::Result<IngestReport, IngestFailure>,
}

impl IngestOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn report(&self) -> Option<&IngestReport> {
        self.result.as_ref().ok()
    }

    pub fn dataset(&self) -> Option<&TimeSeriesDataset> {
        self.report().map(|r| &r.dataset)
    }

    pub fn failure(&self) -> Option<&IngestFailure> {
        self.result.as_ref().err()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_are_capped_and_deduplicated() {
        let mut stats = IngestStats::default();
        stats.note_non_numeric(2);
        stats.note_non_numeric(2);
        for line in 3..20 {
            stats.note_non_numeric(line);
        }
        assert_eq!(stats.non_numeric_cells, 19);
        assert_eq!(stats.non_numeric_lines, vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_failure_display() {
        let failure = IngestFailure::at(StepId::HeaderParse, IngestError::EmptyFile);
        assert_eq!(failure.to_string(), "headerParse: File is empty.");
    }
}
