//! The CSV ingestion pipeline.
//!
//! A run walks the stages in [`StepId`] order. Each stage either completes its
//! step (success or warning) or stops the run with an [`IngestFailure`]; the
//! failing step and every later step are then marked as errors. Bad dates and
//! bad cells never stop a run: they become raw times, null values and
//! warnings.

mod cells;
mod config;
mod outcome;

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::dataset::{series_base_name, DataPoint, SeriesCatalog, TimeSeriesDataset, TimeValue};
use crate::dates::{normalize_date, DateConsistency};
use crate::diagnostics::{DiagnosticTrail, StepId};
use crate::error::{IngestError, Result, TidewiseError};
use crate::input::{split_fields, split_lines, SourceInfo};

pub use cells::{parse_cell, Cell};
pub use config::{PipelineConfig, DEFAULT_MAX_FILE_BYTES, DEFAULT_TIME_LABEL};
pub use outcome::{IngestFailure, IngestOutcome, IngestReport, IngestStats, MAX_SAMPLE_LINES};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

type StageResult<T> = std::result::Result<T, IngestFailure>;

/// Header columns after tokenization and key assignment.
struct Columns {
    time_label: String,
    catalog: SeriesCatalog,
    /// File column index for each catalog key.
    positions: Vec<usize>,
    excluded_rec: bool,
    renamed: Vec<(String, String)>,
}

/// Turns delimited text into a validated time-series dataset.
///
/// Holds configuration only; every call works on its own data and the same
/// input always yields the same outcome.
#[derive(Debug, Clone, Default)]
pub struct CsvIngestionPipeline {
    config: PipelineConfig,
}

impl CsvIngestionPipeline {
    /// Create a pipeline with the plot-instance configuration.
    pub fn new() -> Self {
        Self::with_config(PipelineConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the pipeline over decoded text.
    pub fn ingest(&self, text: &str, file_name: &str) -> IngestOutcome {
        self.run(text, file_name, text.len() as u64)
    }

    /// Run the pipeline over raw bytes, decoding them as UTF-8.
    pub fn ingest_bytes(&self, bytes: &[u8], file_name: &str) -> IngestOutcome {
        let size = bytes.len() as u64;
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

        match std::str::from_utf8(bytes) {
            Ok(text) => self.run(text, file_name, size),
            Err(e) => {
                let error = self
                    .check_file(file_name, size)
                    .err()
                    .unwrap_or(IngestError::UnreadableFile {
                        reason: e.to_string(),
                    });
                self.failed(IngestFailure::at(StepId::FileType, error))
            }
        }
    }

    /// Read a file from disk and run the pipeline over it.
    ///
    /// Only I/O failures are returned as `Err`; everything else is reported
    /// through the outcome's trail.
    pub fn ingest_file(&self, path: impl AsRef<Path>) -> Result<IngestOutcome> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let size = fs::metadata(path)
            .map_err(|e| TidewiseError::Io {
                path: path.to_path_buf(),
                source: e,
            })?
            .len();

        // Reject before reading when the name or size is already disqualifying.
        if let Err(error) = self.check_file(&file_name, size) {
            return Ok(self.failed(IngestFailure::at(StepId::FileType, error)));
        }

        let bytes = fs::read(path).map_err(|e| TidewiseError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(self.ingest_bytes(&bytes, &file_name))
    }

    fn run(&self, text: &str, file_name: &str, size: u64) -> IngestOutcome {
        let mut trail = DiagnosticTrail::new();
        let result = self.execute(&mut trail, text, file_name, size);

        match &result {
            Ok(report) => info!(
                file = file_name,
                rows = report.dataset.row_count(),
                series = report.dataset.series_count(),
                warnings = trail.has_warnings(),
                "ingestion succeeded"
            ),
            Err(failure) => {
                info!(file = file_name, step = %failure.step, error = %failure.error, "ingestion failed");
                trail.fail(failure.step, failure.error.to_string());
            }
        }

        IngestOutcome { trail, result }
    }

    fn failed(&self, failure: IngestFailure) -> IngestOutcome {
        let mut trail = DiagnosticTrail::new();
        info!(step = %failure.step, error = %failure.error, "ingestion failed");
        trail.fail(failure.step, failure.error.to_string());
        IngestOutcome {
            trail,
            result: Err(failure),
        }
    }

    fn check_file(&self, file_name: &str, size: u64) -> std::result::Result<(), IngestError> {
        if !file_name.trim().to_ascii_lowercase().ends_with(".csv") {
            return Err(IngestError::UnsupportedFileType {
                file_name: file_name.to_string(),
            });
        }
        if let Some(limit) = self.config.max_file_bytes {
            if size > limit {
                return Err(IngestError::FileTooLarge {
                    size_bytes: size,
                    limit_bytes: limit,
                });
            }
        }
        Ok(())
    }

    fn execute(
        &self,
        trail: &mut DiagnosticTrail,
        text: &str,
        file_name: &str,
        size: u64,
    ) -> StageResult<IngestReport> {
        let rule = self.config.delimiter_rule;

        // File type and size
        self.check_file(file_name, size)
            .map_err(|e| IngestFailure::at(StepId::FileType, e))?;
        trail.succeed(StepId::FileType, format!("'{}' accepted ({} bytes).", file_name, size));

        // Structure and header
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        if text.trim().is_empty() {
            return Err(IngestFailure::at(StepId::HeaderParse, IngestError::EmptyFile));
        }
        let lines = split_lines(text);
        if lines.len() < 2 {
            return Err(IngestFailure::at(
                StepId::HeaderParse,
                IngestError::MissingHeaderOrData { lines: lines.len() },
            ));
        }
        let (_, header_line) = lines[0];
        let header = split_fields(header_line, rule);
        debug!(columns = header.len(), data_lines = lines.len() - 1, "header parsed");
        trail.succeed(
            StepId::HeaderParse,
            format!(
                "Header has {} column(s); {} data line(s) found.",
                header.len(),
                lines.len() - 1
            ),
        );

        let data: Vec<(usize, Vec<String>)> = lines[1..]
            .iter()
            .map(|&(number, line)| (number, split_fields(line, rule)))
            .collect();

        let time_label = self.check_time_column(trail, &header)?;
        let columns = self.extract_columns(trail, &header, time_label)?;

        let (rows, stats) = self.parse_rows(trail, &data, &columns)?;

        let complete = rows.iter().filter(|r| r.is_complete()).count();
        let partial = rows.len() - complete;
        trail.succeed(
            StepId::DataReady,
            format!(
                "{} row(s) ready across {} series: {} complete, {} with missing values.",
                rows.len(),
                columns.catalog.len(),
                complete,
                partial
            ),
        );

        let source = SourceInfo::describe(file_name, size, text, header_line, rule);
        let dataset = TimeSeriesDataset::new(rows, columns.catalog, columns.time_label);

        Ok(IngestReport {
            dataset,
            source,
            stats,
        })
    }

    fn check_time_column(
        &self,
        trail: &mut DiagnosticTrail,
        header: &[String],
    ) -> StageResult<String> {
        if header.iter().all(|h| h.is_empty()) {
            return Err(IngestFailure::at(
                StepId::TimeColumnCheck,
                IngestError::MissingTimeColumn {
                    columns: header.len(),
                },
            ));
        }

        // Empty time cells in data rows are handled row by row.
        let raw_label = header.first().map(|s| s.as_str()).unwrap_or("");
        if raw_label.is_empty() {
            let label = self.config.default_time_label.clone();
            trail.warn(
                StepId::TimeColumnCheck,
                format!("Time column header is empty; using '{}'.", label),
            );
            return Ok(label);
        }

        trail.succeed(
            StepId::TimeColumnCheck,
            format!("Using column '{}' as the time axis.", raw_label),
        );
        Ok(raw_label.to_string())
    }

    fn extract_columns(
        &self,
        trail: &mut DiagnosticTrail,
        header: &[String],
        time_label: String,
    ) -> StageResult<Columns> {
        let mut candidates: Vec<(usize, &str)> = header
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, h)| (i, h.as_str()))
            .collect();

        let excluded_rec = self.config.exclude_trailing_rec
            && candidates
                .last()
                .is_some_and(|(_, h)| h.trim().eq_ignore_ascii_case("rec"));
        if excluded_rec {
            candidates.pop();
        }

        if candidates.is_empty() {
            return Err(IngestFailure::at(
                StepId::VariableColumnCheck,
                IngestError::NoVariableColumns { excluded_rec },
            ));
        }

        let mut catalog = SeriesCatalog::new();
        let mut positions = Vec::with_capacity(candidates.len());
        let mut renamed = Vec::new();

        for (position, header_text) in candidates {
            let key = catalog.insert_unique(&series_base_name(header_text, position));
            if key != header_text {
                renamed.push((header_text.to_string(), key));
            }
            positions.push(position);
        }

        let mut message = format!(
            "{} series: {}.",
            catalog.len(),
            catalog.iter().collect::<Vec<_>>().join(", ")
        );
        if excluded_rec {
            message.push_str(" Trailing 'Rec' column excluded.");
        }

        if renamed.is_empty() {
            trail.succeed(StepId::VariableColumnCheck, message);
        } else {
            let renames: Vec<String> = renamed
                .iter()
                .map(|(from, to)| format!("'{}' -> '{}'", from, to))
                .collect();
            message.push_str(&format!(
                " Renamed duplicate or reserved headers: {}.",
                renames.join(", ")
            ));
            trail.warn(StepId::VariableColumnCheck, message);
        }

        debug!(series = catalog.len(), excluded_rec, renamed = renamed.len(), "series catalog built");

        Ok(Columns {
            time_label,
            catalog,
            positions,
            excluded_rec,
            renamed,
        })
    }

    fn parse_rows(
        &self,
        trail: &mut DiagnosticTrail,
        data: &[(usize, Vec<String>)],
        columns: &Columns,
    ) -> StageResult<(Vec<DataPoint>, IngestStats)> {
        let mut stats = IngestStats {
            data_lines: data.len(),
            excluded_rec_column: columns.excluded_rec,
            renamed_series: columns.renamed.clone(),
            ..IngestStats::default()
        };
        let mut consistency = DateConsistency::new();
        let mut rows = Vec::with_capacity(data.len());

        for (line, fields) in data {
            let raw_time = fields.first().map(|s| s.as_str()).unwrap_or("");
            let cells: Vec<Cell> = columns
                .positions
                .iter()
                .map(|&p| parse_cell(fields.get(p).map(|s| s.as_str()).unwrap_or("")))
                .collect();

            if raw_time.is_empty() && cells.iter().all(|c| c.value().is_none()) {
                stats.rows_skipped += 1;
                continue;
            }

            let time = if raw_time.is_empty() {
                stats.missing_times += 1;
                TimeValue::Raw(String::new())
            } else if self.config.normalize_dates {
                match normalize_date(raw_time) {
                    Some(matched) => {
                        consistency.record(raw_time, &matched, *line);
                        TimeValue::Normalized(matched.value)
                    }
                    None => {
                        stats.note_unparsable_date(*line);
                        TimeValue::Raw(raw_time.to_string())
                    }
                }
            } else {
                TimeValue::Raw(raw_time.to_string())
            };

            for cell in &cells {
                match cell {
                    Cell::Missing => stats.missing_cells += 1,
                    Cell::NonNumeric => stats.note_non_numeric(*line),
                    Cell::Number(_) => {}
                }
            }

            rows.push(DataPoint::new(time, cells.iter().map(Cell::value).collect()));
        }

        stats.rows_parsed = rows.len();
        if self.config.normalize_dates {
            stats.dates = Some(consistency);
        }

        if rows.is_empty() {
            return Err(IngestFailure::at(
                StepId::DataRowFormat,
                IngestError::NoProcessableRows {
                    skipped: stats.rows_skipped,
                },
            ));
        }

        debug!(
            rows = stats.rows_parsed,
            skipped = stats.rows_skipped,
            unparsable_dates = stats.unparsable_dates,
            non_numeric = stats.non_numeric_cells,
            missing = stats.missing_cells,
            "rows parsed"
        );

        let (message, has_warnings) = row_format_message(&stats);
        if has_warnings {
            trail.warn(StepId::DataRowFormat, message);
        } else {
            trail.succeed(StepId::DataRowFormat, message);
        }

        Ok((rows, stats))
    }
}

/// Itemized message for the row-parsing step, and whether it is a warning.
fn row_format_message(stats: &IngestStats) -> (String, bool) {
    let mut parts = vec![format!("Parsed {} row(s)", stats.rows_parsed)];
    if stats.rows_skipped > 0 {
        parts[0].push_str(&format!(", skipped {} empty row(s)", stats.rows_skipped));
    }
    parts[0].push('.');

    let mut warnings = Vec::new();
    if stats.unparsable_dates > 0 {
        warnings.push(format!(
            "{} row(s) had unparsable dates and keep the raw value (lines {}).",
            stats.unparsable_dates,
            join_lines(&stats.unparsable_date_lines)
        ));
    }
    if stats.missing_times > 0 {
        warnings.push(format!("{} row(s) have no time value.", stats.missing_times));
    }
    if stats.non_numeric_cells > 0 {
        warnings.push(format!(
            "{} cell(s) had non-numeric values and were set to null (lines {}).",
            stats.non_numeric_cells,
            join_lines(&stats.non_numeric_lines)
        ));
    }
    if stats.missing_cells > 0 {
        warnings.push(format!(
            "{} cell(s) were empty and set to null.",
            stats.missing_cells
        ));
    }
    if let Some(warning) = stats.dates.as_ref().and_then(|d| d.mixed_warning()) {
        warnings.push(warning);
    }

    let has_warnings = !warnings.is_empty();
    parts.extend(warnings);
    if let Some(note) = stats.dates.as_ref().and_then(|d| d.ambiguity_note()) {
        parts.push(note);
    }

    (parts.join(" "), has_warnings)
}

fn join_lines(lines: &[usize]) -> String {
    lines
        .iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
