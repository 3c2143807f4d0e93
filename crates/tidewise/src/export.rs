//! Write a dataset back out as normalized CSV.
//!
//! The first column is `time` (ISO timestamps, or the raw token when a date
//! could not be read), followed by one column per series key. Missing values
//! are empty cells.
//!
//! Ingestion splits on every separator it knows, whatever the file's own
//! delimiter, so any field holding one of them is quoted.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::dataset::{TimeSeriesDataset, RESERVED_TIME_KEY};
use crate::error::{Result, TidewiseError};
use crate::input::is_field_separator;

/// Quote a field if ingestion would otherwise split it.
fn quote_field(field: &str) -> String {
    if field.contains(|c: char| is_field_separator(c) || matches!(c, '"' | '\n' | '\r')) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Options for CSV export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvExport {
    delimiter: u8,
}

impl Default for CsvExport {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvExport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Write the dataset to any writer.
    pub fn write<W: Write>(&self, dataset: &TimeSeriesDataset, writer: W) -> Result<()> {
        // Fields arrive already quoted by `quote_field`.
        let mut csv = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .quote_style(csv::QuoteStyle::Never)
            .from_writer(writer);

        let mut header = Vec::with_capacity(dataset.series_count() + 1);
        header.push(RESERVED_TIME_KEY.to_string());
        header.extend(dataset.series_keys.iter().map(quote_field));
        csv.write_record(&header)?;

        for row in &dataset.rows {
            let mut record = Vec::with_capacity(header.len());
            record.push(quote_field(&row.time.to_string()));
            record.extend(
                row.values
                    .iter()
                    .map(|v| v.map(|n| n.to_string()).unwrap_or_default()),
            );
            csv.write_record(&record)?;
        }

        csv.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    /// Write the dataset to a file.
    pub fn export(&self, dataset: &TimeSeriesDataset, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| TidewiseError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.write(dataset, file)?;
        debug!(path = %path.display(), rows = dataset.row_count(), "dataset exported");
        Ok(())
    }

    /// Render the dataset as a CSV string.
    pub fn render(&self, dataset: &TimeSeriesDataset) -> Result<String> {
        let mut buf = Vec::new();
        self.write(dataset, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
