//! The dataset handed to charting collaborators.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::catalog::{SeriesCatalog, RESERVED_TIME_KEY};
use super::point::DataPoint;

/// Rows plus the series catalog they are keyed by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesDataset {
    pub rows: Vec<DataPoint>,
    pub series_keys: SeriesCatalog,
    pub time_header_label: String,
}

impl TimeSeriesDataset {
    pub fn new(rows: Vec<DataPoint>, series_keys: SeriesCatalog, time_header_label: String) -> Self {
        Self {
            rows,
            series_keys,
            time_header_label,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn series_count(&self) -> usize {
        self.series_keys.len()
    }

    /// Rows without any missing value.
    pub fn complete_row_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_complete()).count()
    }

    /// Values of one series in row order.
    pub fn series_values(&self, key: &str) -> Option<Vec<Option<f64>>> {
        let index = self.series_keys.index_of(key)?;
        Some(
            self.rows
                .iter()
                .map(|r| r.values.get(index).copied().flatten())
                .collect(),
        )
    }

    /// Check that every row carries exactly one value per series key.
    pub fn check_alignment(&self) -> std::result::Result<(), String> {
        let expected = self.series_keys.len();
        match self.rows.iter().position(|r| r.values.len() != expected) {
            Some(i) => Err(format!(
                "row {} has {} values but the catalog has {} series",
                i,
                self.rows[i].values.len(),
                expected
            )),
            None => Ok(()),
        }
    }

    /// Rows as open records `{ "time": ..., "<key>": number | null }`.
    pub fn to_records(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                let mut record = Map::new();
                record.insert(RESERVED_TIME_KEY.to_string(), Value::String(row.time.to_string()));
                for (key, value) in self.series_keys.iter().zip(&row.values) {
                    let v = value
                        .and_then(serde_json::Number::from_f64)
                        .map(Value::Number)
                        .unwrap_or(Value::Null);
                    record.insert(key.to_string(), v);
                }
                Value::Object(record)
            })
            .collect()
    }
}
