//! Time values and data rows.

use std::fmt;

use chrono::{NaiveDateTime, Timelike};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use super::catalog::SeriesCatalog;

/// Output format for normalized timestamps (UTC, millisecond precision).
pub const ISO_OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Timestamp of a row: normalized to UTC, or the raw token when unparsable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeValue {
    Normalized(NaiveDateTime),
    Raw(String),
}

impl TimeValue {
    pub fn is_normalized(&self) -> bool {
        matches!(self, TimeValue::Normalized(_))
    }

    /// The normalized timestamp, if any.
    pub fn datetime(&self) -> Option<NaiveDateTime> {
        match self {
            TimeValue::Normalized(dt) => Some(*dt),
            TimeValue::Raw(_) => None,
        }
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeValue::Normalized(dt) => write!(f, "{}", dt.format(ISO_OUTPUT_FORMAT)),
            TimeValue::Raw(raw) => f.write_str(raw),
        }
    }
}

/// Wire form: a normalized time is an ISO string, a raw token is `{"raw": ...}`,
/// so a raw token that looks like a timestamp stays raw after a round trip.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum TimeRepr {
    Iso(String),
    Raw { raw: String },
}

/// Like [`ISO_OUTPUT_FORMAT`], but keeps sub-millisecond precision.
const ISO_WIRE_PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

impl Serialize for TimeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let repr = match self {
            TimeValue::Normalized(dt) if dt.nanosecond() % 1_000_000 == 0 => {
                TimeRepr::Iso(dt.format(ISO_OUTPUT_FORMAT).to_string())
            }
            TimeValue::Normalized(dt) => {
                TimeRepr::Iso(dt.format("%Y-%m-%dT%H:%M:%S%.9fZ").to_string())
            }
            TimeValue::Raw(raw) => TimeRepr::Raw { raw: raw.clone() },
        };
        repr.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TimeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match TimeRepr::deserialize(deserializer)? {
            TimeRepr::Iso(s) => NaiveDateTime::parse_from_str(&s, ISO_WIRE_PARSE_FORMAT)
                .map(TimeValue::Normalized)
                .map_err(|e| de::Error::custom(format!("invalid timestamp '{}': {}", s, e))),
            TimeRepr::Raw { raw } => Ok(TimeValue::Raw(raw)),
        }
    }
}

/// One parsed record: a timestamp plus one value per catalog key.
///
/// `values[i]` belongs to the i-th key of the dataset's catalog; `None` is a
/// missing or non-numeric cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub time: TimeValue,
    pub values: Vec<Option<f64>>,
}

impl DataPoint {
    pub fn new(time: TimeValue, values: Vec<Option<f64>>) -> Self {
        Self { time, values }
    }

    /// Value for a series key.
    pub fn value(&self, catalog: &SeriesCatalog, key: &str) -> Option<f64> {
        catalog
            .index_of(key)
            .and_then(|i| self.values.get(i).copied().flatten())
    }

    /// True when every series has a value.
    pub fn is_complete(&self) -> bool {
        self.values.iter().all(|v| v.is_some())
    }

    /// Number of missing values.
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }
}
