//! Ordered catalog of unique series keys.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Field name the time value occupies in chart records.
pub const RESERVED_TIME_KEY: &str = "time";

/// Ordered, unique series keys for one dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesCatalog {
    keys: IndexSet<String>,
}

impl SeriesCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key derived from `base`, suffixing `_(2)`, `_(3)`, ... on collision.
    ///
    /// Returns the key actually stored.
    pub fn insert_unique(&mut self, base: &str) -> String {
        let mut key = base.to_string();
        let mut n = 2;
        while self.keys.contains(&key) {
            key = format!("{}_({})", base, n);
            n += 1;
        }
        self.keys.insert(key.clone());
        key
    }

    /// Position of a key.
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.keys.get_index_of(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys in column order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(|k| k.as_str())
    }

    /// Keys as owned strings.
    pub fn to_vec(&self) -> Vec<String> {
        self.keys.iter().cloned().collect()
    }
}

impl<'a> FromIterator<&'a str> for SeriesCatalog {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut catalog = SeriesCatalog::new();
        for base in iter {
            catalog.insert_unique(base);
        }
        catalog
    }
}

/// Base name for a header cell before de-duplication.
///
/// Empty headers become `Column_<position>` (1-based file column) and the
/// reserved `time` field name is moved aside to `time_value`.
pub fn series_base_name(header: &str, position: usize) -> String {
    let trimmed = header.trim();
    if trimmed.is_empty() {
        format!("Column_{}", position + 1)
    } else if trimmed.eq_ignore_ascii_case(RESERVED_TIME_KEY) {
        format!("{}_value", trimmed)
    } else {
        trimmed.to_string()
    }
}
