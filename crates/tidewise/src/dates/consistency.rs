//! Per-file check for mixed date interpretations.

use serde::{Deserialize, Serialize};

use super::formats::{is_ambiguous, DateMatch, DateOrder};

/// Tallies how each row's date was interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateConsistency {
    pub iso: usize,
    pub year_first: usize,
    pub day_first: usize,
    pub month_first: usize,
    /// Tokens that were valid under both day-first and month-first reading.
    pub ambiguous: usize,
    /// First ambiguous token seen, for the diagnostic message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ambiguous_example: Option<String>,
    /// First line read day-first and first line read month-first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_day_first_line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_month_first_line: Option<usize>,
}

impl DateConsistency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a normalized token from the given source line.
    pub fn record(&mut self, token: &str, matched: &DateMatch, line: usize) {
        match matched.order {
            DateOrder::Iso => self.iso += 1,
            DateOrder::YearFirst => self.year_first += 1,
            DateOrder::DayFirst => {
                self.day_first += 1;
                self.first_day_first_line.get_or_insert(line);
            }
            DateOrder::MonthFirst => {
                self.month_first += 1;
                self.first_month_first_line.get_or_insert(line);
            }
        }

        if matches!(matched.order, DateOrder::DayFirst | DateOrder::MonthFirst) && is_ambiguous(token) {
            self.ambiguous += 1;
            if self.ambiguous_example.is_none() {
                self.ambiguous_example = Some(token.trim().to_string());
            }
        }
    }

    /// Rows were read under both day-first and month-first patterns.
    pub fn is_mixed(&self) -> bool {
        self.day_first > 0 && self.month_first > 0
    }

    /// Warning text when the file mixes interpretations.
    pub fn mixed_warning(&self) -> Option<String> {
        if !self.is_mixed() {
            return None;
        }
        let mut msg = format!(
            "Dates were read with mixed interpretations: {} day-first, {} month-first",
            self.day_first, self.month_first
        );
        if let (Some(d), Some(m)) = (self.first_day_first_line, self.first_month_first_line) {
            msg.push_str(&format!(" (first day-first on line {}, first month-first on line {})", d, m));
        }
        msg.push_str(". Check the source for inconsistent date formats.");
        Some(msg)
    }

    /// Note about ambiguous tokens that were resolved day-first.
    pub fn ambiguity_note(&self) -> Option<String> {
        if self.ambiguous == 0 {
            return None;
        }
        Some(format!(
            "{} date(s) such as '{}' could be day-first or month-first; day-first was used.",
            self.ambiguous,
            self.ambiguous_example.as_deref().unwrap_or_default()
        ))
    }
}
