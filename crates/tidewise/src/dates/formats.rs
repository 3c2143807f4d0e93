//! Ordered date patterns and the normalizer.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Which field order produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    /// ISO-8601 / RFC 3339.
    Iso,
    /// YYYY/MM/DD.
    YearFirst,
    DayFirst,
    MonthFirst,
}

impl DateOrder {
    pub fn label(&self) -> &'static str {
        match self {
            DateOrder::Iso => "ISO 8601",
            DateOrder::YearFirst => "year-first",
            DateOrder::DayFirst => "day-first",
            DateOrder::MonthFirst => "month-first",
        }
    }
}

/// A successfully normalized token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateMatch {
    /// UTC timestamp (local times are taken as UTC).
    pub value: NaiveDateTime,
    pub order: DateOrder,
}

/// An explicit pattern tried after ISO parsing fails.
#[derive(Debug, Clone, Copy)]
pub struct DateFormat {
    pub pattern: &'static str,
    pub order: DateOrder,
    /// Pattern has a time-of-day component.
    pub has_time: bool,
    /// Pattern uses `%Y`; matches with years below 1000 are rejected so the
    /// 2-digit `%y` variants get a chance.
    pub four_digit_year: bool,
}

const fn fmt(pattern: &'static str, order: DateOrder, has_time: bool, four_digit_year: bool) -> DateFormat {
    DateFormat {
        pattern,
        order,
        has_time,
        four_digit_year,
    }
}

/// Explicit patterns in priority order.
pub const EXPLICIT_FORMATS: &[DateFormat] = &[
    fmt("%Y/%m/%d %H:%M:%S", DateOrder::YearFirst, true, true),
    fmt("%Y/%m/%d %H:%M", DateOrder::YearFirst, true, true),
    fmt("%Y/%m/%d", DateOrder::YearFirst, false, true),
    // Day-first
    fmt("%d/%m/%Y %H:%M:%S", DateOrder::DayFirst, true, true),
    fmt("%d/%m/%Y %H:%M", DateOrder::DayFirst, true, true),
    fmt("%d/%m/%Y %I:%M:%S %p", DateOrder::DayFirst, true, true),
    fmt("%d/%m/%Y %I:%M %p", DateOrder::DayFirst, true, true),
    fmt("%d/%m/%Y", DateOrder::DayFirst, false, true),
    fmt("%d/%m/%y %H:%M:%S", DateOrder::DayFirst, true, false),
    fmt("%d/%m/%y %H:%M", DateOrder::DayFirst, true, false),
    fmt("%d/%m/%y", DateOrder::DayFirst, false, false),
    fmt("%d-%m-%Y %H:%M:%S", DateOrder::DayFirst, true, true),
    fmt("%d-%m-%Y %H:%M", DateOrder::DayFirst, true, true),
    fmt("%d-%m-%Y", DateOrder::DayFirst, false, true),
    fmt("%d.%m.%Y %H:%M:%S", DateOrder::DayFirst, true, true),
    fmt("%d.%m.%Y %H:%M", DateOrder::DayFirst, true, true),
    fmt("%d.%m.%Y", DateOrder::DayFirst, false, true),
    fmt("%d.%m.%y", DateOrder::DayFirst, false, false),
    // Month-first
    fmt("%m/%d/%Y %H:%M:%S", DateOrder::MonthFirst, true, true),
    fmt("%m/%d/%Y %H:%M", DateOrder::MonthFirst, true, true),
    fmt("%m/%d/%Y %I:%M:%S %p", DateOrder::MonthFirst, true, true),
    fmt("%m/%d/%Y %I:%M %p", DateOrder::MonthFirst, true, true),
    fmt("%m/%d/%Y", DateOrder::MonthFirst, false, true),
    fmt("%m/%d/%y %H:%M:%S", DateOrder::MonthFirst, true, false),
    fmt("%m/%d/%y %H:%M", DateOrder::MonthFirst, true, false),
    fmt("%m/%d/%y", DateOrder::MonthFirst, false, false),
    fmt("%m-%d-%Y %H:%M:%S", DateOrder::MonthFirst, true, true),
    fmt("%m-%d-%Y %H:%M", DateOrder::MonthFirst, true, true),
    fmt("%m-%d-%Y", DateOrder::MonthFirst, false, true),
];

/// ISO forms with a numeric offset; `%#z` takes `+02:00`, `+0200` and `+02`.
const ISO_ZONED_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M%#z",
];

const ISO_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Two numeric fields ahead of the year: `a/b/yyyy`, `a-b-yy`, `a.b.yyyy`.
static NUMERIC_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})[/.\-](\d{1,2})[/.\-](?:\d{4}|\d{2})(?:[\sT]|$)").expect("valid regex")
});

/// Normalize a date token to a UTC timestamp.
pub fn normalize_date(token: &str) -> Option<DateMatch> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    if let Some(value) = parse_iso(token) {
        return Some(DateMatch {
            value,
            order: DateOrder::Iso,
        });
    }

    EXPLICIT_FORMATS.iter().find_map(|f| {
        parse_with(token, f).map(|value| DateMatch {
            value,
            order: f.order,
        })
    })
}

fn parse_iso(token: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(token) {
        return Some(dt.naive_utc());
    }

    // Zulu suffix on forms RFC 3339 rejects, e.g. `2024-01-01T10:00Z`.
    let zulu = token
        .strip_suffix(|c: char| c == 'Z' || c == 'z')
        .and_then(parse_naive_iso);

    zulu.or_else(|| {
        ISO_ZONED_FORMATS
            .iter()
            .find_map(|pattern| DateTime::parse_from_str(token, pattern).ok())
            .map(|dt| dt.naive_utc())
    })
    .or_else(|| parse_naive_iso(token))
    // `05-06-24` is not year 5.
    .filter(|dt| dt.year() >= 1000)
}

fn parse_naive_iso(token: &str) -> Option<NaiveDateTime> {
    ISO_DATETIME_FORMATS
        .iter()
        .find_map(|pattern| NaiveDateTime::parse_from_str(token, pattern).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(token, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

fn parse_with(token: &str, format: &DateFormat) -> Option<NaiveDateTime> {
    let value = if format.has_time {
        NaiveDateTime::parse_from_str(token, format.pattern).ok()?
    } else {
        NaiveDate::parse_from_str(token, format.pattern)
            .ok()?
            .and_time(NaiveTime::MIN)
    };

    if format.four_digit_year && value.year() < 1000 {
        return None;
    }
    Some(value)
}

/// True for numeric dates whose first two fields could be either day or month.
pub fn is_ambiguous(token: &str) -> bool {
    let Some(caps) = NUMERIC_DATE.captures(token.trim()) else {
        return false;
    };
    let a: u32 = caps[1].parse().unwrap_or(0);
    let b: u32 = caps[2].parse().unwrap_or(0);
    (1..=12).contains(&a) && (1..=12).contains(&b) && a != b
}
