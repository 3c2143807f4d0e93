//! Property-based tests for the ingestion pipeline.
//!
//! These tests use proptest to generate delimited text and verify that the
//! pipeline keeps its invariants for any input.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p tidewise --test property_tests
//!
//! # More cases
//! PROPTEST_CASES=10000 cargo test -p tidewise --test property_tests
//! ```

use std::collections::HashSet;

use proptest::prelude::*;

use tidewise::{CsvIngestionPipeline, PipelineConfig, StepStatus};

// =============================================================================
// Test Strategies
// =============================================================================

/// Header names, with deliberate repeats and reserved words.
fn header_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Temp".to_string()),
        Just("time".to_string()),
        Just("Rec".to_string()),
        Just(String::new()),
        "[A-Za-z][A-Za-z0-9_]{0,8}",
    ]
}

/// Cell tokens: numbers, blanks and junk.
fn cell() -> impl Strategy<Value = String> {
    prop_oneof![
        (-1000.0f64..1000.0).prop_map(|v| format!("{:.2}", v)),
        Just(String::new()),
        Just("abc".to_string()),
        Just("NaN".to_string()),
    ]
}

/// Time tokens in several layouts, plus blanks and junk.
fn time_token() -> impl Strategy<Value = String> {
    prop_oneof![
        (2000u32..2030, 1u32..13, 1u32..29).prop_map(|(y, m, d)| format!("{}-{:02}-{:02}", y, m, d)),
        (2000u32..2030, 1u32..13, 1u32..29).prop_map(|(y, m, d)| format!("{:02}/{:02}/{}", d, m, y)),
        (2000u32..2030, 1u32..13, 13u32..29).prop_map(|(y, m, d)| format!("{:02}/{:02}/{}", m, d, y)),
        Just(String::new()),
        Just("n/a".to_string()),
    ]
}

/// A CSV document with a header and 1..20 data lines.
fn csv_document() -> impl Strategy<Value = String> {
    prop::collection::vec(header_name(), 1..6).prop_flat_map(|headers| {
        let width = headers.len();
        let row = (time_token(), prop::collection::vec(cell(), width));
        prop::collection::vec(row, 1..20).prop_map(move |rows| {
            let mut text = format!("Time,{}\n", headers.join(","));
            for (time, cells) in rows {
                text.push_str(&time);
                for c in cells {
                    text.push(',');
                    text.push_str(&c);
                }
                text.push('\n');
            }
            text
        })
    })
}

// =============================================================================
// Pipeline Properties
// =============================================================================

proptest! {
    /// Arbitrary text never panics and always resolves every step.
    #[test]
    fn no_pending_steps(text in "[a-zA-Z0-9,;\\t \\n\"/:.-]{0,200}") {
        let outcome = CsvIngestionPipeline::new().ingest(&text, "fuzz.csv");
        prop_assert!(outcome.trail.is_complete());

        let standalone = CsvIngestionPipeline::with_config(PipelineConfig::standalone());
        prop_assert!(standalone.ingest(&text, "fuzz.csv").trail.is_complete());
    }

    /// Either rows and a success terminal step, or no rows and an error terminal step.
    #[test]
    fn success_iff_rows(text in csv_document()) {
        let outcome = CsvIngestionPipeline::new().ingest(&text, "gen.csv");
        match outcome.dataset() {
            Some(dataset) => {
                prop_assert!(dataset.row_count() > 0);
                prop_assert_eq!(outcome.trail.terminal().status, StepStatus::Success);
            }
            None => prop_assert_eq!(outcome.trail.terminal().status, StepStatus::Error),
        }
    }

    /// Same input, same outcome.
    #[test]
    fn idempotent(text in csv_document()) {
        let pipeline = CsvIngestionPipeline::new();
        let first = pipeline.ingest(&text, "gen.csv");
        let second = pipeline.ingest(&text, "gen.csv");
        prop_assert_eq!(first.trail.statuses(), second.trail.statuses());
        prop_assert_eq!(
            serde_json::to_string(&first.dataset()).unwrap(),
            serde_json::to_string(&second.dataset()).unwrap()
        );
    }

    /// Series keys are unique and every row is aligned with them.
    #[test]
    fn unique_keys_and_aligned_rows(text in csv_document()) {
        let outcome = CsvIngestionPipeline::new().ingest(&text, "gen.csv");
        if let Some(dataset) = outcome.dataset() {
            let keys = dataset.series_keys.to_vec();
            let unique: HashSet<&String> = keys.iter().collect();
            prop_assert_eq!(unique.len(), keys.len());
            prop_assert!(!keys.iter().any(|k| k == "time" || k.is_empty()));
            prop_assert!(dataset.check_alignment().is_ok());
        }
    }

    /// Lines made only of delimiters never become rows.
    #[test]
    fn delimiter_only_lines_dropped(text in csv_document(), blanks in 1usize..5) {
        let pipeline = CsvIngestionPipeline::new();
        let base = pipeline.ingest(&text, "gen.csv");

        let width = text.lines().next().map(|h| h.matches(',').count()).unwrap_or(0);
        let mut padded = text.clone();
        for _ in 0..blanks {
            padded.push_str(&",".repeat(width));
            padded.push('\n');
        }
        let with_blanks = pipeline.ingest(&padded, "gen.csv");

        prop_assert_eq!(
            base.dataset().map(|d| d.row_count()),
            with_blanks.dataset().map(|d| d.row_count())
        );
    }
}
