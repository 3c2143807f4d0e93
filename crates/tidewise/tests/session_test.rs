//! Integration tests for session persistence and CSV export.

use std::fs;

use tempfile::TempDir;

use tidewise::session::SESSION_VERSION;
use tidewise::{
    CsvExport, CsvIngestionPipeline, PipelineConfig, Session, TidewiseError, TimeSeriesDataset,
    TimeValue,
};

fn ingest(text: &str) -> TimeSeriesDataset {
    CsvIngestionPipeline::new()
        .ingest(text, "gauge.csv")
        .dataset()
        .cloned()
        .expect("ingestion should succeed")
}

#[test]
fn test_session_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sessions").join("gauge.session.json");

    let dataset = ingest("Date,Level,Flow\n2024-01-01,1.5,\nsoon,1.7,3\n");
    let mut session = Session::new("gauge.csv", dataset).with_title("Gauge 7");
    session.select_series(["Flow"]).unwrap();
    session.save(&path).unwrap();

    let loaded = Session::load(&path).unwrap();
    assert_eq!(loaded, session);
    assert_eq!(loaded.view.selected_series, vec!["Flow"]);
    assert_eq!(loaded.dataset.rows[0].values, vec![Some(1.5), None]);
    assert!(loaded.dataset.rows[0].time.is_normalized());
    assert!(!loaded.dataset.rows[1].time.is_normalized());
}

#[test]
fn test_session_file_is_pretty_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gauge.session.json");
    Session::new("gauge.csv", ingest("Time,A\n2024-01-01,1\n"))
        .save(&path)
        .unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\n  \"version\": 1"));
    assert!(text.contains("\"seriesKeys\""));
}

#[test]
fn test_load_rejects_unknown_version() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("old.session.json");

    let session = Session::new("gauge.csv", ingest("Time,A\n2024-01-01,1\n"));
    let mut json = serde_json::to_value(&session).unwrap();
    json["version"] = serde_json::json!(SESSION_VERSION + 1);
    fs::write(&path, serde_json::to_string(&json).unwrap()).unwrap();

    assert!(matches!(Session::load(&path), Err(TidewiseError::Session(_))));
}

#[test]
fn test_load_rejects_unknown_selected_series() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.session.json");

    let session = Session::new("gauge.csv", ingest("Time,A\n2024-01-01,1\n"));
    let mut json = serde_json::to_value(&session).unwrap();
    json["view"]["selectedSeries"] = serde_json::json!(["A", "B"]);
    fs::write(&path, serde_json::to_string(&json).unwrap()).unwrap();

    let err = Session::load(&path).unwrap_err();
    assert!(err.to_string().contains("'B'"));
}

#[test]
fn test_load_errors() {
    let dir = TempDir::new().unwrap();

    let missing = Session::load(dir.path().join("missing.json"));
    assert!(matches!(missing, Err(TidewiseError::Io { .. })));

    let garbage = dir.path().join("garbage.json");
    fs::write(&garbage, "{ not json").unwrap();
    assert!(matches!(Session::load(&garbage), Err(TidewiseError::Json(_))));
}

#[test]
fn test_export_matches_ingested_rows() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("normalized.csv");

    let dataset = ingest("Date;Level;Rec\n01/02/2024;1.5;1\n02/02/2024;abc;2\n");
    CsvExport::new().export(&dataset, &out).unwrap();

    let text = fs::read_to_string(&out).unwrap();
    assert_eq!(
        text,
        "time,Level\n2024-02-01T00:00:00.000Z,1.5\n2024-02-02T00:00:00.000Z,\n"
    );

    // The export is itself valid input.
    let again = CsvIngestionPipeline::new().ingest(&text, "normalized.csv");
    assert_eq!(again.dataset().unwrap().series_keys.to_vec(), vec!["Level"]);
    assert_eq!(again.dataset().unwrap().rows[0].time, dataset.rows[0].time);

    // Keys holding a separator survive a non-comma export.
    let flows = ingest("Time,\"Flow, m3/s\",Stage\n2024-01-01,\"1,234.5\",2\n");
    for delimiter in [b';', b'\t'] {
        let text = CsvExport::new().with_delimiter(delimiter).render(&flows).unwrap();
        let again = CsvIngestionPipeline::new().ingest(&text, "normalized.csv");
        let reingested = again.dataset().expect("export should re-ingest");
        assert_eq!(reingested.series_keys.to_vec(), vec!["Flow, m3/s", "Stage"]);
        assert_eq!(reingested.rows, flows.rows);
    }
}

#[test]
fn test_standalone_session_keeps_raw_timestamp_lookalikes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("standalone.session.json");

    let dataset = CsvIngestionPipeline::with_config(PipelineConfig::standalone())
        .ingest("Time,A\n2024-01-01T00:00:00.000Z,1\n", "gauge.csv")
        .dataset()
        .cloned()
        .expect("ingestion should succeed");
    let raw = TimeValue::Raw("2024-01-01T00:00:00.000Z".to_string());
    assert_eq!(dataset.rows[0].time, raw);

    Session::new("gauge.csv", dataset.clone()).save(&path).unwrap();
    let loaded = Session::load(&path).unwrap();
    assert_eq!(loaded.dataset, dataset);
    assert_eq!(loaded.dataset.rows[0].time, raw);
}
