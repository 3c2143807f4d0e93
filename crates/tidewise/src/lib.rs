//! Tidewise: CSV time-series ingestion for environmental monitoring charts.
//!
//! Tidewise turns an uploaded delimited text file into a typed time-series
//! dataset, and reports every stage of that work as a diagnostic checklist a
//! user can read.
//!
//! # Core Principles
//!
//! - **Never throw on partial data**: bad dates stay raw, bad cells become null
//! - **Every stage is visible**: each run ends with all diagnostic steps resolved
//! - **Stateless**: the same input always yields the same outcome
//!
//! # Example
//!
//! ```
//! use tidewise::{CsvIngestionPipeline, StepStatus};
//!
//! let pipeline = CsvIngestionPipeline::new();
//! let outcome = pipeline.ingest("Date,TempC\n2024-01-01,12.5\n", "readings.csv");
//!
//! assert!(outcome.is_success());
//! assert_eq!(outcome.trail.terminal().status, StepStatus::Success);
//! println!("Series: {:?}", outcome.dataset().unwrap().series_keys.to_vec());
//! ```

pub mod dataset;
pub mod dates;
pub mod diagnostics;
pub mod error;
pub mod export;
pub mod input;
pub mod pipeline;
pub mod session;

pub use dataset::{DataPoint, SeriesCatalog, TimeSeriesDataset, TimeValue};
pub use diagnostics::{DiagnosticStep, DiagnosticTrail, StepId, StepStatus};
pub use error::{IngestError, Result, TidewiseError};
pub use export::CsvExport;
pub use input::{DelimiterRule, SourceInfo};
pub use pipeline::{
    CsvIngestionPipeline, IngestFailure, IngestOutcome, IngestReport, IngestStats, PipelineConfig,
};
pub use session::{Session, ViewState};
