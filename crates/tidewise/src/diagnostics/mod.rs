//! Per-stage diagnostic trail for ingestion runs.

mod step;
mod trail;

pub use step::{DiagnosticStep, StepId, StepStatus};
pub use trail::{DiagnosticTrail, PREREQUISITE_FAILED};
