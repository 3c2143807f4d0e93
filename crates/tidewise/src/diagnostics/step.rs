//! Diagnostic step types.

use serde::{Deserialize, Serialize};

/// Stage of the ingestion pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StepId {
    /// Extension, size and decoding gate.
    FileType,
    /// Emptiness, line structure and header tokenization.
    HeaderParse,
    /// Time header and presence of time values.
    TimeColumnCheck,
    /// Variable column extraction and series key de-duplication.
    VariableColumnCheck,
    /// Row-wise parsing of dates and numeric cells.
    DataRowFormat,
    /// Terminal step: dataset is ready.
    DataReady,
}

impl StepId {
    /// All steps in execution order.
    pub const ALL: [StepId; 6] = [
        StepId::FileType,
        StepId::HeaderParse,
        StepId::TimeColumnCheck,
        StepId::VariableColumnCheck,
        StepId::DataRowFormat,
        StepId::DataReady,
    ];

    /// Stable identifier shared with the UI.
    pub fn as_str(&self) -> &'static str {
        match self {
            StepId::FileType => "fileType",
            StepId::HeaderParse => "headerParse",
            StepId::TimeColumnCheck => "timeColumnCheck",
            StepId::VariableColumnCheck => "variableColumnCheck",
            StepId::DataRowFormat => "dataRowFormat",
            StepId::DataReady => "dataReady",
        }
    }

    /// Human-readable description of what the step checks.
    pub fn label(&self) -> &'static str {
        match self {
            StepId::FileType => "File is a CSV within the size limit",
            StepId::HeaderParse => "Header row and data rows present",
            StepId::TimeColumnCheck => "Time column identified",
            StepId::VariableColumnCheck => "Variable columns identified",
            StepId::DataRowFormat => "Data rows parsed",
            StepId::DataReady => "Data ready for plotting",
        }
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// Not reached yet.
    Pending,
    Success,
    /// Passed, but something was auto-corrected or degraded.
    Warning,
    Error,
}

impl StepStatus {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            StepStatus::Pending => "Pending",
            StepStatus::Success => "Success",
            StepStatus::Warning => "Warning",
            StepStatus::Error => "Error",
        }
    }

    /// Returns true once the step has left `Pending`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StepStatus::Pending)
    }
}

/// One stage of the pipeline with its user-visible outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticStep {
    pub id: StepId,
    pub label: String,
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DiagnosticStep {
    /// Create a pending step.
    pub fn pending(id: StepId) -> Self {
        Self {
            id,
            label: id.label().to_string(),
            status: StepStatus::Pending,
            message: None,
        }
    }
}
