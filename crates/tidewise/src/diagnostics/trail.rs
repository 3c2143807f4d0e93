//! Ordered diagnostic trail with single-transition steps.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use super::step::{DiagnosticStep, StepId, StepStatus};

/// Message placed on steps that could not run because an earlier one failed.
pub const PREREQUISITE_FAILED: &str = "Prerequisite step failed.";

/// The full sequence of steps for one run.
///
/// Every step starts `Pending` and moves to a terminal status exactly once.
/// Failing a step also fails every later step that is still pending.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DiagnosticTrail {
    steps: Vec<DiagnosticStep>,
}

/// Rebuilds the full step list, so a partial or empty array still yields
/// all six steps in order. Steps absent from the input stay pending.
impl<'de> Deserialize<'de> for DiagnosticTrail {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut trail = Self::new();
        for step in Vec::<DiagnosticStep>::deserialize(deserializer)? {
            if let Some(slot) = trail.steps.iter_mut().find(|s| s.id == step.id) {
                slot.status = step.status;
                slot.message = step.message;
            }
        }
        Ok(trail)
    }
}

impl DiagnosticTrail {
    /// Create a trail with every step pending.
    pub fn new() -> Self {
        Self {
            steps: StepId::ALL.iter().copied().map(DiagnosticStep::pending).collect(),
        }
    }

    /// Mark a step as passed.
    pub fn succeed(&mut self, id: StepId, message: impl Into<String>) {
        self.transition(id, StepStatus::Success, message.into());
    }

    /// Mark a step as passed with an auto-correction or degradation.
    pub fn warn(&mut self, id: StepId, message: impl Into<String>) {
        self.transition(id, StepStatus::Warning, message.into());
    }

    /// Mark a step as failed and fail every step after it.
    pub fn fail(&mut self, id: StepId, message: impl Into<String>) {
        self.transition(id, StepStatus::Error, message.into());

        for step in self.steps.iter_mut().filter(|s| s.id > id) {
            if step.status == StepStatus::Pending {
                step.status = StepStatus::Error;
                step.message = Some(PREREQUISITE_FAILED.to_string());
            }
        }
    }

    fn transition(&mut self, id: StepId, status: StepStatus, message: String) {
        let Some(step) = self.steps.iter_mut().find(|s| s.id == id) else {
            return;
        };

        if step.status.is_terminal() {
            warn!(step = %id, current = ?step.status, requested = ?status, "ignoring repeated step transition");
            return;
        }

        debug!(step = %id, status = ?status, message = %message, "step completed");
        step.status = status;
        step.message = Some(message);
    }

    /// Get a step by id.
    pub fn get(&self, id: StepId) -> Option<&DiagnosticStep> {
        self.steps.iter().find(|s| s.id == id)
    }

    /// All steps in order.
    pub fn steps(&self) -> &[DiagnosticStep] {
        &self.steps
    }

    /// The terminal `dataReady` step.
    pub fn terminal(&self) -> &DiagnosticStep {
        // Built from StepId::ALL on every path, deserialization included.
        &self.steps[self.steps.len() - 1]
    }

    /// Status of every step, in order.
    pub fn statuses(&self) -> Vec<StepStatus> {
        self.steps.iter().map(|s| s.status).collect()
    }

    /// First step that failed on its own (not as a downstream casualty).
    pub fn first_error(&self) -> Option<&DiagnosticStep> {
        self.steps.iter().find(|s| s.status == StepStatus::Error)
    }

    pub fn has_warnings(&self) -> bool {
        self.steps.iter().any(|s| s.status == StepStatus::Warning)
    }

    /// True when the terminal step succeeded.
    pub fn is_success(&self) -> bool {
        self.terminal().status == StepStatus::Success
    }

    /// True when no step is left pending.
    pub fn is_complete(&self) -> bool {
        self.steps.iter().all(|s| s.status.is_terminal())
    }
}

impl Default for DiagnosticTrail {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trail_is_all_pending() {
        let trail = DiagnosticTrail::new();
        assert_eq!(trail.steps().len(), 6);
        assert!(trail.statuses().iter().all(|s| *s == StepStatus::Pending));
        assert!(!trail.is_complete());
    }

    #[test]
    fn test_fail_cascades_to_later_steps() {
        let mut trail = DiagnosticTrail::new();
        trail.succeed(StepId::FileType, "ok");
        trail.fail(StepId::HeaderParse, "no header");

        assert_eq!(trail.get(StepId::FileType).unwrap().status, StepStatus::Success);
        assert_eq!(trail.first_error().unwrap().id, StepId::HeaderParse);
        for id in [
            StepId::TimeColumnCheck,
            StepId::VariableColumnCheck,
            StepId::DataRowFormat,
            StepId::DataReady,
        ] {
            let step = trail.get(id).unwrap();
            assert_eq!(step.status, StepStatus::Error);
            assert_eq!(step.message.as_deref(), Some(PREREQUISITE_FAILED));
        }
        assert!(trail.is_complete());
        assert!(!trail.is_success());
    }

    #[test]
    fn test_step_transitions_only_once() {
        let mut trail = DiagnosticTrail::new();
        trail.warn(StepId::FileType, "first");
        trail.succeed(StepId::FileType, "second");

        let step = trail.get(StepId::FileType).unwrap();
        assert_eq!(step.status, StepStatus::Warning);
        assert_eq!(step.message.as_deref(), Some("first"));
        assert!(trail.has_warnings());
    }

    #[test]
    fn test_trail_serializes_as_array() {
        let trail = DiagnosticTrail::new();
        let json = serde_json::to_value(&trail).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["id"], "fileType");
        assert_eq!(json[0]["status"], "pending");
    }

    #[test]
    fn test_empty_array_deserializes_to_full_trail() {
        let trail: DiagnosticTrail = serde_json::from_str("[]").unwrap();
        assert_eq!(trail.steps().len(), StepId::ALL.len());
        assert_eq!(trail.terminal().id, StepId::DataReady);
        assert_eq!(trail.terminal().status, StepStatus::Pending);
        assert!(!trail.is_success());
        assert!(!trail.is_complete());
    }

    #[test]
    fn test_trail_deserialize_restores_order() {
        let mut trail = DiagnosticTrail::new();
        trail.warn(StepId::FileType, "renamed");
        trail.fail(StepId::HeaderParse, "no rows");

        let mut json = serde_json::to_value(&trail).unwrap();
        json.as_array_mut().unwrap().reverse();
        let back: DiagnosticTrail = serde_json::from_value(json).unwrap();
        assert_eq!(back, trail);

        let partial: DiagnosticTrail = serde_json::from_str(
            r#"[{"id":"dataReady","label":"x","status":"success","message":"ok"}]"#,
        )
        .unwrap();
        assert_eq!(partial.terminal().status, StepStatus::Success);
        assert_eq!(partial.terminal().label, DiagnosticTrail::new().terminal().label);
        assert_eq!(partial.get(StepId::FileType).unwrap().status, StepStatus::Pending);
    }
}
