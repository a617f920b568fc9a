//! Wire-level types for the pipeline service: the input list sent to the
//! start endpoint and the run snapshots the status endpoint reports.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{PipelineError, Result};

/// One named input of a pipeline run. The service accepts only
/// string-typed values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineInput {
    pub input_name: String,
    pub value: String,
}

impl PipelineInput {
    pub fn new(input_name: &str, value: impl Into<String>) -> Self {
        Self {
            input_name: input_name.to_string(),
            value: value.into(),
        }
    }
}

/// Normalized run state. The service reports several overlapping
/// vocabularies ("DONE" vs "COMPLETED", "FAILED" vs "ERROR" vs
/// "TERMINATED"); everything maps into this set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RunState {
    Pending,
    Running,
    Done,
    Failed,
    Cancelled,
}

impl RunState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Done => "done",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Map a raw service state string, case-insensitively. Unknown words
    /// are treated as still running so a vocabulary addition upstream
    /// degrades to a poll timeout instead of a wrong hard failure.
    pub fn from_service(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" | "QUEUED" | "STARTED" => Self::Pending,
            "RUNNING" => Self::Running,
            "DONE" | "COMPLETED" => Self::Done,
            "FAILED" | "ERROR" | "TERMINATED" => Self::Failed,
            "CANCELLED" | "CANCELED" => Self::Cancelled,
            other => {
                warn!(state = other, "unknown pipeline state, treating as running");
                Self::Running
            }
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed | Self::Cancelled)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// One external job execution, as last observed. Snapshots are produced by
/// the start call (empty logs, null outputs) and by each status poll; they
/// are never mutated locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineRun {
    pub run_id: String,
    pub state: RunState,
    pub logs: Vec<String>,
    pub outputs: Value,
}

impl PipelineRun {
    /// The snapshot a freshly started run begins with.
    pub fn new_pending(run_id: String) -> Self {
        Self {
            run_id,
            state: RunState::Pending,
            logs: Vec::new(),
            outputs: Value::Null,
        }
    }

    /// Parse a status-endpoint response body. `state` is required; `log`
    /// and `outputs` are optional and default to empty.
    pub fn from_status_value(run_id: &str, body: &Value) -> Result<Self> {
        let state = body
            .get("state")
            .and_then(Value::as_str)
            .ok_or_else(|| PipelineError::Protocol("status response missing state".to_string()))?;

        let logs = body
            .get("log")
            .and_then(Value::as_array)
            .map(|lines| {
                lines
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            run_id: run_id.to_string(),
            state: RunState::from_service(state),
            logs,
            outputs: body.get("outputs").cloned().unwrap_or(Value::Null),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_state_mapping_failure_family() {
        assert_eq!(RunState::from_service("FAILED"), RunState::Failed);
        assert_eq!(RunState::from_service("ERROR"), RunState::Failed);
        assert_eq!(RunState::from_service("TERMINATED"), RunState::Failed);
        assert_eq!(RunState::from_service("error"), RunState::Failed);
        assert!(RunState::from_service("Terminated").is_terminal());
    }

    #[test]
    fn test_state_mapping_success_and_pending() {
        assert_eq!(RunState::from_service("DONE"), RunState::Done);
        assert_eq!(RunState::from_service("COMPLETED"), RunState::Done);
        assert!(RunState::from_service("done").is_success());
        assert_eq!(RunState::from_service("STARTED"), RunState::Pending);
        assert_eq!(RunState::from_service("QUEUED"), RunState::Pending);
        assert_eq!(RunState::from_service("CANCELED"), RunState::Cancelled);
    }

    #[test]
    fn test_unknown_state_is_not_terminal() {
        let state = RunState::from_service("REBALANCING");
        assert_eq!(state, RunState::Running);
        assert!(!state.is_terminal());
    }

    #[test]
    fn test_parse_status_body() {
        let body = json!({
            "state": "RUNNING",
            "log": ["fetching sights", "__system_checkpoint__", 42],
            "outputs": {"sights": ["Louvre"]}
        });
        let run = PipelineRun::from_status_value("r-1", &body).unwrap();
        assert_eq!(run.run_id, "r-1");
        assert_eq!(run.state, RunState::Running);
        // Non-string log entries are skipped, marker lines are kept raw here.
        assert_eq!(run.logs.len(), 2);
        assert_eq!(run.outputs["sights"][0], "Louvre");
    }

    #[test]
    fn test_parse_status_body_defaults() {
        let run = PipelineRun::from_status_value("r-2", &json!({"state": "DONE"})).unwrap();
        assert!(run.logs.is_empty());
        assert!(run.outputs.is_null());
    }

    #[test]
    fn test_parse_status_body_missing_state() {
        let err = PipelineRun::from_status_value("r-3", &json!({"log": []})).unwrap_err();
        assert!(matches!(err, PipelineError::Protocol(_)));
    }
}
