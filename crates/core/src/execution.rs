//! Execution records and their lifecycle statuses.
//!
//! An execution is one run of a workflow. Its status is authoritative
//! on the server; the console only reflects the result of a command it
//! just issued or of an explicit reload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflow::Id;

/// Lifecycle status of one execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Queued,
    Running,
    Paused,
    Completed,
    Failed,
    #[serde(alias = "cancelled")]
    Stopped,
}

impl ExecutionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Stopped => "stopped",
        }
    }

    /// Completed, failed, and stopped executions accept no further
    /// commands.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Stopped)
    }

    pub fn can_pause(self) -> bool {
        self == Self::Running
    }

    pub fn can_resume(self) -> bool {
        self == Self::Paused
    }

    pub fn can_stop(self) -> bool {
        matches!(self, Self::Queued | Self::Running | Self::Paused)
    }
}

/// One run of a workflow, as reported by the execution service.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionRecord {
    pub id: Id,
    pub workflow_id: Id,
    pub status: ExecutionStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub records_total: i64,
    #[serde(default)]
    pub records_processed: i64,
    #[serde(default)]
    pub last_completed_batch: Option<i64>,
    #[serde(default)]
    pub execution_logs: Vec<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_running_can_pause() {
        assert!(ExecutionStatus::Running.can_pause());
        for status in [
            ExecutionStatus::Queued,
            ExecutionStatus::Paused,
            ExecutionStatus::Completed,
            ExecutionStatus::Failed,
            ExecutionStatus::Stopped,
        ] {
            assert!(!status.can_pause(), "{status:?}");
        }
    }

    #[test]
    fn only_paused_can_resume() {
        assert!(ExecutionStatus::Paused.can_resume());
        assert!(!ExecutionStatus::Running.can_resume());
    }

    #[test]
    fn terminal_statuses_accept_no_commands() {
        for status in [
            ExecutionStatus::Completed,
            ExecutionStatus::Failed,
            ExecutionStatus::Stopped,
        ] {
            assert!(status.is_terminal());
            assert!(!status.can_pause());
            assert!(!status.can_resume());
            assert!(!status.can_stop());
        }
    }

    #[test]
    fn cancelled_parses_as_stopped() {
        let status: ExecutionStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(status, ExecutionStatus::Stopped);
    }

    #[test]
    fn record_defaults_for_missing_fields() {
        let record: ExecutionRecord = serde_json::from_str(
            r#"{"id": 9, "workflow_id": 2, "status": "running", "started_at": null}"#,
        )
        .unwrap();
        assert_eq!(record.records_total, 0);
        assert_eq!(record.records_processed, 0);
        assert_eq!(record.last_completed_batch, None);
        assert!(record.execution_logs.is_empty());
    }
}
