//! Execution lifecycle controller.
//!
//! Tracks the executions of one workflow and dispatches start, pause,
//! resume, and stop commands. Status is never pushed: the controller
//! reflects only the result of the command just issued or an explicit
//! [`refresh`](ExecutionController::refresh) — there is deliberately
//! no periodic polling, so state may be stale until refreshed.
//!
//! Every command is gated in order: permission check (denial issues no
//! network call), then a per-(execution, command) pending flag (a
//! duplicate while one is in flight is a silent no-op), then dispatch.
//! Pending flags are cleared on every outcome. A generation counter
//! drops any response that completes after
//! [`reset`](ExecutionController::reset) — command outcomes as well as
//! refreshes produce no notice and touch no state.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Mutex;

use maskadmin_core::execution::ExecutionRecord;
use maskadmin_core::workflow::Id;

use crate::notice::Notice;
use crate::services::{CommandAck, ExecutionService, ExecutionStarted, ServiceError, WorkflowService};
use crate::session::SessionContext;

/// The three per-execution commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Pause,
    Resume,
    Stop,
}

impl CommandKind {
    fn permission(self) -> &'static str {
        match self {
            Self::Pause => "execution.pause",
            Self::Resume => "execution.resume",
            Self::Stop => "execution.stop",
        }
    }

    fn verb(self) -> &'static str {
        match self {
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::Stop => "stop",
        }
    }
}

#[derive(Default)]
struct ControllerState {
    executions: Vec<ExecutionRecord>,
    pending: HashSet<(Id, CommandKind)>,
    executing: bool,
    generation: u64,
    last_started: Option<ExecutionStarted>,
    last_notice: Option<Notice>,
}

/// Lifecycle controller for one workflow's executions.
pub struct ExecutionController {
    execution_svc: Arc<dyn ExecutionService>,
    workflow_svc: Arc<dyn WorkflowService>,
    session: SessionContext,
    workflow_id: Id,
    state: Mutex<ControllerState>,
}

impl ExecutionController {
    pub fn new(
        execution_svc: Arc<dyn ExecutionService>,
        workflow_svc: Arc<dyn WorkflowService>,
        session: SessionContext,
        workflow_id: Id,
    ) -> Self {
        Self {
            execution_svc,
            workflow_svc,
            session,
            workflow_id,
            state: Mutex::new(ControllerState::default()),
        }
    }

    /// Current execution snapshot, newest first.
    pub fn executions(&self) -> Vec<ExecutionRecord> {
        self.lock().executions.clone()
    }

    /// The ack of the most recent successful execute command.
    pub fn last_started(&self) -> Option<ExecutionStarted> {
        self.lock().last_started.clone()
    }

    /// The most recent notice raised by any command.
    pub fn last_notice(&self) -> Option<Notice> {
        self.lock().last_notice.clone()
    }

    /// Whether a command is currently in flight for an execution.
    pub fn is_pending(&self, execution_id: Id, kind: CommandKind) -> bool {
        self.lock().pending.contains(&(execution_id, kind))
    }

    /// Explicitly reload the execution list. Responses that complete
    /// after a [`reset`] are dropped rather than applied.
    pub async fn refresh(&self) -> Result<(), ServiceError> {
        let generation = self.lock().generation;
        match self.workflow_svc.executions(self.workflow_id).await {
            Ok(mut list) => {
                list.sort_by(|a, b| b.id.cmp(&a.id));
                let mut state = self.lock();
                if state.generation == generation {
                    state.executions = list;
                } else {
                    tracing::debug!(
                        workflow_id = self.workflow_id,
                        "Dropping stale execution list response",
                    );
                }
                Ok(())
            }
            Err(e) => {
                let mut state = self.lock();
                if state.generation == generation {
                    state.last_notice = Some(Notice::Error(e.to_string()));
                }
                Err(e)
            }
        }
    }

    /// Discard local state and invalidate in-flight responses. Call on
    /// teardown of the owning view.
    pub fn reset(&self) {
        let mut state = self.lock();
        state.generation += 1;
        state.executions.clear();
        state.pending.clear();
        state.executing = false;
        state.last_started = None;
        state.last_notice = None;
    }

    /// Start a new execution of the workflow.
    ///
    /// Returns `None` when an execute request is already in flight.
    pub async fn execute(&self) -> Option<Notice> {
        if !self.session.can("workflow.execute") {
            return Some(self.notice(Notice::Error(
                "You do not have permission to execute workflows".to_string(),
            )));
        }

        let generation = {
            let mut state = self.lock();
            if state.executing {
                return None;
            }
            state.executing = true;
            state.generation
        };

        tracing::info!(workflow_id = self.workflow_id, "Starting workflow execution");
        let result = self.execution_svc.execute(self.workflow_id).await;

        {
            let mut state = self.lock();
            state.executing = false;
            if state.generation != generation {
                tracing::debug!(
                    workflow_id = self.workflow_id,
                    "Dropping stale execute outcome",
                );
                return None;
            }
        }

        let notice = match result {
            Ok(started) => {
                let message = started
                    .message
                    .clone()
                    .unwrap_or_else(|| "Workflow execution queued successfully".to_string());
                self.lock().last_started = Some(started);
                let _ = self.refresh().await;
                Notice::Success(message)
            }
            Err(e) => self.failure_notice(CommandKindOrExecute::Execute, e),
        };
        Some(self.notice(notice))
    }

    /// Pause a running execution.
    pub async fn pause(&self, execution_id: Id) -> Option<Notice> {
        self.dispatch(execution_id, CommandKind::Pause).await
    }

    /// Resume a paused execution.
    pub async fn resume(&self, execution_id: Id) -> Option<Notice> {
        self.dispatch(execution_id, CommandKind::Resume).await
    }

    /// Stop a queued, running, or paused execution.
    pub async fn stop(&self, execution_id: Id) -> Option<Notice> {
        self.dispatch(execution_id, CommandKind::Stop).await
    }

    // ---- internals ----

    async fn dispatch(&self, execution_id: Id, kind: CommandKind) -> Option<Notice> {
        if !self.session.can(kind.permission()) {
            return Some(self.notice(Notice::Error(format!(
                "You do not have permission to {} executions",
                kind.verb()
            ))));
        }

        let generation = {
            let mut state = self.lock();
            if !state.pending.insert((execution_id, kind)) {
                // Same command already in flight for this execution.
                return None;
            }
            state.generation
        };

        tracing::info!(
            workflow_id = self.workflow_id,
            execution_id,
            command = kind.verb(),
            "Dispatching execution command",
        );

        let result = match kind {
            CommandKind::Pause => self.execution_svc.pause(self.workflow_id, execution_id).await,
            CommandKind::Resume => self.execution_svc.resume(self.workflow_id, execution_id).await,
            CommandKind::Stop => self.execution_svc.stop(self.workflow_id, execution_id).await,
        };

        {
            let mut state = self.lock();
            // Cleared on every outcome, success or not.
            state.pending.remove(&(execution_id, kind));
            if state.generation != generation {
                tracing::debug!(
                    workflow_id = self.workflow_id,
                    execution_id,
                    command = kind.verb(),
                    "Dropping stale command outcome",
                );
                return None;
            }
        }

        let notice = match result {
            Ok(ack) => {
                self.apply_ack(execution_id, &ack);
                let _ = self.refresh().await;
                Notice::Success(success_message(kind, &ack))
            }
            Err(e) => self.failure_notice(CommandKindOrExecute::Command(kind), e),
        };
        Some(self.notice(notice))
    }

    /// Update the local record from the command response; the full
    /// snapshot follows via refresh.
    fn apply_ack(&self, execution_id: Id, ack: &CommandAck) {
        if let Some(status) = ack.status {
            let mut state = self.lock();
            if let Some(record) = state.executions.iter_mut().find(|r| r.id == execution_id) {
                record.status = status;
            }
        }
    }

    fn failure_notice(&self, kind: CommandKindOrExecute, error: ServiceError) -> Notice {
        match error {
            ServiceError::Rejected { category, message } if category.is_informational() => {
                match kind {
                    CommandKindOrExecute::Command(CommandKind::Resume)
                        if category == crate::services::RejectionCategory::Finished =>
                    {
                        Notice::Info(format!("Cannot resume: {message}"))
                    }
                    _ => Notice::Info(message),
                }
            }
            ServiceError::Rejected { message, .. } => Notice::Error(message),
            other => Notice::Error(other.to_string()),
        }
    }

    fn notice(&self, notice: Notice) -> Notice {
        self.lock().last_notice = Some(notice.clone());
        notice
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[derive(Debug, Clone, Copy)]
enum CommandKindOrExecute {
    Execute,
    Command(CommandKind),
}

fn success_message(kind: CommandKind, ack: &CommandAck) -> String {
    match kind {
        CommandKind::Pause => match ack.last_completed_batch {
            Some(batch) => format!("Execution paused successfully at batch {batch}"),
            None => "Execution paused successfully".to_string(),
        },
        CommandKind::Resume => match ack.resume_from_batch {
            Some(batch) => format!("Execution resumed successfully from batch {batch}"),
            None => "Execution resumed successfully".to_string(),
        },
        CommandKind::Stop => "Execution stopped successfully".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
