use crate::messages::{rejection, Action, DELETE_CONFIRMATION, TASK_ALREADY_DELETED};
use crate::{ConsoleError, ConsoleSession};
use pagewatch_api::{ApiError, TaskOutcome};
use pagewatch_core::TaskStatus;
use serde::Serialize;
use std::collections::BTreeMap;

/// Statuses of the tasks this session has created or acted on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskLedger {
    tasks: BTreeMap<String, TaskStatus>,
}

impl TaskLedger {
    pub fn record(&mut self, id: impl Into<String>, status: TaskStatus) {
        self.tasks.insert(id.into(), status);
    }

    pub fn status(&self, id: &str) -> Option<TaskStatus> {
        self.tasks.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, TaskStatus)> {
        self.tasks.iter().map(|(id, status)| (id.as_str(), *status))
    }

    /// Status a task moves to, or `None` when the transition is not allowed.
    /// Unknown tasks are assumed active.
    fn transition(&self, id: &str, action: Action) -> Option<TaskStatus> {
        let current = self.status(id).unwrap_or_default();
        let next = match action {
            Action::PauseTask => current.pause(),
            Action::DeleteTask => current.delete(),
            _ => return None,
        };
        next.ok()
    }
}

impl ConsoleSession {
    /// Validate the task form and submit it. Returns the backend's task id
    /// when it reported one.
    pub async fn submit_task(&self) -> Result<Option<String>, ConsoleError> {
        let request = {
            let state = self.state.read().await;
            state.task.validate()
        };
        let request = match request {
            Ok(request) => request,
            Err(err) => return self.report(Action::CreateTask, Err(err.into())),
        };

        tracing::info!(mode = %request.mode, url = %request.url, "creating task");
        let outcome = self.backend.create_task(&request).await;
        let result = accepted(outcome);

        if let Ok(id) = &result {
            let mut state = self.state.write().await;
            state.task = Default::default();
            if let Some(id) = id {
                state.ledger.record(id.clone(), TaskStatus::Active);
            }
        }
        self.finish(Action::CreateTask, result)
    }

    pub async fn pause_task(&self, id: &str) -> Result<(), ConsoleError> {
        let next = match self.allowed(id, Action::PauseTask).await {
            Ok(next) => next,
            Err(err) => return self.report(Action::PauseTask, Err(err)),
        };

        tracing::info!(task_id = id, "pausing task");
        let result = accepted(self.backend.pause_task(id).await).map(|_| ());
        if result.is_ok() {
            self.state.write().await.ledger.record(id, next);
        }
        self.finish(Action::PauseTask, result)
    }

    /// Delete after operator confirmation. `Ok(false)` when declined.
    pub async fn delete_task(&self, id: &str) -> Result<bool, ConsoleError> {
        let next = match self.allowed(id, Action::DeleteTask).await {
            Ok(next) => next,
            Err(err) => return self.report(Action::DeleteTask, Err(err)),
        };
        if !self.view.confirm(DELETE_CONFIRMATION) {
            tracing::debug!(task_id = id, "delete declined");
            return Ok(false);
        }

        tracing::info!(task_id = id, "deleting task");
        let result = accepted(self.backend.delete_task(id).await).map(|_| true);
        if result.is_ok() {
            self.state.write().await.ledger.record(id, next);
        }
        self.finish(Action::DeleteTask, result)
    }

    async fn allowed(&self, id: &str, action: Action) -> Result<TaskStatus, ConsoleError> {
        let state = self.state.read().await;
        state.ledger.transition(id, action).ok_or_else(|| {
            tracing::warn!(task_id = id, ?action, "task already deleted");
            ConsoleError::Validation(TASK_ALREADY_DELETED.to_string())
        })
    }

    fn finish<T>(&self, action: Action, result: Result<T, ConsoleError>) -> Result<T, ConsoleError> {
        let result = self.report(action, result);
        if result.is_ok() {
            self.view.reload_task_list();
        }
        result
    }
}

fn accepted(outcome: Result<TaskOutcome, ApiError>) -> Result<Option<String>, ConsoleError> {
    match outcome? {
        TaskOutcome::Accepted { id } => Ok(id),
        TaskOutcome::Rejected(message) => Err(rejection(Some(message))),
    }
}
