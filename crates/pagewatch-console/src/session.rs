use crate::messages::Action;
use crate::{ConsoleError, ConsoleView, RequestGate, TaskLedger};
use pagewatch_api::ConsoleBackend;
use pagewatch_core::EmailTemplate;
use pagewatch_forms::{AiSettingsForm, EmailSettingsForm, TabBar, TaskForm};
use serde::Serialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Everything the operator sees and edits during one session.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConsoleState {
    pub tabs: TabBar,
    pub task: TaskForm,
    pub ai: AiSettingsForm,
    pub email: EmailSettingsForm,
    pub template: EmailTemplate,
    pub ledger: TaskLedger,
}

#[derive(Debug, Default)]
pub(crate) struct Gates {
    pub ai: RequestGate,
    pub email: RequestGate,
    pub template: RequestGate,
}

pub struct ConsoleSession {
    pub(crate) backend: Arc<dyn ConsoleBackend>,
    pub(crate) view: Arc<dyn ConsoleView>,
    pub(crate) state: RwLock<ConsoleState>,
    pub(crate) gates: Gates,
    pub(crate) synchronized: AtomicBool,
}

impl ConsoleSession {
    pub fn new(backend: Arc<dyn ConsoleBackend>, view: Arc<dyn ConsoleView>) -> Self {
        Self {
            backend,
            view,
            state: RwLock::new(ConsoleState::default()),
            gates: Gates::default(),
            synchronized: AtomicBool::new(false),
        }
    }

    pub async fn state(&self) -> ConsoleState {
        self.state.read().await.clone()
    }

    /// Apply an operator edit to the forms.
    pub async fn edit<R>(&self, apply: impl FnOnce(&mut ConsoleState) -> R) -> R {
        let mut guard = self.state.write().await;
        apply(&mut guard)
    }

    /// Tell the operator how an action ended and hand the result back.
    pub(crate) fn report<T>(
        &self,
        action: Action,
        result: Result<T, ConsoleError>,
    ) -> Result<T, ConsoleError> {
        match &result {
            Ok(_) => {
                tracing::info!(?action, "action completed");
                self.view.alert(action.success());
            }
            Err(err) => {
                tracing::warn!(?action, "action failed: {err}");
                self.view.alert(&action.failure(err));
            }
        }
        result
    }
}
