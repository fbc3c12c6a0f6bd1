use crate::{ConsoleSession, ConsoleView};
use async_trait::async_trait;
use pagewatch_api::{ApiError, ConsoleBackend, LoadOutcome, SaveOutcome, TaskOutcome};
use pagewatch_core::{AiSettings, EmailSettings, EmailTemplate, TaskRequest};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FetchAi,
    SaveAi(AiSettings),
    FetchEmail,
    SaveEmail(EmailSettings),
    FetchTemplate,
    SaveTemplate(EmailTemplate),
    CreateTask(TaskRequest),
    PauseTask(String),
    DeleteTask(String),
}

#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    Timeout,
}

impl<T: Clone> Reply<T> {
    fn get(&self) -> Result<T, ApiError> {
        match self {
            Reply::Ok(value) => Ok(value.clone()),
            Reply::Timeout => Err(ApiError::Timeout),
        }
    }
}

pub struct FakeBackend {
    calls: Mutex<Vec<Call>>,
    ai: Mutex<Reply<LoadOutcome<AiSettings>>>,
    email: Mutex<Reply<LoadOutcome<EmailSettings>>>,
    template: Mutex<Reply<LoadOutcome<EmailTemplate>>>,
    save: Mutex<Reply<SaveOutcome>>,
    task: Mutex<Reply<TaskOutcome>>,
    ai_hold: Mutex<Option<oneshot::Receiver<()>>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            ai: Mutex::new(Reply::Ok(LoadOutcome::Unavailable(None))),
            email: Mutex::new(Reply::Ok(LoadOutcome::Unavailable(None))),
            template: Mutex::new(Reply::Ok(LoadOutcome::Unavailable(None))),
            save: Mutex::new(Reply::Ok(SaveOutcome::Saved)),
            task: Mutex::new(Reply::Ok(TaskOutcome::Accepted { id: None })),
            ai_hold: Mutex::new(None),
        }
    }
}

impl FakeBackend {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn set_ai(&self, reply: Reply<LoadOutcome<AiSettings>>) {
        *self.ai.lock().expect("ai lock") = reply;
    }

    pub fn set_email(&self, reply: Reply<LoadOutcome<EmailSettings>>) {
        *self.email.lock().expect("email lock") = reply;
    }

    pub fn set_template(&self, reply: Reply<LoadOutcome<EmailTemplate>>) {
        *self.template.lock().expect("template lock") = reply;
    }

    pub fn set_save(&self, reply: Reply<SaveOutcome>) {
        *self.save.lock().expect("save lock") = reply;
    }

    pub fn set_task(&self, reply: Reply<TaskOutcome>) {
        *self.task.lock().expect("task lock") = reply;
    }

    /// The next AI fetch waits until the returned sender fires.
    pub fn hold_ai_fetch(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.ai_hold.lock().expect("hold lock") = Some(rx);
        tx
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("calls lock").push(call);
    }
}

#[async_trait]
impl ConsoleBackend for FakeBackend {
    async fn fetch_ai_settings(&self) -> Result<LoadOutcome<AiSettings>, ApiError> {
        self.record(Call::FetchAi);
        let hold = self.ai_hold.lock().expect("hold lock").take();
        if let Some(hold) = hold {
            let _ = hold.await;
        }
        self.ai.lock().expect("ai lock").get()
    }

    async fn save_ai_settings(&self, settings: &AiSettings) -> Result<SaveOutcome, ApiError> {
        self.record(Call::SaveAi(settings.clone()));
        self.save.lock().expect("save lock").get()
    }

    async fn fetch_email_settings(&self) -> Result<LoadOutcome<EmailSettings>, ApiError> {
        self.record(Call::FetchEmail);
        self.email.lock().expect("email lock").get()
    }

    async fn save_email_settings(
        &self,
        settings: &EmailSettings,
    ) -> Result<SaveOutcome, ApiError> {
        self.record(Call::SaveEmail(settings.clone()));
        self.save.lock().expect("save lock").get()
    }

    async fn fetch_email_template(&self) -> Result<LoadOutcome<EmailTemplate>, ApiError> {
        self.record(Call::FetchTemplate);
        self.template.lock().expect("template lock").get()
    }

    async fn save_email_template(
        &self,
        template: &EmailTemplate,
    ) -> Result<SaveOutcome, ApiError> {
        self.record(Call::SaveTemplate(template.clone()));
        self.save.lock().expect("save lock").get()
    }

    async fn create_task(&self, task: &TaskRequest) -> Result<TaskOutcome, ApiError> {
        self.record(Call::CreateTask(task.clone()));
        self.task.lock().expect("task lock").get()
    }

    async fn pause_task(&self, task_id: &str) -> Result<TaskOutcome, ApiError> {
        self.record(Call::PauseTask(task_id.to_string()));
        self.task.lock().expect("task lock").get()
    }

    async fn delete_task(&self, task_id: &str) -> Result<TaskOutcome, ApiError> {
        self.record(Call::DeleteTask(task_id.to_string()));
        self.task.lock().expect("task lock").get()
    }
}

pub struct RecordingView {
    answer: bool,
    alerts: Mutex<Vec<String>>,
    confirms: Mutex<Vec<String>>,
    reloads: Mutex<usize>,
}

impl RecordingView {
    pub fn accepting() -> Self {
        Self::answering(true)
    }

    pub fn declining() -> Self {
        Self::answering(false)
    }

    fn answering(answer: bool) -> Self {
        Self {
            answer,
            alerts: Mutex::new(Vec::new()),
            confirms: Mutex::new(Vec::new()),
            reloads: Mutex::new(0),
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().expect("alerts lock").clone()
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.lock().expect("confirms lock").clone()
    }

    pub fn reloads(&self) -> usize {
        *self.reloads.lock().expect("reloads lock")
    }
}

impl ConsoleView for RecordingView {
    fn alert(&self, message: &str) {
        self.alerts.lock().expect("alerts lock").push(message.to_string());
    }

    fn confirm(&self, prompt: &str) -> bool {
        self.confirms.lock().expect("confirms lock").push(prompt.to_string());
        self.answer
    }

    fn reload_task_list(&self) {
        *self.reloads.lock().expect("reloads lock") += 1;
    }
}

pub fn session_with(
    backend: FakeBackend,
    view: RecordingView,
) -> (ConsoleSession, Arc<FakeBackend>, Arc<RecordingView>) {
    let backend = Arc::new(backend);
    let view = Arc::new(view);
    let session = ConsoleSession::new(backend.clone(), view.clone());
    (session, backend, view)
}
