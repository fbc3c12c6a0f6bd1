mod backend;
mod error;
mod wire;

pub use backend::{ConsoleBackend, HttpBackend};
pub use error::ApiError;
pub use wire::{
    AiSettingsPayload, EmailSettingsPayload, EmailTemplatePayload, LoadEnvelope, LoadOutcome,
    SaveOutcome, SaveResponse, TaskOutcome, TaskResponse, AI_SAVED_MESSAGE, EMAIL_SAVED_MESSAGE,
};
