mod error;
mod model;
mod provider;

pub use error::CoreError;
pub use model::*;
pub use provider::{
    infer_provider, resolve_ai_defaults, resolve_email_defaults, AiDefaults, EmailDefaults,
    DEFAULT_SMTP_PORT,
};
