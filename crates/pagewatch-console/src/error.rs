use pagewatch_api::ApiError;
use pagewatch_forms::TaskFormError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Rejected before any request was sent.
    #[error("{0}")]
    Validation(String),
    #[error("request failed: {0}")]
    Network(#[from] ApiError),
    /// The backend answered with an error or failure message.
    #[error("{0}")]
    Application(String),
}

impl From<TaskFormError> for ConsoleError {
    fn from(err: TaskFormError) -> Self {
        ConsoleError::Validation(err.to_string())
    }
}
