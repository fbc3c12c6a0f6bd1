use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown {kind}: `{value}`")]
    UnknownValue { kind: &'static str, value: String },
    #[error("cannot {action} a task that is {from}")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },
}
