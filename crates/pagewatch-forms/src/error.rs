use thiserror::Error;

/// Reasons a task form cannot be submitted. `Display` is the operator-facing text.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TaskFormError {
    #[error("请输入监控地址！")]
    MissingUrl,
    #[error("请输入监控时间间隔！")]
    MissingInterval,
    #[error("监控时间间隔必须是正整数！")]
    InvalidInterval,
}
