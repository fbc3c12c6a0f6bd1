use crate::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Class of resource a monitoring task watches.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum MonitorMode {
    #[default]
    Website,
    Github,
    Rss,
}

impl MonitorMode {
    pub const ALL: [MonitorMode; 3] = [MonitorMode::Website, MonitorMode::Github, MonitorMode::Rss];

    pub fn as_str(&self) -> &'static str {
        match self {
            MonitorMode::Website => "website",
            MonitorMode::Github => "github",
            MonitorMode::Rss => "rss",
        }
    }
}

impl fmt::Display for MonitorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MonitorMode {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        MonitorMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| CoreError::UnknownValue {
                kind: "monitor mode",
                value: value.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Older backends report a live task as `running`.
    #[default]
    #[serde(alias = "running")]
    Active,
    Paused,
    Deleted,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Active => "active",
            TaskStatus::Paused => "paused",
            TaskStatus::Deleted => "deleted",
        }
    }

    /// Pausing an already paused task is accepted; the backend treats it as a no-op.
    pub fn pause(self) -> Result<TaskStatus, CoreError> {
        match self {
            TaskStatus::Active | TaskStatus::Paused => Ok(TaskStatus::Paused),
            TaskStatus::Deleted => Err(CoreError::InvalidTransition {
                from: self.as_str(),
                action: "pause",
            }),
        }
    }

    pub fn delete(self) -> Result<TaskStatus, CoreError> {
        match self {
            TaskStatus::Active | TaskStatus::Paused => Ok(TaskStatus::Deleted),
            TaskStatus::Deleted => Err(CoreError::InvalidTransition {
                from: self.as_str(),
                action: "delete",
            }),
        }
    }
}

/// Payload of a task submission, serialized as the backend expects it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequest {
    pub mode: MonitorMode,
    pub url: String,
    pub interval: String,
    pub compare_mode: bool,
    pub send_mail: bool,
    pub email_addresses: Vec<String>,
    pub cc_addresses: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    ChatGpt,
    Gemini,
    Volcano,
    DeepSeek,
}

impl AiProvider {
    pub const ALL: [AiProvider; 4] = [
        AiProvider::ChatGpt,
        AiProvider::Gemini,
        AiProvider::Volcano,
        AiProvider::DeepSeek,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AiProvider::ChatGpt => "chatgpt",
            AiProvider::Gemini => "gemini",
            AiProvider::Volcano => "volcano",
            AiProvider::DeepSeek => "deepseek",
        }
    }
}

impl fmt::Display for AiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AiProvider {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        AiProvider::ALL
            .into_iter()
            .find(|provider| provider.as_str() == normalized)
            .ok_or_else(|| CoreError::UnknownValue {
                kind: "ai provider",
                value: value.to_string(),
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AiSettings {
    pub provider: AiProvider,
    pub model: String,
    pub api_token: String,
    pub api_url: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmailChannel {
    #[default]
    Sendcloud,
    Smtp,
}

impl EmailChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmailChannel::Sendcloud => "sendcloud",
            EmailChannel::Smtp => "smtp",
        }
    }

    /// Legacy companion of `service_type` still read by the backend.
    pub fn flag(&self) -> &'static str {
        match self {
            EmailChannel::Sendcloud => "1",
            EmailChannel::Smtp => "0",
        }
    }
}

impl fmt::Display for EmailChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmailChannel {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sendcloud" => Ok(EmailChannel::Sendcloud),
            "smtp" => Ok(EmailChannel::Smtp),
            _ => Err(CoreError::UnknownValue {
                kind: "email channel",
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SendcloudSettings {
    pub api_user: String,
    pub api_key: String,
    pub from_email: String,
    pub from_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SmtpSettings {
    pub smtp_server: String,
    pub smtp_port: String,
    pub email_account: String,
    pub email_password: String,
}

impl Default for SmtpSettings {
    fn default() -> Self {
        Self {
            smtp_server: String::new(),
            smtp_port: crate::DEFAULT_SMTP_PORT.to_string(),
            email_account: String::new(),
            email_password: String::new(),
        }
    }
}

/// Delivery settings; only the active channel's fields exist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "channel", rename_all = "lowercase")]
pub enum EmailSettings {
    Sendcloud(SendcloudSettings),
    Smtp(SmtpSettings),
}

impl EmailSettings {
    pub fn channel(&self) -> EmailChannel {
        match self {
            EmailSettings::Sendcloud(_) => EmailChannel::Sendcloud,
            EmailSettings::Smtp(_) => EmailChannel::Smtp,
        }
    }
}

impl Default for EmailSettings {
    fn default() -> Self {
        EmailSettings::Sendcloud(SendcloudSettings::default())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct EmailTemplate {
    pub subject: String,
    pub body: String,
    pub ai_analysis: String,
}
