use pagewatch_core::{
    infer_provider, AiProvider, AiSettings, EmailChannel, EmailSettings, EmailTemplate,
    SendcloudSettings, SmtpSettings, DEFAULT_SMTP_PORT,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Message the backend returns instead of `success` when AI settings are stored.
pub const AI_SAVED_MESSAGE: &str = "AI设置保存成功";
/// Message the backend returns instead of `success` when email settings are stored.
pub const EMAIL_SAVED_MESSAGE: &str = "设置保存成功";

/// Body of `GET /api/settings/*`. Settings arrive under `settings`, the
/// template under `template`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoadEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: Option<String>,
    #[serde(default, rename = "settings", alias = "template")]
    pub payload: Option<T>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome<T> {
    Loaded(T),
    Unavailable(Option<String>),
}

impl<T> LoadEnvelope<T> {
    pub fn into_outcome<U>(self, convert: impl FnOnce(T) -> U) -> LoadOutcome<U> {
        match (self.success, self.payload) {
            (true, Some(payload)) => LoadOutcome::Loaded(convert(payload)),
            _ => LoadOutcome::Unavailable(self.message),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiSettingsPayload {
    #[serde(
        rename = "aiChoice",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub ai_choice: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub model: Option<String>,
    #[serde(default, alias = "apiToken", deserialize_with = "lenient_string")]
    pub api_token: Option<String>,
    #[serde(default, alias = "apiUrl", deserialize_with = "lenient_string")]
    pub api_url: Option<String>,
}

impl AiSettingsPayload {
    pub fn into_settings(self) -> AiSettings {
        let model = self.model.unwrap_or_default();
        let explicit = self
            .ai_choice
            .as_deref()
            .filter(|choice| !choice.trim().is_empty())
            .and_then(|choice| match choice.parse::<AiProvider>() {
                Ok(provider) => Some(provider),
                Err(err) => {
                    tracing::warn!("ignoring stored ai choice: {err}");
                    None
                }
            });

        AiSettings {
            provider: explicit.unwrap_or_else(|| infer_provider(&model)),
            model,
            api_token: self.api_token.unwrap_or_default(),
            api_url: self.api_url.unwrap_or_default(),
        }
    }
}

impl From<&AiSettings> for AiSettingsPayload {
    fn from(settings: &AiSettings) -> Self {
        Self {
            ai_choice: Some(settings.provider.as_str().to_string()),
            model: Some(settings.model.clone()),
            api_token: Some(settings.api_token.clone()),
            api_url: Some(settings.api_url.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailSettingsPayload {
    #[serde(default, deserialize_with = "lenient_string")]
    pub service_type: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub flag: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub api_user: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub api_key: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub from_email: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub from_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub smtp_server: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub smtp_port: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub email_account: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub email_password: Option<String>,
}

impl EmailSettingsPayload {
    /// Missing channel means SendCloud; a missing SMTP port means 587.
    pub fn into_settings(self) -> EmailSettings {
        let channel = match self.service_type.as_deref().map(str::trim) {
            None | Some("") => EmailChannel::Sendcloud,
            Some(value) => value.parse::<EmailChannel>().unwrap_or_else(|err| {
                tracing::warn!("falling back to sendcloud: {err}");
                EmailChannel::Sendcloud
            }),
        };

        match channel {
            EmailChannel::Sendcloud => EmailSettings::Sendcloud(SendcloudSettings {
                api_user: self.api_user.unwrap_or_default(),
                api_key: self.api_key.unwrap_or_default(),
                from_email: self.from_email.unwrap_or_default(),
                from_name: self.from_name.unwrap_or_default(),
            }),
            EmailChannel::Smtp => EmailSettings::Smtp(SmtpSettings {
                smtp_server: self.smtp_server.unwrap_or_default(),
                smtp_port: self
                    .smtp_port
                    .filter(|port| !port.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_SMTP_PORT.to_string()),
                email_account: self.email_account.unwrap_or_default(),
                email_password: self.email_password.unwrap_or_default(),
            }),
        }
    }
}

impl From<&EmailSettings> for EmailSettingsPayload {
    fn from(settings: &EmailSettings) -> Self {
        let channel = settings.channel();
        let base = Self {
            service_type: Some(channel.as_str().to_string()),
            flag: Some(channel.flag().to_string()),
            ..Self::default()
        };

        match settings {
            EmailSettings::Sendcloud(sendcloud) => Self {
                api_user: Some(sendcloud.api_user.clone()),
                api_key: Some(sendcloud.api_key.clone()),
                from_email: Some(sendcloud.from_email.clone()),
                from_name: Some(sendcloud.from_name.clone()),
                ..base
            },
            EmailSettings::Smtp(smtp) => Self {
                smtp_server: Some(smtp.smtp_server.clone()),
                smtp_port: Some(smtp.smtp_port.clone()),
                email_account: Some(smtp.email_account.clone()),
                email_password: Some(smtp.email_password.clone()),
                ..base
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailTemplatePayload {
    #[serde(default, deserialize_with = "lenient_string")]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub body: Option<String>,
    #[serde(rename = "aiAnalysis", default, deserialize_with = "lenient_string")]
    pub ai_analysis: Option<String>,
}

impl EmailTemplatePayload {
    pub fn into_template(self) -> EmailTemplate {
        EmailTemplate {
            subject: self.subject.unwrap_or_default(),
            body: self.body.unwrap_or_default(),
            ai_analysis: self.ai_analysis.unwrap_or_default(),
        }
    }
}

impl From<&EmailTemplate> for EmailTemplatePayload {
    fn from(template: &EmailTemplate) -> Self {
        Self {
            subject: Some(template.subject.clone()),
            body: Some(template.body.clone()),
            ai_analysis: Some(template.ai_analysis.clone()),
        }
    }
}

/// Body of a settings save. Backends disagree on the shape: some send
/// `success`, others only a message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaveResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    Rejected(Option<String>),
}

impl SaveResponse {
    /// Saved when the flag is set or the message is the category's success text.
    pub fn outcome(self, success_message: Option<&str>) -> SaveOutcome {
        let flagged = self.success == Some(true);
        let acknowledged = match (success_message, self.message.as_deref()) {
            (Some(expected), Some(actual)) => expected == actual.trim(),
            _ => false,
        };

        if flagged || acknowledged {
            SaveOutcome::Saved
        } else {
            SaveOutcome::Rejected(self.message.filter(|message| !message.trim().is_empty()))
        }
    }
}

/// Body of the task endpoints: `{}` / `{id, message}` or `{error}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskResponse {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Accepted { id: Option<String> },
    Rejected(String),
}

impl From<TaskResponse> for TaskOutcome {
    fn from(response: TaskResponse) -> Self {
        match response.error.filter(|error| !error.is_empty()) {
            Some(error) => TaskOutcome::Rejected(error),
            None => TaskOutcome::Accepted { id: response.id },
        }
    }
}

/// Accept strings, numbers and booleans where the backend is loose about types.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(Value::Bool(flag)) => Some(flag.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn load_ai(body: Value) -> LoadOutcome<AiSettings> {
        serde_json::from_value::<LoadEnvelope<AiSettingsPayload>>(body)
            .expect("envelope parsed")
            .into_outcome(AiSettingsPayload::into_settings)
    }

    #[test]
    fn explicit_ai_choice_wins_over_model_name() {
        let outcome = load_ai(json!({
            "success": true,
            "settings": {"aiChoice": "volcano", "model": "deepseek-chat", "api_token": "t", "api_url": "u"}
        }));

        match outcome {
            LoadOutcome::Loaded(settings) => {
                assert_eq!(settings.provider, AiProvider::Volcano);
                assert_eq!(settings.api_token, "t");
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn missing_ai_choice_is_inferred() {
        for (model, provider) in [
            ("deepseek-chat", AiProvider::DeepSeek),
            ("gemini-2.5-flash", AiProvider::Gemini),
            ("something-else", AiProvider::ChatGpt),
        ] {
            let outcome = load_ai(json!({"success": true, "settings": {"model": model}}));
            assert_eq!(
                outcome,
                LoadOutcome::Loaded(AiSettings {
                    provider,
                    model: model.to_string(),
                    api_token: String::new(),
                    api_url: String::new(),
                })
            );
        }
    }

    #[test]
    fn camel_case_ai_fields_are_accepted() {
        let outcome = load_ai(json!({
            "success": true,
            "settings": {"model": "gpt-4o", "apiToken": "tok", "apiUrl": "https://x"}
        }));
        match outcome {
            LoadOutcome::Loaded(settings) => {
                assert_eq!(settings.api_token, "tok");
                assert_eq!(settings.api_url, "https://x");
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn unsuccessful_load_is_unavailable() {
        assert_eq!(
            load_ai(json!({"success": false, "message": "no settings"})),
            LoadOutcome::Unavailable(Some("no settings".to_string()))
        );
        assert_eq!(load_ai(json!({"success": true})), LoadOutcome::Unavailable(None));
    }

    #[test]
    fn smtp_load_defaults_port_and_reads_numbers() {
        let parse = |settings: Value| {
            serde_json::from_value::<EmailSettingsPayload>(settings)
                .expect("payload parsed")
                .into_settings()
        };

        match parse(json!({"service_type": "smtp", "smtp_server": "smtp.x.com", "smtp_port": null})) {
            EmailSettings::Smtp(smtp) => assert_eq!(smtp.smtp_port, "587"),
            other => panic!("unexpected settings {other:?}"),
        }
        match parse(json!({"service_type": "smtp", "smtp_port": 465})) {
            EmailSettings::Smtp(smtp) => assert_eq!(smtp.smtp_port, "465"),
            other => panic!("unexpected settings {other:?}"),
        }
        assert_eq!(parse(json!({})).channel(), EmailChannel::Sendcloud);
    }

    #[test]
    fn email_payload_carries_only_active_channel() {
        let payload = EmailSettingsPayload::from(&EmailSettings::Smtp(SmtpSettings {
            smtp_server: "smtp.x.com".to_string(),
            smtp_port: "587".to_string(),
            email_account: "me@x.com".to_string(),
            email_password: "pw".to_string(),
        }));
        let json = serde_json::to_value(&payload).expect("payload serialized");

        assert_eq!(json["service_type"], "smtp");
        assert_eq!(json["flag"], "0");
        assert_eq!(json["smtp_server"], "smtp.x.com");
        assert!(json.get("api_user").is_none());
        assert!(json.get("from_name").is_none());

        let sendcloud = serde_json::to_value(EmailSettingsPayload::from(&EmailSettings::default()))
            .expect("payload serialized");
        assert_eq!(sendcloud["flag"], "1");
        assert!(sendcloud.get("smtp_port").is_none());
    }

    #[test]
    fn template_load_reads_template_key() {
        let outcome = serde_json::from_value::<LoadEnvelope<EmailTemplatePayload>>(json!({
            "success": true,
            "template": {"subject": "变更: {url}", "aiAnalysis": null}
        }))
        .expect("envelope parsed")
        .into_outcome(EmailTemplatePayload::into_template);

        assert_eq!(
            outcome,
            LoadOutcome::Loaded(EmailTemplate {
                subject: "变更: {url}".to_string(),
                body: String::new(),
                ai_analysis: String::new(),
            })
        );
    }

    #[test]
    fn save_accepts_flag_or_success_message() {
        let parse = |body: Value| serde_json::from_value::<SaveResponse>(body).expect("parsed");

        assert_eq!(parse(json!({"success": true})).outcome(None), SaveOutcome::Saved);
        assert_eq!(
            parse(json!({"message": AI_SAVED_MESSAGE})).outcome(Some(AI_SAVED_MESSAGE)),
            SaveOutcome::Saved
        );
        assert_eq!(
            parse(json!({"message": AI_SAVED_MESSAGE})).outcome(None),
            SaveOutcome::Rejected(Some(AI_SAVED_MESSAGE.to_string()))
        );
        assert_eq!(
            parse(json!({"success": false, "message": "磁盘已满"})).outcome(Some(AI_SAVED_MESSAGE)),
            SaveOutcome::Rejected(Some("磁盘已满".to_string()))
        );
        assert_eq!(parse(json!({})).outcome(None), SaveOutcome::Rejected(None));
    }

    #[test]
    fn task_error_field_decides_outcome() {
        let parse = |body: Value| {
            TaskOutcome::from(serde_json::from_value::<TaskResponse>(body).expect("parsed"))
        };

        assert_eq!(parse(json!({})), TaskOutcome::Accepted { id: None });
        assert_eq!(
            parse(json!({"id": "abc", "message": "任务添加成功"})),
            TaskOutcome::Accepted {
                id: Some("abc".to_string())
            }
        );
        assert_eq!(
            parse(json!({"error": "任务不存在"})),
            TaskOutcome::Rejected("任务不存在".to_string())
        );
        assert_eq!(parse(json!({"error": ""})), TaskOutcome::Accepted { id: None });
    }
}
