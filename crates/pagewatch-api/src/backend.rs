use crate::wire::{
    AiSettingsPayload, EmailSettingsPayload, EmailTemplatePayload, LoadEnvelope, LoadOutcome,
    SaveOutcome, SaveResponse, TaskOutcome, TaskResponse, AI_SAVED_MESSAGE, EMAIL_SAVED_MESSAGE,
};
use crate::ApiError;
use async_trait::async_trait;
use pagewatch_core::{AiSettings, EmailSettings, EmailTemplate, TaskRequest};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;

/// The REST surface of the monitoring backend.
#[async_trait]
pub trait ConsoleBackend: Send + Sync {
    async fn fetch_ai_settings(&self) -> Result<LoadOutcome<AiSettings>, ApiError>;

    async fn save_ai_settings(&self, settings: &AiSettings) -> Result<SaveOutcome, ApiError>;

    async fn fetch_email_settings(&self) -> Result<LoadOutcome<EmailSettings>, ApiError>;

    async fn save_email_settings(&self, settings: &EmailSettings)
        -> Result<SaveOutcome, ApiError>;

    async fn fetch_email_template(&self) -> Result<LoadOutcome<EmailTemplate>, ApiError>;

    async fn save_email_template(&self, template: &EmailTemplate)
        -> Result<SaveOutcome, ApiError>;

    async fn create_task(&self, task: &TaskRequest) -> Result<TaskOutcome, ApiError>;

    async fn pause_task(&self, task_id: &str) -> Result<TaskOutcome, ApiError>;

    async fn delete_task(&self, task_id: &str) -> Result<TaskOutcome, ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpBackend {
    base: Url,
    http: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let mut base = Url::parse(base_url.trim())?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidEndpoint(base_url.to_string()));
        }
        // Joined paths are relative, so a path prefix on the base must end in `/`.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Http)?;

        Ok(Self { base, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base.join(path)?)
    }

    fn task_endpoint(&self, task_id: &str, action: Option<&str>) -> Result<Url, ApiError> {
        let mut url = self.endpoint("api/tasks")?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidEndpoint(self.base.to_string()))?;
            segments.push(task_id);
            if let Some(action) = action {
                segments.push(action);
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        tracing::debug!(%url, "GET");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(ApiError::from_transport)?;
        read_json(response).await
    }

    async fn post_json<B, T>(&self, url: Url, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        tracing::debug!(%url, "POST");
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(ApiError::from_transport)?;
        read_json(response).await
    }
}

/// Error statuses still carry a JSON body (`404 {"error": ...}`), so the
/// status code alone does not decide the outcome.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.bytes().await.map_err(ApiError::from_transport)?;
    serde_json::from_slice(&body).map_err(|err| {
        tracing::warn!(%status, "backend answered with an unreadable body");
        ApiError::Json(err)
    })
}

#[async_trait]
impl ConsoleBackend for HttpBackend {
    async fn fetch_ai_settings(&self) -> Result<LoadOutcome<AiSettings>, ApiError> {
        let envelope: LoadEnvelope<AiSettingsPayload> =
            self.get_json(self.endpoint("api/settings/ai")?).await?;
        Ok(envelope.into_outcome(AiSettingsPayload::into_settings))
    }

    async fn save_ai_settings(&self, settings: &AiSettings) -> Result<SaveOutcome, ApiError> {
        let payload = AiSettingsPayload::from(settings);
        let response: SaveResponse = self
            .post_json(self.endpoint("api/settings/ai")?, &payload)
            .await?;
        Ok(response.outcome(Some(AI_SAVED_MESSAGE)))
    }

    async fn fetch_email_settings(&self) -> Result<LoadOutcome<EmailSettings>, ApiError> {
        let envelope: LoadEnvelope<EmailSettingsPayload> =
            self.get_json(self.endpoint("api/settings/email")?).await?;
        Ok(envelope.into_outcome(EmailSettingsPayload::into_settings))
    }

    async fn save_email_settings(
        &self,
        settings: &EmailSettings,
    ) -> Result<SaveOutcome, ApiError> {
        let payload = EmailSettingsPayload::from(settings);
        let response: SaveResponse = self
            .post_json(self.endpoint("api/settings/email")?, &payload)
            .await?;
        Ok(response.outcome(Some(EMAIL_SAVED_MESSAGE)))
    }

    async fn fetch_email_template(&self) -> Result<LoadOutcome<EmailTemplate>, ApiError> {
        let envelope: LoadEnvelope<EmailTemplatePayload> = self
            .get_json(self.endpoint("api/settings/email-template")?)
            .await?;
        Ok(envelope.into_outcome(EmailTemplatePayload::into_template))
    }

    async fn save_email_template(
        &self,
        template: &EmailTemplate,
    ) -> Result<SaveOutcome, ApiError> {
        let payload = EmailTemplatePayload::from(template);
        let response: SaveResponse = self
            .post_json(self.endpoint("api/settings/email-template")?, &payload)
            .await?;
        Ok(response.outcome(None))
    }

    async fn create_task(&self, task: &TaskRequest) -> Result<TaskOutcome, ApiError> {
        let response: TaskResponse = self.post_json(self.endpoint("api/tasks")?, task).await?;
        Ok(response.into())
    }

    async fn pause_task(&self, task_id: &str) -> Result<TaskOutcome, ApiError> {
        let url = self.task_endpoint(task_id, Some("pause"))?;
        tracing::debug!(%url, "POST");
        let response = self
            .http
            .post(url)
            .send()
            .await
            .map_err(ApiError::from_transport)?;
        let response: TaskResponse = read_json(response).await?;
        Ok(response.into())
    }

    async fn delete_task(&self, task_id: &str) -> Result<TaskOutcome, ApiError> {
        let url = self.task_endpoint(task_id, None)?;
        tracing::debug!(%url, "DELETE");
        let response = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(ApiError::from_transport)?;
        let response: TaskResponse = read_json(response).await?;
        Ok(response.into())
    }
}
