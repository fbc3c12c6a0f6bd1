use crate::messages::{rejection, Action};
use crate::{ConsoleError, ConsoleSession};
use pagewatch_api::{ApiError, SaveOutcome};

impl ConsoleSession {
    pub async fn save_ai_settings(&self) -> Result<(), ConsoleError> {
        // The ticket is taken with the snapshot so an in-flight load for the
        // same category can no longer overwrite what is being saved.
        let settings = {
            let state = self.state.read().await;
            self.gates.ai.issue();
            state.ai.to_settings()
        };
        tracing::info!(provider = %settings.provider, "saving ai settings");
        let outcome = self.backend.save_ai_settings(&settings).await;
        self.report(Action::SaveAi, saved(outcome))
    }

    pub async fn save_email_settings(&self) -> Result<(), ConsoleError> {
        let settings = {
            let state = self.state.read().await;
            self.gates.email.issue();
            state.email.to_settings()
        };
        tracing::info!(channel = %settings.channel(), "saving email settings");
        let outcome = self.backend.save_email_settings(&settings).await;
        self.report(Action::SaveEmail, saved(outcome))
    }

    pub async fn save_email_template(&self) -> Result<(), ConsoleError> {
        let template = {
            let state = self.state.read().await;
            self.gates.template.issue();
            state.template.clone()
        };
        tracing::info!("saving email template");
        let outcome = self.backend.save_email_template(&template).await;
        self.report(Action::SaveTemplate, saved(outcome))
    }
}

fn saved(outcome: Result<SaveOutcome, ApiError>) -> Result<(), ConsoleError> {
    match outcome? {
        SaveOutcome::Saved => Ok(()),
        SaveOutcome::Rejected(message) => Err(rejection(message)),
    }
}
