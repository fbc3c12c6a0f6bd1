use crate::{ConsoleError, ConsoleSession, RequestGate};
use pagewatch_api::{ApiError, LoadOutcome};
use pagewatch_core::{AiSettings, EmailSettings, EmailTemplate};
use std::sync::atomic::Ordering;

impl ConsoleSession {
    /// Page-ready synchronization. Runs the three loads once per session;
    /// later calls do nothing.
    pub async fn synchronize(&self) {
        if self.synchronized.swap(true, Ordering::SeqCst) {
            tracing::debug!("settings already synchronized for this session");
            return;
        }

        let _ = tokio::join!(
            self.load_ai_settings(),
            self.load_email_settings(),
            self.load_email_template(),
        );
    }

    /// Fetch AI settings into the form. Failures are logged, never shown;
    /// `Ok(None)` means nothing was applied.
    pub async fn load_ai_settings(&self) -> Result<Option<AiSettings>, ConsoleError> {
        let ticket = self.gates.ai.issue();
        let outcome = self.backend.fetch_ai_settings().await;
        let Some(settings) = settled("ai settings", outcome)? else {
            return Ok(None);
        };

        let mut state = self.state.write().await;
        if !still_current(&self.gates.ai, ticket, "ai settings") {
            return Ok(None);
        }
        state.ai.apply_stored(&settings);
        tracing::info!(provider = %settings.provider, "loaded ai settings");
        Ok(Some(settings))
    }

    pub async fn load_email_settings(&self) -> Result<Option<EmailSettings>, ConsoleError> {
        let ticket = self.gates.email.issue();
        let outcome = self.backend.fetch_email_settings().await;
        let Some(settings) = settled("email settings", outcome)? else {
            return Ok(None);
        };

        let mut state = self.state.write().await;
        if !still_current(&self.gates.email, ticket, "email settings") {
            return Ok(None);
        }
        state.email.apply_stored(&settings);
        tracing::info!(channel = %settings.channel(), "loaded email settings");
        Ok(Some(settings))
    }

    pub async fn load_email_template(&self) -> Result<Option<EmailTemplate>, ConsoleError> {
        let ticket = self.gates.template.issue();
        let outcome = self.backend.fetch_email_template().await;
        let Some(template) = settled("email template", outcome)? else {
            return Ok(None);
        };

        let mut state = self.state.write().await;
        if !still_current(&self.gates.template, ticket, "email template") {
            return Ok(None);
        }
        state.template = template.clone();
        tracing::info!("loaded email template");
        Ok(Some(template))
    }
}

fn settled<T>(
    category: &str,
    outcome: Result<LoadOutcome<T>, ApiError>,
) -> Result<Option<T>, ConsoleError> {
    match outcome {
        Ok(LoadOutcome::Loaded(value)) => Ok(Some(value)),
        Ok(LoadOutcome::Unavailable(message)) => {
            tracing::warn!(
                category,
                message = message.as_deref().unwrap_or("-"),
                "backend has no stored settings, keeping defaults"
            );
            Ok(None)
        }
        Err(err) => {
            tracing::warn!(category, "failed to load settings: {err}");
            Err(ConsoleError::Network(err))
        }
    }
}

fn still_current(gate: &RequestGate, ticket: crate::Ticket, category: &str) -> bool {
    let current = gate.is_current(ticket);
    if !current {
        tracing::debug!(category, "discarding superseded load response");
    }
    current
}
