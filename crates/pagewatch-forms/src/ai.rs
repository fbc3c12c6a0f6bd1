use pagewatch_core::{resolve_ai_defaults, AiProvider, AiSettings};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AiSettingsForm {
    provider: AiProvider,
    pub model: String,
    pub api_token: String,
    pub api_url: String,
}

impl AiSettingsForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn provider(&self) -> AiProvider {
        self.provider
    }

    /// Explicit provider change by the operator. Defaults only land in empty
    /// fields; anything already typed is kept.
    pub fn select_provider(&mut self, provider: AiProvider) {
        self.provider = provider;
        let defaults = resolve_ai_defaults(provider);
        if self.model.trim().is_empty() {
            self.model = defaults.model.to_string();
        }
        if self.api_url.trim().is_empty() {
            self.api_url = defaults.api_url.to_string();
        }
    }

    /// Mirror settings loaded from the backend. Stored values win; a field the
    /// backend left empty takes the provider default whatever the form held.
    pub fn apply_stored(&mut self, stored: &AiSettings) {
        let defaults = resolve_ai_defaults(stored.provider);
        self.provider = stored.provider;
        self.model = non_empty_or(&stored.model, defaults.model);
        self.api_url = non_empty_or(&stored.api_url, defaults.api_url);
        self.api_token = stored.api_token.clone();
    }

    pub fn to_settings(&self) -> AiSettings {
        AiSettings {
            provider: self.provider,
            model: self.model.trim().to_string(),
            api_token: self.api_token.trim().to_string(),
            api_url: self.api_url.trim().to_string(),
        }
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}
