use crate::{AiProvider, EmailChannel};

pub const DEFAULT_SMTP_PORT: &str = "587";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiDefaults {
    pub model: &'static str,
    pub api_url: &'static str,
}

/// Canonical model and endpoint for each provider. Volcano has no default
/// model: Ark endpoints are per-account and the operator supplies one.
pub fn resolve_ai_defaults(provider: AiProvider) -> AiDefaults {
    match provider {
        AiProvider::ChatGpt => AiDefaults {
            model: "gpt-4o",
            api_url: "https://api.openai.com/v1/chat/completions",
        },
        AiProvider::Gemini => AiDefaults {
            model: "gemini-2.5-flash",
            api_url: "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent",
        },
        AiProvider::Volcano => AiDefaults {
            model: "",
            api_url: "https://ark.cn-beijing.volces.com/api/v3",
        },
        AiProvider::DeepSeek => AiDefaults {
            model: "deepseek-chat",
            api_url: "https://api.deepseek.com",
        },
    }
}

/// Guess the provider of stored settings that predate the explicit choice.
pub fn infer_provider(model: &str) -> AiProvider {
    let model = model.to_ascii_lowercase();
    if model.contains("gemini") {
        AiProvider::Gemini
    } else if model.contains("chatglm") {
        AiProvider::Volcano
    } else if model.contains("deepseek") {
        AiProvider::DeepSeek
    } else {
        AiProvider::ChatGpt
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmailDefaults {
    pub smtp_port: Option<&'static str>,
}

pub fn resolve_email_defaults(channel: EmailChannel) -> EmailDefaults {
    match channel {
        EmailChannel::Smtp => EmailDefaults {
            smtp_port: Some(DEFAULT_SMTP_PORT),
        },
        EmailChannel::Sendcloud => EmailDefaults::default(),
    }
}
