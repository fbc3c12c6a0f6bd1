mod cli;
mod render;
mod terminal;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands, EmailCommand};
use pagewatch_api::HttpBackend;
use pagewatch_config::{ClientConfig, ConfigManager};
use pagewatch_console::{ConsoleError, ConsoleSession};
use pagewatch_core::{AiProvider, EmailChannel};
use pagewatch_forms::{AddressListId, AiSettingsForm, ConsoleTab};
use std::process::ExitCode;
use std::sync::Arc;
use terminal::TerminalView;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(config: &ClientConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let manager = match &cli.config {
        Some(path) => ConfigManager::at(path),
        None => ConfigManager::new(),
    }
    .context("initialize config manager")?;
    let mut config = manager.load().context("load client config")?;
    if let Some(base_url) = &cli.base_url {
        config.backend.base_url = base_url.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_tracing(&config);

    let backend = HttpBackend::new(&config.backend.base_url, config.backend.request_timeout())
        .context("initialize backend client")?;
    tracing::debug!(base_url = %backend.base_url(), "console backend ready");

    let assume_yes = matches!(cli.command, Commands::Delete { yes: true, .. });
    let session = ConsoleSession::new(Arc::new(backend), Arc::new(TerminalView::new(assume_yes)));

    // The failure was already shown to the operator; only the exit code is left.
    match run(&session, cli.command).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            tracing::debug!("command failed: {err}");
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run(session: &ConsoleSession, command: Commands) -> Result<(), ConsoleError> {
    match command {
        Commands::Show => {
            session.synchronize().await;
            println!("{}", render::render_state(&session.state().await));
            Ok(())
        }
        Commands::AddTask {
            mode,
            url,
            interval,
            compare,
            send_mail,
            to,
            cc,
        } => {
            session
                .edit(|state| {
                    state.tabs.switch(ConsoleTab::Tasks);
                    let task = &mut state.task;
                    task.set_monitor_mode(mode);
                    task.set_url(mode, url);
                    task.interval = interval;
                    task.set_compare_mode(compare);
                    if compare {
                        task.set_send_mail(send_mail);
                    }
                    for address in to {
                        task.addresses_mut(AddressListId::Recipients).push(address);
                    }
                    for address in cc {
                        task.addresses_mut(AddressListId::Cc).push(address);
                    }
                })
                .await;
            session.submit_task().await.map(|id| {
                if let Some(id) = id {
                    println!("task id: {id}");
                }
            })
        }
        Commands::Pause { id } => session.pause_task(&id).await,
        Commands::Delete { id, .. } => session.delete_task(&id).await.map(|_| ()),
        Commands::SetAi {
            provider,
            model,
            token,
            api_url,
        } => {
            stored(session.load_ai_settings().await, "ai settings")?;
            session
                .edit(|state| {
                    state.tabs.switch(ConsoleTab::Ai);
                    let kept =
                        kept_on_switch(&state.ai, provider, model.is_some(), api_url.is_some());
                    if !kept.is_empty() {
                        tracing::warn!(
                            from = %state.ai.provider(),
                            to = %provider,
                            kept = ?kept,
                            "stored fields kept after provider change, pass --model/--api-url to replace"
                        );
                    }
                    state.ai.select_provider(provider);
                    if let Some(model) = model {
                        state.ai.model = model;
                    }
                    if let Some(token) = token {
                        state.ai.api_token = token;
                    }
                    if let Some(api_url) = api_url {
                        state.ai.api_url = api_url;
                    }
                })
                .await;
            session.save_ai_settings().await
        }
        Commands::SetEmail { channel } => {
            stored(session.load_email_settings().await, "email settings")?;
            session
                .edit(|state| {
                    state.tabs.switch(ConsoleTab::Email);
                    match channel {
                        EmailCommand::Sendcloud {
                            api_user,
                            api_key,
                            from_email,
                            from_name,
                        } => {
                            state.email.set_channel(EmailChannel::Sendcloud);
                            state.email.sendcloud.api_user = api_user;
                            state.email.sendcloud.api_key = api_key;
                            state.email.sendcloud.from_email = from_email;
                            state.email.sendcloud.from_name = from_name;
                        }
                        EmailCommand::Smtp {
                            server,
                            port,
                            account,
                            password,
                        } => {
                            state.email.set_channel(EmailChannel::Smtp);
                            state.email.smtp.smtp_server = server;
                            if let Some(port) = port {
                                state.email.smtp.smtp_port = port;
                            }
                            state.email.smtp.email_account = account;
                            state.email.smtp.email_password = password;
                        }
                    }
                })
                .await;
            session.save_email_settings().await
        }
        Commands::SetTemplate {
            subject,
            body,
            ai_analysis,
        } => {
            stored(session.load_email_template().await, "email template")?;
            session
                .edit(|state| {
                    state.tabs.switch(ConsoleTab::Template);
                    if let Some(subject) = subject {
                        state.template.subject = subject;
                    }
                    if let Some(body) = body {
                        state.template.body = body;
                    }
                    if let Some(ai_analysis) = ai_analysis {
                        state.template.ai_analysis = ai_analysis;
                    }
                })
                .await;
            session.save_email_template().await
        }
    }
}

/// Edits start from the stored settings; a failed load stops the command.
fn stored<T>(loaded: Result<Option<T>, ConsoleError>, category: &str) -> Result<(), ConsoleError> {
    match loaded {
        Ok(_) => Ok(()),
        Err(err) => {
            tracing::error!(category, "could not load stored settings: {err}");
            Err(err)
        }
    }
}

/// Fields that `select_provider` leaves as they are when switching to a
/// different provider without an explicit replacement.
fn kept_on_switch(
    form: &AiSettingsForm,
    provider: AiProvider,
    model_given: bool,
    api_url_given: bool,
) -> Vec<&'static str> {
    let mut kept = Vec::new();
    if provider == form.provider() {
        return kept;
    }
    if !model_given && !form.model.trim().is_empty() {
        kept.push("model");
    }
    if !api_url_given && !form.api_url.trim().is_empty() {
        kept.push("api_url");
    }
    kept
}
