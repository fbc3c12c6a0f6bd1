use clap::{Parser, Subcommand};
use pagewatch_core::{AiProvider, MonitorMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pagewatch")]
#[command(about = "Operator console for a PageWatch monitoring backend", long_about = None)]
pub(crate) struct Cli {
    /// Config file to use instead of the per-user one.
    #[arg(long, global = true, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,
    /// Backend root URL for this invocation.
    #[arg(long, global = true, value_name = "URL")]
    pub(crate) base_url: Option<String>,
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    #[command(about = "Load and print the stored settings")]
    Show,
    #[command(about = "Create a monitoring task")]
    AddTask {
        #[arg(long, default_value = "website")]
        mode: MonitorMode,
        #[arg(long, default_value = "")]
        url: String,
        /// Minutes between checks.
        #[arg(long, default_value = "")]
        interval: String,
        #[arg(long, default_value_t = false)]
        compare: bool,
        /// Requires `--compare`.
        #[arg(long, default_value_t = false, requires = "compare")]
        send_mail: bool,
        /// Requires `--send-mail`.
        #[arg(long = "to", value_name = "ADDRESS", requires = "send_mail")]
        to: Vec<String>,
        /// Requires `--send-mail`.
        #[arg(long, value_name = "ADDRESS", requires = "send_mail")]
        cc: Vec<String>,
    },
    #[command(about = "Pause a monitoring task")]
    Pause {
        #[arg(value_name = "ID")]
        id: String,
    },
    #[command(about = "Delete a monitoring task")]
    Delete {
        #[arg(value_name = "ID")]
        id: String,
        #[arg(short = 'y', long, default_value_t = false)]
        yes: bool,
    },
    #[command(
        about = "Update the AI analysis settings",
        long_about = "Update the AI analysis settings.\n\nThe stored model and API URL are kept when the provider changes; pass --model and --api-url to replace them."
    )]
    SetAi {
        #[arg(long)]
        provider: AiProvider,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        token: Option<String>,
        #[arg(long)]
        api_url: Option<String>,
    },
    #[command(about = "Update the notification email settings")]
    SetEmail {
        #[command(subcommand)]
        channel: EmailCommand,
    },
    #[command(about = "Update the notification email template")]
    SetTemplate {
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        body: Option<String>,
        #[arg(long)]
        ai_analysis: Option<String>,
    },
}

#[derive(Subcommand)]
pub(crate) enum EmailCommand {
    Sendcloud {
        #[arg(long)]
        api_user: String,
        #[arg(long)]
        api_key: String,
        #[arg(long)]
        from_email: String,
        #[arg(long, default_value = "")]
        from_name: String,
    },
    Smtp {
        #[arg(long)]
        server: String,
        /// Left empty the backend default is used.
        #[arg(long)]
        port: Option<String>,
        #[arg(long)]
        account: String,
        #[arg(long)]
        password: String,
    },
}
