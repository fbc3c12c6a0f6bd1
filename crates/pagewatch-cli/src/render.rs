use pagewatch_console::ConsoleState;
use pagewatch_core::EmailTemplate;
use pagewatch_forms::{AiSettingsForm, ConsoleTab, EmailSettingsForm, TabBar};
use std::fmt::Write;

const UNSET: &str = "(未设置)";

pub(crate) fn render_state(state: &ConsoleState) -> String {
    let mut out = render_tabs(&state.tabs);
    out.push('\n');
    out.push_str(&render_ai(&state.ai));
    out.push('\n');
    out.push_str(&render_email(&state.email));
    out.push('\n');
    out.push_str(&render_template(&state.template));
    out
}

/// One line with every tab; the active one is starred.
pub(crate) fn render_tabs(tabs: &TabBar) -> String {
    let titles: Vec<String> = ConsoleTab::ALL
        .iter()
        .map(|tab| {
            if tabs.is_active(*tab) {
                format!("*{}", tab.title())
            } else {
                tab.title().to_string()
            }
        })
        .collect();
    format!("{}\n", titles.join("  "))
}

pub(crate) fn render_ai(form: &AiSettingsForm) -> String {
    let mut out = heading(ConsoleTab::Ai);
    field(&mut out, "provider", form.provider().as_str());
    field(&mut out, "model", &form.model);
    field(&mut out, "api_token", &mask(&form.api_token));
    field(&mut out, "api_url", &form.api_url);
    out
}

/// Only the group of the selected channel is shown.
pub(crate) fn render_email(form: &EmailSettingsForm) -> String {
    let mut out = heading(ConsoleTab::Email);
    field(&mut out, "channel", form.channel().as_str());
    let visible = form.visibility();
    if visible.sendcloud_group {
        field(&mut out, "api_user", &form.sendcloud.api_user);
        field(&mut out, "api_key", &mask(&form.sendcloud.api_key));
        field(&mut out, "from_email", &form.sendcloud.from_email);
        field(&mut out, "from_name", &form.sendcloud.from_name);
    }
    if visible.smtp_group {
        field(&mut out, "smtp_server", &form.smtp.smtp_server);
        field(&mut out, "smtp_port", &form.smtp.smtp_port);
        field(&mut out, "email_account", &form.smtp.email_account);
        field(&mut out, "email_password", &mask(&form.smtp.email_password));
    }
    out
}

pub(crate) fn render_template(template: &EmailTemplate) -> String {
    let mut out = heading(ConsoleTab::Template);
    field(&mut out, "subject", &template.subject);
    field(&mut out, "body", &template.body);
    field(&mut out, "ai_analysis", &template.ai_analysis);
    out
}

fn heading(tab: ConsoleTab) -> String {
    format!("[{}]\n", tab.title())
}

fn field(out: &mut String, label: &str, value: &str) {
    let value = if value.trim().is_empty() { UNSET } else { value };
    // Writing into a String cannot fail.
    let _ = writeln!(out, "  {label:<15} {value}");
}

/// Keeps the last four characters of longer secrets.
fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    match chars.len() {
        0 => String::new(),
        1..=8 => "*".repeat(8),
        len => {
            let tail: String = chars[len - 4..].iter().collect();
            format!("{}{tail}", "*".repeat(8))
        }
    }
}
