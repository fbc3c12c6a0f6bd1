use crate::{AddressList, AddressListId, TaskFormError};
use pagewatch_core::{MonitorMode, TaskRequest};
use serde::{Deserialize, Serialize};

/// Which groups of the task form are on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskFormVisibility {
    pub website_input: bool,
    pub github_input: bool,
    pub rss_input: bool,
    pub send_mail_group: bool,
    pub mail_group: bool,
}

impl TaskFormVisibility {
    pub fn url_input(&self, mode: MonitorMode) -> bool {
        match mode {
            MonitorMode::Website => self.website_input,
            MonitorMode::Github => self.github_input,
            MonitorMode::Rss => self.rss_input,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskForm {
    mode: MonitorMode,
    website_url: String,
    github_url: String,
    rss_url: String,
    pub interval: String,
    compare_mode: bool,
    /// `None` while neither radio button is checked.
    send_mail: Option<bool>,
    recipients: AddressList,
    cc: AddressList,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self {
            mode: MonitorMode::default(),
            website_url: String::new(),
            github_url: String::new(),
            rss_url: String::new(),
            interval: String::new(),
            compare_mode: false,
            send_mail: None,
            recipients: AddressList::new(AddressListId::Recipients),
            cc: AddressList::new(AddressListId::Cc),
        }
    }
}

impl TaskForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> MonitorMode {
        self.mode
    }

    /// Other modes keep their typed URLs; only visibility changes.
    pub fn set_monitor_mode(&mut self, mode: MonitorMode) {
        self.mode = mode;
    }

    pub fn url(&self, mode: MonitorMode) -> &str {
        match mode {
            MonitorMode::Website => &self.website_url,
            MonitorMode::Github => &self.github_url,
            MonitorMode::Rss => &self.rss_url,
        }
    }

    pub fn set_url(&mut self, mode: MonitorMode, value: impl Into<String>) {
        let slot = match mode {
            MonitorMode::Website => &mut self.website_url,
            MonitorMode::Github => &mut self.github_url,
            MonitorMode::Rss => &mut self.rss_url,
        };
        *slot = value.into();
    }

    pub fn active_url(&self) -> &str {
        self.url(self.mode)
    }

    pub fn compare_mode(&self) -> bool {
        self.compare_mode
    }

    pub fn send_mail(&self) -> Option<bool> {
        self.send_mail
    }

    /// Turning compare mode off unchecks send-mail and empties both address
    /// lists. Repeating the current setting changes nothing.
    pub fn set_compare_mode(&mut self, enabled: bool) {
        if self.compare_mode && !enabled {
            self.send_mail = None;
            self.recipients.reset();
            self.cc.reset();
        }
        self.compare_mode = enabled;
    }

    pub fn set_send_mail(&mut self, enabled: bool) {
        if !self.compare_mode {
            tracing::debug!("send-mail selector is hidden while compare mode is off");
            return;
        }
        self.send_mail = Some(enabled);
    }

    pub fn addresses(&self, list: AddressListId) -> &AddressList {
        match list {
            AddressListId::Recipients => &self.recipients,
            AddressListId::Cc => &self.cc,
        }
    }

    pub fn addresses_mut(&mut self, list: AddressListId) -> &mut AddressList {
        match list {
            AddressListId::Recipients => &mut self.recipients,
            AddressListId::Cc => &mut self.cc,
        }
    }

    pub fn visibility(&self) -> TaskFormVisibility {
        TaskFormVisibility {
            website_input: self.mode == MonitorMode::Website,
            github_input: self.mode == MonitorMode::Github,
            rss_input: self.mode == MonitorMode::Rss,
            send_mail_group: self.compare_mode,
            mail_group: self.compare_mode && self.send_mail == Some(true),
        }
    }

    /// Checks run in order and the first failure wins.
    pub fn validate(&self) -> Result<TaskRequest, TaskFormError> {
        let url = self.active_url().trim();
        if url.is_empty() {
            return Err(TaskFormError::MissingUrl);
        }

        let interval = self.interval.trim();
        if interval.is_empty() {
            return Err(TaskFormError::MissingInterval);
        }
        match interval.parse::<u32>() {
            Ok(minutes) if minutes > 0 => {}
            _ => return Err(TaskFormError::InvalidInterval),
        }

        Ok(TaskRequest {
            mode: self.mode,
            url: url.to_string(),
            interval: interval.to_string(),
            compare_mode: self.compare_mode,
            send_mail: self.send_mail == Some(true),
            email_addresses: self.recipients.collect(),
            cc_addresses: self.cc.collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> TaskForm {
        let mut form = TaskForm::new();
        form.set_url(MonitorMode::Website, "https://example.com");
        form.interval = "10".to_string();
        form
    }

    #[test]
    fn exactly_one_url_input_is_visible() {
        let mut form = TaskForm::new();
        for mode in MonitorMode::ALL {
            form.set_monitor_mode(mode);
            let visibility = form.visibility();
            for other in MonitorMode::ALL {
                assert_eq!(visibility.url_input(other), other == mode);
            }
        }
    }

    #[test]
    fn switching_mode_keeps_other_inputs() {
        let mut form = filled_form();
        form.set_monitor_mode(MonitorMode::Rss);
        assert_eq!(form.active_url(), "");
        form.set_monitor_mode(MonitorMode::Website);
        assert_eq!(form.active_url(), "https://example.com");
    }

    #[test]
    fn compare_mode_off_clears_send_mail_and_recipients() {
        let mut form = filled_form();
        form.set_compare_mode(true);
        form.set_send_mail(true);
        form.addresses_mut(AddressListId::Recipients).push("a@x.com");
        form.addresses_mut(AddressListId::Cc).push("c@x.com");
        assert!(form.visibility().mail_group);

        form.set_compare_mode(false);
        let hidden = form.visibility();
        assert!(!hidden.send_mail_group);
        assert!(!hidden.mail_group);
        assert_eq!(form.send_mail(), None);

        form.set_compare_mode(true);
        assert!(form.visibility().send_mail_group);
        assert!(!form.visibility().mail_group);
        assert_eq!(form.send_mail(), None);
        assert!(form.addresses(AddressListId::Recipients).collect().is_empty());
        assert!(form.addresses(AddressListId::Cc).collect().is_empty());
    }

    #[test]
    fn send_mail_off_only_hides_recipients() {
        let mut form = filled_form();
        form.set_compare_mode(true);
        form.set_send_mail(true);
        form.addresses_mut(AddressListId::Recipients).push("a@x.com");

        form.set_send_mail(false);
        assert!(!form.visibility().mail_group);
        assert_eq!(
            form.addresses(AddressListId::Recipients).collect(),
            vec!["a@x.com"]
        );
    }

    #[test]
    fn send_mail_is_ignored_without_compare_mode() {
        let mut form = filled_form();
        form.set_send_mail(true);
        assert_eq!(form.send_mail(), None);

        let request = form.validate().expect("form is valid");
        assert!(!request.send_mail);
        assert!(!request.compare_mode);
    }

    #[test]
    fn reapplying_compare_mode_is_idempotent() {
        let mut form = filled_form();
        form.set_compare_mode(true);
        form.set_send_mail(true);
        let before = form.clone();
        form.set_compare_mode(true);
        assert_eq!(form, before);
    }

    #[test]
    fn repeated_compare_mode_off_keeps_rows() {
        let mut form = filled_form();
        form.set_compare_mode(true);
        form.set_compare_mode(false);
        let row = form.addresses(AddressListId::Recipients).rows()[0].id();
        let before = form.clone();

        form.set_compare_mode(false);

        assert_eq!(form, before);
        assert!(form
            .addresses_mut(AddressListId::Recipients)
            .set_value(row, "ops@example.com"));
    }

    #[test]
    fn validation_checks_url_before_interval() {
        let form = TaskForm::new();
        assert_eq!(form.validate(), Err(TaskFormError::MissingUrl));

        let mut form = TaskForm::new();
        form.set_url(MonitorMode::Github, "https://github.com/a/b");
        assert_eq!(form.validate(), Err(TaskFormError::MissingUrl));
        form.set_monitor_mode(MonitorMode::Github);
        assert_eq!(form.validate(), Err(TaskFormError::MissingInterval));

        form.interval = "soon".to_string();
        assert_eq!(form.validate(), Err(TaskFormError::InvalidInterval));
        form.interval = "0".to_string();
        assert_eq!(form.validate(), Err(TaskFormError::InvalidInterval));
    }

    #[test]
    fn validated_request_carries_collected_addresses() {
        let mut form = filled_form();
        form.set_compare_mode(true);
        form.set_send_mail(true);
        let recipients = form.addresses_mut(AddressListId::Recipients);
        let blank = recipients.rows()[0].id();
        recipients.set_value(blank, "a@x.com");
        recipients.push("  ");
        recipients.push("b@y.com");

        let request = form.validate().expect("form is valid");
        assert_eq!(request.mode, MonitorMode::Website);
        assert_eq!(request.url, "https://example.com");
        assert_eq!(request.interval, "10");
        assert!(request.send_mail);
        assert_eq!(request.email_addresses, vec!["a@x.com", "b@y.com"]);
        assert!(request.cc_addresses.is_empty());
    }
}
