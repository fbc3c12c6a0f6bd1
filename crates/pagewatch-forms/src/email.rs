use pagewatch_core::{
    resolve_email_defaults, EmailChannel, EmailSettings, SendcloudSettings, SmtpSettings,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmailFormVisibility {
    pub sendcloud_group: bool,
    pub smtp_group: bool,
}

/// Both channel groups stay in the form so switching back and forth does not
/// lose typing; only the active one is ever submitted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmailSettingsForm {
    channel: EmailChannel,
    pub sendcloud: SendcloudSettings,
    pub smtp: SmtpSettings,
}

impl EmailSettingsForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn channel(&self) -> EmailChannel {
        self.channel
    }

    pub fn set_channel(&mut self, channel: EmailChannel) {
        self.channel = channel;
        if let Some(port) = resolve_email_defaults(channel).smtp_port {
            if self.smtp.smtp_port.trim().is_empty() {
                self.smtp.smtp_port = port.to_string();
            }
        }
    }

    pub fn visibility(&self) -> EmailFormVisibility {
        EmailFormVisibility {
            sendcloud_group: self.channel == EmailChannel::Sendcloud,
            smtp_group: self.channel == EmailChannel::Smtp,
        }
    }

    /// Mirror loaded settings; the inactive group is blanked.
    pub fn apply_stored(&mut self, stored: &EmailSettings) {
        match stored {
            EmailSettings::Sendcloud(settings) => {
                self.sendcloud = settings.clone();
                self.smtp = SmtpSettings::default();
            }
            EmailSettings::Smtp(settings) => {
                self.smtp = settings.clone();
                self.sendcloud = SendcloudSettings::default();
            }
        }
        self.set_channel(stored.channel());
    }

    pub fn to_settings(&self) -> EmailSettings {
        match self.channel {
            EmailChannel::Sendcloud => EmailSettings::Sendcloud(self.sendcloud.clone()),
            EmailChannel::Smtp => EmailSettings::Smtp(self.smtp.clone()),
        }
    }
}
