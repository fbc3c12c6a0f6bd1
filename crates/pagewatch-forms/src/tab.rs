use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsoleTab {
    #[default]
    Tasks,
    Ai,
    Email,
    Template,
}

impl ConsoleTab {
    pub const ALL: [ConsoleTab; 4] = [
        ConsoleTab::Tasks,
        ConsoleTab::Ai,
        ConsoleTab::Email,
        ConsoleTab::Template,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ConsoleTab::Tasks => "监控任务",
            ConsoleTab::Ai => "AI 设置",
            ConsoleTab::Email => "邮件设置",
            ConsoleTab::Template => "邮件模板",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TabBar {
    active: ConsoleTab,
}

impl TabBar {
    pub fn active(&self) -> ConsoleTab {
        self.active
    }

    pub fn switch(&mut self, tab: ConsoleTab) {
        self.active = tab;
    }

    pub fn is_active(&self, tab: ConsoleTab) -> bool {
        self.active == tab
    }
}
