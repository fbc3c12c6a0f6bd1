use crate::ConsoleError;

pub(crate) const DELETE_CONFIRMATION: &str = "确定要删除这个任务吗？";
pub(crate) const TASK_ALREADY_DELETED: &str = "任务已删除，无法继续操作！";
const UNKNOWN_ERROR: &str = "未知错误";

/// A user-triggered action whose result is reported back to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    CreateTask,
    PauseTask,
    DeleteTask,
    SaveAi,
    SaveEmail,
    SaveTemplate,
}

impl Action {
    fn label(&self) -> &'static str {
        match self {
            Action::CreateTask => "添加任务",
            Action::PauseTask => "暂停任务",
            Action::DeleteTask => "删除任务",
            Action::SaveAi => "AI 设置保存",
            Action::SaveEmail => "邮件设置保存",
            Action::SaveTemplate => "邮件模板保存",
        }
    }

    pub(crate) fn success(&self) -> &'static str {
        match self {
            Action::CreateTask => "任务添加成功！",
            Action::PauseTask => "任务已暂停",
            Action::DeleteTask => "任务已删除",
            Action::SaveAi => "AI 设置保存成功",
            Action::SaveEmail => "邮件设置保存成功",
            Action::SaveTemplate => "邮件模板保存成功！",
        }
    }

    fn is_task(&self) -> bool {
        matches!(
            self,
            Action::CreateTask | Action::PauseTask | Action::DeleteTask
        )
    }

    pub(crate) fn failure(&self, err: &ConsoleError) -> String {
        match err {
            ConsoleError::Validation(message) => message.clone(),
            ConsoleError::Application(message) => format!("{}失败：{message}", self.label()),
            ConsoleError::Network(_) if self.is_task() => {
                format!("{}失败，请检查网络连接！", self.label())
            }
            ConsoleError::Network(source) => format!("保存失败: {source}"),
        }
    }
}

pub(crate) fn rejection(message: Option<String>) -> ConsoleError {
    ConsoleError::Application(message.unwrap_or_else(|| UNKNOWN_ERROR.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagewatch_api::ApiError;

    #[test]
    fn network_failures_read_differently_from_rejections() {
        let offline = ConsoleError::Network(ApiError::Timeout);
        assert_eq!(
            Action::PauseTask.failure(&offline),
            "暂停任务失败，请检查网络连接！"
        );
        assert_eq!(
            Action::SaveEmail.failure(&offline),
            "保存失败: request timed out"
        );

        let rejected = ConsoleError::Application("任务不存在".to_string());
        assert_eq!(Action::PauseTask.failure(&rejected), "暂停任务失败：任务不存在");
    }

    #[test]
    fn missing_rejection_message_is_unknown_error() {
        let err = rejection(None);
        assert_eq!(Action::SaveAi.failure(&err), "AI 设置保存失败：未知错误");
    }
}
