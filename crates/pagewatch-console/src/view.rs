/// What the console needs from whatever front end renders it.
pub trait ConsoleView: Send + Sync {
    fn alert(&self, message: &str);

    /// Ask the operator a yes/no question. `false` aborts the pending action.
    ///
    /// Called from async code with no session lock held. Implementations that
    /// wait on the operator must move the wait off the runtime worker.
    fn confirm(&self, question: &str) -> bool;

    /// The set of monitoring tasks changed and any task listing is stale.
    fn reload_task_list(&self);
}
