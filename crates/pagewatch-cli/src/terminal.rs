use pagewatch_console::ConsoleView;
use std::io::{self, BufRead, Write};
use tokio::runtime::{Handle, RuntimeFlavor};

/// Prints alerts to stdout and asks questions on stdin.
pub(crate) struct TerminalView {
    assume_yes: bool,
}

impl TerminalView {
    pub(crate) fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl ConsoleView for TerminalView {
    fn alert(&self, message: &str) {
        println!("{message}");
    }

    fn confirm(&self, question: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        print!("{question} [y/N] ");
        if let Err(err) = io::stdout().flush() {
            tracing::warn!("failed to flush prompt: {err}");
        }
        let mut answer = String::new();
        match off_runtime(|| io::stdin().lock().read_line(&mut answer)) {
            Ok(_) => is_yes(&answer),
            Err(err) => {
                tracing::warn!("failed to read confirmation: {err}");
                false
            }
        }
    }

    fn reload_task_list(&self) {
        println!("(任务列表已变更)");
    }
}

/// Run a blocking call without stalling the worker it was called on.
/// `block_in_place` only exists on the multi-threaded runtime.
fn off_runtime<R>(call: impl FnOnce() -> R) -> R {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(call)
        }
        _ => call(),
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
