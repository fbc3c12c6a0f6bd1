mod error;
mod gate;
mod messages;
mod persist;
mod session;
mod sync;
mod tasks;
mod view;

#[cfg(test)]
mod test_support;

pub use error::ConsoleError;
pub use gate::{RequestGate, Ticket};
pub use session::{ConsoleSession, ConsoleState};
pub use tasks::TaskLedger;
pub use view::ConsoleView;
