mod address;
mod ai;
mod email;
mod error;
mod tab;
mod task;

pub use address::{AddressList, AddressListId, AddressRow, RowId};
pub use ai::AiSettingsForm;
pub use email::{EmailFormVisibility, EmailSettingsForm};
pub use error::TaskFormError;
pub use tab::{ConsoleTab, TabBar};
pub use task::{TaskForm, TaskFormVisibility};
