//! Handlers for managing an expert's bookable time.

mod add_window;
mod clear_day_override;
mod clear_windows;
mod remove_window;
mod set_day_override;

pub use add_window::{AddWindowCommand, AddWindowHandler, AddWindowResult};
pub use clear_day_override::{ClearDayOverrideCommand, ClearDayOverrideHandler};
pub use clear_windows::{ClearWindowsCommand, ClearWindowsHandler};
pub use remove_window::{RemoveWindowCommand, RemoveWindowHandler, RemoveWindowResult};
pub use set_day_override::{SetDayOverrideCommand, SetDayOverrideHandler, SetDayOverrideResult};
