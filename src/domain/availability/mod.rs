//! Availability module - layered sources of bookable time.
//!
//! Three layers feed the resolver, highest priority first: explicit
//! window sets declared for a single date, per-date overrides of the
//! default working hours, and the expert's default weekly pattern.

mod day_override;
mod resolver;
mod window;

pub use day_override::DayOverride;
pub use resolver::{free_slots, Slot};
pub use window::{TimeWindow, WindowSet};
