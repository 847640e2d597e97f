//! Domain layer - aggregates, value objects, and pure business rules.

pub mod availability;
pub mod billing;
pub mod booking;
pub mod expert;
pub mod feedback;
pub mod foundation;
