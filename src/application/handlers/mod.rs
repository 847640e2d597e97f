//! Command handlers, grouped by the aggregate they orchestrate.

pub mod availability;
pub mod billing;
pub mod booking;
pub mod feedback;
