//! Application layer - command handlers and read-side queries.
//!
//! Handlers own the orchestration: load aggregates through ports, run
//! domain rules, persist results. Cross-aggregate race windows are
//! closed with keyed locks, not optimistic retries.

pub mod handlers;
pub mod queries;

mod lock_registry;

pub use lock_registry::LockRegistry;
