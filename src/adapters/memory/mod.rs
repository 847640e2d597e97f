//! In-memory adapters backed by `tokio::sync::RwLock` maps.
//!
//! The reference storage tier: tests and embedding callers run against
//! these; a database-backed tier would implement the same ports.

mod availability;
mod billing;
mod clock;
mod expert_catalog;
mod feedback_repository;
mod purchase_repository;
mod session_repository;

pub use availability::{InMemoryDayOverrideRepository, InMemoryWindowSetRepository};
pub use billing::{InMemoryClientPaymentRepository, InMemoryPayoutRepository};
pub use clock::{FixedClock, SystemClock};
pub use expert_catalog::InMemoryExpertCatalog;
pub use feedback_repository::InMemoryFeedbackRepository;
pub use purchase_repository::InMemoryPurchaseRepository;
pub use session_repository::InMemorySessionRepository;
