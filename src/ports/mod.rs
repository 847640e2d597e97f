//! Ports - boundary traits the application layer depends on.
//!
//! Adapters implement these; handlers hold them as `Arc<dyn Trait>`.
//! Every port is object safe and `Send + Sync` so handlers can be
//! shared across tasks.

mod availability_repository;
mod billing_repository;
mod clock;
mod expert_catalog;
mod feedback_repository;
mod purchase_repository;
mod session_repository;

pub use availability_repository::{DayOverrideRepository, WindowSetRepository};
pub use billing_repository::{ClientPaymentRepository, PayoutRepository};
pub use clock::Clock;
pub use expert_catalog::ExpertCatalog;
pub use feedback_repository::FeedbackRepository;
pub use purchase_repository::PurchaseRepository;
pub use session_repository::SessionRepository;
