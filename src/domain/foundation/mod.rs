//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, time utilities, and error types
//! that form the vocabulary of the booking engine.

mod date_key;
mod errors;
mod ids;
mod minute;
mod rating;
mod timestamp;

pub use date_key::DateKey;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    ClientPaymentId, ExpertId, FeedbackId, PayoutId, PurchaseId, SessionId, UserId,
};
pub use minute::{overlaps, MinuteOfDay, MINUTES_PER_DAY, SLOT_MIN};
pub use rating::Rating;
pub use timestamp::Timestamp;
