//! Booking module - the hour ledger.
//!
//! Owns purchases (hour packages) and sessions (booked slots) and the
//! invariants between them: hours never overdrawn, refunds capped at
//! the package size, no session mutation after cancellation.

mod purchase;
mod session;

pub use purchase::{Purchase, PACKAGE_HOURS};
pub use session::{MeetingLink, Session, SessionState, SessionStatus, CANCEL_NOTICE_HOURS};
