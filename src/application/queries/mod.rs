//! Read-side queries. No query mutates state; everything is derived
//! fresh from the repositories at call time.

mod client_billing;
mod earnings;
mod expert_rating;
mod free_slots;
mod purchase_progress;

pub use client_billing::{ClientBillingQuery, ClientBillingQueryHandler};
pub use earnings::{EarningsQuery, EarningsQueryHandler, EarningsReport};
pub use expert_rating::{ExpertRatingQuery, ExpertRatingQueryHandler, ExpertRatingView};
pub use free_slots::{FreeSlotsQuery, FreeSlotsQueryHandler, SlotView};
pub use purchase_progress::{
    PurchaseProgress, PurchaseProgressQuery, PurchaseProgressQueryHandler,
};
