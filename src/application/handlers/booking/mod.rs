//! Handlers for the purchase-and-book lifecycle.

mod book_slots;
mod cancel_session;
mod purchase_package;

pub use book_slots::{BookSlotsCommand, BookSlotsHandler, BookSlotsResult};
pub use cancel_session::{
    CancelActor, CancelSessionCommand, CancelSessionHandler, CancelSessionResult,
};
pub use purchase_package::{
    PurchasePackageCommand, PurchasePackageHandler, PurchasePackageResult,
};
