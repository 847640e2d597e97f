//! Handlers for recording money movements.

mod record_client_payment;
mod record_payout;

pub use record_client_payment::{
    RecordClientPaymentCommand, RecordClientPaymentHandler, RecordClientPaymentResult,
};
pub use record_payout::{RecordPayoutCommand, RecordPayoutHandler, RecordPayoutResult};
