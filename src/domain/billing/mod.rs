//! Billing module - earnings, payouts, and client payment tracking.
//!
//! Money amounts are whole currency units. Earnings are derived from
//! completed session time and never stored; payouts and client
//! payments are append-only records reconciled against the derived
//! figures.

use serde::{Deserialize, Serialize};

use crate::domain::booking::{Purchase, Session};
use crate::domain::expert::Expert;
use crate::domain::foundation::{
    ClientPaymentId, DomainError, ExpertId, PayoutId, Timestamp, UserId,
};

/// Record of money paid out to an expert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    id: PayoutId,
    expert_id: ExpertId,
    amount: i64,
    note: Option<String>,
    created_at: Timestamp,
}

impl Payout {
    /// Records a payout to an expert.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the amount is not positive
    pub fn new(
        id: PayoutId,
        expert_id: ExpertId,
        amount: i64,
        note: Option<String>,
        created_at: Timestamp,
    ) -> Result<Self, DomainError> {
        if amount <= 0 {
            return Err(DomainError::validation(
                "amount",
                "Payout amount must be positive",
            ));
        }
        Ok(Self {
            id,
            expert_id,
            amount,
            note: note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
            created_at,
        })
    }

    /// Returns the payout ID.
    pub fn id(&self) -> &PayoutId {
        &self.id
    }

    /// Returns the expert paid.
    pub fn expert_id(&self) -> &ExpertId {
        &self.expert_id
    }

    /// Returns the amount paid.
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Returns the optional note.
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Returns when the payout was recorded.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}

/// Record of money received from a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientPayment {
    id: ClientPaymentId,
    user_id: UserId,
    amount: i64,
    note: Option<String>,
    created_at: Timestamp,
}

impl ClientPayment {
    /// Records a payment received from a client.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the amount is not positive
    pub fn new(
        id: ClientPaymentId,
        user_id: UserId,
        amount: i64,
        note: Option<String>,
        created_at: Timestamp,
    ) -> Result<Self, DomainError> {
        if amount <= 0 {
            return Err(DomainError::validation(
                "amount",
                "Payment amount must be positive",
            ));
        }
        Ok(Self {
            id,
            user_id,
            amount,
            note: note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
            created_at,
        })
    }

    /// Returns the payment ID.
    pub fn id(&self) -> &ClientPaymentId {
        &self.id
    }

    /// Returns the paying client.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the amount received.
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Returns the optional note.
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Returns when the payment was recorded.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}

/// Rounds a currency or hour figure to 2 decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Hours an expert has delivered: time of non-cancelled sessions whose
/// start has passed. Sessions still in the future earn nothing yet.
pub fn expert_hours_completed(expert: &Expert, sessions: &[Session], now: Timestamp) -> f64 {
    let minutes: u32 = sessions
        .iter()
        .filter(|s| {
            s.expert_id() == expert.id()
                && !s.is_cancelled()
                && !s.start_instant().is_after(&now)
        })
        .map(|s| s.duration_min() as u32)
        .sum();
    round2(minutes as f64 / 60.0)
}

/// Amount an expert has earned: completed hours times the hourly rate.
pub fn expert_earned(expert: &Expert, sessions: &[Session], now: Timestamp) -> f64 {
    round2(expert_hours_completed(expert, sessions, now) * expert.hourly_rate() as f64)
}

/// Total already paid out to the expert.
pub fn expert_paid(payouts: &[Payout]) -> i64 {
    payouts.iter().map(Payout::amount).sum()
}

/// Amount still owed to the expert, floored at zero.
///
/// Overpayment never shows as a negative balance.
pub fn expert_due(expert: &Expert, sessions: &[Session], payouts: &[Payout], now: Timestamp) -> f64 {
    round2((expert_earned(expert, sessions, now) - expert_paid(payouts) as f64).max(0.0))
}

/// A client's billing position across all their purchases.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClientBilling {
    pub total_billed: i64,
    pub total_paid: i64,
    pub amount_due: i64,
    pub hours_purchased: f64,
    pub hours_remaining: f64,
    pub hours_used: f64,
}

/// Computes a client's billing summary from their purchases and
/// recorded payments.
pub fn client_billing(purchases: &[Purchase], payments: &[ClientPayment]) -> ClientBilling {
    let total_billed: i64 = purchases.iter().map(Purchase::amount).sum();
    let total_paid: i64 = payments.iter().map(ClientPayment::amount).sum();
    let purchased_min: u32 = purchases.iter().map(Purchase::package_minutes).sum();
    let remaining_min: u32 = purchases.iter().map(Purchase::minutes_remaining).sum();

    ClientBilling {
        total_billed,
        total_paid,
        amount_due: (total_billed - total_paid).max(0),
        hours_purchased: round2(purchased_min as f64 / 60.0),
        hours_remaining: round2(remaining_min as f64 / 60.0),
        hours_used: round2((purchased_min - remaining_min) as f64 / 60.0),
    }
}
