//! Purchase aggregate - a prepaid package of consulting hours.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, ErrorCode, ExpertId, PurchaseId, Timestamp, UserId,
};

/// Package sizes offered for purchase, in hours.
pub const PACKAGE_HOURS: [u32; 4] = [1, 4, 10, 20];

/// Prepaid block of consulting hours with one expert.
///
/// The ledger runs on integer minutes so the conservation invariant is
/// exact; hours appear only at presentation boundaries.
///
/// # Invariants
///
/// - `0 <= minutes_remaining <= package_minutes` at all times
/// - `package_minutes` and `amount` are fixed at creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    id: PurchaseId,
    user_id: UserId,
    expert_id: ExpertId,
    package_minutes: u32,
    minutes_remaining: u32,
    /// rate x package hours, recorded but never charged here.
    amount: i64,
    created_at: Timestamp,
}

impl Purchase {
    /// Creates a purchase of one of the offered package sizes.
    ///
    /// Purchasing itself always succeeds; no payment gateway failure is
    /// modeled.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if `package_hours` is not an offered size
    pub fn new(
        id: PurchaseId,
        user_id: UserId,
        expert_id: ExpertId,
        package_hours: u32,
        hourly_rate: i64,
        created_at: Timestamp,
    ) -> Result<Self, DomainError> {
        if !PACKAGE_HOURS.contains(&package_hours) {
            return Err(DomainError::validation(
                "package_hours",
                format!("Offered packages are {:?} hours", PACKAGE_HOURS),
            ));
        }
        let package_minutes = package_hours * 60;
        Ok(Self {
            id,
            user_id,
            expert_id,
            package_minutes,
            minutes_remaining: package_minutes,
            amount: hourly_rate * package_hours as i64,
            created_at,
        })
    }

    /// Reconstitute a purchase from persistence (no validation).
    pub fn reconstitute(
        id: PurchaseId,
        user_id: UserId,
        expert_id: ExpertId,
        package_minutes: u32,
        minutes_remaining: u32,
        amount: i64,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            expert_id,
            package_minutes,
            minutes_remaining,
            amount,
            created_at,
        }
    }

    /// Returns the purchase ID.
    pub fn id(&self) -> &PurchaseId {
        &self.id
    }

    /// Returns the purchasing client.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the expert the hours are booked against.
    pub fn expert_id(&self) -> &ExpertId {
        &self.expert_id
    }

    /// Returns the package size in minutes.
    pub fn package_minutes(&self) -> u32 {
        self.package_minutes
    }

    /// Returns the package size in hours.
    pub fn package_hours(&self) -> u32 {
        self.package_minutes / 60
    }

    /// Returns the unspent minutes.
    pub fn minutes_remaining(&self) -> u32 {
        self.minutes_remaining
    }

    /// Remaining hours for display, rounded to 2 decimal places.
    pub fn hours_remaining(&self) -> f64 {
        (self.minutes_remaining as f64 / 60.0 * 100.0).round() / 100.0
    }

    /// Returns the recorded purchase amount.
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Returns when the purchase was made.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Whether every purchased minute has been spent.
    pub fn is_exhausted(&self) -> bool {
        self.minutes_remaining == 0
    }

    /// Validates that the given user owns this purchase.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the user is not the purchaser
    pub fn authorize(&self, user_id: &UserId) -> Result<(), DomainError> {
        if &self.user_id == user_id {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "Purchase does not belong to user",
            ))
        }
    }

    /// Spends minutes from the package.
    ///
    /// # Errors
    ///
    /// - `InsufficientHours` if the package cannot cover the deduction
    pub fn deduct(&mut self, minutes: u32) -> Result<(), DomainError> {
        if minutes > self.minutes_remaining {
            return Err(DomainError::new(
                ErrorCode::InsufficientHours,
                "Not enough hours remaining to book all selected slots",
            ));
        }
        self.minutes_remaining -= minutes;
        Ok(())
    }

    /// Returns minutes to the package, capped at the package size.
    ///
    /// The cap protects against double-refund drifting the balance
    /// above what was purchased.
    pub fn refund(&mut self, minutes: u32) {
        self.minutes_remaining = (self.minutes_remaining + minutes).min(self.package_minutes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> UserId {
        UserId::new("client-1").unwrap()
    }

    fn one_hour_purchase() -> Purchase {
        Purchase::new(
            PurchaseId::new(),
            test_user(),
            ExpertId::new(),
            1,
            1500,
            Timestamp::now(),
        )
        .unwrap()
    }

    #[test]
    fn new_purchase_records_amount_and_full_balance() {
        let p = Purchase::new(
            PurchaseId::new(),
            test_user(),
            ExpertId::new(),
            4,
            1200,
            Timestamp::now(),
        )
        .unwrap();

        assert_eq!(p.amount(), 4800);
        assert_eq!(p.package_minutes(), 240);
        assert_eq!(p.minutes_remaining(), 240);
        assert_eq!(p.hours_remaining(), 4.0);
    }

    #[test]
    fn rejects_unoffered_package_size() {
        let result = Purchase::new(
            PurchaseId::new(),
            test_user(),
            ExpertId::new(),
            3,
            1500,
            Timestamp::now(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn deduct_spends_minutes() {
        let mut p = one_hour_purchase();
        p.deduct(30).unwrap();
        assert_eq!(p.minutes_remaining(), 30);
        assert_eq!(p.hours_remaining(), 0.5);
        p.deduct(30).unwrap();
        assert!(p.is_exhausted());
    }

    #[test]
    fn deduct_rejects_overdraw() {
        let mut p = one_hour_purchase();
        p.deduct(60).unwrap();

        let result = p.deduct(30);
        assert!(matches!(
            result,
            Err(DomainError { code: ErrorCode::InsufficientHours, .. })
        ));
        assert_eq!(p.minutes_remaining(), 0);
    }

    #[test]
    fn refund_restores_minutes() {
        let mut p = one_hour_purchase();
        p.deduct(60).unwrap();
        p.refund(30);
        assert_eq!(p.minutes_remaining(), 30);
    }

    #[test]
    fn refund_is_capped_at_package_size() {
        let mut p = one_hour_purchase();
        p.deduct(30).unwrap();
        p.refund(90);
        assert_eq!(p.minutes_remaining(), p.package_minutes());
    }

    #[test]
    fn authorize_rejects_other_users() {
        let p = one_hour_purchase();
        assert!(p.authorize(&test_user()).is_ok());

        let other = UserId::new("client-2").unwrap();
        let result = p.authorize(&other);
        assert!(matches!(
            result,
            Err(DomainError { code: ErrorCode::Forbidden, .. })
        ));
    }

    #[test]
    fn conservation_holds_under_deduct_refund_cycles() {
        let mut p = Purchase::new(
            PurchaseId::new(),
            test_user(),
            ExpertId::new(),
            10,
            1000,
            Timestamp::now(),
        )
        .unwrap();

        let mut spent = 0u32;
        for _ in 0..8 {
            p.deduct(30).unwrap();
            spent += 30;
        }
        p.refund(30);
        spent -= 30;

        assert_eq!(p.minutes_remaining() + spent, p.package_minutes());
    }
}
