//! Expert reference data.
//!
//! Experts are immutable reference records: the engine reads them to
//! derive availability and pricing but never creates or destroys them.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ExpertId, MINUTES_PER_DAY};

/// Consulting domain an expert belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpertDomain {
    Cybersecurity,
    TaxFinance,
    CoreBanking,
    Procurement,
    RegulatoryCompliance,
}

impl ExpertDomain {
    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            ExpertDomain::Cybersecurity => "Cybersecurity",
            ExpertDomain::TaxFinance => "Tax/Finance",
            ExpertDomain::CoreBanking => "Core Banking System",
            ExpertDomain::Procurement => "Procurement",
            ExpertDomain::RegulatoryCompliance => "Regulatory Compliance",
        }
    }
}

/// Expert profile with default weekly working pattern.
///
/// # Invariants
///
/// - `day_start < day_end`
/// - `workdays` holds weekday indices 0 (Sunday) through 6 (Saturday),
///   deduplicated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expert {
    id: ExpertId,
    name: String,
    domain: ExpertDomain,
    description: String,
    experience: String,
    /// Directory rating shown before any feedback exists.
    base_rating: f64,
    /// Hourly rate in currency minor-unit-free amount.
    hourly_rate: i64,
    /// Default working-day start, minute of day.
    day_start: u16,
    /// Default working-day end, minute of day.
    day_end: u16,
    /// Default weekly workdays, Sunday = 0.
    workdays: Vec<u8>,
}

impl Expert {
    /// Creates a new expert profile.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if hours are inverted or a weekday index is
    ///   out of range
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ExpertId,
        name: String,
        domain: ExpertDomain,
        description: String,
        experience: String,
        base_rating: f64,
        hourly_rate: i64,
        day_start: u16,
        day_end: u16,
        workdays: Vec<u8>,
    ) -> Result<Self, DomainError> {
        if day_start >= day_end || day_end > MINUTES_PER_DAY {
            return Err(DomainError::validation(
                "day_end",
                "Working hours must end after they start, within the day",
            ));
        }
        if workdays.iter().any(|d| *d > 6) {
            return Err(DomainError::validation(
                "workdays",
                "Weekday indices run 0 (Sunday) through 6 (Saturday)",
            ));
        }
        if hourly_rate <= 0 {
            return Err(DomainError::validation(
                "hourly_rate",
                "Hourly rate must be positive",
            ));
        }
        let mut workdays = workdays;
        workdays.sort_unstable();
        workdays.dedup();
        Ok(Self {
            id,
            name,
            domain,
            description,
            experience,
            base_rating,
            hourly_rate,
            day_start,
            day_end,
            workdays,
        })
    }

    /// Returns the expert ID.
    pub fn id(&self) -> &ExpertId {
        &self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the consulting domain.
    pub fn domain(&self) -> ExpertDomain {
        self.domain
    }

    /// Returns the short description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the experience blurb.
    pub fn experience(&self) -> &str {
        &self.experience
    }

    /// Returns the directory base rating.
    pub fn base_rating(&self) -> f64 {
        self.base_rating
    }

    /// Returns the hourly rate.
    pub fn hourly_rate(&self) -> i64 {
        self.hourly_rate
    }

    /// Returns the default day start (minute of day).
    pub fn day_start(&self) -> u16 {
        self.day_start
    }

    /// Returns the default day end (minute of day).
    pub fn day_end(&self) -> u16 {
        self.day_end
    }

    /// Returns the default weekly workdays.
    pub fn workdays(&self) -> &[u8] {
        &self.workdays
    }

    /// Checks whether the expert works on the given weekday by default.
    pub fn works_on(&self, weekday_index: u8) -> bool {
        self.workdays.contains(&weekday_index)
    }
}
