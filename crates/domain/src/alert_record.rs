use crate::{alert::AlertTier, shared::entity::ID};
use chrono::NaiveDate;

/// Remembers the last inactivity alert that was delivered for a `Card`.
///
/// Only written after the notification was handed off successfully, which
/// makes running the alerts job several times on the same day idempotent.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertRecord {
    pub card_id: ID,
    pub tier: AlertTier,
    /// The reference date of the run that sent the alert
    pub notified_on: NaiveDate,
}

impl AlertRecord {
    pub fn new(card_id: ID, tier: AlertTier, notified_on: NaiveDate) -> Self {
        Self {
            card_id,
            tier,
            notified_on,
        }
    }

    /// Whether an alert of `tier` at `reference_date` was already delivered
    pub fn covers(&self, tier: AlertTier, reference_date: NaiveDate) -> bool {
        self.tier == tier && self.notified_on == reference_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_same_tier_on_same_day_only() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let next_day = day.succ_opt().unwrap();
        let record = AlertRecord::new(ID::new(), AlertTier::Critical, day);

        assert!(record.covers(AlertTier::Critical, day));
        assert!(!record.covers(AlertTier::Critical, next_day));
        assert!(!record.covers(AlertTier::Warning, day));
    }
}
