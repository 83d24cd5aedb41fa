use crate::{
    alert::{classify, AlertThresholds, AlertTier},
    card::Card,
};
use chrono::NaiveDate;

/// The `Card`s of a single `User` that should be part of one
/// inactivity notification.
///
/// Never empty when obtained through `build_batch` or `retain`.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationBatch {
    pub warning_cards: Vec<Card>,
    pub critical_cards: Vec<Card>,
}

impl NotificationBatch {
    pub fn card_count(&self) -> usize {
        self.warning_cards.len() + self.critical_cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.card_count() == 0
    }

    /// All cards in the batch together with the tier they are alerted for
    pub fn tiered_cards(&self) -> impl Iterator<Item = (&Card, AlertTier)> {
        self.warning_cards
            .iter()
            .map(|c| (c, AlertTier::Warning))
            .chain(self.critical_cards.iter().map(|c| (c, AlertTier::Critical)))
    }

    /// Keeps only the cards for which `keep` returns true. Returns `None`
    /// if nothing is left to notify about.
    pub fn retain<F>(mut self, mut keep: F) -> Option<Self>
    where
        F: FnMut(&Card, AlertTier) -> bool,
    {
        self.warning_cards.retain(|c| keep(c, AlertTier::Warning));
        self.critical_cards.retain(|c| keep(c, AlertTier::Critical));
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

/// Groups the cards of one user by alert tier, keeping the order they were
/// given in. Returns `None` when none of the cards should be alerted on.
pub fn build_batch(
    user_cards: Vec<Card>,
    reference_date: NaiveDate,
    thresholds: &AlertThresholds,
) -> Option<NotificationBatch> {
    let mut batch = NotificationBatch {
        warning_cards: Vec::new(),
        critical_cards: Vec::new(),
    };

    for card in user_cards {
        match classify(&card, reference_date, thresholds) {
            AlertTier::Warning => batch.warning_cards.push(card),
            AlertTier::Critical => batch.critical_cards.push(card),
            AlertTier::None => continue,
        }
    }

    if batch.is_empty() {
        None
    } else {
        Some(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ID;
    use chrono::Duration;

    fn reference_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn card(nickname: &str, inactive_days: Option<i64>) -> Card {
        let mut card = Card::new(ID::new(), nickname.into(), 0).unwrap();
        card.last_used = inactive_days.map(|d| reference_date() - Duration::days(d));
        card
    }

    fn nicknames(cards: &[Card]) -> Vec<&str> {
        cards.iter().map(|c| c.nickname.as_str()).collect()
    }

    #[test]
    fn no_batch_without_cards() {
        assert!(build_batch(vec![], reference_date(), &AlertThresholds::default()).is_none());
    }

    #[test]
    fn no_batch_when_no_card_qualifies() {
        let cards = vec![
            card("Never used", None),
            card("Fresh", Some(2)),
            card("Past warning", Some(91)),
        ];
        assert!(build_batch(cards, reference_date(), &AlertThresholds::default()).is_none());
    }

    #[test]
    fn partitions_cards_by_tier_in_supplied_order() {
        let cards = vec![
            card("Old 1", Some(400)),
            card("Warn 1", Some(90)),
            card("Fresh", Some(10)),
            card("Old 2", Some(180)),
            card("Warn 2", Some(90)),
            card("Never used", None),
        ];
        let batch = build_batch(cards, reference_date(), &AlertThresholds::default())
            .expect("A batch to be created");

        assert_eq!(nicknames(&batch.warning_cards), vec!["Warn 1", "Warn 2"]);
        assert_eq!(nicknames(&batch.critical_cards), vec!["Old 1", "Old 2"]);
        assert_eq!(batch.card_count(), 4);
    }

    #[test]
    fn one_batch_for_warning_and_critical_cards() {
        let cards = vec![card("Warn", Some(90)), card("Old", Some(200))];
        let batch = build_batch(cards, reference_date(), &AlertThresholds::default()).unwrap();
        assert_eq!(batch.warning_cards.len(), 1);
        assert_eq!(batch.critical_cards.len(), 1);

        let tiers: Vec<_> = batch.tiered_cards().map(|(_, tier)| tier).collect();
        assert_eq!(tiers, vec![AlertTier::Warning, AlertTier::Critical]);
    }

    #[test]
    fn retain_drops_empty_batches() {
        let cards = vec![card("Warn", Some(90)), card("Old", Some(200))];
        let batch = build_batch(cards, reference_date(), &AlertThresholds::default()).unwrap();

        let critical_only = batch
            .clone()
            .retain(|_, tier| tier == AlertTier::Critical)
            .unwrap();
        assert!(critical_only.warning_cards.is_empty());
        assert_eq!(nicknames(&critical_only.critical_cards), vec!["Old"]);

        assert!(batch.retain(|_, _| false).is_none());
    }
}
