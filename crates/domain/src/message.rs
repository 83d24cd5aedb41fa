use crate::{alert::AlertThresholds, batch::NotificationBatch, card::Card};
use std::fmt::Write;

pub const ALERT_SUBJECT: &str = "ChurnVerse: Credit Card Inactivity Alert!";

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMessage {
    pub subject: String,
    pub body: String,
}

fn write_card_lines(body: &mut String, cards: &[Card]) {
    for card in cards {
        let last_used = card
            .last_used
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "never".into());
        let _ = writeln!(body, "- {} (Last used: {})", card.nickname, last_used);
    }
}

/// Formats the inactivity notification for a user. Warning and critical
/// cards are listed under their own headings, empty sections are left out.
pub fn render_message(
    username: &str,
    batch: &NotificationBatch,
    thresholds: &AlertThresholds,
) -> RenderedMessage {
    let mut body = format!(
        "Hi {},\n\nThis is an automated alert from ChurnVerse. Some of your cards require attention:\n",
        username
    );

    if !batch.warning_cards.is_empty() {
        let _ = writeln!(
            body,
            "\n--- Approaching Inactivity ({} days) ---",
            thresholds.warning_days()
        );
        write_card_lines(&mut body, &batch.warning_cards);
    }

    if !batch.critical_cards.is_empty() {
        let _ = writeln!(
            body,
            "\n--- CRITICAL: Inactive ({} days) ---",
            thresholds.critical_days()
        );
        write_card_lines(&mut body, &batch.critical_cards);
    }

    body.push_str(
        "\nPlease log in to your ChurnVerse dashboard to ping your cards.\n\n- The ChurnVerse Team",
    );

    RenderedMessage {
        subject: ALERT_SUBJECT.into(),
        body,
    }
}
