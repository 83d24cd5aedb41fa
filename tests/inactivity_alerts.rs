mod helpers;

use churnverse_api::{run_evaluation, ChurnverseError, RunEvaluationUseCase};
use helpers::{
    setup::spawn_app,
    utils::{create_card, create_user, date},
};

fn run_at(y: i32, m: u32, d: u32) -> RunEvaluationUseCase {
    RunEvaluationUseCase {
        reference_date: Some(date(y, m, d)),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_alerts_for_a_mixed_set_of_users() {
    let app = spawn_app();
    let ctx = &app.ctx;

    let alice = create_user(ctx, "alice").await;
    create_card(ctx, &alice, "Freedom Flex", Some(date(2024, 3, 3))).await;
    create_card(ctx, &alice, "Sapphire", Some(date(2023, 12, 4))).await;

    let bob = create_user(ctx, "bob").await;
    create_card(ctx, &bob, "Just missed", Some(date(2024, 3, 2))).await;
    create_card(ctx, &bob, "Never used", None).await;

    create_user(ctx, "carol").await;

    let res = run_evaluation(run_at(2024, 6, 1), ctx).await.unwrap();
    assert_eq!(res.users_scanned, 3);
    assert_eq!(res.users_alerted, 1);
    assert_eq!(res.cards_alerted, 2);
    assert_eq!(res.delivery_failures, 0);
    assert_eq!(res.lookup_failures, 0);

    let sent = app.sender.sent();
    assert_eq!(sent.len(), 1);
    let message = &sent[0];
    assert_eq!(message.to, "alice@example.com");
    assert_eq!(message.subject, "ChurnVerse: Credit Card Inactivity Alert!");
    assert!(message.body.starts_with("Hi alice,"));
    assert!(message
        .body
        .contains("--- Approaching Inactivity (90 days) ---\n- Freedom Flex (Last used: 2024-03-03)"));
    assert!(message
        .body
        .contains("--- CRITICAL: Inactive (180 days) ---\n- Sapphire (Last used: 2023-12-04)"));
}

#[tokio::test]
async fn test_warning_is_sent_once() {
    let app = spawn_app();
    let ctx = &app.ctx;
    let alice = create_user(ctx, "alice").await;
    create_card(ctx, &alice, "Freedom Flex", Some(date(2024, 3, 3))).await;

    // Day 89, 90 and 91 of inactivity
    for (m, d) in [(5, 31), (6, 1), (6, 2)] {
        run_evaluation(run_at(2024, m, d), ctx).await.unwrap();
    }

    assert_eq!(app.sender.sent().len(), 1);
}

#[tokio::test]
async fn test_summary_reports_failures() {
    let app = spawn_app();
    let ctx = &app.ctx;
    let alice = create_user(ctx, "alice").await;
    create_card(ctx, &alice, "Sapphire", Some(date(2023, 1, 1))).await;
    app.sender.fail_for("alice@example.com");

    let res = run_evaluation(run_at(2024, 6, 1), ctx).await.unwrap();
    assert_eq!(res.delivery_failures, 1);

    let summary = res.to_string();
    assert!(summary.contains("Card inactivity check for 2024-06-01"));
    assert!(summary.contains("Users scanned: 1"));
    assert!(summary.contains("Alerts sent: 0"));
    assert!(summary.contains("Delivery failures: 1"));
    assert!(!summary.contains("All clear!"));
}

#[tokio::test]
async fn test_invalid_thresholds_are_a_configuration_error() {
    let app = spawn_app();
    let usecase = RunEvaluationUseCase {
        warning_days: Some(0),
        ..Default::default()
    };
    let res = run_evaluation(usecase, &app.ctx).await;
    assert!(matches!(res, Err(ChurnverseError::InvalidConfiguration(_))));
}
