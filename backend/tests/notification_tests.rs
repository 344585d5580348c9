//! Customer notification tests

mod common;

use std::sync::Arc;

use common::{customer, email_config, FailingMailer, InMemoryOrderRepository, RecordingMailer};
use robot_factory_backend::services::notification::{
    compose_availability_message, NotificationError,
};
use robot_factory_backend::services::NotificationDispatcher;
use shared::Language;

fn dispatcher(
    orders: &InMemoryOrderRepository,
    mailer: Arc<RecordingMailer>,
) -> NotificationDispatcher<InMemoryOrderRepository> {
    NotificationDispatcher::new(orders.clone(), mailer, &email_config(), Language::Russian)
}

#[tokio::test]
async fn test_no_orders_sends_nothing() {
    let orders = InMemoryOrderRepository::new();
    let mailer = Arc::new(RecordingMailer::default());

    let sent = dispatcher(&orders, mailer.clone())
        .notify_new_robot("R2", "D2")
        .await
        .unwrap();

    assert_eq!(sent, 0);
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn test_one_email_to_distinct_customers() {
    let orders = InMemoryOrderRepository::new();
    let alice = customer("alice@example.com");
    let bob = customer("bob@example.com");
    orders.place(&alice, "R2", "D2");
    orders.place(&bob, "R2", "D2");
    orders.place(&alice, "R2", "D2");

    let mailer = Arc::new(RecordingMailer::default());
    let sent = dispatcher(&orders, mailer.clone())
        .notify_new_robot("R2", "D2")
        .await
        .unwrap();

    assert_eq!(sent, 2);
    let messages = mailer.sent();
    assert_eq!(messages.len(), 1);

    let message = &messages[0];
    assert_eq!(message.from, "admin@r4c.example");
    assert_eq!(message.to, vec!["alice@example.com", "bob@example.com"]);

    let (subject, body) = compose_availability_message(Language::Russian, "R2", "D2");
    assert_eq!(message.subject, subject);
    assert_eq!(message.body, body);
}

#[tokio::test]
async fn test_duplicate_addresses_ignore_case() {
    let orders = InMemoryOrderRepository::new();
    orders.place(&customer("Carol@Example.com"), "X5", "LT");
    orders.place(&customer("carol@example.com"), "X5", "LT");

    let mailer = Arc::new(RecordingMailer::default());
    let sent = dispatcher(&orders, mailer.clone())
        .notify_new_robot("X5", "LT")
        .await
        .unwrap();

    assert_eq!(sent, 1);
    assert_eq!(mailer.sent()[0].to, vec!["Carol@Example.com"]);
}

#[tokio::test]
async fn test_other_robots_are_ignored() {
    let orders = InMemoryOrderRepository::new();
    orders.place(&customer("alice@example.com"), "R2", "A1");
    orders.place(&customer("bob@example.com"), "X5", "D2");
    orders.place(&customer("dave@example.com"), "R2", "D2");

    let mailer = Arc::new(RecordingMailer::default());
    let sent = dispatcher(&orders, mailer.clone())
        .notify_new_robot("R2", "D2")
        .await
        .unwrap();

    assert_eq!(sent, 1);
    assert_eq!(mailer.sent()[0].to, vec!["dave@example.com"]);
}

#[tokio::test]
async fn test_invalid_addresses_are_skipped() {
    let orders = InMemoryOrderRepository::new();
    orders.place(&customer("not-an-email"), "R2", "D2");

    let mailer = Arc::new(RecordingMailer::default());
    let sent = dispatcher(&orders, mailer.clone())
        .notify_new_robot("R2", "D2")
        .await
        .unwrap();

    assert_eq!(sent, 0);
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn test_english_message() {
    let orders = InMemoryOrderRepository::new();
    orders.place(&customer("alice@example.com"), "R2", "D2");

    let mailer = Arc::new(RecordingMailer::default());
    NotificationDispatcher::new(orders, mailer.clone(), &email_config(), Language::English)
        .notify_new_robot("R2", "D2")
        .await
        .unwrap();

    let message = &mailer.sent()[0];
    assert_eq!(message.subject, "The robot you asked about is available");
    assert!(message.body.contains("model R2, version D2"));
}

#[tokio::test]
async fn test_transport_failure_is_returned() {
    let orders = InMemoryOrderRepository::new();
    orders.place(&customer("alice@example.com"), "R2", "D2");

    let result = NotificationDispatcher::new(
        orders,
        Arc::new(FailingMailer),
        &email_config(),
        Language::Russian,
    )
    .notify_new_robot("R2", "D2")
    .await;

    assert!(matches!(result, Err(NotificationError::Transport(_))));
}
