//! Tests for the newsletter flows

use std::sync::Arc;

use crate::domain::entities::purpose::Purpose;
use crate::services::flow::tests::mocks::MockGateway;
use crate::services::flow::{NewsletterFrequency, NewsletterOptions};
use crate::services::flows::{NewsletterAction, NewsletterFlow};

fn weekly_ctf() -> NewsletterOptions {
    NewsletterOptions {
        frequency: NewsletterFrequency::Weekly,
        categories: vec!["ctf".to_string(), "news".to_string()],
    }
}

#[tokio::test]
async fn test_subscribe_sends_options_with_the_code_request() {
    let gateway = Arc::new(MockGateway::new());
    let mut flow = NewsletterFlow::new(
        gateway.clone(),
        NewsletterAction::Subscribe(weekly_ctf()),
    );

    flow.send_code("member@example.org").await;

    let calls = gateway.send_calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, Purpose::NewsletterSubscribe);
    assert_eq!(calls[0].1.subscription.as_ref(), Some(&weekly_ctf()));
}

#[tokio::test]
async fn test_unsubscribe_sends_email_alone() {
    let gateway = Arc::new(MockGateway::new());
    let mut flow = NewsletterFlow::new(gateway.clone(), NewsletterAction::Unsubscribe);

    flow.send_code("member@example.org").await;

    let calls = gateway.send_calls.lock().unwrap();
    assert_eq!(calls[0].0, Purpose::NewsletterUnsubscribe);
    assert!(calls[0].1.subscription.is_none());
}

#[tokio::test]
async fn test_preference_change_confirms_end_to_end() {
    let gateway = Arc::new(MockGateway::new());
    let mut flow = NewsletterFlow::new(
        gateway.clone(),
        NewsletterAction::UpdatePreferences(weekly_ctf()),
    );

    let outcome = flow.send_code("member@example.org").await;
    assert!(outcome.sent);
    assert!(!flow.is_confirmed());

    let outcome = flow.confirm("A1B2C3").await;
    assert!(outcome.verified);
    assert!(flow.is_confirmed());

    let calls = gateway.verify_calls.lock().unwrap();
    assert_eq!(calls[0].0, Purpose::NewsletterPreferences);
}

#[tokio::test]
async fn test_action_maps_to_purpose() {
    assert_eq!(
        NewsletterAction::Subscribe(weekly_ctf()).purpose(),
        Purpose::NewsletterSubscribe
    );
    assert_eq!(
        NewsletterAction::UpdatePreferences(weekly_ctf()).purpose(),
        Purpose::NewsletterPreferences
    );
    assert_eq!(
        NewsletterAction::Unsubscribe.purpose(),
        Purpose::NewsletterUnsubscribe
    );
}
