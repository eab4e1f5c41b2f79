//! Example: newsletter subscription confirmed by an email code
//!
//! Drives the subscribe flow against the in-memory mock gateway, playing
//! the user who reads the code from their inbox.
//!
//! Run with: cargo run --example newsletter_signup_demo -p vf_infra

use std::sync::Arc;

use anyhow::Result;

use vf_core::domain::entities::purpose::Purpose;
use vf_core::services::flow::{NewsletterFrequency, NewsletterOptions};
use vf_core::services::flows::{NewsletterAction, NewsletterFlow};
use vf_infra::MockCodeGateway;
use vf_shared::errors::localized_message;
use vf_shared::types::Language;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let email = "member@example.org";
    let gateway = Arc::new(MockCodeGateway::new());
    let mut flow = NewsletterFlow::new(
        gateway.clone(),
        NewsletterAction::Subscribe(NewsletterOptions {
            frequency: NewsletterFrequency::Weekly,
            categories: vec!["ctf".to_string(), "research".to_string()],
        }),
    );

    let outcome = flow.send_code(email).await;
    println!(
        "send: {}",
        outcome.message.or(outcome.error_message).unwrap_or_default()
    );
    println!("window: {}s", flow.remaining_seconds());

    // a wrong first guess: the window keeps running
    let outcome = flow.confirm("ZZZZZZ").await;
    if let Some(error) = outcome.error_message {
        println!("wrong guess: {}", localized_message(&error, Language::English));
        println!("            {}", localized_message(&error, Language::Korean));
    }

    // now "read the inbox" and confirm for real
    let code = gateway
        .issued_code(Purpose::NewsletterSubscribe, email)
        .expect("a code was issued");
    println!("code from inbox: {}", code);

    let outcome = flow.confirm(&code).await;
    println!(
        "confirm: {} (confirmed: {})",
        outcome.message.unwrap_or_default(),
        flow.is_confirmed()
    );

    Ok(())
}
