//! Example: three-step password-reset wizard
//!
//! Walks the wizard through email → verify → new password against the
//! in-memory mock gateway.
//!
//! Run with: cargo run --example password_reset_demo -p vf_infra

use std::sync::Arc;

use anyhow::Result;

use vf_core::domain::entities::purpose::Purpose;
use vf_core::services::flows::PasswordResetWizard;
use vf_infra::MockCodeGateway;

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
    let mut wizard = PasswordResetWizard::new(gateway.clone());

    let outcome = wizard.begin(email).await;
    println!("step: {:?}", wizard.step());
    println!(
        "send: {} ({}s window)",
        outcome.message.or(outcome.error_message).unwrap_or_default(),
        wizard.remaining_seconds()
    );

    let code = gateway
        .issued_code(Purpose::PasswordReset, email)
        .expect("a code was issued");
    println!("code from inbox: {}", code);

    let outcome = wizard.verify(&code).await;
    println!("verify: {:?} -> {:?}", outcome.message, wizard.step());

    // too short: rejected locally, wizard stays put
    let outcome = wizard.set_new_password("short").await;
    if let Some(error) = outcome.error_message {
        println!("rejected password: {}", error);
    }

    let outcome = wizard.set_new_password("much-better-password").await;
    println!(
        "reset: {} (complete: {})",
        outcome.message.unwrap_or_default(),
        wizard.is_complete()
    );

    Ok(())
}
