//! Inline email verification attached to the signup form

use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::entities::purpose::Purpose;
use crate::domain::entities::session::SessionStatus;
use crate::services::flow::{
    CodeGateway, FlowConfig, FlowSnapshot, SendOutcome, VerificationFlow, VerifyOutcome,
};

/// Email ownership check gating the signup form's submit button
///
/// The flow is bound to the form's email field: editing the field after a
/// code was sent resets the challenge, so a verified badge can never refer
/// to a different address than the one being submitted.
pub struct InlineEmailVerification<G: CodeGateway> {
    flow: VerificationFlow<G>,
}

impl<G: CodeGateway> InlineEmailVerification<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            flow: VerificationFlow::new(gateway, FlowConfig::for_purpose(Purpose::SignupVerify)),
        }
    }

    /// Track edits to the email field
    pub fn email_changed(&mut self, email: &str) {
        self.flow.bind_email(email);
    }

    /// Send (or resend) the verification code
    pub async fn send_code(&mut self, email: &str) -> SendOutcome {
        self.flow.request_code(email).await
    }

    /// Submit the entered code
    pub async fn verify(&mut self, code: &str) -> VerifyOutcome {
        self.flow.submit_code(code).await
    }

    /// Register a callback fired when the email turns verified, so the
    /// enclosing form can unlock its submit button
    pub fn on_verified(&mut self, callback: impl FnMut(&str) + Send + 'static) {
        self.flow.set_on_verified(callback);
    }

    /// Whether the enclosing form's submit may unlock
    pub fn is_verified(&self) -> bool {
        self.flow.is_verified()
    }

    pub fn status(&self) -> SessionStatus {
        self.flow.status()
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.flow.remaining_seconds()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.flow.last_error()
    }

    /// Observe state transitions for re-rendering
    pub fn subscribe(&self) -> watch::Receiver<FlowSnapshot> {
        self.flow.subscribe()
    }

    /// Observe the countdown for the resend/verify gate
    pub fn subscribe_countdown(&self) -> watch::Receiver<u64> {
        self.flow.subscribe_countdown()
    }
}
