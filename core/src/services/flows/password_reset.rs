//! Three-step password-reset wizard

use std::sync::Arc;

use tracing;

use vf_shared::utils::validation::validators;

use crate::domain::entities::purpose::Purpose;
use crate::domain::entities::session::SessionStatus;
use crate::errors::{fallback, ValidationError};
use crate::services::flow::{
    CodeGateway, FlowConfig, SendOutcome, VerificationFlow, VerifyOutcome,
};

/// Minimum accepted length for a new password
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Wizard position as a tagged union
///
/// Later steps carry the data earlier steps established, so states like
/// "choosing a new password without a verified code" are unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetStep {
    /// Collecting the account email
    Email,
    /// A code is out; collecting the user's entry
    Verify { email: String },
    /// Code verified; collecting the new password
    Reset { email: String, code: String },
    /// Password changed
    Success,
}

/// Result of the terminal password-change call
#[derive(Debug, Clone)]
pub struct ResetOutcome {
    /// The password was changed; the wizard is complete
    pub done: bool,
    /// Gateway success notification, surfaced to the user
    pub message: Option<String>,
    /// User-facing failure message
    pub error_message: Option<String>,
}

impl ResetOutcome {
    fn done(message: String) -> Self {
        Self {
            done: true,
            message: Some(message),
            error_message: None,
        }
    }

    fn failure(error_message: String) -> Self {
        Self {
            done: false,
            message: None,
            error_message: Some(error_message),
        }
    }

    fn refused() -> Self {
        Self {
            done: false,
            message: None,
            error_message: None,
        }
    }
}

/// Password-reset wizard: email → verify → new password → success
///
/// The verification steps ride on a [`VerificationFlow`] with the
/// password-reset purpose (8-character code, 300-second window); the final
/// step is the gateway's terminal reset-password operation.
pub struct PasswordResetWizard<G: CodeGateway> {
    gateway: Arc<G>,
    flow: VerificationFlow<G>,
    step: ResetStep,
    reset_error: Option<String>,
}

impl<G: CodeGateway> PasswordResetWizard<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        let flow = VerificationFlow::new(
            gateway.clone(),
            FlowConfig::for_purpose(Purpose::PasswordReset),
        );
        Self {
            gateway,
            flow,
            step: ResetStep::Email,
            reset_error: None,
        }
    }

    pub fn step(&self) -> &ResetStep {
        &self.step
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.step, ResetStep::Success)
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.flow.remaining_seconds()
    }

    /// Last user-facing error from whichever step failed most recently
    pub fn last_error(&self) -> Option<&str> {
        self.reset_error.as_deref().or_else(|| self.flow.last_error())
    }

    /// Step 1: request the reset code (also used to resend from step 2)
    pub async fn begin(&mut self, email: &str) -> SendOutcome {
        match self.step {
            ResetStep::Email | ResetStep::Verify { .. } => {}
            _ => {
                tracing::warn!(
                    step = ?self.step,
                    event = "reset_begin_refused",
                    "begin is only valid while collecting or verifying the email"
                );
                return SendOutcome::refused();
            }
        }

        let outcome = self.flow.request_code(email).await;
        if outcome.sent {
            // the flow normalized and bound the address
            if let Some(bound) = self.flow.session().subject_email.clone() {
                self.step = ResetStep::Verify { email: bound };
            }
        } else if self.flow.status() == SessionStatus::Idle {
            // first send failed, or a resend under a different address reset
            // the session; fall back to collecting the email
            self.step = ResetStep::Email;
        }
        outcome
    }

    /// Step 2: submit the emailed code; advances to the password step
    pub async fn verify(&mut self, code: &str) -> VerifyOutcome {
        let email = match &self.step {
            ResetStep::Verify { email } => email.clone(),
            _ => {
                tracing::warn!(
                    step = ?self.step,
                    event = "reset_verify_refused",
                    "verify is only valid while a code is out"
                );
                return VerifyOutcome::refused();
            }
        };

        let outcome = self.flow.submit_code(code).await;
        if outcome.verified {
            self.step = ResetStep::Reset {
                email,
                code: self.flow.session().entered_code.clone(),
            };
        }
        outcome
    }

    /// Step 3: terminal reset-password call with the verified code
    pub async fn set_new_password(&mut self, new_password: &str) -> ResetOutcome {
        let (email, code) = match &self.step {
            ResetStep::Reset { email, code } => (email.clone(), code.clone()),
            _ => {
                tracing::warn!(
                    step = ?self.step,
                    event = "reset_confirm_refused",
                    "set_new_password is only valid after the code was verified"
                );
                return ResetOutcome::refused();
            }
        };

        self.reset_error = None;

        if !validators::is_acceptable_password(new_password, MIN_PASSWORD_LENGTH) {
            let message = ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            }
            .to_string();
            self.reset_error = Some(message.clone());
            return ResetOutcome::failure(message);
        }

        match self
            .gateway
            .reset_password(&email, &code, new_password)
            .await
        {
            Ok(reply) if reply.success.unwrap_or(true) => {
                self.step = ResetStep::Success;
                tracing::info!(event = "password_reset_complete", "Password changed");
                ResetOutcome::done(reply.message)
            }
            Ok(reply) => {
                // 2xx with an explicit failure flag
                let message = if reply.message.is_empty() {
                    fallback::RESET_FAILED.to_string()
                } else {
                    reply.message
                };
                self.reset_error = Some(message.clone());
                tracing::warn!(
                    event = "password_reset_declined",
                    "Gateway declined the password change"
                );
                ResetOutcome::failure(message)
            }
            Err(err) => {
                let message = err.user_message(fallback::RESET_FAILED);
                self.reset_error = Some(message.clone());
                tracing::warn!(
                    error = %err,
                    event = "password_reset_failed",
                    "Password change failed"
                );
                ResetOutcome::failure(message)
            }
        }
    }

    /// Abandon the current attempt and start over from the email step
    pub fn restart(&mut self) {
        self.flow.reset();
        self.reset_error = None;
        self.step = ResetStep::Email;
    }
}
