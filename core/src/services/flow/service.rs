//! Main verification flow implementation

use std::sync::Arc;

use chrono::{Duration as ChronoDuration, Utc};
use tokio::sync::watch;
use tracing;

use vf_shared::utils::email::{is_valid_email, mask_email, normalize_email};
use vf_shared::utils::validation::validators;

use crate::domain::entities::session::{SessionStatus, VerificationSession};
use crate::errors::{fallback, DomainError, DomainResult, ValidationError};
use crate::timer::Countdown;

use super::config::FlowConfig;
use super::traits::CodeGateway;
use super::types::{
    FlowSnapshot, NewsletterOptions, SendCodeRequest, SendOutcome, VerifyOutcome,
};

/// Parametrized verification state machine
///
/// Drives one email code challenge:
///
/// ```text
/// Idle → Sending → AwaitingCode → Verifying → Verified
///            ↑          |  ↑           |
///            └──resend──┘  └──failed───┘
/// ```
///
/// Expiry is derived: the countdown reaching zero while awaiting a code
/// blocks the verify transition with an expiry message. All failures are
/// folded into outcomes and `last_error`; nothing propagates as `Err`, and
/// every retry is user-initiated.
pub struct VerificationFlow<G: CodeGateway> {
    /// Gateway used for code issuance and verification
    gateway: Arc<G>,
    /// Flow parameters (purpose, code length, window)
    config: FlowConfig,
    /// In-memory session state
    session: VerificationSession,
    /// Countdown for the active code window
    countdown: Countdown,
    /// Newsletter options forwarded with send-code calls, when applicable
    subscription: Option<NewsletterOptions>,
    /// Invoked with the verified email when the session turns terminal
    on_verified: Option<Box<dyn FnMut(&str) + Send>>,
    /// Publishes a snapshot on every state change
    snapshot_tx: watch::Sender<FlowSnapshot>,
}

impl<G: CodeGateway> VerificationFlow<G> {
    /// Create a new flow over `gateway` with the given configuration
    pub fn new(gateway: Arc<G>, config: FlowConfig) -> Self {
        let session = VerificationSession::new(config.purpose);
        let (snapshot_tx, _) = watch::channel(FlowSnapshot::idle());
        Self {
            gateway,
            config,
            session,
            countdown: Countdown::idle(),
            subscription: None,
            on_verified: None,
            snapshot_tx,
        }
    }

    /// Current session state
    pub fn session(&self) -> &VerificationSession {
        &self.session
    }

    /// Current lifecycle state
    pub fn status(&self) -> SessionStatus {
        self.session.status
    }

    /// Seconds left in the active code window
    pub fn remaining_seconds(&self) -> u64 {
        self.countdown.remaining()
    }

    /// Last user-facing error message, if any
    pub fn last_error(&self) -> Option<&str> {
        self.session.last_error.as_deref()
    }

    /// The session reached its terminal success state
    pub fn is_verified(&self) -> bool {
        self.session.is_verified()
    }

    /// Observe the remaining seconds of the active window
    pub fn subscribe_countdown(&self) -> watch::Receiver<u64> {
        self.countdown.subscribe()
    }

    /// Observe state transitions (status and error changes)
    pub fn subscribe(&self) -> watch::Receiver<FlowSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Register a callback fired once the session turns terminal, so gated
    /// downstream actions (e.g. a signup submit button) can unlock
    pub fn set_on_verified(&mut self, callback: impl FnMut(&str) + Send + 'static) {
        self.on_verified = Some(Box::new(callback));
    }

    /// Attach newsletter options to subsequent send-code calls
    pub fn set_subscription(&mut self, options: NewsletterOptions) {
        self.subscription = Some(options);
    }

    /// Track edits to the subject email field
    ///
    /// Once a code has been sent, the bound email cannot change silently:
    /// rebinding a different address resets the whole session to `Idle`.
    pub fn bind_email(&mut self, email: &str) {
        let normalized = normalize_email(email);
        let progressed = self.session.status != SessionStatus::Idle;
        if let Some(bound) = &self.session.subject_email {
            if progressed && *bound != normalized {
                tracing::info!(
                    session_id = %self.session.id,
                    purpose = %self.session.purpose,
                    event = "email_rebound",
                    "Subject email edited after a code was sent; resetting session"
                );
                self.reset();
            }
        }
    }

    /// Forcibly return to `Idle`, clearing all fields and the timer
    pub fn reset(&mut self) {
        self.session.reset();
        self.countdown.reset();
        self.publish();
    }

    /// Request a verification code for `email`
    ///
    /// Legal from `Idle` (first send) and from `AwaitingCode` (resend).
    /// The previous error is cleared as soon as the attempt starts, before
    /// the gateway call resolves.
    pub async fn request_code(&mut self, email: &str) -> SendOutcome {
        if !self.session.can_request_code() {
            let err = DomainError::InvalidState {
                message: format!("request_code from {:?}", self.session.status),
            };
            tracing::warn!(
                session_id = %self.session.id,
                error = %err,
                event = "send_refused",
                "request_code is only valid from Idle or AwaitingCode"
            );
            return SendOutcome::refused();
        }

        // clear-on-attempt: the stale error goes away the moment the user acts
        self.session.last_error = None;

        let normalized = normalize_email(email);

        // a resend with a different address is an email rebind
        if self.session.status == SessionStatus::AwaitingCode {
            if let Some(bound) = &self.session.subject_email {
                if *bound != normalized {
                    tracing::info!(
                        session_id = %self.session.id,
                        event = "email_rebound",
                        "Resend with a different email; restarting as a fresh session"
                    );
                    self.reset();
                }
            }
        }
        let resend = self.session.status == SessionStatus::AwaitingCode;

        if let Err(err) = self.email_gate(&normalized) {
            let message = err.to_string();
            self.session.last_error = Some(message.clone());
            self.publish();
            tracing::warn!(
                session_id = %self.session.id,
                email = %mask_email(&normalized),
                error = %err,
                event = "email_rejected",
                "Send attempt rejected locally"
            );
            return SendOutcome::failure(message);
        }

        self.session.status = SessionStatus::Sending;
        self.session.subject_email = Some(normalized.clone());
        self.publish();

        tracing::info!(
            session_id = %self.session.id,
            purpose = %self.config.purpose,
            email = %mask_email(&normalized),
            resend,
            event = "send_code_requested",
            "Requesting verification code"
        );

        let mut request = SendCodeRequest::new(normalized.clone());
        request.subscription = self.subscription.clone();

        match self.gateway.send_code(self.config.purpose, &request).await {
            Ok(reply) => {
                self.session.status = SessionStatus::AwaitingCode;
                self.session.entered_code.clear();
                self.session.attempts = 0;
                self.countdown.start(self.config.window_seconds);
                self.publish();
                let expires_at =
                    Utc::now() + ChronoDuration::seconds(self.config.window_seconds as i64);
                tracing::info!(
                    session_id = %self.session.id,
                    purpose = %self.config.purpose,
                    window_seconds = self.config.window_seconds,
                    event = "send_code_succeeded",
                    "Verification code sent"
                );
                SendOutcome::sent(reply.message, expires_at)
            }
            Err(err) => {
                let message = err.user_message(fallback::SEND_FAILED);
                self.session.last_error = Some(message.clone());
                if resend {
                    // the previous code may still be valid; keep its window
                    self.session.status = SessionStatus::AwaitingCode;
                } else {
                    self.session.status = SessionStatus::Idle;
                    self.session.subject_email = None;
                }
                self.publish();
                tracing::warn!(
                    session_id = %self.session.id,
                    purpose = %self.config.purpose,
                    error = %err,
                    resend,
                    event = "send_code_failed",
                    "Failed to send verification code"
                );
                SendOutcome::failure(message)
            }
        }
    }

    /// Submit a user-entered code for verification
    ///
    /// Legal only from `AwaitingCode`. Length and expiry are checked locally
    /// before any network traffic; a failed verify keeps the countdown
    /// running, since the code's server-side validity window is independent
    /// of how many guesses the client makes.
    pub async fn submit_code(&mut self, code: &str) -> VerifyOutcome {
        if !self.session.can_submit_code() {
            let err = DomainError::InvalidState {
                message: format!("submit_code from {:?}", self.session.status),
            };
            tracing::warn!(
                session_id = %self.session.id,
                error = %err,
                event = "verify_refused",
                "submit_code is only valid from AwaitingCode"
            );
            return VerifyOutcome::refused();
        }

        self.session.last_error = None;
        let normalized = Self::normalize_code(code);
        self.session.entered_code = normalized.clone();

        if let Err(err) = self.submission_gate(&normalized) {
            let message = err.to_string();
            self.session.last_error = Some(message.clone());
            self.publish();
            tracing::warn!(
                session_id = %self.session.id,
                entered_length = normalized.len(),
                expected_length = self.config.code_length,
                error = %err,
                event = "submission_rejected",
                "Submit attempt rejected locally"
            );
            return VerifyOutcome::failure(message);
        }

        let Some(email) = self.session.subject_email.clone() else {
            // unreachable by construction; fail closed rather than panic
            let err = DomainError::Internal {
                message: "awaiting a code with no bound email".to_string(),
            };
            tracing::error!(
                session_id = %self.session.id,
                error = %err,
                event = "session_inconsistent",
                "Resetting inconsistent session"
            );
            self.reset();
            return VerifyOutcome::failure(fallback::VERIFY_FAILED.to_string());
        };

        self.session.status = SessionStatus::Verifying;
        self.session.attempts += 1;
        self.publish();

        tracing::info!(
            session_id = %self.session.id,
            purpose = %self.config.purpose,
            attempt = self.session.attempts,
            event = "verify_code_requested",
            "Verifying entered code"
        );

        match self
            .gateway
            .verify_code(self.config.purpose, &email, &normalized)
            .await
        {
            Ok(reply) => {
                self.session.status = SessionStatus::Verified;
                self.countdown.reset();
                self.publish();
                tracing::info!(
                    session_id = %self.session.id,
                    purpose = %self.config.purpose,
                    event = "code_verified",
                    "Verification succeeded"
                );
                if let Some(callback) = self.on_verified.as_mut() {
                    callback(&email);
                }
                VerifyOutcome::verified(reply.message)
            }
            Err(err) => {
                let message = err.user_message(fallback::VERIFY_FAILED);
                // back to awaiting; the countdown keeps its remaining window
                self.session.status = SessionStatus::AwaitingCode;
                self.session.last_error = Some(message.clone());
                self.publish();
                tracing::warn!(
                    session_id = %self.session.id,
                    purpose = %self.config.purpose,
                    error = %err,
                    event = "verify_code_failed",
                    "Verification failed"
                );
                VerifyOutcome::failure(message)
            }
        }
    }

    /// Syntactic email check; failures never reach the network
    fn email_gate(&self, email: &str) -> DomainResult<()> {
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        Ok(())
    }

    /// Length and expiry gates; failures never reach the network
    fn submission_gate(&self, normalized: &str) -> DomainResult<()> {
        if !validators::is_well_formed_code(normalized, self.config.code_length) {
            return Err(ValidationError::CodeLength {
                expected: self.config.code_length,
            }
            .into());
        }
        if self.countdown.is_expired() {
            return Err(ValidationError::CodeExpired.into());
        }
        Ok(())
    }

    /// Uppercase and strip everything that is not ASCII alphanumeric
    fn normalize_code(code: &str) -> String {
        code.chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_uppercase())
            .collect()
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(FlowSnapshot {
            status: self.session.status,
            last_error: self.session.last_error.clone(),
        });
    }
}
