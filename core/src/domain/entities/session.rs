//! Verification session entity for email-based one-time-code challenges.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::purpose::Purpose;

/// Lifecycle state of a verification session
///
/// Transitions are one-directional except for the resend cycle
/// (`AwaitingCode ⇄ Sending`) and the failed-verify cycle
/// (`AwaitingCode → Verifying → AwaitingCode`). Expiry is not a stored
/// state: it is derived from the countdown reaching zero while awaiting
/// a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Idle,
    Sending,
    AwaitingCode,
    Verifying,
    Verified,
}

impl SessionStatus {
    /// A request is currently in flight for this session
    pub fn is_busy(&self) -> bool {
        matches!(self, SessionStatus::Sending | SessionStatus::Verifying)
    }

    /// The session reached its terminal success state
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Verified)
    }
}

/// In-memory state of one email verification challenge
///
/// Owned by whichever UI surface drives the challenge; no server-side
/// counterpart exists — the only durable state lives in the remote gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationSession {
    /// Identifier used to correlate log events for this session
    pub id: Uuid,

    /// Business reason for the challenge; fixed for the session lifetime
    pub purpose: Purpose,

    /// Email the current code was issued to; bound on the first successful
    /// send and immutable until the session resets
    pub subject_email: Option<String>,

    /// Current lifecycle state
    pub status: SessionStatus,

    /// Most recently submitted code, normalized to uppercase alphanumeric
    pub entered_code: String,

    /// Number of verify submissions made in this session (informational;
    /// the gateway owns the real attempt budget)
    pub attempts: u32,

    /// Last user-facing error message, cleared on every new attempt
    pub last_error: Option<String>,

    /// When this session object was created
    pub started_at: DateTime<Utc>,
}

impl VerificationSession {
    /// Create a fresh idle session for the given purpose
    pub fn new(purpose: Purpose) -> Self {
        Self {
            id: Uuid::new_v4(),
            purpose,
            subject_email: None,
            status: SessionStatus::Idle,
            entered_code: String::new(),
            attempts: 0,
            last_error: None,
            started_at: Utc::now(),
        }
    }

    /// Required code length for this session's purpose
    pub fn code_length(&self) -> usize {
        self.purpose.code_length()
    }

    /// `request_code` is legal from `Idle` (first send) and from
    /// `AwaitingCode` (resend)
    pub fn can_request_code(&self) -> bool {
        matches!(self.status, SessionStatus::Idle | SessionStatus::AwaitingCode)
    }

    /// `submit_code` is legal only from `AwaitingCode`
    pub fn can_submit_code(&self) -> bool {
        matches!(self.status, SessionStatus::AwaitingCode)
    }

    /// The session reached its terminal success state
    pub fn is_verified(&self) -> bool {
        self.status.is_terminal()
    }

    /// Return to `Idle`, clearing everything except identity and purpose
    pub fn reset(&mut self) {
        self.subject_email = None;
        self.status = SessionStatus::Idle;
        self.entered_code.clear();
        self.attempts = 0;
        self.last_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle() {
        let session = VerificationSession::new(Purpose::SignupVerify);
        assert_eq!(session.status, SessionStatus::Idle);
        assert!(session.subject_email.is_none());
        assert!(session.entered_code.is_empty());
        assert_eq!(session.attempts, 0);
        assert!(session.last_error.is_none());
        assert!(session.can_request_code());
        assert!(!session.can_submit_code());
    }

    #[test]
    fn test_status_predicates() {
        assert!(SessionStatus::Sending.is_busy());
        assert!(SessionStatus::Verifying.is_busy());
        assert!(!SessionStatus::AwaitingCode.is_busy());
        assert!(SessionStatus::Verified.is_terminal());
        assert!(!SessionStatus::Idle.is_terminal());
    }

    #[test]
    fn test_request_and_submit_guards() {
        let mut session = VerificationSession::new(Purpose::NewsletterSubscribe);

        session.status = SessionStatus::AwaitingCode;
        assert!(session.can_request_code()); // resend
        assert!(session.can_submit_code());

        session.status = SessionStatus::Sending;
        assert!(!session.can_request_code());
        assert!(!session.can_submit_code());

        session.status = SessionStatus::Verified;
        assert!(!session.can_request_code());
        assert!(!session.can_submit_code());
    }

    #[test]
    fn test_reset_clears_progress_but_keeps_identity() {
        let mut session = VerificationSession::new(Purpose::PasswordReset);
        let id = session.id;

        session.subject_email = Some("member@example.org".to_string());
        session.status = SessionStatus::AwaitingCode;
        session.entered_code = "DEADBEEF".to_string();
        session.attempts = 2;
        session.last_error = Some("boom".to_string());

        session.reset();

        assert_eq!(session.id, id);
        assert_eq!(session.purpose, Purpose::PasswordReset);
        assert_eq!(session.status, SessionStatus::Idle);
        assert!(session.subject_email.is_none());
        assert!(session.entered_code.is_empty());
        assert_eq!(session.attempts, 0);
        assert!(session.last_error.is_none());
    }

    #[test]
    fn test_serialization_round_trip() {
        let session = VerificationSession::new(Purpose::NewsletterUnsubscribe);
        let json = serde_json::to_string(&session).unwrap();
        let back: VerificationSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, session.id);
        assert_eq!(back.purpose, session.purpose);
        assert_eq!(back.status, SessionStatus::Idle);
    }
}
