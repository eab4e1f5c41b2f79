//! Types for verification flow requests and results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::session::SessionStatus;

/// Newsletter delivery frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsletterFrequency {
    Weekly,
    Biweekly,
    Monthly,
}

/// Newsletter preferences attached to subscribe and preference-change sends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterOptions {
    pub frequency: NewsletterFrequency,
    pub categories: Vec<String>,
}

/// Body of a send-code call
///
/// The newsletter subscribe/preference purposes carry the subscription
/// options alongside the email; other purposes send the email alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCodeRequest {
    pub email: String,

    #[serde(flatten)]
    pub subscription: Option<NewsletterOptions>,
}

impl SendCodeRequest {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            subscription: None,
        }
    }

    pub fn with_subscription(mut self, options: NewsletterOptions) -> Self {
        self.subscription = Some(options);
        self
    }
}

/// Success body consumed from send, verify, and reset responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayMessage {
    /// Present on the terminal reset-password response only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,

    /// Human-readable notification to surface to the user
    pub message: String,
}

impl GatewayMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: None,
            message: message.into(),
        }
    }
}

/// Result of a `request_code` attempt
///
/// Failures are folded in rather than returned as `Err`: every failure is
/// terminal for the attempt but never for the session.
#[derive(Debug, Clone)]
pub struct SendOutcome {
    /// A fresh code is on its way
    pub sent: bool,
    /// Gateway success notification, surfaced to the user
    pub message: Option<String>,
    /// User-facing failure message; mirrors the session's `last_error`
    pub error_message: Option<String>,
    /// When the client-side window for the new code runs out
    pub expires_at: Option<DateTime<Utc>>,
}

impl SendOutcome {
    pub(crate) fn sent(message: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            sent: true,
            message: Some(message),
            error_message: None,
            expires_at: Some(expires_at),
        }
    }

    pub(crate) fn failure(error_message: String) -> Self {
        Self {
            sent: false,
            message: None,
            error_message: Some(error_message),
            expires_at: None,
        }
    }

    pub(crate) fn refused() -> Self {
        Self {
            sent: false,
            message: None,
            error_message: None,
            expires_at: None,
        }
    }
}

/// Result of a `submit_code` attempt
#[derive(Debug, Clone)]
pub struct VerifyOutcome {
    /// The code checked out; the session is now terminal
    pub verified: bool,
    /// Gateway success notification, surfaced to the user
    pub message: Option<String>,
    /// User-facing failure message; mirrors the session's `last_error`
    pub error_message: Option<String>,
}

impl VerifyOutcome {
    pub(crate) fn verified(message: String) -> Self {
        Self {
            verified: true,
            message: Some(message),
            error_message: None,
        }
    }

    pub(crate) fn failure(error_message: String) -> Self {
        Self {
            verified: false,
            message: None,
            error_message: Some(error_message),
        }
    }

    pub(crate) fn refused() -> Self {
        Self {
            verified: false,
            message: None,
            error_message: None,
        }
    }
}

/// Observable snapshot of a flow, published on every state change
///
/// UI surfaces subscribe to re-render on transitions without holding a
/// borrow of the flow while a request is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowSnapshot {
    pub status: SessionStatus,
    pub last_error: Option<String>,
}

impl FlowSnapshot {
    pub(crate) fn idle() -> Self {
        Self {
            status: SessionStatus::Idle,
            last_error: None,
        }
    }
}
