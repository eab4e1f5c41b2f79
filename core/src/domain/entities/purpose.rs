//! Verification purposes and their per-purpose parameters.

use serde::{Deserialize, Serialize};

/// Code length for the inline and newsletter verification purposes
pub const SHORT_CODE_LENGTH: usize = 6;

/// Code length for the password-reset purpose
pub const LONG_CODE_LENGTH: usize = 8;

/// Countdown window for the inline and newsletter verification purposes
pub const DEFAULT_WINDOW_SECONDS: u64 = 180;

/// Countdown window for the password-reset purpose
pub const RESET_WINDOW_SECONDS: u64 = 300;

/// The business reason a verification session exists
///
/// The purpose is fixed for the lifetime of a session and determines the
/// gateway endpoint pair, the required code length, and the countdown window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Purpose {
    /// Inline email ownership check attached to the signup form
    SignupVerify,
    /// Newsletter opt-in confirmation
    NewsletterSubscribe,
    /// Newsletter frequency/category change confirmation
    NewsletterPreferences,
    /// Newsletter opt-out confirmation
    NewsletterUnsubscribe,
    /// Password-reset challenge (longer code, longer window)
    PasswordReset,
}

impl Purpose {
    /// Required length of the one-time code for this purpose
    pub fn code_length(&self) -> usize {
        match self {
            Purpose::PasswordReset => LONG_CODE_LENGTH,
            _ => SHORT_CODE_LENGTH,
        }
    }

    /// Countdown window applied when a code is sent for this purpose
    pub fn window_seconds(&self) -> u64 {
        match self {
            Purpose::PasswordReset => RESET_WINDOW_SECONDS,
            _ => DEFAULT_WINDOW_SECONDS,
        }
    }

    /// Gateway path that issues and delivers a code for this purpose
    pub fn send_code_path(&self) -> &'static str {
        match self {
            Purpose::SignupVerify => "/auth/email/send-code",
            Purpose::NewsletterSubscribe => "/newsletter/subscribe/send-code",
            Purpose::NewsletterPreferences => "/newsletter/preferences/send-code",
            Purpose::NewsletterUnsubscribe => "/newsletter/unsubscribe/send-code",
            Purpose::PasswordReset => "/auth/password-reset/send-code",
        }
    }

    /// Gateway path that checks a user-entered code for this purpose
    pub fn verify_code_path(&self) -> &'static str {
        match self {
            Purpose::SignupVerify => "/auth/email/verify-code",
            Purpose::NewsletterSubscribe => "/newsletter/subscribe/verify-code",
            Purpose::NewsletterPreferences => "/newsletter/preferences/verify-code",
            Purpose::NewsletterUnsubscribe => "/newsletter/unsubscribe/verify-code",
            Purpose::PasswordReset => "/auth/password-reset/verify-code",
        }
    }

    /// Stable identifier used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Purpose::SignupVerify => "SIGNUP_VERIFY",
            Purpose::NewsletterSubscribe => "NEWSLETTER_SUBSCRIBE",
            Purpose::NewsletterPreferences => "NEWSLETTER_PREFERENCES",
            Purpose::NewsletterUnsubscribe => "NEWSLETTER_UNSUBSCRIBE",
            Purpose::PasswordReset => "PASSWORD_RESET",
        }
    }
}

impl std::fmt::Display for Purpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
