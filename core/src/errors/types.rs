//! Error types for the verification flows
//!
//! User-facing messages are bilingual (`"English | 한국어"`); the UI layer
//! picks a half with the `extract_*_message` helpers from `vf_shared`.

use thiserror::Error;

/// Client-local validation failures
///
/// These never reach the network: the flow rejects the attempt immediately
/// and records the message as the session's `last_error`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Enter a valid email address | 올바른 이메일 주소를 입력해 주세요.")]
    InvalidEmail,

    #[error("Enter the {expected}-character verification code | 인증번호 {expected}자리를 입력해 주세요.")]
    CodeLength { expected: usize },

    #[error("The verification code has expired. Request a new one | 인증번호가 만료되었어요. 다시 요청해 주세요.")]
    CodeExpired,

    #[error("Password must be at least {min} characters with no spaces | 비밀번호는 공백 없이 {min}자 이상이어야 해요.")]
    PasswordTooShort { min: usize },
}

/// Failures crossing the gateway boundary
///
/// The state machine treats both variants identically: terminal for the
/// attempt, never fatal for the session.
#[derive(Error, Debug, Clone)]
pub enum GatewayError {
    /// Non-2xx response; carries the gateway's `message` body when present
    #[error("Gateway rejected the request: {}", message.as_deref().unwrap_or("no message"))]
    Rejected { message: Option<String> },

    /// Transport-level failure (connect, timeout, malformed body)
    #[error("Gateway transport failure: {message}")]
    Transport { message: String },
}

impl GatewayError {
    /// User-facing message: the gateway's own words when present, otherwise
    /// the purpose-appropriate bilingual fallback
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            GatewayError::Rejected { message: Some(message) } if !message.is_empty() => {
                message.clone()
            }
            _ => fallback.to_string(),
        }
    }
}

/// Bilingual fallback notices used when the gateway gives no message
pub mod fallback {
    pub const SEND_FAILED: &str =
        "Failed to send the verification code | 인증번호 전송에 실패했어요.";
    pub const VERIFY_FAILED: &str = "Verification failed | 인증에 실패했어요.";
    pub const RESET_FAILED: &str =
        "Failed to reset the password | 비밀번호 변경에 실패했어요.";
}
