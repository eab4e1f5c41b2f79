//! Shared error envelope and bilingual message helpers
//!
//! The remote verification gateway reports failures as a JSON body carrying a
//! human-readable `message` and, optionally, a machine-readable `error` code.
//! This module defines that envelope as seen from the client side, plus the
//! helpers for splitting the bilingual (`"English | 한국어"`) message strings
//! used throughout the workspace.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::Language;

/// Error envelope returned by the verification gateway on non-2xx responses
///
/// Deserialization is lenient: only `message` is required, since older
/// gateway endpoints return a bare `{"message": "..."}` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Human-readable error message (localized by the gateway)
    pub message: String,

    /// Additional error details (field errors, etc.)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            message: message.into(),
            details: None,
        }
    }

    /// Create an error response carrying only a message
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            error: None,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Error codes the gateway is known to return
pub mod error_codes {
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const RATE_LIMIT_EXCEEDED: &str = "RATE_LIMIT_EXCEEDED";
    pub const EMAIL_INVALID: &str = "EMAIL_INVALID";
    pub const VERIFICATION_CODE_INVALID: &str = "VERIFICATION_CODE_INVALID";
    pub const VERIFICATION_CODE_EXPIRED: &str = "VERIFICATION_CODE_EXPIRED";
    pub const ALREADY_SUBSCRIBED: &str = "ALREADY_SUBSCRIBED";
    pub const NOT_SUBSCRIBED: &str = "NOT_SUBSCRIBED";
}

/// Extract the English half of a bilingual `"English | 한국어"` message
pub fn extract_english_message(message: &str) -> &str {
    message.split(" | ").next().unwrap_or(message)
}

/// Extract the Korean half of a bilingual `"English | 한국어"` message
pub fn extract_korean_message(message: &str) -> &str {
    message.split(" | ").nth(1).unwrap_or(message)
}

/// Pick the half of a bilingual message matching `language`
pub fn localized_message(message: &str, language: Language) -> &str {
    match language {
        Language::English => extract_english_message(message),
        Language::Korean => extract_korean_message(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_deserialization() {
        let body = r#"{"message": "인증에 실패했어요."}"#;
        let parsed: ErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.message, "인증에 실패했어요.");
        assert!(parsed.error.is_none());
        assert!(parsed.details.is_none());
    }

    #[test]
    fn test_full_deserialization() {
        let body = r#"{"error": "RATE_LIMIT_EXCEEDED", "message": "Too many requests", "details": {"retry_after": 42}}"#;
        let parsed: ErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.as_deref(), Some(error_codes::RATE_LIMIT_EXCEEDED));
        assert_eq!(parsed.message, "Too many requests");
        assert!(parsed.details.unwrap().contains_key("retry_after"));
    }

    #[test]
    fn test_bilingual_extraction() {
        let message = "Failed to send verification code | 인증번호 전송에 실패했어요.";
        assert_eq!(extract_english_message(message), "Failed to send verification code");
        assert_eq!(extract_korean_message(message), "인증번호 전송에 실패했어요.");

        // Monolingual messages pass through unchanged
        assert_eq!(extract_english_message("plain"), "plain");
        assert_eq!(extract_korean_message("plain"), "plain");
    }

    #[test]
    fn test_localized_message() {
        let message = "Verification failed | 인증에 실패했어요.";
        assert_eq!(localized_message(message, Language::English), "Verification failed");
        assert_eq!(localized_message(message, Language::Korean), "인증에 실패했어요.");
    }

    #[test]
    fn test_add_detail() {
        let response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "invalid field")
            .add_detail("field", "email");
        let details = response.details.unwrap();
        assert_eq!(details.get("field").unwrap(), "email");
    }
}
