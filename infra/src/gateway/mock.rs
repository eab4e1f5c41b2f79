//! In-memory verification gateway for development and testing
//!
//! Behaves like the real gateway from the flows' point of view: every send
//! (re)issues a fresh code with its own expiry, verification is attempt-
//! limited and constant-time, and a verified password-reset code is required
//! by the terminal reset operation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::Rng;
use tracing::info;

use vf_core::domain::entities::purpose::Purpose;
use vf_core::errors::GatewayError;
use vf_core::services::flow::{CodeGateway, GatewayMessage, SendCodeRequest};
use vf_shared::utils::email::mask_email;

/// Server-side lifetime of an issued code
const CODE_TTL_SECONDS: i64 = 300;

/// Verification attempts allowed per issued code
const MAX_ATTEMPTS: u32 = 5;

// no 0/O or 1/I; mirrors what the production gateway issues
const CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

struct IssuedCode {
    code: String,
    expires_at: DateTime<Utc>,
    attempts: u32,
}

/// In-memory gateway issuing real codes
pub struct MockCodeGateway {
    codes: Mutex<HashMap<(Purpose, String), IssuedCode>>,
    /// Password-reset codes that passed verification, keyed by email
    verified_resets: Mutex<HashMap<String, String>>,
    fail_send: AtomicBool,
    fail_verify: AtomicBool,
}

impl MockCodeGateway {
    pub fn new() -> Self {
        Self {
            codes: Mutex::new(HashMap::new()),
            verified_resets: Mutex::new(HashMap::new()),
            fail_send: AtomicBool::new(false),
            fail_verify: AtomicBool::new(false),
        }
    }

    /// Make subsequent send-code calls fail (for testing failure paths)
    pub fn set_fail_send(&self, fail: bool) {
        self.fail_send.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent verify-code calls fail (for testing failure paths)
    pub fn set_fail_verify(&self, fail: bool) {
        self.fail_verify.store(fail, Ordering::SeqCst);
    }

    /// Peek at the last code issued for `(purpose, email)`
    ///
    /// This is how demos and tests play the user who reads their inbox.
    pub fn issued_code(&self, purpose: Purpose, email: &str) -> Option<String> {
        self.codes
            .lock()
            .unwrap()
            .get(&(purpose, email.to_string()))
            .map(|issued| issued.code.clone())
    }

    /// Force the issued code for `(purpose, email)` to be expired
    pub fn expire_code(&self, purpose: Purpose, email: &str) {
        if let Some(issued) = self
            .codes
            .lock()
            .unwrap()
            .get_mut(&(purpose, email.to_string()))
        {
            issued.expires_at = Utc::now() - Duration::seconds(1);
        }
    }

    fn generate_code(length: usize) -> String {
        let mut rng = rand::thread_rng();
        (0..length)
            .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
            .collect()
    }
}

impl Default for MockCodeGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CodeGateway for MockCodeGateway {
    async fn send_code(
        &self,
        purpose: Purpose,
        request: &SendCodeRequest,
    ) -> Result<GatewayMessage, GatewayError> {
        if self.fail_send.load(Ordering::SeqCst) {
            return Err(GatewayError::Rejected {
                message: Some("Code delivery is unavailable | 인증번호 전송이 불가능해요.".to_string()),
            });
        }

        let code = Self::generate_code(purpose.code_length());
        info!(
            purpose = %purpose,
            email = %mask_email(&request.email),
            code = %code,
            event = "mock_code_issued",
            "Issued mock verification code"
        );
        // only the newest code for a recipient is valid
        self.codes.lock().unwrap().insert(
            (purpose, request.email.clone()),
            IssuedCode {
                code,
                expires_at: Utc::now() + Duration::seconds(CODE_TTL_SECONDS),
                attempts: 0,
            },
        );
        Ok(GatewayMessage::new(
            "Verification code sent | 인증번호를 보냈어요.",
        ))
    }

    async fn verify_code(
        &self,
        purpose: Purpose,
        email: &str,
        code: &str,
    ) -> Result<GatewayMessage, GatewayError> {
        if self.fail_verify.load(Ordering::SeqCst) {
            return Err(GatewayError::Rejected {
                message: Some("Verification is unavailable | 인증이 불가능해요.".to_string()),
            });
        }

        let mut codes = self.codes.lock().unwrap();
        let key = (purpose, email.to_string());
        let Some(issued) = codes.get_mut(&key) else {
            return Err(GatewayError::Rejected {
                message: Some("No code was issued for this email | 발급된 인증번호가 없어요.".to_string()),
            });
        };

        if Utc::now() > issued.expires_at {
            codes.remove(&key);
            return Err(GatewayError::Rejected {
                message: Some(
                    "The verification code has expired | 인증번호가 만료되었어요.".to_string(),
                ),
            });
        }

        issued.attempts += 1;
        if issued.attempts > MAX_ATTEMPTS {
            codes.remove(&key);
            return Err(GatewayError::Rejected {
                message: Some(
                    "Too many attempts; request a new code | 시도 횟수를 초과했어요. 인증번호를 다시 요청해 주세요."
                        .to_string(),
                ),
            });
        }

        let matches = issued.code.len() == code.len()
            && constant_time_eq(issued.code.as_bytes(), code.as_bytes());
        if !matches {
            return Err(GatewayError::Rejected {
                message: Some("Invalid verification code | 인증번호가 올바르지 않아요.".to_string()),
            });
        }

        let consumed = codes.remove(&key).map(|issued| issued.code);
        drop(codes);
        if purpose == Purpose::PasswordReset {
            if let Some(consumed) = consumed {
                self.verified_resets
                    .lock()
                    .unwrap()
                    .insert(email.to_string(), consumed);
            }
        }
        Ok(GatewayMessage::new("Verified | 인증이 완료되었어요."))
    }

    async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<GatewayMessage, GatewayError> {
        if new_password.trim().is_empty() {
            return Err(GatewayError::Rejected {
                message: Some("Password cannot be empty | 비밀번호를 입력해 주세요.".to_string()),
            });
        }

        let mut verified = self.verified_resets.lock().unwrap();
        match verified.get(email) {
            Some(stored) if constant_time_eq(stored.as_bytes(), code.as_bytes()) => {
                verified.remove(email);
                info!(
                    email = %mask_email(email),
                    event = "mock_password_reset",
                    "Mock password reset accepted"
                );
                let mut reply =
                    GatewayMessage::new("Password changed | 비밀번호가 변경되었어요.");
                reply.success = Some(true);
                Ok(reply)
            }
            _ => Err(GatewayError::Rejected {
                message: Some(
                    "Reset code is missing or unverified | 인증되지 않은 요청이에요.".to_string(),
                ),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_issue_and_verify_round_trip() {
        let gateway = MockCodeGateway::new();
        let request = SendCodeRequest::new("member@example.org");

        gateway
            .send_code(Purpose::SignupVerify, &request)
            .await
            .unwrap();
        let code = gateway
            .issued_code(Purpose::SignupVerify, "member@example.org")
            .unwrap();
        assert_eq!(code.len(), Purpose::SignupVerify.code_length());

        let reply = gateway
            .verify_code(Purpose::SignupVerify, "member@example.org", &code)
            .await
            .unwrap();
        assert!(reply.message.contains("Verified"));

        // a code is single-use
        let result = gateway
            .verify_code(Purpose::SignupVerify, "member@example.org", &code)
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_wrong_code_is_rejected_with_message() {
        let gateway = MockCodeGateway::new();
        gateway
            .send_code(Purpose::SignupVerify, &SendCodeRequest::new("a@x.com"))
            .await
            .unwrap();

        let err = gateway
            .verify_code(Purpose::SignupVerify, "a@x.com", "WRONG!")
            .await
            .unwrap_err();
        match err {
            GatewayError::Rejected { message } => {
                assert!(message.unwrap().contains("Invalid verification code"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_resend_invalidates_previous_code() {
        let gateway = MockCodeGateway::new();
        let request = SendCodeRequest::new("a@x.com");

        gateway
            .send_code(Purpose::SignupVerify, &request)
            .await
            .unwrap();
        let first = gateway
            .issued_code(Purpose::SignupVerify, "a@x.com")
            .unwrap();

        gateway
            .send_code(Purpose::SignupVerify, &request)
            .await
            .unwrap();
        let second = gateway
            .issued_code(Purpose::SignupVerify, "a@x.com")
            .unwrap();

        if first != second {
            let result = gateway
                .verify_code(Purpose::SignupVerify, "a@x.com", &first)
                .await;
            assert!(result.is_err());
        }
        let reply = gateway
            .verify_code(Purpose::SignupVerify, "a@x.com", &second)
            .await;
        assert!(reply.is_ok());
    }

    #[tokio::test]
    async fn test_expired_code_is_rejected() {
        let gateway = MockCodeGateway::new();
        gateway
            .send_code(Purpose::SignupVerify, &SendCodeRequest::new("a@x.com"))
            .await
            .unwrap();
        let code = gateway
            .issued_code(Purpose::SignupVerify, "a@x.com")
            .unwrap();

        gateway.expire_code(Purpose::SignupVerify, "a@x.com");
        let err = gateway
            .verify_code(Purpose::SignupVerify, "a@x.com", &code)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("expired"));
    }

    #[tokio::test]
    async fn test_attempt_budget_is_enforced() {
        let gateway = MockCodeGateway::new();
        gateway
            .send_code(Purpose::SignupVerify, &SendCodeRequest::new("a@x.com"))
            .await
            .unwrap();
        let code = gateway
            .issued_code(Purpose::SignupVerify, "a@x.com")
            .unwrap();

        for _ in 0..MAX_ATTEMPTS {
            let _ = gateway
                .verify_code(Purpose::SignupVerify, "a@x.com", "NOPE99")
                .await;
        }
        // the budget is spent; even the right code is refused now
        let result = gateway
            .verify_code(Purpose::SignupVerify, "a@x.com", &code)
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_reset_password_requires_verified_code() {
        let gateway = MockCodeGateway::new();
        let email = "member@example.org";

        // without a verified code the terminal call is refused
        let result = gateway.reset_password(email, "DEADBEEF", "new-secret").await;
        assert!(result.is_err());

        gateway
            .send_code(Purpose::PasswordReset, &SendCodeRequest::new(email))
            .await
            .unwrap();
        let code = gateway.issued_code(Purpose::PasswordReset, email).unwrap();
        assert_eq!(code.len(), Purpose::PasswordReset.code_length());
        gateway
            .verify_code(Purpose::PasswordReset, email, &code)
            .await
            .unwrap();

        let reply = gateway
            .reset_password(email, &code, "new-secret")
            .await
            .unwrap();
        assert_eq!(reply.success, Some(true));

        // the verified code is consumed
        let result = gateway.reset_password(email, &code, "other-secret").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_failure_toggles() {
        let gateway = MockCodeGateway::new();
        gateway.set_fail_send(true);
        let result = gateway
            .send_code(Purpose::SignupVerify, &SendCodeRequest::new("a@x.com"))
            .await;
        assert!(result.is_err());

        gateway.set_fail_send(false);
        gateway
            .send_code(Purpose::SignupVerify, &SendCodeRequest::new("a@x.com"))
            .await
            .unwrap();
        let code = gateway
            .issued_code(Purpose::SignupVerify, "a@x.com")
            .unwrap();
        gateway.set_fail_verify(true);
        let result = gateway
            .verify_code(Purpose::SignupVerify, "a@x.com", &code)
            .await;
        assert!(result.is_err());
    }
}
