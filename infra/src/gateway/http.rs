//! HTTP client for the remote verification gateway
//!
//! Speaks the gateway's REST surface: one send/verify endpoint pair per
//! purpose plus the terminal password-reset operation. 2xx responses carry
//! a `{message}` body; anything else is surfaced as a rejection with the
//! body's `message` when one can be parsed.
//!
//! There is deliberately no retry logic here: every retry in the
//! verification flows is user-initiated, and replaying a send-code request
//! would reissue a code.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use tracing::{debug, warn};

use vf_core::domain::entities::purpose::Purpose;
use vf_core::errors::GatewayError;
use vf_core::services::flow::{CodeGateway, GatewayMessage, SendCodeRequest};
use vf_shared::config::GatewayConfig;
use vf_shared::errors::ErrorResponse;
use vf_shared::utils::email::mask_email;

use crate::InfrastructureError;

/// Path of the terminal password-reset operation
const RESET_PASSWORD_PATH: &str = "/auth/password-reset/confirm";

/// Production gateway client
pub struct HttpCodeGateway {
    client: Client,
    config: GatewayConfig,
}

impl HttpCodeGateway {
    /// Create a new client from a validated configuration
    pub fn new(config: GatewayConfig) -> Result<Self, InfrastructureError> {
        config.validate().map_err(InfrastructureError::Config)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| InfrastructureError::Http(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// Create a client from `VERIFY_GATEWAY_*` environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(crate::config::load_gateway_config()?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.normalized_base_url(), path)
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<GatewayMessage, GatewayError> {
        let url = self.url(path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| GatewayError::Transport {
                message: e.to_string(),
            })?;
        Self::consume(response).await
    }

    async fn consume(response: Response) -> Result<GatewayMessage, GatewayError> {
        let status = response.status();
        if status.is_success() {
            response
                .json::<GatewayMessage>()
                .await
                .map_err(|e| GatewayError::Transport {
                    message: format!("malformed gateway response: {}", e),
                })
        } else {
            let message = response
                .json::<ErrorResponse>()
                .await
                .ok()
                .map(|body| body.message);
            warn!(
                status = %status,
                has_message = message.is_some(),
                event = "gateway_rejected",
                "Gateway rejected the request"
            );
            Err(GatewayError::Rejected { message })
        }
    }
}

#[async_trait]
impl CodeGateway for HttpCodeGateway {
    async fn send_code(
        &self,
        purpose: Purpose,
        request: &SendCodeRequest,
    ) -> Result<GatewayMessage, GatewayError> {
        debug!(
            purpose = %purpose,
            email = %mask_email(&request.email),
            path = purpose.send_code_path(),
            "Requesting code issuance"
        );
        self.post_json(purpose.send_code_path(), request).await
    }

    async fn verify_code(
        &self,
        purpose: Purpose,
        email: &str,
        code: &str,
    ) -> Result<GatewayMessage, GatewayError> {
        #[derive(Serialize)]
        struct Body<'a> {
            email: &'a str,
            code: &'a str,
        }
        debug!(
            purpose = %purpose,
            email = %mask_email(email),
            path = purpose.verify_code_path(),
            "Submitting code for verification"
        );
        self.post_json(purpose.verify_code_path(), &Body { email, code })
            .await
    }

    async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<GatewayMessage, GatewayError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'a> {
            email: &'a str,
            random_code: &'a str,
            new_password: &'a str,
        }
        debug!(
            email = %mask_email(email),
            path = RESET_PASSWORD_PATH,
            "Submitting password reset"
        );
        self.post_json(
            RESET_PASSWORD_PATH,
            &Body {
                email,
                random_code: code,
                new_password,
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_gateway() -> HttpCodeGateway {
        HttpCodeGateway::new(GatewayConfig::new("https://api.example.org/v1/")).unwrap()
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = HttpCodeGateway::new(GatewayConfig::new("not-a-url"));
        assert!(matches!(result, Err(InfrastructureError::Config(_))));
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let gateway = test_gateway();
        assert_eq!(
            gateway.url(Purpose::SignupVerify.send_code_path()),
            "https://api.example.org/v1/auth/email/send-code"
        );
        assert_eq!(
            gateway.url(RESET_PASSWORD_PATH),
            "https://api.example.org/v1/auth/password-reset/confirm"
        );
    }

    #[test]
    fn test_reset_body_uses_gateway_field_names() {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'a> {
            email: &'a str,
            random_code: &'a str,
            new_password: &'a str,
        }
        let json = serde_json::to_value(Body {
            email: "a@x.com",
            random_code: "DEADBEEF",
            new_password: "secret-pw",
        })
        .unwrap();
        assert_eq!(json["randomCode"], "DEADBEEF");
        assert_eq!(json["newPassword"], "secret-pw");
    }
}
