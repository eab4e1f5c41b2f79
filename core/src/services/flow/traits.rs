//! Gateway trait for code issuance and verification

use async_trait::async_trait;

use crate::domain::entities::purpose::Purpose;
use crate::errors::GatewayError;

use super::types::{GatewayMessage, SendCodeRequest};

/// Remote verification gateway boundary
///
/// The only external interface the flows depend on. Every send call
/// (re)issues a fresh code with its own server-side expiry, independent of
/// the client countdown.
#[async_trait]
pub trait CodeGateway: Send + Sync {
    /// Issue and deliver a fresh code for `purpose`
    async fn send_code(
        &self,
        purpose: Purpose,
        request: &SendCodeRequest,
    ) -> Result<GatewayMessage, GatewayError>;

    /// Check a user-entered code against the one issued for `(email, purpose)`
    async fn verify_code(
        &self,
        purpose: Purpose,
        email: &str,
        code: &str,
    ) -> Result<GatewayMessage, GatewayError>;

    /// Terminal operation of the password-reset purpose
    async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<GatewayMessage, GatewayError>;
}
