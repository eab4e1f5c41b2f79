//! Parametrized email verification state machine
//!
//! One flow instance drives a single email code challenge end to end:
//! request a code, await user entry, verify, handle expiry and resend, and
//! land in a terminal verified state. The three verification surfaces of
//! the portal (inline signup check, newsletter flows, password reset) are
//! thin instantiations over this module — see [`crate::services::flows`].

mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
pub(crate) mod tests;

pub use config::FlowConfig;
pub use service::VerificationFlow;
pub use traits::CodeGateway;
pub use types::{
    FlowSnapshot, GatewayMessage, NewsletterFrequency, NewsletterOptions, SendCodeRequest,
    SendOutcome, VerifyOutcome,
};
