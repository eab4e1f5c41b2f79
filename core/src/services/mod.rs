//! Business services containing the verification flow logic.

pub mod flow;
pub mod flows;

// Re-export commonly used types
pub use flow::{
    CodeGateway, FlowConfig, FlowSnapshot, GatewayMessage, NewsletterOptions,
    NewsletterFrequency, SendCodeRequest, SendOutcome, VerificationFlow, VerifyOutcome,
};
pub use flows::{
    InlineEmailVerification, NewsletterAction, NewsletterFlow, PasswordResetWizard,
    ResetOutcome, ResetStep, MIN_PASSWORD_LENGTH,
};
