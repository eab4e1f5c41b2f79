//! Newsletter subscribe, preference-change, and unsubscribe flows

use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::entities::purpose::Purpose;
use crate::domain::entities::session::SessionStatus;
use crate::services::flow::{
    CodeGateway, FlowConfig, FlowSnapshot, NewsletterOptions, SendOutcome, VerificationFlow,
    VerifyOutcome,
};

/// What the member is confirming with this challenge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsletterAction {
    /// Opt in with the given delivery preferences
    Subscribe(NewsletterOptions),
    /// Change delivery preferences on an existing subscription
    UpdatePreferences(NewsletterOptions),
    /// Opt out entirely
    Unsubscribe,
}

impl NewsletterAction {
    /// Purpose driving the endpoint pair, code length, and window
    pub fn purpose(&self) -> Purpose {
        match self {
            NewsletterAction::Subscribe(_) => Purpose::NewsletterSubscribe,
            NewsletterAction::UpdatePreferences(_) => Purpose::NewsletterPreferences,
            NewsletterAction::Unsubscribe => Purpose::NewsletterUnsubscribe,
        }
    }

    fn options(&self) -> Option<&NewsletterOptions> {
        match self {
            NewsletterAction::Subscribe(options)
            | NewsletterAction::UpdatePreferences(options) => Some(options),
            NewsletterAction::Unsubscribe => None,
        }
    }
}

/// One newsletter action confirmed by an email code challenge
///
/// Subscribe and preference changes carry the chosen options with the
/// send-code call so the gateway can apply them once the code checks out.
pub struct NewsletterFlow<G: CodeGateway> {
    flow: VerificationFlow<G>,
    action: NewsletterAction,
}

impl<G: CodeGateway> NewsletterFlow<G> {
    pub fn new(gateway: Arc<G>, action: NewsletterAction) -> Self {
        let mut flow =
            VerificationFlow::new(gateway, FlowConfig::for_purpose(action.purpose()));
        if let Some(options) = action.options() {
            flow.set_subscription(options.clone());
        }
        Self { flow, action }
    }

    pub fn action(&self) -> &NewsletterAction {
        &self.action
    }

    /// Track edits to the email field
    pub fn email_changed(&mut self, email: &str) {
        self.flow.bind_email(email);
    }

    /// Send (or resend) the confirmation code
    pub async fn send_code(&mut self, email: &str) -> SendOutcome {
        self.flow.request_code(email).await
    }

    /// Submit the entered code; on success the gateway applies the action
    pub async fn confirm(&mut self, code: &str) -> VerifyOutcome {
        self.flow.submit_code(code).await
    }

    /// The action was confirmed and applied
    pub fn is_confirmed(&self) -> bool {
        self.flow.is_verified()
    }

    pub fn status(&self) -> SessionStatus {
        self.flow.status()
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.flow.remaining_seconds()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.flow.last_error()
    }

    pub fn subscribe(&self) -> watch::Receiver<FlowSnapshot> {
        self.flow.subscribe()
    }

    pub fn subscribe_countdown(&self) -> watch::Receiver<u64> {
        self.flow.subscribe_countdown()
    }
}
