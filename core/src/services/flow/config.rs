//! Configuration for a verification flow instance

use crate::domain::entities::purpose::Purpose;

/// Per-instance parameters of a verification flow
///
/// Defaults derive from the purpose; the overrides exist for surfaces that
/// negotiate a different window with the gateway.
#[derive(Debug, Clone)]
pub struct FlowConfig {
    /// Business reason for the challenge
    pub purpose: Purpose,
    /// Required code length
    pub code_length: usize,
    /// Countdown window applied when a code is sent
    pub window_seconds: u64,
}

impl FlowConfig {
    /// Standard configuration for a purpose
    pub fn for_purpose(purpose: Purpose) -> Self {
        Self {
            purpose,
            code_length: purpose.code_length(),
            window_seconds: purpose.window_seconds(),
        }
    }

    /// Override the countdown window
    pub fn with_window_seconds(mut self, seconds: u64) -> Self {
        self.window_seconds = seconds;
        self
    }

    /// Override the required code length
    pub fn with_code_length(mut self, length: usize) -> Self {
        self.code_length = length;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::purpose::{
        DEFAULT_WINDOW_SECONDS, LONG_CODE_LENGTH, RESET_WINDOW_SECONDS, SHORT_CODE_LENGTH,
    };

    #[test]
    fn test_defaults_follow_purpose() {
        let config = FlowConfig::for_purpose(Purpose::NewsletterSubscribe);
        assert_eq!(config.code_length, SHORT_CODE_LENGTH);
        assert_eq!(config.window_seconds, DEFAULT_WINDOW_SECONDS);

        let config = FlowConfig::for_purpose(Purpose::PasswordReset);
        assert_eq!(config.code_length, LONG_CODE_LENGTH);
        assert_eq!(config.window_seconds, RESET_WINDOW_SECONDS);
    }

    #[test]
    fn test_overrides() {
        let config = FlowConfig::for_purpose(Purpose::SignupVerify)
            .with_window_seconds(60)
            .with_code_length(4);
        assert_eq!(config.window_seconds, 60);
        assert_eq!(config.code_length, 4);
    }
}
