//! Remote verification gateway configuration

use serde::{Deserialize, Serialize};

/// Connection configuration for the remote verification gateway
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewayConfig {
    /// Base URL of the gateway (e.g. `https://api.example.org/v1`)
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    String::from("veriflow/0.1")
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("http://localhost:8080/api"),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl GatewayConfig {
    /// Create a new configuration with a base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout in seconds
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Check the base URL is usable (http(s), no trailing slash ambiguity)
    pub fn validate(&self) -> Result<(), String> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(format!(
                "Gateway base URL must start with http:// or https://: {}",
                self.base_url
            ));
        }
        if self.timeout_secs == 0 {
            return Err("Gateway timeout must be greater than zero".to_string());
        }
        Ok(())
    }

    /// Base URL with any trailing slash removed
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
