//! Environment-driven configuration for the gateway client
//!
//! Settings come from `VERIFY_GATEWAY_*` environment variables (a local
//! `.env` file is honored), with defaults suitable for local development:
//!
//! - `VERIFY_GATEWAY_BASE_URL` — e.g. `https://api.club.example.org/v1`
//! - `VERIFY_GATEWAY_TIMEOUT_SECS` — request timeout (default 10)
//! - `VERIFY_GATEWAY_USER_AGENT` — User-Agent header (default `veriflow/0.1`)

use ::config::{Config, Environment};

use vf_shared::config::GatewayConfig;

use crate::InfrastructureError;

/// Environment variable prefix for gateway settings
const ENV_PREFIX: &str = "VERIFY_GATEWAY";

/// Load the gateway configuration from the environment
pub fn load_gateway_config() -> Result<GatewayConfig, InfrastructureError> {
    dotenvy::dotenv().ok(); // load .env if present

    let defaults = GatewayConfig::default();
    let settings = Config::builder()
        .set_default("base_url", defaults.base_url)
        .and_then(|builder| builder.set_default("timeout_secs", defaults.timeout_secs as i64))
        .and_then(|builder| builder.set_default("user_agent", defaults.user_agent))
        .map(|builder| {
            builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
        })
        .and_then(|builder| builder.build())
        .map_err(|e| InfrastructureError::Config(e.to_string()))?;

    let gateway_config: GatewayConfig = settings
        .try_deserialize()
        .map_err(|e| InfrastructureError::Config(e.to_string()))?;
    gateway_config
        .validate()
        .map_err(InfrastructureError::Config)?;
    Ok(gateway_config)
}
