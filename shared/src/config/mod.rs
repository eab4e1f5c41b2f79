//! Configuration module
//!
//! - `gateway` - Remote verification gateway connection configuration

pub mod gateway;

pub use gateway::GatewayConfig;
