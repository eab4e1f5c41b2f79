//! # Infrastructure Layer
//!
//! Concrete clients for the remote verification gateway backing the
//! VeriFlow flows:
//!
//! - **HTTP**: `reqwest`-based client speaking the gateway's REST surface
//! - **Mock**: in-memory gateway issuing real codes, for development and tests
//! - **Config**: environment-driven gateway configuration loading

use thiserror::Error;

/// Configuration module for infrastructure services
pub mod config;

/// Gateway clients (HTTP and mock)
pub mod gateway;

pub use gateway::{HttpCodeGateway, MockCodeGateway};

/// Errors raised while constructing or configuring infrastructure services
///
/// Runtime gateway failures are reported as `vf_core::errors::GatewayError`
/// through the `CodeGateway` trait; this type only covers setup problems.
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP client error: {0}")]
    Http(String),
}
