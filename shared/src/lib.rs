//! Shared utilities and common types for VeriFlow
//!
//! This crate provides common functionality used across all workspace members:
//! - Configuration types
//! - Error envelope and bilingual message helpers
//! - Utility functions (email validation, masking, etc.)
//! - Common type definitions

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::GatewayConfig;
pub use errors::{
    error_codes, extract_english_message, extract_korean_message, localized_message,
    ErrorResponse,
};
pub use types::Language;
pub use utils::{email, validation};
