//! Type definitions module
//!
//! - `language` - Internationalization and language types

pub mod language;

// Re-export commonly used types at module level
pub use language::{Language, LanguagePreference};
