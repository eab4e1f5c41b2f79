//! # VeriFlow Core
//!
//! Core domain layer for the VeriFlow email verification stack.
//! This crate contains the verification state machine, the countdown timer,
//! the code-input capture model, the gateway trait boundary, and the flow
//! instantiations used by the community portal's verification surfaces.

pub mod domain;
pub mod errors;
pub mod input;
pub mod services;
pub mod timer;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use input::*;
pub use services::*;
pub use timer::*;
