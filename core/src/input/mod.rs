//! Code input capture for one-time verification codes.

mod code_input;

pub use code_input::{CodeInput, CodeInputEvent, Key};
