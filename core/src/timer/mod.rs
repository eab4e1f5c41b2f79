//! Countdown timer for verification code windows.

mod countdown;

pub use countdown::Countdown;
