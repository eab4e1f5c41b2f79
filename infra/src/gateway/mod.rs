//! Remote verification gateway clients
//!
//! - [`HttpCodeGateway`] — production client over the gateway's REST surface
//! - [`MockCodeGateway`] — in-memory stand-in for development and testing

mod http;
mod mock;

pub use http::HttpCodeGateway;
pub use mock::MockCodeGateway;
