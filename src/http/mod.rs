//! HTTP protocol layer module
//!
//! Request and response objects handed to handlers, plus the protocol helpers
//! (MIME detection, `ETag` validation) the static asset server builds on.

pub mod cache;
pub mod mime;
pub mod request;
pub mod response;

// Re-export commonly used types
pub use request::Request;
pub use response::{build_413_response, build_500_response, Response};
