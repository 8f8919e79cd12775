//! highball - a small HTTP application core
//!
//! Path-pattern routing, function and resource handlers, a middleware chain,
//! a single exception handler slot and a static asset passthrough, served
//! over hyper.

pub mod app;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod middleware;
pub mod routing;
pub mod server;
pub mod templates;
pub mod testing;

// Re-export the registration and handler surface
pub use app::{App, AppBuilder};
pub use error::{Error, Result};
pub use handler::{Handler, MethodSet, Resource};
pub use http::{Request, Response};
pub use middleware::Middleware;
pub use routing::Params;
pub use templates::Templates;
pub use testing::TestClient;
