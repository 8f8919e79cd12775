//! Application module
//!
//! `App` is the entry point the transport calls. It splits off static asset
//! requests first, then runs the middleware chain around the dispatcher.

mod builder;
mod dispatch;

use serde::Serialize;

pub use builder::AppBuilder;
pub use dispatch::{Dispatcher, ExceptionHandlerFn};

use crate::error::Result;
use crate::handler::static_files::StaticFiles;
use crate::http::{Request, Response};
use crate::middleware::MiddlewareChain;
use crate::routing::RouteTable;
use crate::templates::Templates;
use crate::testing::TestClient;

/// A fully configured application, immutable once built
pub struct App {
    dispatcher: Dispatcher,
    middleware: MiddlewareChain,
    static_files: StaticFiles,
    static_prefix: String,
    templates: Templates,
}

impl App {
    pub fn builder() -> AppBuilder {
        AppBuilder::default()
    }

    /// Handle one request end to end
    ///
    /// Paths under the static prefix bypass middleware and routing. Any error
    /// returned here escaped the dispatcher because no exception handler was
    /// registered.
    pub async fn call(&self, mut req: Request) -> Result<Response> {
        if let Some(asset_path) = self.static_asset_path(req.path()) {
            req.set_path(asset_path);
            return Ok(self.static_files.serve(&req).await);
        }

        self.middleware
            .handle(&mut req, |req| self.dispatcher.handle_request(req))
    }

    fn static_asset_path(&self, path: &str) -> Option<String> {
        if self.static_prefix.is_empty() {
            return None;
        }
        path.strip_prefix(&self.static_prefix).map(ToString::to_string)
    }

    pub fn template<S: Serialize>(&self, name: &str, context: S) -> Result<String> {
        self.templates.render(name, context)
    }

    pub const fn templates(&self) -> &Templates {
        &self.templates
    }

    pub const fn routes(&self) -> &RouteTable {
        self.dispatcher.routes()
    }

    pub fn static_prefix(&self) -> &str {
        &self.static_prefix
    }

    pub const fn static_files(&self) -> &StaticFiles {
        &self.static_files
    }

    /// In-process client driving the full entry point
    pub const fn test_client(&self) -> TestClient<'_> {
        TestClient::new(self)
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("dispatcher", &self.dispatcher)
            .field("middleware", &self.middleware.len())
            .field("static_files", &self.static_files)
            .field("static_prefix", &self.static_prefix)
            .field("templates", &self.templates.dir())
            .finish()
    }
}
