//! Application builder
//!
//! All registration happens here, before serving starts.

use std::path::PathBuf;
use std::sync::Arc;

use super::dispatch::{Dispatcher, ExceptionHandlerFn};
use super::App;
use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::handler::static_files::StaticFiles;
use crate::handler::{Handler, MethodSet, Resource};
use crate::http::{Request, Response};
use crate::middleware::{Middleware, MiddlewareChain};
use crate::routing::{Params, RouteTable};
use crate::templates::Templates;

const DEFAULT_TEMPLATES_DIR: &str = "templates";
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_STATIC_PREFIX: &str = "/static";

pub struct AppBuilder {
    routes: RouteTable,
    middleware: MiddlewareChain,
    exception_handler: Option<Arc<ExceptionHandlerFn>>,
    templates: Templates,
    static_dir: PathBuf,
    static_prefix: String,
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self {
            routes: RouteTable::new(),
            middleware: MiddlewareChain::new(),
            exception_handler: None,
            templates: Templates::new(DEFAULT_TEMPLATES_DIR),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            static_prefix: DEFAULT_STATIC_PREFIX.to_string(),
        }
    }
}

impl AppBuilder {
    pub fn from_config(config: &AppConfig) -> Self {
        let mut builder = Self::default();
        builder
            .templates_dir(&config.templates_dir)
            .static_dir(&config.static_dir)
            .static_prefix(&config.static_prefix);
        builder
    }

    /// Set the templates directory; call before handing out `templates()` clones
    pub fn templates_dir(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.templates = Templates::new(dir);
        self
    }

    pub fn static_dir(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.static_dir = dir.into();
        self
    }

    /// Path prefix routed to the static asset server; empty disables the split
    pub fn static_prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.static_prefix = prefix.into();
        self
    }

    /// Template handle for handlers to capture
    pub fn templates(&self) -> Templates {
        self.templates.clone()
    }

    pub fn add_route(
        &mut self,
        pattern: &str,
        handler: Handler,
        allowed_methods: Option<MethodSet>,
    ) -> Result<&mut Self> {
        self.routes.register(pattern, handler, allowed_methods)?;
        Ok(self)
    }

    /// Register a function handler accepting the default verbs
    pub fn route<F>(&mut self, pattern: &str, handler: F) -> Result<&mut Self>
    where
        F: Fn(&Request, &mut Response, &Params) -> Result<()> + Send + Sync + 'static,
    {
        self.add_route(pattern, Handler::function(handler), None)
    }

    /// Register a function handler restricted to `methods` (case-insensitive)
    pub fn route_with_methods<F, I, S>(
        &mut self,
        pattern: &str,
        methods: I,
        handler: F,
    ) -> Result<&mut Self>
    where
        F: Fn(&Request, &mut Response, &Params) -> Result<()> + Send + Sync + 'static,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let methods = methods.into_iter().collect();
        self.add_route(pattern, Handler::function(handler), Some(methods))
    }

    /// Register a resource type, constructed with `Default` per request
    pub fn resource<R>(&mut self, pattern: &str) -> Result<&mut Self>
    where
        R: Resource + Default + 'static,
    {
        self.add_route(pattern, Handler::resource::<R>(), None)
    }

    /// Wrap the current chain; the last registered middleware runs first
    pub fn middleware<M: Middleware + 'static>(&mut self, middleware: M) -> &mut Self {
        self.middleware.add(middleware);
        self
    }

    /// Set the exception handler, replacing any previous one
    pub fn exception_handler<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(&Request, &mut Response, &Error) + Send + Sync + 'static,
    {
        self.exception_handler = Some(Arc::new(handler));
        self
    }

    pub fn build(self) -> App {
        App {
            dispatcher: Dispatcher::new(self.routes, self.exception_handler),
            middleware: self.middleware,
            static_files: StaticFiles::new(self.static_dir),
            static_prefix: self.static_prefix,
            templates: self.templates,
        }
    }
}

impl std::fmt::Debug for AppBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppBuilder")
            .field("routes", &self.routes)
            .field("middleware", &self.middleware.len())
            .field("exception_handler", &self.exception_handler.is_some())
            .field("templates", &self.templates)
            .field("static_dir", &self.static_dir)
            .field("static_prefix", &self.static_prefix)
            .finish()
    }
}
