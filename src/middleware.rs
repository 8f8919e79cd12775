//! Middleware chain
//!
//! Each middleware contributes a pre-dispatch and a post-dispatch hook. The
//! most recently registered middleware is the outermost layer: its request
//! hook runs first and its response hook runs last.

use std::sync::Arc;

use crate::error::Result;
use crate::http::{Request, Response};

pub trait Middleware: Send + Sync {
    /// Runs before the request travels inward
    fn process_request(&self, _req: &mut Request) {}

    /// Runs after the inner stages produced a response
    fn process_response(&self, _req: &Request, _resp: &mut Response) {}
}

/// Middleware in registration order
#[derive(Clone, Default)]
pub struct MiddlewareChain {
    links: Vec<Arc<dyn Middleware>>,
}

impl MiddlewareChain {
    pub const fn new() -> Self {
        Self { links: Vec::new() }
    }

    /// Wrap the current chain in one more layer
    pub fn add<M: Middleware + 'static>(&mut self, middleware: M) {
        self.links.push(Arc::new(middleware));
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Run request hooks outermost-in, call `inner`, then response hooks
    /// innermost-out.
    ///
    /// When `inner` fails no response hook runs and the error is returned as is.
    pub fn handle<F>(&self, req: &mut Request, inner: F) -> Result<Response>
    where
        F: FnOnce(&Request) -> Result<Response>,
    {
        for link in self.links.iter().rev() {
            link.process_request(req);
        }

        let mut response = inner(req)?;

        for link in &self.links {
            link.process_response(req, &mut response);
        }

        Ok(response)
    }
}
