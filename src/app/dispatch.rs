//! Dispatcher
//!
//! Resolves the route, authorizes the verb, invokes the handler and is the one
//! place where handler errors are caught.

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::handler::{dispatch_resource, Handler};
use crate::http::{Request, Response};
use crate::routing::{HandlerBinding, RouteTable};

/// Exception handler signature: populate the response for a failed request
pub type ExceptionHandlerFn = dyn Fn(&Request, &mut Response, &Error) + Send + Sync;

pub struct Dispatcher {
    routes: RouteTable,
    exception_handler: Option<Arc<ExceptionHandlerFn>>,
}

impl Dispatcher {
    pub(crate) fn new(routes: RouteTable, exception_handler: Option<Arc<ExceptionHandlerFn>>) -> Self {
        Self {
            routes,
            exception_handler,
        }
    }

    pub const fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Produce the response for one request
    ///
    /// An unmatched path yields the default 404. Errors from method checks or
    /// handlers go to the exception handler when one is set, otherwise they
    /// are returned to the caller.
    pub fn handle_request(&self, req: &Request) -> Result<Response> {
        let Some(binding) = self.routes.resolve(req.path()) else {
            return Ok(Response::not_found());
        };

        let mut response = Response::new();
        if let Err(err) = invoke(&binding, req, &mut response) {
            match &self.exception_handler {
                Some(handler) => handler(req, &mut response, &err),
                None => return Err(err),
            }
        }

        Ok(response)
    }
}

fn invoke(binding: &HandlerBinding<'_>, req: &Request, resp: &mut Response) -> Result<()> {
    match binding.route.handler() {
        Handler::Function(handler) => {
            if !binding.route.allowed_methods().contains(req.method()) {
                return Err(Error::method_not_allowed(req.method()));
            }
            handler(req, resp, &binding.params)
        }
        Handler::Resource(factory) => {
            // Fresh instance per request
            let mut resource = factory();
            dispatch_resource(resource.as_mut(), req, resp, &binding.params)
        }
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("routes", &self.routes)
            .field("exception_handler", &self.exception_handler.is_some())
            .finish()
    }
}
