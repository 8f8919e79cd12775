//! Resource handlers
//!
//! A resource exposes one optional operation per HTTP verb. Operations left at
//! their default reject the request with `MethodNotAllowed`.

use hyper::Method;

use crate::error::{Error, Result};
use crate::http::{Request, Response};
use crate::routing::Params;

#[allow(unused_variables)]
pub trait Resource {
    fn get(&mut self, req: &Request, resp: &mut Response, params: &Params) -> Result<()> {
        Err(Error::method_not_allowed(req.method()))
    }

    fn post(&mut self, req: &Request, resp: &mut Response, params: &Params) -> Result<()> {
        Err(Error::method_not_allowed(req.method()))
    }

    fn put(&mut self, req: &Request, resp: &mut Response, params: &Params) -> Result<()> {
        Err(Error::method_not_allowed(req.method()))
    }

    fn patch(&mut self, req: &Request, resp: &mut Response, params: &Params) -> Result<()> {
        Err(Error::method_not_allowed(req.method()))
    }

    fn delete(&mut self, req: &Request, resp: &mut Response, params: &Params) -> Result<()> {
        Err(Error::method_not_allowed(req.method()))
    }

    fn head(&mut self, req: &Request, resp: &mut Response, params: &Params) -> Result<()> {
        Err(Error::method_not_allowed(req.method()))
    }

    fn options(&mut self, req: &Request, resp: &mut Response, params: &Params) -> Result<()> {
        Err(Error::method_not_allowed(req.method()))
    }
}

/// Route a request to the operation named after its lower-cased verb
pub fn dispatch_resource(
    resource: &mut dyn Resource,
    req: &Request,
    resp: &mut Response,
    params: &Params,
) -> Result<()> {
    match req.method().as_str().to_ascii_lowercase().as_str() {
        "get" => resource.get(req, resp, params),
        "post" => resource.post(req, resp, params),
        "put" => resource.put(req, resp, params),
        "patch" => resource.patch(req, resp, params),
        "delete" => resource.delete(req, resp, params),
        "head" => resource.head(req, resp, params),
        "options" => resource.options(req, resp, params),
        _ => Err(Error::method_not_allowed(req.method())),
    }
}
