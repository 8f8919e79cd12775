//! Request handler module
//!
//! The two handler kinds a route can carry (plain functions and per-verb
//! resources), the allowed-method set, and the static asset server mounted
//! under the static prefix.

mod method_set;
mod resource;
pub mod static_files;

use std::fmt;
use std::sync::Arc;

pub use method_set::MethodSet;
pub use resource::Resource;
pub(crate) use resource::dispatch_resource;

use crate::error::Result;
use crate::http::{Request, Response};
use crate::routing::Params;

/// Function handler signature: mutate the response in place
pub type HandlerFn = dyn Fn(&Request, &mut Response, &Params) -> Result<()> + Send + Sync;

/// Builds a fresh resource instance for every request
pub type ResourceFactory = dyn Fn() -> Box<dyn Resource> + Send + Sync;

/// Handler stored in a route
#[derive(Clone)]
pub enum Handler {
    Function(Arc<HandlerFn>),
    Resource(Arc<ResourceFactory>),
}

impl Handler {
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&Request, &mut Response, &Params) -> Result<()> + Send + Sync + 'static,
    {
        Self::Function(Arc::new(f))
    }

    /// Resource constructed with `Default` on every request
    pub fn resource<R>() -> Self
    where
        R: Resource + Default + 'static,
    {
        Self::resource_with(R::default)
    }

    pub fn resource_with<R, F>(factory: F) -> Self
    where
        R: Resource + 'static,
        F: Fn() -> R + Send + Sync + 'static,
    {
        Self::Resource(Arc::new(move || Box::new(factory()) as Box<dyn Resource>))
    }

    pub const fn is_resource(&self) -> bool {
        matches!(self, Self::Resource(_))
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function(_) => f.write_str("Handler::Function"),
            Self::Resource(_) => f.write_str("Handler::Resource"),
        }
    }
}
