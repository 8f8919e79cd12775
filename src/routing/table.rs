//! Route table module
//!
//! Stores routes in registration order and resolves a path with a linear,
//! first-match scan. A more specific route registered later can be shadowed by
//! an earlier, more general one with the same segment count.

use super::{Params, PathPattern};
use crate::error::{Error, Result};
use crate::handler::{Handler, MethodSet};

/// A registered route
#[derive(Debug, Clone)]
pub struct Route {
    pattern: PathPattern,
    handler: Handler,
    allowed_methods: MethodSet,
}

impl Route {
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub const fn handler(&self) -> &Handler {
        &self.handler
    }

    /// Verbs accepted by a function handler; not consulted for resources
    pub const fn allowed_methods(&self) -> &MethodSet {
        &self.allowed_methods
    }
}

/// A resolved route and the values its placeholders captured
#[derive(Debug)]
pub struct HandlerBinding<'a> {
    pub route: &'a Route,
    pub params: Params,
}

#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub const fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Register a route; `None` for `allowed_methods` means the default verb set
    pub fn register(
        &mut self,
        pattern: &str,
        handler: Handler,
        allowed_methods: Option<MethodSet>,
    ) -> Result<()> {
        if self.routes.iter().any(|r| r.pattern() == pattern) {
            return Err(Error::DuplicateRoute {
                pattern: pattern.to_string(),
            });
        }

        self.routes.push(Route {
            pattern: PathPattern::parse(pattern)?,
            handler,
            allowed_methods: allowed_methods.unwrap_or_default(),
        });
        Ok(())
    }

    /// Find the first route matching `path`
    pub fn resolve(&self, path: &str) -> Option<HandlerBinding<'_>> {
        self.routes.iter().find_map(|route| {
            route
                .pattern
                .matches(path)
                .map(|params| HandlerBinding { route, params })
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(Route::pattern)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
