//! Error types
//!
//! One error enum for registration, dispatch and handler failures.

use hyper::Method;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Boxed error a handler may raise from any source
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A pattern string was registered twice
    #[error("route already exists: {pattern}")]
    DuplicateRoute { pattern: String },

    #[error("invalid route pattern '{pattern}': {reason}")]
    InvalidPattern {
        pattern: String,
        reason: &'static str,
    },

    /// The matched route or resource does not accept the request verb
    #[error("method not allowed: {method}")]
    MethodNotAllowed { method: String },

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything raised from inside a handler body
    #[error("{0}")]
    Handler(BoxError),
}

impl Error {
    /// Wrap an arbitrary error or message raised by a handler
    ///
    /// ```
    /// use highball::Error;
    /// let err = Error::handler("AttributeError");
    /// assert_eq!(err.to_string(), "AttributeError");
    /// ```
    pub fn handler(err: impl Into<BoxError>) -> Self {
        Self::Handler(err.into())
    }

    pub fn method_not_allowed(method: &Method) -> Self {
        Self::MethodNotAllowed {
            method: method.as_str().to_string(),
        }
    }

    pub const fn is_method_not_allowed(&self) -> bool {
        matches!(self, Self::MethodNotAllowed { .. })
    }

    pub const fn is_duplicate_route(&self) -> bool {
        matches!(self, Self::DuplicateRoute { .. })
    }
}
