//! Request object
//!
//! An already-parsed request: method, path, query, headers and the collected body.
//! The stored path is percent-decoded; routing and static lookup both see the
//! decoded form.

use std::borrow::Cow;

use http_body_util::{BodyExt, Limited};
use hyper::body::{Bytes, Incoming};
use hyper::{HeaderMap, Method, Version};
use percent_encoding::percent_decode_str;
use serde::de::DeserializeOwned;

use crate::error::{BoxError, Error, Result};

#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    path: String,
    query: Option<String>,
    version: Version,
    headers: HeaderMap,
    body: Bytes,
}

impl Request {
    /// Build a request from a method and a request target (`/path?query`)
    pub fn new(method: Method, target: &str) -> Self {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (target, None),
        };

        Self {
            method,
            path: decode_path(if path.is_empty() { "/" } else { path }),
            query,
            version: Version::HTTP_11,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Collect a hyper request into an owned `Request`
    ///
    /// Bodies larger than `max_body_size` fail with
    /// [`http_body_util::LengthLimitError`] inside the returned error.
    pub async fn from_hyper(
        req: hyper::Request<Incoming>,
        max_body_size: usize,
    ) -> Result<Self, BoxError> {
        let (parts, body) = req.into_parts();
        let body = Limited::new(body, max_body_size).collect().await?.to_bytes();

        Ok(Self {
            method: parts.method,
            path: decode_path(parts.uri.path()),
            query: parts.uri.query().map(ToString::to_string),
            version: parts.version,
            headers: parts.headers,
            body,
        })
    }

    pub const fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Rewrite the path, used when the static prefix is stripped
    pub(crate) fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub const fn version(&self) -> Version {
        self.version
    }

    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Header value as a string, `None` when missing or not visible ASCII
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn text(&self) -> Result<&str> {
        std::str::from_utf8(&self.body).map_err(Error::handler)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Percent-decode a raw path, keeping it unchanged when the result is not UTF-8
fn decode_path(raw: &str) -> String {
    percent_decode_str(raw)
        .decode_utf8()
        .map_or_else(|_| raw.to_string(), Cow::into_owned)
}
