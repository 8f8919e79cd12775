//! Response object
//!
//! Handlers receive a mutable `Response` and populate it in place. It is turned
//! into a hyper response only at the transport boundary.

use std::borrow::Cow;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{self, HeaderName, HeaderValue};
use hyper::{HeaderMap, StatusCode};
use serde::Serialize;

use crate::error::Result;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const TEXT_HTML: &str = "text/html; charset=utf-8";
const APPLICATION_JSON: &str = "application/json";

#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl Default for Response {
    fn default() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default response for a path no route matches
    pub fn not_found() -> Self {
        let mut response = Self::default();
        response.set_status(StatusCode::NOT_FOUND);
        response.set_text("Not found");
        response
    }

    pub const fn status(&self) -> StatusCode {
        self.status
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body decoded as UTF-8, lossy
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.set_body(text.into(), HeaderValue::from_static(TEXT_PLAIN));
    }

    pub fn set_html(&mut self, html: impl Into<String>) {
        self.set_body(html.into(), HeaderValue::from_static(TEXT_HTML));
    }

    pub fn set_json<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        let body = serde_json::to_vec(value)?;
        self.set_body(body, HeaderValue::from_static(APPLICATION_JSON));
        Ok(())
    }

    pub fn set_body(&mut self, body: impl Into<Bytes>, content_type: HeaderValue) {
        self.body = body.into();
        self.headers.insert(header::CONTENT_TYPE, content_type);
    }

    /// Convert into a hyper response, dropping the body for `HEAD`
    pub fn into_hyper(self, is_head: bool) -> hyper::Response<Full<Bytes>> {
        let content_length = HeaderValue::from(self.body.len());
        let body = if is_head { Bytes::new() } else { self.body };

        let mut response = hyper::Response::new(Full::new(body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
            .headers_mut()
            .insert(header::CONTENT_LENGTH, content_length);
        response
    }
}

/// Build 500 Internal Server Error response for errors no handler caught
pub fn build_500_response() -> hyper::Response<Full<Bytes>> {
    hyper::Response::builder()
        .status(500)
        .header("Content-Type", TEXT_PLAIN)
        .body(Full::new(Bytes::from("Internal Server Error")))
        .unwrap_or_else(|e| {
            crate::logger::log_error(&format!("Failed to build 500 response: {e}"));
            hyper::Response::new(Full::new(Bytes::from("Internal Server Error")))
        })
}

/// Build 413 Payload Too Large response for bodies over the configured limit
pub fn build_413_response() -> hyper::Response<Full<Bytes>> {
    hyper::Response::builder()
        .status(413)
        .header("Content-Type", TEXT_PLAIN)
        .body(Full::new(Bytes::from("Payload Too Large")))
        .unwrap_or_else(|e| {
            crate::logger::log_error(&format!("Failed to build 413 response: {e}"));
            hyper::Response::new(Full::new(Bytes::from("Payload Too Large")))
        })
}
