//! In-process test client
//!
//! Sends requests through the application's full entry point without a socket.
//! Errors that would have reached the transport come back as `Err`.

use hyper::body::Bytes;
use hyper::Method;

use crate::app::App;
use crate::error::Result;
use crate::http::{Request, Response};

const DEFAULT_BASE_URL: &str = "http://testserver";

pub struct TestClient<'a> {
    app: &'a App,
    base_url: &'a str,
}

impl<'a> TestClient<'a> {
    pub const fn new(app: &'a App) -> Self {
        Self {
            app,
            base_url: DEFAULT_BASE_URL,
        }
    }

    /// Absolute URLs under this base are accepted and reduced to their path
    #[must_use]
    pub fn with_base_url(mut self, base_url: &'a str) -> Self {
        self.base_url = base_url;
        self
    }

    pub async fn get(&self, url: &str) -> Result<Response> {
        self.request(Method::GET, url).await
    }

    pub async fn post(&self, url: &str) -> Result<Response> {
        self.request(Method::POST, url).await
    }

    pub async fn put(&self, url: &str) -> Result<Response> {
        self.request(Method::PUT, url).await
    }

    pub async fn delete(&self, url: &str) -> Result<Response> {
        self.request(Method::DELETE, url).await
    }

    pub async fn options(&self, url: &str) -> Result<Response> {
        self.request(Method::OPTIONS, url).await
    }

    pub async fn request(&self, method: Method, url: &str) -> Result<Response> {
        self.send(Request::new(method, self.target(url))).await
    }

    pub async fn request_with_body(
        &self,
        method: Method,
        url: &str,
        body: impl Into<Bytes>,
    ) -> Result<Response> {
        self.send(Request::new(method, self.target(url)).with_body(body))
            .await
    }

    pub async fn send(&self, req: Request) -> Result<Response> {
        self.app.call(req).await
    }

    fn target<'u>(&self, url: &'u str) -> &'u str {
        url.strip_prefix(self.base_url).unwrap_or(url)
    }
}
