//! Static asset server
//!
//! Serves files below a root directory for requests whose static prefix has
//! already been stripped. Missing assets get this server's own 404, never the
//! router's default response.

use std::path::{Path, PathBuf};

use hyper::header::{self, HeaderValue};
use hyper::{Method, StatusCode};
use tokio::fs;

use crate::http::{cache, mime, Request, Response};
use crate::logger;

#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
}

impl StaticFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Serve the asset named by the request path
    pub async fn serve(&self, req: &Request) -> Response {
        if !matches!(*req.method(), Method::GET | Method::HEAD) {
            return build_405_response();
        }

        match self.load(req.path()).await {
            Some((content, path)) => build_asset_response(content, &path, req.header("if-none-match")),
            None => build_404_response(),
        }
    }

    /// Read a file below the root, rejecting directories and traversal
    async fn load(&self, path: &str) -> Option<(Vec<u8>, PathBuf)> {
        let relative = path.trim_start_matches('/');
        if relative.is_empty() || relative.split('/').any(|part| part == "..") {
            return None;
        }

        let root = match self.root.canonicalize() {
            Ok(p) => p,
            Err(e) => {
                logger::log_warning(&format!(
                    "Static directory not found or inaccessible '{}': {e}",
                    self.root.display()
                ));
                return None;
            }
        };

        // Missing files are the common case, no need to log
        let file_path = root.join(relative).canonicalize().ok()?;
        if !file_path.starts_with(&root) {
            logger::log_warning(&format!(
                "Path traversal attempt blocked: {path} -> {}",
                file_path.display()
            ));
            return None;
        }
        if !file_path.is_file() {
            return None;
        }

        match fs::read(&file_path).await {
            Ok(content) => Some((content, file_path)),
            Err(e) => {
                logger::log_error(&format!(
                    "Failed to read file '{}': {e}",
                    file_path.display()
                ));
                None
            }
        }
    }
}

fn build_asset_response(content: Vec<u8>, path: &Path, if_none_match: Option<&str>) -> Response {
    let etag = cache::etag_for(&content);
    let mut response = Response::new();

    if let Ok(value) = HeaderValue::from_str(&etag) {
        response.set_header(header::ETAG, value);
    }
    response.set_header(
        header::CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=3600"),
    );

    if cache::is_not_modified(if_none_match, &etag) {
        response.set_status(StatusCode::NOT_MODIFIED);
        return response;
    }

    response.set_body(content, HeaderValue::from_static(mime::content_type_for(path)));
    response
}

fn build_404_response() -> Response {
    let mut response = Response::new();
    response.set_status(StatusCode::NOT_FOUND);
    response.set_text("404 Not Found");
    response
}

fn build_405_response() -> Response {
    let mut response = Response::new();
    response.set_status(StatusCode::METHOD_NOT_ALLOWED);
    response.set_header(header::ALLOW, HeaderValue::from_static("GET, HEAD"));
    response.set_text("405 Method Not Allowed");
    response
}
