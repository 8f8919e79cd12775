// Connection handling module
// Serves one TCP connection and bridges hyper requests into the App

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use http_body_util::{Full, LengthLimitError};
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::Method;
use hyper_util::rt::TokioIo;

use crate::app::App;
use crate::config::Config;
use crate::http::{build_413_response, build_500_response, Request};
use crate::logger::{self, AccessLogEntry};

/// Accept a connection unless the connection limit is reached.
///
/// # Arguments
///
/// * `stream` - The TCP stream to handle
/// * `peer_addr` - The peer's socket address
/// * `app` - The application every request is dispatched to
/// * `config` - Shared configuration
/// * `conn_counter` - Active connection counter
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    app: &Arc<App>,
    config: &Arc<Config>,
    conn_counter: &Arc<AtomicUsize>,
) {
    // Increment counter first, then check limit (prevents race condition)
    let prev_count = conn_counter.fetch_add(1, Ordering::SeqCst);

    if let Some(max_conn) = config.performance.max_connections {
        if prev_count >= usize::try_from(max_conn).unwrap_or(usize::MAX) {
            conn_counter.fetch_sub(1, Ordering::SeqCst);
            logger::log_warning(&format!(
                "Max connections reached: {prev_count}/{max_conn}. Connection rejected."
            ));
            drop(stream);
            return;
        }
    }

    handle_connection(
        stream,
        peer_addr,
        Arc::clone(app),
        Arc::clone(config),
        Arc::clone(conn_counter),
    );
}

/// Serve a single connection in a spawned task.
///
/// The connection is bounded by `performance.request_timeout`; the counter is
/// decremented when it ends.
fn handle_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    app: Arc<App>,
    config: Arc<Config>,
    conn_counter: Arc<AtomicUsize>,
) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);
        let timeout = Duration::from_secs(config.performance.request_timeout);

        let mut builder = http1::Builder::new();
        builder.keep_alive(config.performance.keep_alive);

        let service_config = Arc::clone(&config);
        let conn = builder.serve_connection(
            io,
            service_fn(move |req| {
                let app = Arc::clone(&app);
                let config = Arc::clone(&service_config);
                async move { serve_request(req, peer_addr, app, config).await }
            }),
        );

        match tokio::time::timeout(timeout, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => logger::log_connection_error(&err),
            Err(_) => logger::log_warning(&format!(
                "Connection from {peer_addr} timed out after {} seconds",
                timeout.as_secs()
            )),
        }

        conn_counter.fetch_sub(1, Ordering::SeqCst);
    });
}

/// Run one hyper request through the application
///
/// An error escaping the application becomes a 500 after being logged.
pub async fn serve_request(
    req: hyper::Request<Incoming>,
    peer_addr: SocketAddr,
    app: Arc<App>,
    config: Arc<Config>,
) -> Result<hyper::Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();

    let max_body_size = usize::try_from(config.performance.max_body_size).unwrap_or(usize::MAX);
    let req = match Request::from_hyper(req, max_body_size).await {
        Ok(req) => req,
        Err(e) if e.is::<LengthLimitError>() => {
            logger::log_warning(&format!(
                "Request body from {peer_addr} exceeds {max_body_size} bytes"
            ));
            return Ok(build_413_response());
        }
        Err(e) => {
            logger::log_error(&format!("Failed to read request body: {e}"));
            return Ok(build_500_response());
        }
    };

    let is_head = *req.method() == Method::HEAD;
    let access_entry = config
        .logging
        .access_log
        .then(|| AccessLogEntry::for_request(peer_addr.ip().to_string(), &req));
    let (method, path) = (req.method().clone(), req.path().to_string());

    let response = match app.call(req).await {
        Ok(resp) => resp.into_hyper(is_head),
        Err(err) => {
            logger::log_unhandled_error(method.as_str(), &path, &err);
            build_500_response()
        }
    };

    if let Some(entry) = access_entry {
        let body_bytes = response
            .headers()
            .get(hyper::header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        let entry = entry.finish(response.status().as_u16(), body_bytes, started.elapsed());
        logger::log_access(&entry, &config.logging.access_log_format);
    }

    Ok(response)
}
