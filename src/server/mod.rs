// Server module entry point
// Accept loop over a hyper HTTP/1 transport with graceful stop on Ctrl-C

pub mod connection;
pub mod listener;

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::app::App;
use crate::config::Config;
use crate::logger;

pub use connection::serve_request;
pub use listener::create_listener;

/// Bind the configured address and serve `app` until Ctrl-C
pub async fn run(app: Arc<App>, config: Arc<Config>) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.socket_addr()?;
    let listener = create_listener(addr)?;
    logger::log_server_start(&addr, &config);

    serve(listener, app, config, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            logger::log_error(&format!("Failed to listen for Ctrl-C: {e}"));
            std::future::pending::<()>().await;
        }
    })
    .await;

    Ok(())
}

/// Accept connections on `listener` until `shutdown` resolves
pub async fn serve(
    listener: TcpListener,
    app: Arc<App>,
    config: Arc<Config>,
    shutdown: impl std::future::Future<Output = ()>,
) {
    let active_connections = Arc::new(AtomicUsize::new(0));
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        connection::accept_connection(
                            stream,
                            peer_addr,
                            &app,
                            &config,
                            &active_connections,
                        );
                    }
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            () = &mut shutdown => {
                logger::log_shutdown();
                break;
            }
        }
    }
}
