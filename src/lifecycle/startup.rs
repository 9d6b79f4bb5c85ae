//! Startup orchestration.
//!
//! # Responsibilities
//! - Bind the listener (fail fast if the address is taken)
//! - Run the server until a shutdown signal
//! - Bound the drain phase by the configured grace period

use std::future::Future;
use std::io;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::config::ListenerConfig;
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;

/// Bind the configured address.
pub async fn bind_listener(config: &ListenerConfig) -> io::Result<TcpListener> {
    let listener = TcpListener::bind(&config.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Server listening");
    Ok(listener)
}

/// Serve until `signal` resolves, then drain for at most `grace`.
pub async fn run<F>(server: HttpServer, listener: TcpListener, signal: F) -> io::Result<()>
where
    F: Future<Output = &'static str>,
{
    let grace = Duration::from_secs(server.config().timeouts.shutdown_grace_secs);
    let shutdown = Shutdown::new();
    let mut server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    tokio::select! {
        joined = &mut server_task => {
            // Server stopped on its own; that only happens on error.
            return joined.map_err(io::Error::other)?;
        }
        name = signal => {
            tracing::info!(signal = name, "Received signal, closing server");
        }
    }

    shutdown.trigger();

    match tokio::time::timeout(grace, &mut server_task).await {
        Ok(joined) => {
            joined.map_err(io::Error::other)??;
            tracing::info!("Server closed, exiting process");
        }
        Err(_) => {
            tracing::warn!(
                grace_secs = grace.as_secs(),
                "Shutdown grace period elapsed with requests in flight"
            );
            server_task.abort();
        }
    }

    Ok(())
}
