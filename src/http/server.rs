//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with a single catch-all handler
//! - Wire up middleware (tracing, request ID, panic recovery, timeout)
//! - Load fresh rules and resolve every request
//! - Serve until the shutdown signal, then drain in-flight requests

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::RedirectorConfig;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::http::response::{handle_panic, AppError};
use crate::observability::metrics;
use crate::routing::resolve;
use crate::rules::{RuleLoader, TabularSource, XlsxSource};

/// Application state injected into handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub loader: Arc<RuleLoader>,
}

/// HTTP server for the redirector.
pub struct HttpServer {
    router: Router,
    config: RedirectorConfig,
}

impl HttpServer {
    /// Create a server reading rules from the configured spreadsheet.
    pub fn new(config: RedirectorConfig) -> Self {
        let source = Arc::new(XlsxSource::new(config.source.path.clone()));
        Self::with_source(config, source)
    }

    /// Create a server reading rules from an arbitrary source.
    pub fn with_source(config: RedirectorConfig, source: Arc<dyn TabularSource>) -> Self {
        let loader = RuleLoader::new(
            source,
            config.source.sheet.clone(),
            Duration::from_millis(config.source.read_timeout_ms),
        );
        let state = AppState {
            loader: Arc::new(loader),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &RedirectorConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(redirect_handler))
            .route("/", any(redirect_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server on `listener` until `shutdown` fires.
    ///
    /// After the signal no new connections are accepted; the call returns
    /// once in-flight requests have completed.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            rules = %self.config.source.path.display(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RedirectorConfig {
        &self.config
    }
}

/// Catch-all handler: load rules, resolve, shape the response.
async fn redirect_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let method = request.method().to_string();
    let target = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    tracing::debug!(
        request_id = %request_id(&request),
        method = %method,
        target = %target,
        "Loading redirect rules"
    );

    let (response, outcome) = match state.loader.load().await {
        Ok(rules) => {
            let decision = resolve(&target, &rules);
            let outcome = decision.outcome();
            (decision.into_response(), outcome)
        }
        Err(e) => (AppError::from(e).into_response(), "error"),
    };

    metrics::record_request(&method, response.status().as_u16(), outcome, start_time);
    response
}
