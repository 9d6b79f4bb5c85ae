use clap::Parser;

use redirector::cli::Cli;
use redirector::config::{load_config, validate_config, ConfigError, RedirectorConfig};
use redirector::http::HttpServer;
use redirector::lifecycle::{self, signals};
use redirector::observability::{logging, metrics};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RedirectorConfig::default(),
    };
    cli.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init(&config.observability)?;

    tracing::info!("redirector v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        rules = %config.source.path.display(),
        sheet = config.source.sheet.as_deref().unwrap_or("<first>"),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = match lifecycle::bind_listener(&config.listener).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, "Failed to start server");
            return Err(e.into());
        }
    };

    let server = HttpServer::new(config);
    lifecycle::run(server, listener, signals::shutdown_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
