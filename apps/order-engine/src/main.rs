//! Order Engine Binary
//!
//! Starts the order engine HTTP API.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin order-engine
//! ```
//!
//! # Environment Variables
//!
//! - `ORDER_ENGINE_CONFIG`: Path to a YAML config file (default: built-in defaults)
//! - `RUST_LOG`: Log filter, overrides `observability.log_level`

use std::sync::Arc;

use anyhow::Context;
use order_engine::config::{Config, LogFormat, load_config};
use order_engine::domain::shared::Money;
use order_engine::infrastructure::http::{AppState, create_router};
use order_engine::infrastructure::{InMemoryStore, StaticPriceFeed, TracingEventPublisher};
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::EnvFilter;

/// Environment variable naming the config file.
const CONFIG_PATH_ENV: &str = "ORDER_ENGINE_CONFIG";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let config_path = std::env::var(CONFIG_PATH_ENV).ok();
    let config = load_config(config_path.as_deref())
        .with_context(|| format!("loading config from {config_path:?}"))?;

    init_tracing(&config);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = config_path.as_deref().unwrap_or("<defaults>"),
        "Starting Order Engine"
    );

    let app = create_router(create_state(&config)?);

    let addr = config.server.listen_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding HTTP listener on {addr}"))?;

    tracing::info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("Order Engine stopped");
    Ok(())
}

/// Load `.env` from the working directory or the nearest ancestor.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins over the configured level.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match config.observability.log_format {
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// Wire the adapters and use cases behind the router.
fn create_state(
    config: &Config,
) -> anyhow::Result<AppState<InMemoryStore, StaticPriceFeed, TracingEventPublisher>> {
    let settings = config.execution_settings()?;

    let store = Arc::new(InMemoryStore::new(Money::new(
        config.execution.default_account_equity,
    )));
    let price_feed = Arc::new(StaticPriceFeed::from_quotes(config.price_feed.seed()));

    tracing::info!(
        quotes = price_feed.len(),
        fee_rate = %settings.fee_rate,
        timeout_ms = config.execution.dependency_timeout_ms,
        "Execution adapters ready"
    );

    Ok(AppState::new(
        store,
        price_feed,
        Arc::new(TracingEventPublisher),
        settings,
        env!("CARGO_PKG_VERSION"),
    ))
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }
}
