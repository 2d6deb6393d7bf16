//! Weather API service.
//!
//! Serves current conditions and forecasts from a SQLite read-through cache
//! in front of the external provider, and sweeps expired entries in the
//! background.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

use storage::{CacheStore, SqliteCacheStore};
use weather_api::config::Args;
use weather_api::{AppState, ExpirationSweeper, ProviderFetcher, WeatherApiClient, WeatherLookupService};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.tracing_level())
        .with_target(true)
        .with_thread_ids(true)
        .json()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let prometheus = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    let window = args.expiration_window();
    info!(
        listen = %args.listen,
        database = %args.database_path.display(),
        provider = %args.provider_base_url,
        expiration_minutes = window.minutes(),
        sweep_interval_secs = args.sweep_interval().as_secs(),
        "Starting weather API"
    );

    let sqlite = Arc::new(
        SqliteCacheStore::open(&args.database_path)
            .await
            .context("Failed to open cache database")?,
    );
    let store: Arc<dyn CacheStore> = sqlite.clone();

    let provider: Arc<dyn ProviderFetcher> = Arc::new(WeatherApiClient::new(
        &args.provider_base_url,
        &args.provider_api_key,
        args.provider_timeout(),
    )?);

    let shutdown = CancellationToken::new();

    let sweeper = ExpirationSweeper::new(store.clone(), window, args.sweep_interval());
    let sweeper_handle = tokio::spawn(sweeper.run(shutdown.child_token()));

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received");
                signal_token.cancel();
            }
            Err(e) => error!(error = %e, "Failed to listen for shutdown signal"),
        }
    });

    let state = Arc::new(AppState {
        lookup: WeatherLookupService::new(store.clone(), provider, window),
        store,
        prometheus: Some(prometheus),
    });

    let served = weather_api::server::serve(state, &args.listen, shutdown.clone()).await;

    shutdown.cancel();
    if let Err(e) = sweeper_handle.await {
        error!(error = %e, "Sweeper task panicked");
    }
    sqlite.close().await;

    info!("Weather API stopped");
    served
}
