//! ESI Market Watch — Entry Point
//!
//! Initializes configuration, logging and the resilient ESI client,
//! resolves the configured names to numeric identifiers, then runs the
//! polling loop until SIGINT.
//!
//! Wiring sequence:
//! 1. Load config.toml (built-in defaults when absent) + validate
//! 2. Init tracing on stderr (stdout carries only measurements)
//! 3. Create EsiClient (transport + rate limit + retry)
//! 4. Resolve region and item type ids (fatal on failure, exit 1)
//! 5. Run the polling loop; SIGINT → close connection and exit 0

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::info;

mod adapters;
mod config;
mod domain;
mod ports;
mod usecases;

use adapters::api::client::{EsiClient, EsiClientConfig};
use adapters::api::transport::ReqwestTransport;
use adapters::clock::TokioClock;
use domain::market::IdentifierTable;
use usecases::poller::MarketPoller;
use usecases::resolver::Resolver;

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration from config.toml ──────────────
    let config = config::loader::load_config("config.toml")
        .context("Failed to load configuration")?;

    // ── 2. Initialize logging on stderr ─────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new(&config.service.log_level)
                }),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        name = %config.service.name,
        version = env!("CARGO_PKG_VERSION"),
        region = %config.poll.region,
        items = config.poll.items.len(),
        "Starting ESI market watch"
    );

    // ── 3. Create the resilient ESI client ──────────────────
    let client_config = EsiClientConfig {
        base_url: format!("https://{}", config.api.endpoint),
        version: config.api.version.clone(),
        max_retries: config.api.max_retries,
        retry_timeout: Duration::from_secs_f64(config.api.retry_timeout_secs),
        reopen_timeout: Duration::from_secs_f64(config.api.reopen_timeout_secs),
        request_rate: config.api.request_rate,
    };
    let mut client = EsiClient::new(ReqwestTransport, TokioClock, client_config);

    // ── 4. Resolve identifiers (fatal on failure) ───────────
    let table = {
        let mut resolver = Resolver::new(&mut client);
        let region = resolver
            .resolve_region(&config.poll.region)
            .await
            .context("Startup resolution failed, giving up")?;
        let items = resolver
            .resolve_item_types(&config.poll.items)
            .await
            .context("Startup resolution failed, giving up")?;
        IdentifierTable::new(region, items)
    };

    // ── 5. Run the polling loop until SIGINT ────────────────
    let mut poller = MarketPoller::new(
        client,
        TokioClock,
        table,
        config.poll.interval(),
        std::io::stdout(),
    );

    tokio::select! {
        result = poller.run() => result?,
        _ = signal::ctrl_c() => {
            info!("SIGINT received, shutting down");
        }
    }

    poller.shutdown();
    info!("Shutdown complete");
    Ok(())
}
