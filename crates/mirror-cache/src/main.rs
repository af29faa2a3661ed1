//! Mirror Cache - caching mirror for a rate-limited, paginated REST API

use anyhow::{Context, Result};
use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod monitor;

use config::Config;
use mirror_api::{create_router, AppState, MetricsHandle};
use mirror_core::{InstrumentedMirror, MirrorConfig, MirrorService, UpstreamHealth};
use mirror_proxy::{HttpTransport, HttpTransportConfig};
use mirror_storage::MemoryCache;
use monitor::{spawn_health_monitor, MonitorConfig};

/// Mirror Cache - caching mirror for a rate-limited upstream API
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    config: String,

    /// Bind address
    #[arg(long, env = "MIRROR_CACHE_BIND")]
    bind: Option<String>,

    /// Port
    #[arg(short, long, env = "MIRROR_CACHE_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load(&args.config)?;

    init_logging(&config.logging.level);

    info!("Starting Mirror Cache v{}", env!("CARGO_PKG_VERSION"));

    // Install the metrics recorder before the first request
    let prometheus = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install metrics recorder")?;
    let metrics = MetricsHandle::new(prometheus);

    // Collaborators for the decision engine
    let transport = Arc::new(HttpTransport::new(HttpTransportConfig {
        timeout: Duration::from_secs(config.mirror.timeout_secs),
    })?);
    let cache = Arc::new(MemoryCache::new());
    let health = Arc::new(UpstreamHealth::default());

    let mirror_config = MirrorConfig {
        per_page: config.mirror.per_page,
        offline_status: http::StatusCode::from_u16(config.mirror.offline_status)
            .context("Invalid offline status code")?,
        ..MirrorConfig::default()
    };

    let service = Arc::new(MirrorService::new(
        transport,
        cache,
        health.clone(),
        mirror_config,
    ));
    let mirror = Arc::new(InstrumentedMirror::new(service));

    // The monitor is the sole writer of the health flag
    spawn_health_monitor(
        health.clone(),
        MonitorConfig {
            probe_url: format!(
                "{}{}",
                config.upstream.url.trim_end_matches('/'),
                config.upstream.probe_path
            ),
            check_interval: Duration::from_secs(config.upstream.check_interval_secs),
            timeout: Duration::from_secs(config.mirror.timeout_secs),
        },
    )?;

    let state = AppState::new(mirror, health, &config.upstream.url, metrics);

    let app = create_router(state).layer(TraceLayer::new_for_http());

    let bind_addr = args.bind.unwrap_or(config.server.bind_address);
    let port = args.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", bind_addr, port).parse()?;

    info!("Listening on {}", addr);
    info!("Upstream: {}", config.upstream.url);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Initialize logging
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C handler");

    info!("Shutdown signal received");
}
