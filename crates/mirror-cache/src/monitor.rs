//! Upstream health monitor

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::time::interval;
use tracing::{debug, info, warn};

use mirror_core::UpstreamHealth;

/// Health monitor configuration
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Full URL probed on each tick.
    pub probe_url: String,
    /// Time between probes.
    pub check_interval: Duration,
    /// Probe request timeout.
    pub timeout: Duration,
}

/// Spawn the background task that owns the upstream health flag.
///
/// Any HTTP response, including an error status, counts as reachable;
/// the flag only tracks whether the upstream answers at all. This task
/// is the sole writer of the flag.
pub fn spawn_health_monitor(
    health: Arc<UpstreamHealth>,
    config: MonitorConfig,
) -> Result<tokio::task::JoinHandle<()>> {
    let client = reqwest::Client::builder()
        .timeout(config.timeout)
        .build()?;

    info!(
        "Starting upstream health monitor for {} (interval: {:?})",
        config.probe_url, config.check_interval
    );

    Ok(tokio::spawn(async move {
        let mut ticker = interval(config.check_interval);

        loop {
            ticker.tick().await;

            let reachable = match client.get(&config.probe_url).send().await {
                Ok(response) => {
                    debug!("Upstream probe: {}", response.status());
                    true
                }
                Err(e) => {
                    warn!("Upstream probe failed: {}", e);
                    false
                }
            };

            if reachable != health.online() {
                if reachable {
                    info!("Upstream recovered, resuming live requests");
                } else {
                    warn!("Upstream unreachable, switching to offline mode");
                }
            }

            health.set_online(reachable);
        }
    }))
}
