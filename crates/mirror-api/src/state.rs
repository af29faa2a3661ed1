//! Application state

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use mirror_core::{InstrumentedMirror, UpstreamHealth};

/// Handle for rendering the Prometheus exposition text.
#[derive(Clone)]
pub struct MetricsHandle(PrometheusHandle);

impl MetricsHandle {
    pub fn new(handle: PrometheusHandle) -> Self {
        Self(handle)
    }

    pub fn render(&self) -> String {
        self.0.render()
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub mirror: Arc<InstrumentedMirror>,
    pub health: Arc<UpstreamHealth>,
    /// Base URL of the upstream API, without a trailing slash.
    pub upstream_url: String,
    pub metrics: MetricsHandle,
}

impl AppState {
    pub fn new(
        mirror: Arc<InstrumentedMirror>,
        health: Arc<UpstreamHealth>,
        upstream_url: impl Into<String>,
        metrics: MetricsHandle,
    ) -> Self {
        let upstream_url: String = upstream_url.into();
        Self {
            mirror,
            health,
            upstream_url: upstream_url.trim_end_matches('/').to_string(),
            metrics,
        }
    }
}
