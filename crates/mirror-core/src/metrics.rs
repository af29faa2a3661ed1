//! Request instrumentation

use std::sync::Arc;
use std::time::Instant;

use ::metrics::{counter, histogram};

use crate::error::CoreError;
use crate::mirror::MirrorService;
use crate::response::{MirrorRequest, MirrorResponse};

/// Explicit instrumentation wrapper around [`MirrorService`].
///
/// Records a per-request counter labeled by method and cache outcome
/// and a latency histogram, then returns the inner response untouched.
/// Composed at wiring time; callers that do not want metrics use the
/// service directly.
pub struct InstrumentedMirror {
    inner: Arc<MirrorService>,
}

impl InstrumentedMirror {
    pub fn new(inner: Arc<MirrorService>) -> Self {
        Self { inner }
    }

    pub async fn handle(&self, request: MirrorRequest) -> Result<MirrorResponse, CoreError> {
        let method = request.method.to_string();
        let start = Instant::now();

        let result = self.inner.handle(request).await;

        let outcome = match &result {
            Ok(response) => response.cache_status.as_str(),
            Err(_) => "ERROR",
        };

        counter!(
            "mirror_requests_total",
            "method" => method.clone(),
            "cache" => outcome,
        )
        .increment(1);
        histogram!("mirror_request_duration_seconds", "method" => method)
            .record(start.elapsed().as_secs_f64());

        result
    }
}
