use std::sync::OnceLock;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus exporter and register all application metrics.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload. Only one recorder can exist per
/// process, so later calls return the handle from the first.
pub fn init_metrics() -> PrometheusHandle {
    HANDLE
        .get_or_init(|| {
            let handle = PrometheusBuilder::new()
                .install_recorder()
                .expect("failed to install Prometheus recorder");

            // Pre-register counters so they appear even before the first increment.
            counter!("trade_calculations_total").absolute(0);
            counter!("trade_validation_failures_total").absolute(0);
            counter!("trade_sessions_saved_total").absolute(0);
            counter!("rate_limited_requests_total").absolute(0);

            // Histogram is lazily created on first record; force creation.
            histogram!("price_lookup_seconds").record(0.0);

            handle
        })
        .clone()
}
