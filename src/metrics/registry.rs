// Prometheus metrics registry and collectors

use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec_with_registry, register_histogram_vec_with_registry,
    register_histogram_with_registry, CounterVec, Encoder, Histogram, HistogramOpts,
    HistogramVec, Opts, Registry, TextEncoder,
};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // ============================================================================
    // ANALYSIS METRICS
    // ============================================================================

    /// Completed analyses by where the result came from
    pub static ref ANALYSES_TOTAL: CounterVec = register_counter_vec_with_registry!(
        Opts::new("menu_analyses_total", "Total menu analyses"),
        &["source"], // source: ai, mock, error
        REGISTRY
    ).unwrap();

    /// Image preprocessing duration
    pub static ref PREPROCESS_DURATION: Histogram = register_histogram_with_registry!(
        HistogramOpts::new("image_preprocess_duration_seconds", "Image preprocessing duration")
            .buckets(vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5]),
        REGISTRY
    ).unwrap();

    // ============================================================================
    // PROVIDER METRICS
    // ============================================================================

    /// Model attempts by outcome
    pub static ref PROVIDER_ATTEMPTS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("provider_attempts_total", "Total model attempts"),
        &["model", "outcome"],
        REGISTRY
    ).unwrap();

    /// Model attempt duration
    pub static ref PROVIDER_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        HistogramOpts::new("provider_attempt_duration_seconds", "Model attempt duration")
            .buckets(vec![0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["model"],
        REGISTRY
    ).unwrap();
}

/// Render all metrics in the Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
