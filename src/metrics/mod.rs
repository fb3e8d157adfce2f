// Metrics module for Prometheus observability

mod registry;

pub use registry::{
    gather_metrics, ANALYSES_TOTAL, PREPROCESS_DURATION, PROVIDER_ATTEMPTS, PROVIDER_DURATION,
};

/// Helper to record a finished analysis (`ai`, `mock` or `error`)
pub fn record_analysis(source: &str) {
    ANALYSES_TOTAL.with_label_values(&[source]).inc();
}

pub fn record_preprocess(duration_secs: f64) {
    PREPROCESS_DURATION.observe(duration_secs);
}

/// Helper to record one model attempt
pub fn record_provider_attempt(model: &str, outcome: &str, duration_secs: f64) {
    PROVIDER_ATTEMPTS.with_label_values(&[model, outcome]).inc();
    PROVIDER_DURATION
        .with_label_values(&[model])
        .observe(duration_secs);
}
