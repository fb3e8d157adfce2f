//! Structured logging and secret redaction.
//!
//! Configures the `tracing` ecosystem for the application and keeps provider
//! credentials out of anything echoed from upstream responses.

use crate::config::LoggingConfig;
use crate::error::Result;
use lazy_static::lazy_static;
use regex::Regex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber for the application.
///
/// Supports two output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `pretty` (default): Human-readable output for development.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

lazy_static! {
    static ref SECRET_PATTERNS: [(Regex, &'static str); 2] = [
        (
            Regex::new(r"sk-or-[A-Za-z0-9_\-]+").expect("static regex"),
            "[REDACTED_API_KEY]",
        ),
        (
            Regex::new(r"(?i)bearer\s+[A-Za-z0-9._~+/=\-]+").expect("static regex"),
            "Bearer [REDACTED]",
        ),
    ];
}

/// Replaces OpenRouter keys and bearer tokens with placeholders.
pub fn sanitize(input: &str) -> String {
    SECRET_PATTERNS
        .iter()
        .fold(input.to_string(), |text, (pattern, replacement)| {
            pattern.replace_all(&text, *replacement).into_owned()
        })
}
