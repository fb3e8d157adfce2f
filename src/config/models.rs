//! Configuration data structures for menuscan.
//!
//! This module defines the schema for the application settings: the HTTP
//! server, the inference provider, upload storage, request authentication
//! and logging.

use serde::{Deserialize, Serialize};

/// Placeholder shipped in sample `.env` files; treated as "no key".
const PLACEHOLDER_API_KEY: &str = "your-openrouter-api-key-here";

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port).
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream inference provider settings.
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Where uploaded menu photos are stored and served from.
    #[serde(default)]
    pub upload: UploadConfig,

    /// Request authentication and CORS.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Default: `127.0.0.1`
    #[serde(default = "default_host")]
    pub host: String,

    /// Default: `5000`
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Settings for the OpenAI-compatible chat-completions provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL; `/chat/completions` is appended.
    /// Default: `https://openrouter.ai/api/v1`
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Bearer credential. When absent every analysis uses the sample result.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifiers in priority order.
    #[serde(default = "default_models")]
    pub models: Vec<String>,

    /// Per-model call timeout in seconds.
    /// Default: `60`
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Optional `X-Title` header identifying this app to the provider.
    #[serde(default)]
    pub app_title: Option<String>,
}

/// Settings for menu photo uploads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Directory uploads are written to.
    /// Default: `uploads`
    #[serde(default = "default_upload_dir")]
    pub dir: String,

    /// URL prefix the directory is served under.
    /// Default: `/api/uploads`
    #[serde(default = "default_public_path")]
    pub public_path: String,

    /// Largest accepted request body in bytes.
    /// Default: 10 MiB
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
}

/// Settings for request authentication.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    /// Token required as `Authorization: Bearer <token>` on analyze requests.
    /// When unset the analyze route is open.
    #[serde(default)]
    pub bearer_token: Option<String>,

    /// Origin allowed by CORS. Any origin when unset.
    #[serde(default)]
    pub allowed_origin: Option<String>,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl ProviderConfig {
    /// The configured key, unless it is blank or the sample placeholder.
    pub fn credential(&self) -> Option<String> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != PLACEHOLDER_API_KEY)
            .map(str::to_string)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            api_key: None,
            models: default_models(),
            timeout_seconds: default_timeout(),
            app_title: None,
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: default_upload_dir(),
            public_path: default_public_path(),
            max_bytes: default_max_bytes(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_api_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_models() -> Vec<String> {
    [
        "google/gemini-2.0-flash-exp:free",
        "google/gemma-2-9b-it:free",
        "google/gemma-3-4b-it:free",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_timeout() -> u64 {
    60
}

fn default_upload_dir() -> String {
    "uploads".to_string()
}

fn default_public_path() -> String {
    "/api/uploads".to_string()
}

fn default_max_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
