//! Vision-language inference providers.
//!
//! A provider turns one (model, prompt, image) triple into completion text.
//! [`FallbackCaller`] walks an ordered model list over a provider until one
//! answer is accepted.
//!
//! # Components
//!
//! - `client`: OpenRouter-compatible chat-completions client.
//! - `fallback`: ordered, stateless model fallback policy.
//! - `models`: wire types for the chat-completions endpoint.

mod client;
mod fallback;
pub mod models;

pub use client::OpenRouterClient;
pub use fallback::{Accepted, FallbackCaller};

use crate::analysis::preprocess::PreparedImage;
use std::future::Future;
use thiserror::Error;

/// One inference call against one model.
#[derive(Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub api_key: &'a str,
    pub prompt: &'a str,
    pub image: &'a PreparedImage,
}

/// Capability to obtain a text completion for an image prompt.
pub trait InferenceProvider: Send + Sync {
    fn complete(
        &self,
        request: CompletionRequest<'_>,
    ) -> impl Future<Output = Result<String, ProviderFailure>> + Send;
}

/// Why a single model attempt produced nothing usable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderFailure {
    #[error("rate limited (HTTP {status})")]
    RateLimited { status: u16 },

    #[error("credential rejected (HTTP {status})")]
    Rejected { status: u16 },

    #[error("upstream returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("call timed out after {0}s")]
    Timeout(u64),

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed completion: {0}")]
    Malformed(String),

    #[error("completion contained no decodable analysis")]
    Undecodable,
}

/// Coarse class of a [`ProviderFailure`], used for logging and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Quota exhausted; skipping is the expected path.
    RateLimited,
    /// Anything else worth a warning.
    Failed,
}

impl ProviderFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            ProviderFailure::RateLimited { .. } => FailureKind::RateLimited,
            _ => FailureKind::Failed,
        }
    }

    /// Metrics label for this outcome.
    pub fn label(&self) -> &'static str {
        match self {
            ProviderFailure::RateLimited { .. } => "rate_limited",
            ProviderFailure::Rejected { .. } => "rejected",
            ProviderFailure::Status { .. } => "http_error",
            ProviderFailure::Timeout(_) => "timeout",
            ProviderFailure::Network(_) => "network",
            ProviderFailure::Malformed(_) => "malformed",
            ProviderFailure::Undecodable => "undecodable",
        }
    }

    /// Classify a non-success HTTP status.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            429 => ProviderFailure::RateLimited { status },
            401 | 403 => ProviderFailure::Rejected { status },
            _ => ProviderFailure::Status { status, message },
        }
    }
}
