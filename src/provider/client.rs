// OpenRouter chat-completions client

use super::models::{ChatCompletionRequest, ChatCompletionResponse};
use super::{CompletionRequest, InferenceProvider, ProviderFailure};
use crate::config::ProviderConfig;
use crate::error::{AppError, Result};
use crate::utils::logging::sanitize;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
///
/// Holds no credential: the key travels with each [`CompletionRequest`] so
/// the fallback caller decides whether any call happens at all.
pub struct OpenRouterClient {
    http_client: Client,
    endpoint: String,
    app_title: Option<String>,
}

impl OpenRouterClient {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            endpoint: format!("{}/chat/completions", config.api_base_url.trim_end_matches('/')),
            app_title: config.app_title.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Pull the assistant text out of a 2xx body.
    fn parse_completion(body: &str) -> std::result::Result<String, ProviderFailure> {
        let parsed: ChatCompletionResponse = serde_json::from_str(body)
            .map_err(|e| ProviderFailure::Malformed(format!("invalid JSON body: {}", e)))?;

        if let Some(error) = parsed.error {
            let status = error.status().unwrap_or(500);
            let message = error.message.unwrap_or_default();
            return Err(ProviderFailure::from_status(status, message));
        }

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| ProviderFailure::Malformed("no completion content".to_string()))
    }
}

impl InferenceProvider for OpenRouterClient {
    async fn complete(
        &self,
        request: CompletionRequest<'_>,
    ) -> std::result::Result<String, ProviderFailure> {
        let payload =
            ChatCompletionRequest::vision(request.model, request.prompt, request.image.data_url());

        let mut builder = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(request.api_key)
            .json(&payload);
        if let Some(title) = &self.app_title {
            builder = builder.header("X-Title", title);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ProviderFailure::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderFailure::Network(format!("failed to read body: {}", e)))?;

        if !status.is_success() {
            return Err(ProviderFailure::from_status(
                status.as_u16(),
                sanitize(&body.chars().take(300).collect::<String>()),
            ));
        }

        debug!(
            "Raw completion from {} (first 500 chars): {}",
            request.model,
            sanitize(&body.chars().take(500).collect::<String>())
        );

        Self::parse_completion(&body)
    }
}
