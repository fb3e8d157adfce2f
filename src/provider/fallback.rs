// Ordered model fallback
//
// Models are tried strictly in configured order, each at most once per call.
// No state survives between calls.

use super::{CompletionRequest, FailureKind, InferenceProvider, ProviderFailure};
use crate::analysis::preprocess::PreparedImage;
use crate::metrics;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// The first answer that passed the caller's acceptance check.
#[derive(Debug, Clone)]
pub struct Accepted<T> {
    pub model: String,
    pub value: T,
}

/// Walks a prioritized model list over one [`InferenceProvider`].
pub struct FallbackCaller<P> {
    provider: P,
    models: Vec<String>,
    api_key: Option<String>,
    timeout: Duration,
}

impl<P: InferenceProvider> FallbackCaller<P> {
    /// `api_key` is the already-resolved credential; `None` disables every
    /// outbound call.
    pub fn new(provider: P, models: Vec<String>, api_key: Option<String>, timeout: Duration) -> Self {
        Self {
            provider,
            models,
            api_key,
            timeout,
        }
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Try each model in order until `accept` turns a completion into a value.
    ///
    /// Every failure (rate limit, timeout, transport, bad body, or a
    /// completion `accept` rejects) moves on to the next model. Returns
    /// `None` when the list is exhausted or no credential is configured.
    pub async fn first_accepted<T, F>(
        &self,
        prompt: &str,
        image: &PreparedImage,
        accept: F,
    ) -> Option<Accepted<T>>
    where
        F: Fn(&str) -> Option<T>,
    {
        let Some(api_key) = self.api_key.as_deref() else {
            info!("No provider credential configured, skipping model calls");
            return None;
        };

        for model in &self.models {
            debug!("Trying model: {}", model);
            let request = CompletionRequest {
                model,
                api_key,
                prompt,
                image,
            };

            let started = Instant::now();
            let outcome = self.attempt(request, &accept).await;
            let elapsed = started.elapsed().as_secs_f64();

            match outcome {
                Ok(value) => {
                    metrics::record_provider_attempt(model, "success", elapsed);
                    info!("Model {} produced an analysis in {:.2}s", model, elapsed);
                    return Some(Accepted {
                        model: model.clone(),
                        value,
                    });
                }
                Err(failure) => {
                    metrics::record_provider_attempt(model, failure.label(), elapsed);
                    match failure.kind() {
                        FailureKind::RateLimited => {
                            info!("Model {} is rate limited, skipping", model)
                        }
                        FailureKind::Failed => warn!("Model {} failed: {}", model, failure),
                    }
                }
            }
        }

        warn!("All {} models failed", self.models.len());
        None
    }

    async fn attempt<T, F>(&self, request: CompletionRequest<'_>, accept: &F) -> Result<T, ProviderFailure>
    where
        F: Fn(&str) -> Option<T>,
    {
        let text = tokio::time::timeout(self.timeout, self.provider.complete(request))
            .await
            .map_err(|_| ProviderFailure::Timeout(self.timeout.as_secs()))??;

        accept(&text).ok_or(ProviderFailure::Undecodable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Scripted {
        calls: Mutex<Vec<String>>,
        replies: Vec<(&'static str, Result<&'static str, ProviderFailure>)>,
    }

    impl InferenceProvider for Scripted {
        async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, ProviderFailure> {
            self.calls.lock().unwrap().push(request.model.to_string());
            self.replies
                .iter()
                .find(|(model, _)| *model == request.model)
                .map(|(_, reply)| reply.clone().map(str::to_string))
                .unwrap_or(Err(ProviderFailure::Network("unscripted".into())))
        }
    }

    fn image() -> PreparedImage {
        PreparedImage {
            width: 1,
            height: 1,
            mime_type: "image/jpeg",
            base64: String::new(),
        }
    }

    fn caller(replies: Vec<(&'static str, Result<&'static str, ProviderFailure>)>) -> FallbackCaller<Scripted> {
        FallbackCaller::new(
            Scripted {
                calls: Mutex::new(Vec::new()),
                replies,
            },
            vec!["a".into(), "b".into(), "c".into()],
            Some("key".into()),
            Duration::from_secs(60),
        )
    }

    #[tokio::test]
    async fn test_stops_at_first_accepted() {
        let caller = caller(vec![("a", Ok("first")), ("b", Ok("second"))]);
        let accepted = caller
            .first_accepted("p", &image(), |t| Some(t.to_string()))
            .await
            .unwrap();

        assert_eq!(accepted.model, "a");
        assert_eq!(*caller.provider().calls.lock().unwrap(), vec!["a"]);
    }

    #[tokio::test]
    async fn test_rejected_completion_moves_on() {
        let caller = caller(vec![("a", Ok("no json here")), ("b", Ok("{}"))]);
        let accepted = caller
            .first_accepted("p", &image(), |t| t.starts_with('{').then(|| t.to_string()))
            .await
            .unwrap();

        assert_eq!(accepted.model, "b");
    }

    #[tokio::test]
    async fn test_exhaustion_returns_none() {
        let caller = caller(vec![
            ("a", Err(ProviderFailure::RateLimited { status: 429 })),
            ("b", Err(ProviderFailure::Rejected { status: 401 })),
            ("c", Err(ProviderFailure::Malformed("bad".into()))),
        ]);
        let accepted = caller.first_accepted("p", &image(), |t| Some(t.to_string())).await;

        assert!(accepted.is_none());
        assert_eq!(*caller.provider().calls.lock().unwrap(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_missing_credential_makes_no_calls() {
        let caller = FallbackCaller::new(
            Scripted {
                calls: Mutex::new(Vec::new()),
                replies: vec![("a", Ok("{}"))],
            },
            vec!["a".into()],
            None,
            Duration::from_secs(60),
        );

        assert!(!caller.has_credential());
        assert!(caller.first_accepted("p", &image(), |t| Some(t.to_string())).await.is_none());
        assert!(caller.provider().calls.lock().unwrap().is_empty());
    }
}
