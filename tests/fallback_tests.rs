// Provider fallback tests against a mock chat-completions endpoint

use menuscan::analysis::extract::extract_analysis;
use menuscan::analysis::preprocess::{encode_for_model, PreparedImage};
use menuscan::config::ProviderConfig;
use menuscan::provider::{
    CompletionRequest, FallbackCaller, InferenceProvider, OpenRouterClient, ProviderFailure,
};
use mockito::Matcher;
use serde_json::json;
use std::sync::Mutex;
use std::time::Duration;

fn tiny_image() -> PreparedImage {
    encode_for_model(&image::DynamicImage::new_rgb8(8, 8)).unwrap()
}

fn completion(content: &str) -> String {
    json!({
        "id": "gen-1",
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }]
    })
    .to_string()
}

fn http_caller(server: &mockito::Server, api_key: Option<&str>) -> FallbackCaller<OpenRouterClient> {
    let config = ProviderConfig {
        api_base_url: server.url(),
        api_key: api_key.map(str::to_string),
        models: vec!["model-a".into(), "model-b".into(), "model-c".into()],
        ..ProviderConfig::default()
    };
    FallbackCaller::new(
        OpenRouterClient::new(&config).unwrap(),
        config.models.clone(),
        config.credential(),
        Duration::from_secs(config.timeout_seconds),
    )
}

fn model_body(model: &str) -> Matcher {
    Matcher::PartialJson(json!({ "model": model }))
}

#[tokio::test]
async fn test_rate_limited_models_are_skipped() {
    let mut server = mockito::Server::new_async().await;
    let a = server
        .mock("POST", "/chat/completions")
        .match_body(model_body("model-a"))
        .with_status(429)
        .with_body(r#"{"error": {"code": 429, "message": "Rate limit exceeded"}}"#)
        .expect(1)
        .create_async()
        .await;
    let b = server
        .mock("POST", "/chat/completions")
        .match_body(model_body("model-b"))
        .with_status(429)
        .expect(1)
        .create_async()
        .await;
    let c = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer sk-or-test")
        .match_body(model_body("model-c"))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion(
            "Sure! ```json\n{\"menuItems\": [{\"name\": \"Pho\", \"score\": 81}], \"recommendation\": {\"name\": \"Pho\"}}\n```",
        ))
        .expect(1)
        .create_async()
        .await;

    let caller = http_caller(&server, Some("sk-or-test"));
    let accepted = caller
        .first_accepted("Analyze", &tiny_image(), extract_analysis)
        .await
        .expect("model-c should answer");

    assert_eq!(accepted.model, "model-c");
    assert_eq!(accepted.value["menuItems"][0]["name"], "Pho");
    a.assert_async().await;
    b.assert_async().await;
    c.assert_async().await;
}

#[tokio::test]
async fn test_app_title_is_sent_when_configured() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("x-title", "Menu Scanner")
        .with_status(200)
        .with_body(completion(r#"{"menuItems": []}"#))
        .expect(1)
        .create_async()
        .await;

    let config = ProviderConfig {
        api_base_url: server.url(),
        app_title: Some("Menu Scanner".to_string()),
        ..ProviderConfig::default()
    };
    let client = OpenRouterClient::new(&config).unwrap();
    let image = tiny_image();
    let request = CompletionRequest {
        model: "model-a",
        api_key: "sk-or-test",
        prompt: "Analyze",
        image: &image,
    };

    assert!(client.complete(request).await.is_ok());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_app_title_is_omitted_by_default() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("x-title", Matcher::Missing)
        .with_status(200)
        .with_body(completion(r#"{"menuItems": []}"#))
        .expect(1)
        .create_async()
        .await;

    let caller = http_caller(&server, Some("sk-or-test"));
    assert!(caller
        .first_accepted("Analyze", &tiny_image(), extract_analysis)
        .await
        .is_some());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_request_carries_prompt_and_data_url() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::AllOf(vec![
            model_body("model-a"),
            Matcher::Regex(r#""text":"Analyze this menu""#.to_string()),
            Matcher::Regex(r#""url":"data:image/jpeg;base64,"#.to_string()),
        ]))
        .with_status(200)
        .with_body(completion(r#"{"menuItems": []}"#))
        .expect(1)
        .create_async()
        .await;

    let caller = http_caller(&server, Some("sk-or-test"));
    let accepted = caller
        .first_accepted("Analyze this menu", &tiny_image(), extract_analysis)
        .await;

    assert!(accepted.is_some());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_other_failures_also_fall_through() {
    let mut server = mockito::Server::new_async().await;
    let a = server
        .mock("POST", "/chat/completions")
        .match_body(model_body("model-a"))
        .with_status(401)
        .with_body(r#"{"error": {"message": "No auth credentials found"}}"#)
        .create_async()
        .await;
    let b = server
        .mock("POST", "/chat/completions")
        .match_body(model_body("model-b"))
        .with_status(200)
        .with_body(completion("I'm sorry, I can't read this image."))
        .create_async()
        .await;
    let c = server
        .mock("POST", "/chat/completions")
        .match_body(model_body("model-c"))
        .with_status(502)
        .with_body("upstream exploded")
        .create_async()
        .await;

    let caller = http_caller(&server, Some("sk-or-test"));
    let accepted = caller
        .first_accepted("Analyze", &tiny_image(), extract_analysis)
        .await;

    assert!(accepted.is_none());
    a.assert_async().await;
    b.assert_async().await;
    c.assert_async().await;
}

#[tokio::test]
async fn test_missing_credential_sends_nothing() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    for key in [None, Some(""), Some("your-openrouter-api-key-here")] {
        let caller = http_caller(&server, key);
        let accepted = caller
            .first_accepted("Analyze", &tiny_image(), extract_analysis)
            .await;
        assert!(accepted.is_none());
    }

    mock.assert_async().await;
}

/// Provider that records call order and replies from a script.
struct Recording {
    calls: Mutex<Vec<String>>,
    slow_model: Option<&'static str>,
}

impl InferenceProvider for Recording {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, ProviderFailure> {
        self.calls.lock().unwrap().push(request.model.to_string());
        if Some(request.model) == self.slow_model {
            tokio::time::sleep(Duration::from_secs(600)).await;
        }
        match request.model {
            "a" | "b" => Err(ProviderFailure::RateLimited { status: 429 }),
            _ => Ok(r#"{"recommendation": {"name": "Bibimbap"}}"#.to_string()),
        }
    }
}

#[tokio::test]
async fn test_models_are_tried_in_priority_order() {
    let caller = FallbackCaller::new(
        Recording {
            calls: Mutex::new(Vec::new()),
            slow_model: None,
        },
        vec!["a".into(), "b".into(), "c".into(), "d".into()],
        Some("key".into()),
        Duration::from_secs(60),
    );

    for _ in 0..2 {
        let accepted = caller
            .first_accepted("Analyze", &tiny_image(), extract_analysis)
            .await
            .unwrap();
        assert_eq!(accepted.model, "c");
    }

    // No memory of earlier failures between calls.
    assert_eq!(
        *caller.provider().calls.lock().unwrap(),
        vec!["a", "b", "c", "a", "b", "c"]
    );
}

#[tokio::test(start_paused = true)]
async fn test_timeout_moves_to_next_model() {
    let caller = FallbackCaller::new(
        Recording {
            calls: Mutex::new(Vec::new()),
            slow_model: Some("slow"),
        },
        vec!["slow".into(), "fast".into()],
        Some("key".into()),
        Duration::from_secs(60),
    );

    let accepted = caller
        .first_accepted("Analyze", &tiny_image(), extract_analysis)
        .await
        .unwrap();

    assert_eq!(accepted.model, "fast");
    assert_eq!(*caller.provider().calls.lock().unwrap(), vec!["slow", "fast"]);
}
