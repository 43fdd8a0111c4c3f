//! Integration tests for the Gemini adapter against a mocked provider.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use plume::prompt::{OutputConfig, PromptPlan};
use plume::{ContentType, ErrorKind, GeminiAdapter, GenerationRequest, Pipeline, ProviderAdapter, ProviderConfig};

const MODEL: &str = "gemini-2.0-flash";

fn adapter_for(server: &MockServer) -> GeminiAdapter {
    GeminiAdapter::new(
        ProviderConfig::new("test-key")
            .with_model(MODEL)
            .with_base_url(server.uri()),
    )
}

fn plain_plan(prompt: &str) -> PromptPlan {
    PromptPlan {
        prompt: prompt.to_string(),
        system_instruction: None,
        output: OutputConfig::plain(),
    }
}

fn success_body(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }] }
        }]
    })
}

#[tokio::test]
async fn successful_generation_returns_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/models/{MODEL}:generateContent")))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{ "parts": [{ "text": "say hi" }] }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("hi there")))
        .mount(&server)
        .await;

    let adapter = adapter_for(&server);
    let response = adapter.generate(&plain_plan("say hi")).await.unwrap();
    assert_eq!(response.text, "hi there");
}

#[tokio::test]
async fn http_503_classifies_as_retryable_overloaded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": { "code": 503, "message": "The model is overloaded.", "status": "UNAVAILABLE" }
        })))
        .mount(&server)
        .await;

    let err = adapter_for(&server)
        .generate(&plain_plan("hi"))
        .await
        .unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(err.kind(), ErrorKind::Overloaded);
}

#[tokio::test]
async fn http_429_classifies_as_retryable_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "code": 429, "message": "Quota exceeded.", "status": "RESOURCE_EXHAUSTED" }
        })))
        .mount(&server)
        .await;

    let err = adapter_for(&server)
        .generate(&plain_plan("hi"))
        .await
        .unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(err.kind(), ErrorKind::RateLimited);
}

#[tokio::test]
async fn http_400_classifies_as_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": 400, "message": "Invalid request.", "status": "INVALID_ARGUMENT" }
        })))
        .mount(&server)
        .await;

    let err = adapter_for(&server)
        .generate(&plain_plan("hi"))
        .await
        .unwrap_err();
    assert!(!err.is_retryable());
    assert_eq!(err.kind(), ErrorKind::Unknown);
}

#[tokio::test]
async fn empty_candidate_classifies_as_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let err = adapter_for(&server)
        .generate(&plain_plan("hi"))
        .await
        .unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(err.kind(), ErrorKind::EmptyResponse);
}

#[tokio::test]
async fn truncated_body_classifies_as_stream_corrupted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"candidates": [{"cont"#))
        .mount(&server)
        .await;

    let err = adapter_for(&server)
        .generate(&plain_plan("hi"))
        .await
        .unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(err.kind(), ErrorKind::StreamCorrupted);
}

#[tokio::test]
async fn placeholder_credentials_fail_fatally_without_a_request() {
    // No server at all: the handle is rejected before any HTTP happens.
    let adapter = GeminiAdapter::new(ProviderConfig::new("YOUR_API_KEY_HERE"));
    let err = adapter.generate(&plain_plan("hi")).await.unwrap_err();
    assert!(!err.is_retryable());
    assert_eq!(err.kind(), ErrorKind::InvalidCredentials);
}

#[tokio::test]
async fn grounded_request_carries_search_tool_and_parses_citations() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "tools": [{ "google_search": {} }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "grounded analysis" }] },
                "groundingMetadata": {
                    "groundingChunks": [
                        { "web": { "uri": "https://a.example", "title": "A" } },
                        { "web": { "uri": "https://b.example" } }
                    ]
                }
            }]
        })))
        .mount(&server)
        .await;

    let adapter = adapter_for(&server);
    let pipeline = Pipeline::new(adapter);
    let request = GenerationRequest::new(ContentType::Analysis, "coffee brewing");

    let result = pipeline.generate(&request).await.unwrap();
    assert_eq!(result.text, "grounded analysis");
    assert!(!result.is_fallback());
    assert_eq!(result.sources.len(), 2);
    assert_eq!(result.sources[0].uri, "https://a.example");
    assert_eq!(result.sources[0].title, "A");
    assert_eq!(result.sources[1].title, "Web Source");
}
