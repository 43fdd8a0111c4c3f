//! Gemini-style provider client and handle management.

use std::env;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::error::{ErrorKind, ProviderError};
use crate::prompt::{PromptPlan, ResponseFormat};

use super::classify;
use super::sources::GroundingChunk;
use super::{ProviderAdapter, ProviderResponse};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Primary and fallback env vars for the API key.
const API_KEY_ENV: &str = "PLUME_API_KEY";
const API_KEY_FALLBACK_ENV: &str = "GEMINI_API_KEY";

/// Sentinel values that ship in config templates; treated as missing.
const PLACEHOLDER_KEYS: &[&str] = &["YOUR_API_KEY_HERE", "changeme"];

/// Per-request HTTP timeout. Generation calls are slow but bounded.
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Static provider connection settings, read once at process start.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    pub model: String,
    /// Overridable so tests can point the client at a mock server.
    pub base_url: String,
}

impl ProviderConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Read the API key from the environment: `PLUME_API_KEY` first,
    /// `GEMINI_API_KEY` as fallback. A missing or placeholder key is kept
    /// as-is here; validation happens at first handle creation so the
    /// failure surfaces as `Fatal(InvalidCredentials)` inside the
    /// pipeline rather than at construction time.
    pub fn from_env() -> Self {
        let api_key = env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.is_empty())
            .or_else(|| env::var(API_KEY_FALLBACK_ENV).ok())
            .unwrap_or_default();
        Self::new(api_key)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// An authenticated provider client instance. Stateless beyond its
/// credentials, so discarding and recreating one is always safe.
#[derive(Debug)]
struct Handle {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl Handle {
    fn create(config: &ProviderConfig) -> Result<Arc<Self>, ProviderError> {
        let key = config.api_key.trim();
        if key.is_empty() || PLACEHOLDER_KEYS.iter().any(|p| key.eq_ignore_ascii_case(p)) {
            return Err(ProviderError::fatal(
                ErrorKind::InvalidCredentials,
                format!("no usable API key; set {API_KEY_ENV} or {API_KEY_FALLBACK_ENV}"),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ProviderError::fatal(ErrorKind::Unknown, e.to_string()))?;

        Ok(Arc::new(Self {
            http,
            api_key: key.to_string(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }))
    }

    async fn generate(&self, plan: &PromptPlan) -> Result<ProviderResponse, ProviderError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = build_body(plan);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(classify::transport_error)?;

        let status = response.status();
        // The body is readable exactly once; a failure here is the
        // stream-corruption case and classifies as retryable.
        let raw = response.text().await.map_err(classify::transport_error)?;

        if !status.is_success() {
            return Err(classify::status_error(status.as_u16(), &raw));
        }

        parse_response(&raw)
    }
}

fn build_body(plan: &PromptPlan) -> serde_json::Value {
    let mut body = json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": plan.prompt }]
        }]
    });

    if let Some(system) = &plan.system_instruction {
        body["systemInstruction"] = json!({ "parts": [{ "text": system }] });
    }

    if plan.output.search_tool {
        body["tools"] = json!([{ "google_search": {} }]);
    }

    if plan.output.response_format == ResponseFormat::StructuredData {
        body["generationConfig"] = json!({ "responseMimeType": "application/json" });
    }

    body
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

fn parse_response(raw: &str) -> Result<ProviderResponse, ProviderError> {
    let parsed: GenerateContentResponse = serde_json::from_str(raw).map_err(|e| {
        ProviderError::retryable(
            ErrorKind::StreamCorrupted,
            format!("unparseable provider response: {e}"),
        )
    })?;

    let Some(candidate) = parsed.candidates.into_iter().next() else {
        return Err(ProviderError::retryable(
            ErrorKind::EmptyResponse,
            "provider returned no candidates",
        ));
    };

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    // An empty body is suspicious rather than a legitimate empty answer;
    // the product's prompts always request substantial content.
    if text.trim().is_empty() {
        return Err(ProviderError::retryable(
            ErrorKind::EmptyResponse,
            "provider returned an empty candidate",
        ));
    }

    let grounding = candidate
        .grounding_metadata
        .map(|meta| meta.grounding_chunks)
        .unwrap_or_default();

    Ok(ProviderResponse { text, grounding })
}

/// Production adapter: lazily creates and memoizes the provider handle.
///
/// The accessor is lock-guarded so concurrent pipeline calls may race on
/// recreation safely; the handle is credentials-only, so
/// last-writer-wins is acceptable.
pub struct GeminiAdapter {
    config: ProviderConfig,
    handle: Mutex<Option<Arc<Handle>>>,
}

impl GeminiAdapter {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            handle: Mutex::new(None),
        }
    }

    pub fn from_env() -> Self {
        Self::new(ProviderConfig::from_env())
    }

    fn handle(&self) -> Result<Arc<Handle>, ProviderError> {
        let mut guard = self.handle.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = guard.as_ref() {
            return Ok(Arc::clone(handle));
        }
        debug!(model = %self.config.model, "creating provider handle");
        let handle = Handle::create(&self.config)?;
        *guard = Some(Arc::clone(&handle));
        Ok(handle)
    }
}

#[async_trait]
impl ProviderAdapter for GeminiAdapter {
    async fn generate(&self, plan: &PromptPlan) -> Result<ProviderResponse, ProviderError> {
        let handle = self.handle()?;
        handle.generate(plan).await
    }

    fn reset_handle(&self) {
        let mut guard = self.handle.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }
}
