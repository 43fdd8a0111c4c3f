//! plume - generation request pipeline for AI-assisted content authoring.
//!
//! # Overview
//!
//! plume turns a structured content request into a call against a
//! generative-AI provider, tolerates that provider's instability
//! (overload, transient network failure, malformed responses), and
//! guarantees the caller always receives some usable content, degrading
//! to clearly-labeled offline drafts under total provider failure.
//!
//! ```no_run
//! use plume::{ContentType, GenerationRequest, Pipeline};
//!
//! # async fn demo() {
//! let pipeline = Pipeline::from_env();
//! let request = GenerationRequest::new(ContentType::Title, "coffee brewing");
//! let result = pipeline.generate(&request).await.expect("valid request");
//! println!("{}", result.text);
//! # }
//! ```

pub mod error;
pub mod fallback;
pub mod pipeline;
pub mod prompt;
pub mod provider;
pub mod request;

// Re-export commonly used types
pub use error::{ErrorKind, ProviderError, RequestError};
pub use pipeline::{Pipeline, RetryPolicy};
pub use prompt::{OutputConfig, PromptPlan, ResponseFormat};
pub use provider::{GeminiAdapter, ProviderAdapter, ProviderConfig, ProviderResponse};
pub use request::{
    ContentType, GenerationRequest, GenerationResult, Platform, RefinementKind, Source,
};
