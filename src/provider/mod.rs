//! Provider client adapter: the only module that speaks the generative
//! provider's wire shapes. Everything above this boundary sees typed
//! `ProviderError` kinds, never raw status codes or message strings.

pub mod classify;
pub mod client;
pub mod sources;

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::prompt::PromptPlan;

use sources::GroundingChunk;

pub use client::{GeminiAdapter, ProviderConfig};

/// A successful provider attempt: the generated text plus any raw
/// grounding references the provider attached.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub text: String,
    pub grounding: Vec<GroundingChunk>,
}

/// Seam between the resilient executor and a concrete provider client.
///
/// Implementations own their handle; `reset_handle` discards it so the
/// next `generate` starts from a fresh connection (defends against
/// handle-level corruption causing repeated stream errors). Tests
/// substitute fakes here instead of monkeypatching global state.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    async fn generate(&self, plan: &PromptPlan) -> Result<ProviderResponse, ProviderError>;

    fn reset_handle(&self);
}

// Lets callers share one adapter between a pipeline and other owners
// (tests keep a handle to their fake this way).
#[async_trait]
impl<A: ProviderAdapter + ?Sized> ProviderAdapter for std::sync::Arc<A> {
    async fn generate(&self, plan: &PromptPlan) -> Result<ProviderResponse, ProviderError> {
        (**self).generate(plan).await
    }

    fn reset_handle(&self) {
        (**self).reset_handle()
    }
}
