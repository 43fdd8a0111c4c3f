//! Generation pipeline: prompt selection, resilient execution, source
//! aggregation, and offline fallback.

pub mod executor;
pub mod policy;

use std::collections::HashSet;

use tracing::info;

use crate::error::RequestError;
use crate::fallback;
use crate::prompt;
use crate::provider::{GeminiAdapter, ProviderAdapter, sources};
use crate::request::{GenerationRequest, GenerationResult, Source};

pub use executor::{AttemptState, ExecutionOutcome, OutcomeClass};
pub use policy::RetryPolicy;

/// The generation request pipeline.
///
/// One call resolves to exactly one `GenerationResult`: either the
/// provider path succeeds, or the call degrades to synthesized fallback
/// content. Provider failures never propagate to the caller; the only
/// error a caller can see is a caller-input `RequestError`, raised
/// before any network attempt.
pub struct Pipeline<A: ProviderAdapter> {
    adapter: A,
    policy: RetryPolicy,
}

impl Pipeline<GeminiAdapter> {
    /// Pipeline against the real provider, credentials from the
    /// environment.
    pub fn from_env() -> Self {
        Self::new(GeminiAdapter::from_env())
    }
}

impl<A: ProviderAdapter> Pipeline<A> {
    pub fn new(adapter: A) -> Self {
        Self {
            adapter,
            policy: RetryPolicy::default(),
        }
    }

    pub fn with_policy(adapter: A, policy: RetryPolicy) -> Self {
        Self { adapter, policy }
    }

    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, RequestError> {
        let plan = prompt::select(request)?;
        let response_format = plan.output.response_format;

        match executor::execute(&self.adapter, &plan, &self.policy).await {
            ExecutionOutcome::Completed(response) => {
                let raw = sources::extract(&response.grounding, request.content_type);
                Ok(GenerationResult {
                    text: response.text,
                    sources: dedupe_sources(raw),
                    response_format,
                })
            }
            ExecutionOutcome::Degraded { state, kind } => {
                info!(
                    content_type = %request.content_type,
                    state = ?state,
                    kind = %kind,
                    "provider path degraded, synthesizing offline draft"
                );
                Ok(GenerationResult {
                    text: fallback::synthesize(request),
                    sources: Vec::new(),
                    response_format,
                })
            }
        }
    }
}

/// Deduplicate sources by uri, preserving first-seen order. Done here at
/// the aggregation boundary so per-response extraction stays pure.
pub fn dedupe_sources(sources: Vec<Source>) -> Vec<Source> {
    let mut seen = HashSet::new();
    sources
        .into_iter()
        .filter(|source| seen.insert(source.uri.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(uri: &str, title: &str) -> Source {
        Source {
            uri: uri.to_string(),
            title: title.to_string(),
        }
    }

    #[test]
    fn dedupe_keeps_first_seen_order() {
        let sources = vec![
            source("a", "Web Source"),
            source("a", "Later title"),
            source("b", "B"),
        ];
        assert_eq!(
            dedupe_sources(sources),
            vec![source("a", "Web Source"), source("b", "B")]
        );
    }

    #[test]
    fn dedupe_of_empty_is_empty() {
        assert!(dedupe_sources(Vec::new()).is_empty());
    }
}
