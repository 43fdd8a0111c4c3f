//! Shared test helpers: a scriptable fake provider adapter.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use plume::prompt::PromptPlan;
use plume::provider::sources::GroundingChunk;
use plume::{ErrorKind, ProviderAdapter, ProviderError, ProviderResponse};

/// Initialize tracing output for tests; opt in via RUST_LOG.
/// Idempotent, so every test can call it first.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// One scripted attempt outcome.
pub enum Scripted {
    Ok(&'static str),
    OkWithGrounding(&'static str, Vec<GroundingChunk>),
    Retryable(ErrorKind),
    Fatal(ErrorKind),
}

/// Fake adapter that replays a script of outcomes and records how it was
/// driven. An exhausted script keeps failing so misconfigured tests fail
/// loudly instead of silently succeeding.
pub struct FakeAdapter {
    script: Mutex<VecDeque<Scripted>>,
    pub generate_calls: AtomicU32,
    pub handle_resets: AtomicU32,
}

impl FakeAdapter {
    pub fn scripted(outcomes: Vec<Scripted>) -> Self {
        Self {
            script: Mutex::new(outcomes.into()),
            generate_calls: AtomicU32::new(0),
            handle_resets: AtomicU32::new(0),
        }
    }

    pub fn always_failing(kind: ErrorKind) -> Self {
        // Longer than any retry budget under test.
        Self::scripted((0..16).map(|_| Scripted::Retryable(kind)).collect())
    }

    pub fn calls(&self) -> u32 {
        self.generate_calls.load(Ordering::SeqCst)
    }

    pub fn resets(&self) -> u32 {
        self.handle_resets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProviderAdapter for FakeAdapter {
    async fn generate(&self, _plan: &PromptPlan) -> Result<ProviderResponse, ProviderError> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .script
            .lock()
            .expect("script lock poisoned")
            .pop_front();
        match next {
            Some(Scripted::Ok(text)) => Ok(ProviderResponse {
                text: text.to_string(),
                grounding: Vec::new(),
            }),
            Some(Scripted::OkWithGrounding(text, grounding)) => Ok(ProviderResponse {
                text: text.to_string(),
                grounding,
            }),
            Some(Scripted::Retryable(kind)) => {
                Err(ProviderError::retryable(kind, "scripted failure"))
            }
            Some(Scripted::Fatal(kind)) => Err(ProviderError::fatal(kind, "scripted failure")),
            None => Err(ProviderError::fatal(
                ErrorKind::Unknown,
                "fake adapter script exhausted",
            )),
        }
    }

    fn reset_handle(&self) {
        self.handle_resets.fetch_add(1, Ordering::SeqCst);
    }
}
