//! Prompt selection: maps a content request to a provider-ready plan.

pub mod select;

pub use select::select;

/// How the provider should shape its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseFormat {
    /// Free text.
    Plain,
    /// Parseable structured output (JSON).
    StructuredData,
    /// Free text augmented with the provider's retrieval/citation tool.
    SearchGrounded,
}

/// Provider output directives derived from the response format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub response_format: ResponseFormat,
    /// Enables the provider's search tool; implies grounding metadata in
    /// the response.
    pub search_tool: bool,
}

impl OutputConfig {
    pub fn plain() -> Self {
        Self {
            response_format: ResponseFormat::Plain,
            search_tool: false,
        }
    }

    pub fn structured() -> Self {
        Self {
            response_format: ResponseFormat::StructuredData,
            search_tool: false,
        }
    }

    pub fn search_grounded() -> Self {
        Self {
            response_format: ResponseFormat::SearchGrounded,
            search_tool: true,
        }
    }
}

/// A fully resolved prompt: what to send, how to frame it, and how the
/// provider should answer. Derived deterministically from the request;
/// no identity, no mutation.
#[derive(Debug, Clone)]
pub struct PromptPlan {
    pub prompt: String,
    pub system_instruction: Option<String>,
    pub output: OutputConfig,
}
