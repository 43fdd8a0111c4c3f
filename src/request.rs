//! Content request and result types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::prompt::ResponseFormat;

/// Enumerated kinds of requested output.
///
/// The content type selects both the prompt template and the output mode
/// the provider is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    /// Title/headline options for a piece of content.
    Title,
    /// Long-form video or audio script.
    Script,
    /// Search-grounded content brief.
    Brief,
    /// Search-grounded trend analysis.
    Analysis,
    /// Structured multi-day posting plan.
    CalendarPlan,
    /// Rework of previously generated text (requires prior text + kind).
    Refinement,
    /// Adapt prior text for another platform (requires prior text + platform).
    Repurpose,
    /// A/B variants of prior text (requires prior text).
    AbVariants,
    /// Pass-through: the topic text is sent as-is.
    Freeform,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Title => "title",
            ContentType::Script => "script",
            ContentType::Brief => "brief",
            ContentType::Analysis => "analysis",
            ContentType::CalendarPlan => "calendar_plan",
            ContentType::Refinement => "refinement",
            ContentType::Repurpose => "repurpose",
            ContentType::AbVariants => "ab_variants",
            ContentType::Freeform => "freeform",
        }
    }

    /// Content types that enable the provider's retrieval/citation tool.
    pub fn is_search_grounded(&self) -> bool {
        matches!(self, ContentType::Brief | ContentType::Analysis)
    }

    /// All enumerated content types, for totality tests.
    pub fn all() -> [ContentType; 9] {
        [
            ContentType::Title,
            ContentType::Script,
            ContentType::Brief,
            ContentType::Analysis,
            ContentType::CalendarPlan,
            ContentType::Refinement,
            ContentType::Repurpose,
            ContentType::AbVariants,
            ContentType::Freeform,
        ]
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target publishing platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    YouTube,
    TikTok,
    Instagram,
    Blog,
    Newsletter,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::YouTube => "YouTube",
            Platform::TikTok => "TikTok",
            Platform::Instagram => "Instagram",
            Platform::Blog => "Blog",
            Platform::Newsletter => "Newsletter",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a refinement request should do to the prior text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RefinementKind {
    Shorten,
    Expand,
    AdjustTone,
    Simplify,
}

impl RefinementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefinementKind::Shorten => "shorten",
            RefinementKind::Expand => "expand",
            RefinementKind::AdjustTone => "adjust_tone",
            RefinementKind::Simplify => "simplify",
        }
    }
}

impl fmt::Display for RefinementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single content generation request.
///
/// Immutable once constructed; built fresh per call via the `with_*`
/// modifiers. Stateful-input content types (refinement, repurpose, A/B)
/// additionally require `prior_text` and their companion field; prompt
/// selection rejects requests missing them before any network attempt.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub content_type: ContentType,
    pub topic: String,
    pub audience: Option<String>,
    pub persona: Option<String>,
    pub language: Option<String>,
    pub platform: Option<Platform>,
    pub prior_text: Option<String>,
    pub refinement: Option<RefinementKind>,
    pub batch_count: Option<u8>,
}

impl GenerationRequest {
    pub fn new(content_type: ContentType, topic: impl Into<String>) -> Self {
        Self {
            content_type,
            topic: topic.into(),
            audience: None,
            persona: None,
            language: None,
            platform: None,
            prior_text: None,
            refinement: None,
            batch_count: None,
        }
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = Some(persona.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn with_prior_text(mut self, prior_text: impl Into<String>) -> Self {
        self.prior_text = Some(prior_text.into());
        self
    }

    pub fn with_refinement(mut self, kind: RefinementKind) -> Self {
        self.refinement = Some(kind);
        self
    }

    pub fn with_batch_count(mut self, count: u8) -> Self {
        self.batch_count = Some(count);
        self
    }
}

/// A web reference the provider used for search-augmented output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub uri: String,
    pub title: String,
}

/// The value returned to the caller. The caller owns it from construction
/// onward; the pipeline keeps no reference to it.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub text: String,
    /// Grounding citations, deduplicated by uri in first-seen order.
    pub sources: Vec<Source>,
    pub response_format: ResponseFormat,
}

impl GenerationResult {
    /// True when the text was synthesized offline rather than generated
    /// by the provider, so the UI can badge placeholder content.
    pub fn is_fallback(&self) -> bool {
        self.text.contains(crate::fallback::OFFLINE_DRAFT_MARKER)
    }
}
