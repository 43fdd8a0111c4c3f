//! Content-type to prompt-plan mapping.
//!
//! `select` is total over the content-type enum: every value maps to a
//! plan, and `Freeform` is the pass-through default. Stateful-input types
//! missing their companion field fail with a caller-input error here,
//! before any network attempt.

use crate::error::RequestError;
use crate::request::{ContentType, GenerationRequest, Platform, RefinementKind};

use super::{OutputConfig, PromptPlan};

/// Default number of title options when the request carries no batch count.
const DEFAULT_TITLE_COUNT: u8 = 5;

/// Default number of A/B variants.
const DEFAULT_VARIANT_COUNT: u8 = 2;

/// Map a request to a provider-ready prompt plan.
pub fn select(request: &GenerationRequest) -> Result<PromptPlan, RequestError> {
    let plan = match request.content_type {
        ContentType::Title => title_plan(request),
        ContentType::Script => script_plan(request),
        ContentType::Brief => brief_plan(request),
        ContentType::Analysis => analysis_plan(request),
        ContentType::CalendarPlan => calendar_plan(request),
        ContentType::Refinement => refinement_plan(request)?,
        ContentType::Repurpose => repurpose_plan(request)?,
        ContentType::AbVariants => ab_variants_plan(request)?,
        ContentType::Freeform => passthrough_plan(request),
    };
    Ok(plan)
}

fn title_plan(request: &GenerationRequest) -> PromptPlan {
    let count = request.batch_count.unwrap_or(DEFAULT_TITLE_COUNT).clamp(1, 10);
    let prompt = format!(
        r#"Generate {count} compelling title options for content about: {topic}

## Instructions
1. Each title must stand alone and fit in a feed preview
2. Mix curiosity-driven and benefit-driven phrasings
3. Respond with one title per line, no numbering"#,
        topic = request.topic,
    );

    PromptPlan {
        prompt: with_constraints(prompt, request),
        system_instruction: Some(
            "You are a content strategist who writes scroll-stopping titles.".to_string(),
        ),
        output: OutputConfig::plain(),
    }
}

fn script_plan(request: &GenerationRequest) -> PromptPlan {
    let prompt = format!(
        r###"Write a complete script about: {topic}

## Structure
1. Hook (first 5 seconds, one or two lines)
2. Body (the substance, conversational tone)
3. Call to action (one line)

Label the sections "## Hook", "## Body" and "## Call to action"."###,
        topic = request.topic,
    );

    PromptPlan {
        prompt: with_constraints(prompt, request),
        system_instruction: Some(
            "You are a scriptwriter for creators. Write spoken-word prose, not bullet points."
                .to_string(),
        ),
        output: OutputConfig::plain(),
    }
}

fn brief_plan(request: &GenerationRequest) -> PromptPlan {
    let prompt = format!(
        r###"Research and write a content brief about: {topic}

## Instructions
1. Ground every claim in current web sources
2. Sections: "## Objective", "## Key points", "## Suggested angle"
3. Keep it under 400 words"###,
        topic = request.topic,
    );

    PromptPlan {
        prompt: with_constraints(prompt, request),
        system_instruction: None,
        output: OutputConfig::search_grounded(),
    }
}

fn analysis_plan(request: &GenerationRequest) -> PromptPlan {
    let prompt = format!(
        r###"Analyze current trends and audience interest around: {topic}

## Instructions
1. Use current web sources; cite what you rely on
2. Sections: "## Overview", "## Signals to watch", "## Takeaways"
3. Distinguish durable trends from short-lived spikes"###,
        topic = request.topic,
    );

    PromptPlan {
        prompt: with_constraints(prompt, request),
        system_instruction: Some(
            "You are a market analyst for content creators. Be specific and sourced.".to_string(),
        ),
        output: OutputConfig::search_grounded(),
    }
}

fn calendar_plan(request: &GenerationRequest) -> PromptPlan {
    let prompt = format!(
        r#"Plan seven days of content about: {topic}

Respond with JSON:
{{
  "days": [
    {{"day": 1, "format": "...", "title": "...", "notes": "..."}},
    ...
  ]
}}"#,
        topic = request.topic,
    );

    PromptPlan {
        prompt: with_constraints(prompt, request),
        system_instruction: None,
        output: OutputConfig::structured(),
    }
}

fn refinement_plan(request: &GenerationRequest) -> Result<PromptPlan, RequestError> {
    let prior = require_prior_text(request)?;
    let kind = request.refinement.ok_or(RequestError::MissingField {
        content_type: request.content_type,
        field: "refinement",
    })?;

    let instruction = match kind {
        RefinementKind::Shorten => "Cut it to roughly half its length without losing the core message.",
        RefinementKind::Expand => "Expand it with concrete detail and examples, keeping the voice.",
        RefinementKind::AdjustTone => "Rewrite it in a tone that fits the stated audience and platform.",
        RefinementKind::Simplify => "Rewrite it in plain language a newcomer would follow.",
    };

    let prompt = format!(
        r#"Refine the following draft. {instruction}

## Draft
{prior}

Respond with the refined text only."#,
    );

    Ok(PromptPlan {
        prompt: with_constraints(prompt, request),
        system_instruction: None,
        output: OutputConfig::plain(),
    })
}

fn repurpose_plan(request: &GenerationRequest) -> Result<PromptPlan, RequestError> {
    let prior = require_prior_text(request)?;
    let platform: Platform = request.platform.ok_or(RequestError::MissingField {
        content_type: request.content_type,
        field: "platform",
    })?;

    let prompt = format!(
        r#"Adapt the following content for {platform}. Preserve the message,
but rework length, structure and tone to {platform} conventions.

## Original
{prior}

Respond with the adapted content only."#,
        platform = platform.as_str(),
    );

    Ok(PromptPlan {
        prompt: with_constraints(prompt, request),
        system_instruction: None,
        output: OutputConfig::plain(),
    })
}

fn ab_variants_plan(request: &GenerationRequest) -> Result<PromptPlan, RequestError> {
    let prior = require_prior_text(request)?;
    let count = request
        .batch_count
        .unwrap_or(DEFAULT_VARIANT_COUNT)
        .clamp(2, 5);

    let prompt = format!(
        r#"Produce {count} alternative versions of the following content for A/B testing.
Each variant should test a different hook or framing.

## Original
{prior}

Respond with JSON:
{{
  "variants": [
    {{"label": "A", "text": "..."}},
    ...
  ]
}}"#,
    );

    Ok(PromptPlan {
        prompt: with_constraints(prompt, request),
        system_instruction: None,
        output: OutputConfig::structured(),
    })
}

/// Pass-through plan: raw topic text, plain output, no system instruction.
fn passthrough_plan(request: &GenerationRequest) -> PromptPlan {
    PromptPlan {
        prompt: request.topic.clone(),
        system_instruction: None,
        output: OutputConfig::plain(),
    }
}

fn require_prior_text(request: &GenerationRequest) -> Result<&str, RequestError> {
    match request.prior_text.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(RequestError::MissingField {
            content_type: request.content_type,
            field: "prior_text",
        }),
    }
}

/// Append audience/persona/language/platform modifiers as constraint lines.
fn with_constraints(mut prompt: String, request: &GenerationRequest) -> String {
    let mut constraints = Vec::new();
    if let Some(audience) = request.audience.as_deref() {
        constraints.push(format!("Audience: {audience}"));
    }
    if let Some(persona) = request.persona.as_deref() {
        constraints.push(format!("Write in the voice of: {persona}"));
    }
    if let Some(language) = request.language.as_deref() {
        constraints.push(format!("Respond in {language}"));
    }
    if let Some(platform) = request.platform {
        constraints.push(format!("Target platform: {platform}"));
    }

    if !constraints.is_empty() {
        prompt.push_str("\n\n## Constraints\n");
        for line in &constraints {
            prompt.push_str("- ");
            prompt.push_str(line);
            prompt.push('\n');
        }
    }
    prompt
}
