//! Deterministic offline content synthesis.
//!
//! Invoked when the executor exhausts its retries or aborts on a fatal
//! failure. Output mirrors the section conventions of the real prompts
//! so the UI layer behaves identically whether content is real or
//! synthesized, and every draft carries the offline marker so callers
//! can badge it. Total and side-effect-free: any unmatched combination
//! falls through to a generic templated message.

use serde_json::json;

use crate::request::{ContentType, GenerationRequest, RefinementKind};

/// Marker prefixed to every synthesized draft. `GenerationResult::is_fallback`
/// and the UI's placeholder badge key off this string.
pub const OFFLINE_DRAFT_MARKER: &str = "[offline draft]";

const DEFAULT_TITLE_COUNT: u8 = 5;

/// Synthesize placeholder content for a request the provider path could
/// not serve. Never fails and never returns an empty string.
pub fn synthesize(request: &GenerationRequest) -> String {
    let topic = display_topic(request);
    let platform = request
        .platform
        .map(|p| p.as_str())
        .unwrap_or("your platform");

    match request.content_type {
        ContentType::Title => titles(&topic, request.batch_count),
        ContentType::Script => script(&topic),
        ContentType::Brief => brief(&topic),
        ContentType::Analysis => analysis(&topic),
        ContentType::CalendarPlan => calendar(&topic, request),
        ContentType::Refinement => refinement(request),
        ContentType::Repurpose => repurpose(request, platform),
        ContentType::AbVariants => ab_variants(request),
        ContentType::Freeform => generic(request),
    }
}

fn display_topic(request: &GenerationRequest) -> String {
    let topic = request.topic.trim();
    if topic.is_empty() {
        "your topic".to_string()
    } else {
        topic.to_string()
    }
}

fn titles(topic: &str, batch_count: Option<u8>) -> String {
    let count = batch_count.unwrap_or(DEFAULT_TITLE_COUNT).clamp(1, 10);
    let angles = [
        format!("What nobody tells you about {topic}"),
        format!("{topic}: a beginner's field guide"),
        format!("We tried {topic} for a week. Here's what happened"),
        format!("The {topic} mistakes everyone makes"),
        format!("{topic}, explained in plain language"),
        format!("Is {topic} worth it? An honest look"),
        format!("How {topic} actually works"),
        format!("{topic}: where to start today"),
        format!("Five questions about {topic}, answered"),
        format!("A smarter approach to {topic}"),
    ];

    let mut out = format!(
        "{OFFLINE_DRAFT_MARKER} Working titles for \"{topic}\" while generation is unavailable:\n"
    );
    for title in angles.iter().take(count as usize) {
        out.push_str("- ");
        out.push_str(title);
        out.push('\n');
    }
    out
}

fn script(topic: &str) -> String {
    format!(
        r#"{OFFLINE_DRAFT_MARKER} Working script for "{topic}".

## Hook
Here's the one thing most people get wrong about {topic}.

## Body
Walk through the essentials of {topic} step by step: what it is, why it
matters to your audience, and the first concrete action they can take.
Replace this section with your own experience and examples.

## Call to action
Tell viewers the single next step to take with {topic}, and where to
find more from you."#,
    )
}

fn brief(topic: &str) -> String {
    format!(
        r#"{OFFLINE_DRAFT_MARKER} Working brief for "{topic}".

## Objective
Explain {topic} to your audience and position your take on it.

## Key points
- Define {topic} in one sentence
- The most common misconception about {topic}
- One practical example your audience can act on

## Suggested angle
Lead with the misconception, then resolve it with your example."#,
    )
}

fn analysis(topic: &str) -> String {
    format!(
        r#"{OFFLINE_DRAFT_MARKER} Working analysis for "{topic}".

## Overview
Live trend data for {topic} could not be fetched. Use this structure to
capture your own read of the landscape.

## Signals to watch
- Search and social interest in {topic} over the past 90 days
- Who is publishing about {topic} and what format performs
- Adjacent topics pulling attention from {topic}

## Takeaways
Note the one signal you would bet on and the content it suggests."#,
    )
}

fn calendar(topic: &str, request: &GenerationRequest) -> String {
    let days: Vec<_> = (1..=7)
        .map(|day| {
            json!({
                "day": day,
                "format": "post",
                "title": format!("Day {day}: {topic}"),
                "notes": "Placeholder slot; replace with a real idea.",
            })
        })
        .collect();

    let value = json!({
        "note": format!("{OFFLINE_DRAFT_MARKER} placeholder calendar for \"{topic}\""),
        "days": days,
    });

    serde_json::to_string_pretty(&value).unwrap_or_else(|_| generic(request))
}

fn refinement(request: &GenerationRequest) -> String {
    let Some(prior) = request
        .prior_text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
    else {
        return generic(request);
    };

    let note = match request.refinement {
        Some(RefinementKind::Shorten) => "a shortened pass",
        Some(RefinementKind::Expand) => "an expanded pass",
        Some(RefinementKind::AdjustTone) => "a tone-adjusted pass",
        Some(RefinementKind::Simplify) => "a simplified pass",
        None => return generic(request),
    };

    format!(
        r#"{OFFLINE_DRAFT_MARKER} Refinement is unavailable right now; {note} could not be
generated. Your original draft is preserved below.

{prior}"#,
    )
}

fn repurpose(request: &GenerationRequest, platform: &str) -> String {
    let Some(prior) = request
        .prior_text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
    else {
        return generic(request);
    };

    format!(
        r#"{OFFLINE_DRAFT_MARKER} Adaptation for {platform} is unavailable right now. Your
original content is preserved below; rework its length and tone for
{platform} conventions.

{prior}"#,
    )
}

fn ab_variants(request: &GenerationRequest) -> String {
    let prior = request.prior_text.as_deref().unwrap_or("").trim();

    let value = json!({
        "note": format!("{OFFLINE_DRAFT_MARKER} placeholder variants"),
        "variants": [
            { "label": "A", "text": prior },
            { "label": "B", "text": prior },
        ],
    });

    serde_json::to_string_pretty(&value).unwrap_or_else(|_| generic(request))
}

/// Last-resort template naming the content type and topic.
fn generic(request: &GenerationRequest) -> String {
    format!(
        "{OFFLINE_DRAFT_MARKER} A {content_type} draft for \"{topic}\" could not be generated \
         right now. Please try again in a few minutes.",
        content_type = request.content_type,
        topic = display_topic(request),
    )
}
