//! Grounding citation extraction from provider responses.

use serde::Deserialize;

use crate::request::{ContentType, Source};

/// Fallback title for citations the provider returned without one.
const UNTITLED_SOURCE: &str = "Web Source";

/// One grounding reference as the provider reports it. Chunks without a
/// `web` payload (e.g. internal retrieval artifacts) carry nothing usable.
#[derive(Debug, Clone, Deserialize)]
pub struct GroundingChunk {
    pub web: Option<WebSource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebSource {
    pub uri: Option<String>,
    pub title: Option<String>,
}

/// Pull citation sources out of a single response.
///
/// Applied only to search-grounded content types; everything else yields
/// no sources. Keeps chunks with a non-empty uri and substitutes a stock
/// title when the provider omitted one. Deduplication happens at the
/// aggregation boundary, not here, so extraction stays pure per-response.
pub fn extract(chunks: &[GroundingChunk], content_type: ContentType) -> Vec<Source> {
    if !content_type.is_search_grounded() {
        return Vec::new();
    }

    chunks
        .iter()
        .filter_map(|chunk| chunk.web.as_ref())
        .filter_map(|web| {
            let uri = web.uri.as_deref().map(str::trim).filter(|u| !u.is_empty())?;
            let title = web
                .title
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .unwrap_or(UNTITLED_SOURCE);
            Some(Source {
                uri: uri.to_string(),
                title: title.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(uri: Option<&str>, title: Option<&str>) -> GroundingChunk {
        GroundingChunk {
            web: Some(WebSource {
                uri: uri.map(str::to_string),
                title: title.map(str::to_string),
            }),
        }
    }

    #[test]
    fn extracts_uri_and_title() {
        let chunks = vec![chunk(Some("https://a.example"), Some("A"))];
        let sources = extract(&chunks, ContentType::Analysis);
        assert_eq!(
            sources,
            vec![Source {
                uri: "https://a.example".to_string(),
                title: "A".to_string(),
            }]
        );
    }

    #[test]
    fn missing_title_becomes_web_source() {
        let chunks = vec![chunk(Some("https://a.example"), None)];
        let sources = extract(&chunks, ContentType::Brief);
        assert_eq!(sources[0].title, "Web Source");
    }

    #[test]
    fn empty_or_missing_uris_are_dropped() {
        let chunks = vec![
            chunk(None, Some("no uri")),
            chunk(Some("  "), Some("blank uri")),
            GroundingChunk { web: None },
            chunk(Some("https://kept.example"), None),
        ];
        let sources = extract(&chunks, ContentType::Analysis);
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].uri, "https://kept.example");
    }

    #[test]
    fn non_grounded_content_types_yield_nothing() {
        let chunks = vec![chunk(Some("https://a.example"), Some("A"))];
        assert!(extract(&chunks, ContentType::Title).is_empty());
        assert!(extract(&chunks, ContentType::Freeform).is_empty());
    }

    #[test]
    fn duplicates_are_kept_here() {
        // Dedup is the aggregation boundary's job.
        let chunks = vec![
            chunk(Some("https://a.example"), None),
            chunk(Some("https://a.example"), None),
        ];
        assert_eq!(extract(&chunks, ContentType::Analysis).len(), 2);
    }
}
