//! Itinerary parsing and rendering
//!
//! The model is asked for JSON only. Anything that does not decode into
//! [`Itinerary`] is reported with the single static [`ERROR_MESSAGE`]; there
//! is no partial rendering and no re-prompt.

mod render;
mod types;

pub use render::{FOOTER, HEADING, RenderStyle, render_footer, render_markdown};
pub use types::{Activity, DayPlan, Itinerary};

use thiserror::Error;
use tracing::debug;

/// User-visible text shown when the itinerary could not be parsed
pub const ERROR_MESSAGE: &str = "⚠ Error generating itinerary. Please try again.";

/// Why a model response could not be turned into an itinerary
#[derive(Debug, Error)]
pub enum ItineraryError {
    #[error("Itinerary response was empty")]
    Empty,

    #[error("Itinerary response is not valid itinerary JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result of asking the model for an itinerary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItineraryOutcome {
    Parsed(Itinerary),
    Malformed { raw: String, error: String },
}

impl ItineraryOutcome {
    /// Classify raw model output
    pub fn from_raw(raw: &str) -> Self {
        match parse(raw) {
            Ok(itinerary) => ItineraryOutcome::Parsed(itinerary),
            Err(e) => ItineraryOutcome::Malformed {
                raw: raw.to_string(),
                error: e.to_string(),
            },
        }
    }

    /// Markdown for a parsed itinerary, or the static error message
    pub fn display(&self, style: RenderStyle) -> String {
        match self {
            ItineraryOutcome::Parsed(itinerary) => render_markdown(itinerary, style),
            ItineraryOutcome::Malformed { .. } => ERROR_MESSAGE.to_string(),
        }
    }
}

/// Decode model output into an [`Itinerary`]
///
/// A single surrounding markdown code fence (```` ```json ... ``` ````) is
/// tolerated; everything else must be the JSON document itself.
pub fn parse(raw: &str) -> Result<Itinerary, ItineraryError> {
    let body = strip_code_fence(raw.trim());
    if body.is_empty() {
        debug!("parse: empty body");
        return Err(ItineraryError::Empty);
    }
    let itinerary: Itinerary = serde_json::from_str(body)?;
    debug!(days = itinerary.days(), "parse: success");
    Ok(itinerary)
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return text;
    };
    // Drop the info string ("json") on the opening line
    match inner.find('\n') {
        Some(newline) => inner[newline + 1..].trim(),
        None => inner.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{"itinerary":[{"day":1,"activities":[{"time":"Morning","activity":"X"}]}]}"#;

    #[test]
    fn test_parse_minimal_renders_one_day_one_bullet() {
        let outcome = ItineraryOutcome::from_raw(MINIMAL);
        let out = outcome.display(RenderStyle::Plain);

        assert_eq!(out.matches("### Day ").count(), 1);
        assert!(out.contains("### Day 1"));
        assert_eq!(out.matches("\n- ").count(), 1);
        assert!(out.contains("- Morning: X"));
    }

    #[test]
    fn test_optional_fields_are_tolerated() {
        let raw = r#"{"itinerary":[{"day":2,"activities":[],"transport":"Tram","extra":"ignored"}]}"#;
        let itinerary = parse(raw).unwrap();
        assert_eq!(itinerary.itinerary[0].transport.as_deref(), Some("Tram"));
        assert!(itinerary.itinerary[0].alternative.is_none());
    }

    #[test]
    fn test_truncated_json_shows_only_error() {
        let outcome = ItineraryOutcome::from_raw(&MINIMAL[..MINIMAL.len() - 5]);
        assert!(matches!(outcome, ItineraryOutcome::Malformed { .. }));
        let out = outcome.display(RenderStyle::Detailed);
        assert_eq!(out, ERROR_MESSAGE);
        assert!(!out.contains("Day"));
    }

    #[test]
    fn test_prose_is_malformed() {
        let outcome = ItineraryOutcome::from_raw("Sure! Here is your itinerary: Day 1 ...");
        assert_eq!(outcome.display(RenderStyle::Plain), ERROR_MESSAGE);
    }

    #[test]
    fn test_missing_required_field_is_malformed() {
        let raw = r#"{"itinerary":[{"activities":[{"time":"Morning","activity":"X"}]}]}"#;
        assert!(matches!(parse(raw), Err(ItineraryError::Decode(_))));
    }

    #[test]
    fn test_empty_response_is_malformed() {
        assert!(matches!(parse("   "), Err(ItineraryError::Empty)));
        assert!(matches!(parse("```json\n```"), Err(ItineraryError::Empty)));
    }

    #[test]
    fn test_code_fence_is_stripped() {
        let fenced = format!("```json\n{}\n```", MINIMAL);
        assert_eq!(parse(&fenced).unwrap().days(), 1);

        let bare_fence = format!("```\n{}\n```", MINIMAL);
        assert_eq!(parse(&bare_fence).unwrap().days(), 1);
    }

    #[test]
    fn test_malformed_keeps_raw_text() {
        match ItineraryOutcome::from_raw("not json") {
            ItineraryOutcome::Malformed { raw, error } => {
                assert_eq!(raw, "not json");
                assert!(error.contains("not valid itinerary JSON"));
            }
            other => panic!("expected malformed, got {:?}", other),
        }
    }
}
