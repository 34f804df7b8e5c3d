//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

use tracing::debug;

/// Trip-planner system prompt
pub const SYSTEM: &str = include_str!("../../prompts/system.pmt");

/// Instruction appended when the itinerary is requested
pub const ITINERARY: &str = include_str!("../../prompts/itinerary.pmt");

/// First assistant line shown before the user says anything
pub const GREETING: &str = include_str!("../../prompts/greeting.pmt");

/// Get the embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        "system" => Some(SYSTEM),
        "itinerary" => Some(ITINERARY),
        "greeting" => Some(GREETING),
        _ => {
            debug!("get_embedded: no match found");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_embedded_system() {
        let system = get_embedded("system").unwrap();
        assert!(system.contains("travel planner"));
        assert!(system.contains("{{confirmation_phrase}}"));
    }

    #[test]
    fn test_get_embedded_itinerary() {
        let itinerary = get_embedded("itinerary").unwrap();
        assert!(itinerary.contains("\"itinerary\""));
        assert!(itinerary.contains("\"activities\""));
    }

    #[test]
    fn test_get_embedded_greeting() {
        assert!(get_embedded("greeting").unwrap().contains("Where are you thinking of traveling?"));
    }

    #[test]
    fn test_get_embedded_unknown() {
        assert!(get_embedded("unknown-template").is_none());
    }
}
