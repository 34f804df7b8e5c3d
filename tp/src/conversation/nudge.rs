//! Keyword nudges
//!
//! Best-effort heuristics that push the conversation toward dietary and
//! mobility questions. They look only at substrings of the user's latest
//! message, so any text containing "days" fires the dietary nudge. The model
//! remains the authority on what has been gathered.

use tracing::debug;

/// Topics that mean the user has already covered diet or mobility
const COVERED_TOPICS: [&str; 5] = ["diet", "allergy", "food", "mobility", "accessibility"];

/// A canned follow-up question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nudge {
    Dietary,
    Mobility,
}

impl Nudge {
    pub fn text(&self) -> &'static str {
        match self {
            Nudge::Dietary => {
                "That sounds great! Now, do you have any dietary preferences or restrictions I should consider for your trip?"
            }
            Nudge::Mobility => {
                "Thanks for sharing! Also, do you have any mobility concerns or accessibility needs I should keep in mind?"
            }
        }
    }
}

/// Pick at most one follow-up for a user message
pub fn follow_up_for(user_text: &str) -> Option<Nudge> {
    let lowered = user_text.to_lowercase();

    if lowered.contains("days") && !COVERED_TOPICS.iter().any(|topic| lowered.contains(topic)) {
        debug!("follow_up_for: duration mentioned, nudging dietary");
        Some(Nudge::Dietary)
    } else if lowered.contains("diet") || lowered.contains("allergy") {
        debug!("follow_up_for: diet mentioned, nudging mobility");
        Some(Nudge::Mobility)
    } else {
        None
    }
}
