//! Conversation state and flow
//!
//! - [`Transcript`] - append-only turn list with windowing
//! - [`Phase`] - explicit lifecycle replacing loose booleans
//! - [`nudge`] - keyword heuristics for follow-up questions
//! - [`ConversationManager`] - ties the above to an [`crate::llm::LlmClient`]

mod error;
mod manager;
pub mod nudge;
mod state;
mod transcript;

pub use error::ConversationError;
pub use manager::{ConversationManager, Outcome, Session};
pub use nudge::Nudge;
pub use state::{Confirmation, Phase, SessionFlags};
pub use transcript::Transcript;

/// Sentence in an assistant reply that opens the confirmation gate
pub const CONFIRMATION_PHRASE: &str = "Would you like me to generate your personalized itinerary now?";
