//! Conversation error types

use thiserror::Error;

use super::Phase;
use crate::llm::LlmError;

/// Errors surfaced by [`super::ConversationManager`]
#[derive(Debug, Error)]
pub enum ConversationError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("Itinerary can only be generated after confirmation (current phase: {0})")]
    NotReady(Phase),

    #[error("Itinerary was already generated for this session")]
    AlreadyGenerated,
}

impl ConversationError {
    /// True when resending the same input might succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            ConversationError::Llm(e) => e.is_retryable(),
            _ => false,
        }
    }

    /// Advice to show next to the error, if any
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            ConversationError::Llm(e) => e.hint(),
            ConversationError::NotReady(_) => Some("Finish planning and answer 'yes' to the confirmation first."),
            ConversationError::AlreadyGenerated => None,
        }
    }
}
