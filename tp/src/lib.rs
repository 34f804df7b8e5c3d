//! tripplanner - conversational AI travel planner
//!
//! A user chats with an LLM that collects trip details (destination, dates,
//! budget, interests). Once the assistant asks the fixed confirmation
//! question and the user answers "yes", the model is asked for a structured
//! JSON itinerary which is parsed and rendered as markdown.
//!
//! # Modules
//!
//! - [`llm`] - request/response client trait and OpenAI adapter
//! - [`conversation`] - transcript, phase machine, keyword nudges, manager
//! - [`itinerary`] - itinerary JSON schema, parsing and markdown rendering
//! - [`prompts`] - Handlebars prompt templates
//! - [`config`] - configuration types, loading and variant profiles
//! - [`repl`] - interactive chat surface
//! - [`cli`] - command-line interface

pub mod cli;
pub mod config;
pub mod conversation;
pub mod itinerary;
pub mod llm;
pub mod prompts;
pub mod repl;

// Re-export commonly used types
pub use config::{Config, LlmConfig, PlannerConfig, PlannerProfile, Variant};
pub use conversation::{
    CONFIRMATION_PHRASE, ConversationError, ConversationManager, Nudge, Outcome, Phase, Session, Transcript,
};
pub use itinerary::{Itinerary, ItineraryOutcome, RenderStyle, render_markdown};
pub use llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, OpenAIClient, Role, Turn, create_client};
pub use prompts::{PromptLoader, PromptSet};
