//! LLM Client module
//!
//! Provides the request/response client abstraction and the OpenAI adapter.

use std::sync::Arc;

use tracing::debug;

pub mod client;
mod error;
mod openai;
mod types;

pub use client::LlmClient;
pub use error::LlmError;
pub use openai::OpenAIClient;
pub use types::{CompletionRequest, CompletionResponse, Role, StopReason, TokenUsage, Turn};

use crate::config::ResolvedLlmConfig;

/// Create an LLM client for the configured provider
///
/// Only "openai" is supported today; the match keeps the seam for others.
pub fn create_client(config: &ResolvedLlmConfig) -> Result<Arc<dyn LlmClient>, LlmError> {
    debug!(provider = %config.provider, base_url = %config.base_url, "create_client: called");
    match config.provider.as_str() {
        "openai" => {
            debug!("create_client: creating OpenAI client");
            Ok(Arc::new(OpenAIClient::from_config(config)?))
        }
        other => {
            debug!(provider = %other, "create_client: unknown provider");
            Err(LlmError::Config(format!("Unknown LLM provider: '{}'. Supported: openai", other)))
        }
    }
}
