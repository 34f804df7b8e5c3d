//! Interactive REPL for the trip planner
//!
//! Chat surface over [`crate::conversation::ConversationManager`]: greeting,
//! free-form input, the yes/no confirmation gate and itinerary display.

mod session;

pub use session::{ReplSession, print_markdown};

use eyre::{Context, Result};
use tracing::info;

use crate::config::{Config, Variant};
use crate::conversation::ConversationManager;
use crate::llm::create_client;
use crate::prompts::PromptLoader;

/// Run the interactive REPL
///
/// This is the main entry point for `tp chat`.
pub async fn run_interactive(config: &Config, variant: Option<Variant>, initial_message: Option<String>) -> Result<()> {
    config.validate()?;

    let profile = config.planner.resolve(variant)?;
    let llm_config = config.llm.resolve()?;
    let llm = create_client(&llm_config).map_err(|e| eyre::eyre!("Failed to create LLM client: {}", e))?;

    let base = std::env::current_dir().context("Failed to determine working directory")?;
    let prompts = PromptLoader::new(&base)
        .prompt_set(profile.variant)
        .context("Failed to load prompts")?;

    info!(variant = %profile.variant, model = %profile.model, "Starting chat session");

    let manager = ConversationManager::new(llm, profile, prompts);
    let mut session = ReplSession::new(manager);
    session.run(initial_message).await
}
