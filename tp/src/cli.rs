//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Variant;

/// tp - conversational AI travel planner
#[derive(Parser)]
#[command(
    name = "tp",
    about = "Plan a trip by chatting with an AI assistant, then get a day-by-day itinerary",
    version = env!("GIT_DESCRIBE"),
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Behaviour profile (classic, detailed); overrides the config file
    #[arg(short, long, global = true)]
    pub variant: Option<Variant>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start an interactive planning chat (default)
    Chat {
        /// First message to send before the prompt opens
        message: Option<String>,
    },

    /// Render an itinerary JSON file as markdown
    Render {
        /// File holding the model's itinerary response
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },

    /// Print the resolved system prompt and itinerary instruction
    Prompts,

    /// Print the resolved configuration
    Config,
}
