//! tp - conversational AI travel planner
//!
//! CLI entry point: interactive chat plus a few offline inspection commands.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::{debug, info, warn};

use tripplanner::cli::{Cli, Command};
use tripplanner::config::{Config, Variant};
use tripplanner::itinerary::{ERROR_MESSAGE, ItineraryOutcome, RenderStyle, render_footer};
use tripplanner::prompts::PromptLoader;
use tripplanner::repl::{self, print_markdown};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Logging isn't initialized yet, so warnings here go to stderr
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tripplanner")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > INFO
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(log_dir.join("tripplanner.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(cli.log_level.as_deref(), config.log_level.as_deref()).context("Failed to setup logging")?;

    info!(variant = %config.planner.variant, provider = %config.llm.provider, "tp loaded config");

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::Chat { message }) => {
            debug!(has_message = message.is_some(), "main: matched Chat command");
            repl::run_interactive(&config, cli.variant, message).await
        }
        Some(Command::Render { path }) => {
            debug!(path = %path.display(), "main: matched Render command");
            cmd_render(&config, cli.variant, &path)
        }
        Some(Command::Prompts) => {
            debug!("main: matched Prompts command");
            cmd_prompts(&config, cli.variant)
        }
        Some(Command::Config) => {
            debug!("main: matched Config command");
            cmd_config(&config, cli.variant)
        }
        None => {
            debug!("main: no command specified, starting chat");
            repl::run_interactive(&config, cli.variant, None).await
        }
    }
}

/// Render an itinerary response stored in a file
///
/// Exits with status 1 when the content does not parse.
fn cmd_render(config: &Config, variant: Option<Variant>, path: &Path) -> Result<()> {
    let variant = variant.unwrap_or(config.planner.variant);
    let raw = fs::read_to_string(path).context(format!("Failed to read {}", path.display()))?;

    let outcome = ItineraryOutcome::from_raw(&raw);
    match &outcome {
        ItineraryOutcome::Parsed(itinerary) => {
            info!(days = itinerary.days(), %variant, "cmd_render: rendering itinerary");
            print_markdown(&outcome.display(RenderStyle::from(variant)));
            println!();
            print_markdown(&render_footer());
            Ok(())
        }
        ItineraryOutcome::Malformed { error, .. } => {
            warn!(path = %path.display(), %error, "cmd_render: itinerary did not parse");
            eprintln!("{}", ERROR_MESSAGE.red());
            std::process::exit(1);
        }
    }
}

/// Print the prompts a chat session would use
fn cmd_prompts(config: &Config, variant: Option<Variant>) -> Result<()> {
    let profile = config.planner.resolve(variant)?;
    let base = std::env::current_dir().context("Failed to determine working directory")?;
    let prompts = PromptLoader::new(&base)
        .prompt_set(profile.variant)
        .context("Failed to load prompts")?;

    println!("{} ({})", "System prompt".bright_cyan().bold(), profile.variant);
    println!("{}", prompts.system);
    println!();
    println!("{}", "Itinerary instruction".bright_cyan().bold());
    println!("{}", prompts.itinerary);
    println!();
    println!("{}", "Greeting".bright_cyan().bold());
    println!("{}", prompts.greeting);
    Ok(())
}

/// Print the loaded configuration and the resolved profile
///
/// The API key itself is never printed, only whether its variable is set.
fn cmd_config(config: &Config, variant: Option<Variant>) -> Result<()> {
    let profile = config.planner.resolve(variant)?;

    println!("{}", "Configuration".bright_cyan().bold());
    print!("{}", serde_yaml::to_string(config).context("Failed to serialize config")?);
    println!();

    println!("{}", "Resolved profile".bright_cyan().bold());
    print!("{}", serde_yaml::to_string(&profile).context("Failed to serialize profile")?);
    println!();

    let key_state = if std::env::var(&config.llm.api_key_env).is_ok() {
        "set".green()
    } else {
        "not set".red()
    };
    println!("API key variable {}: {}", config.llm.api_key_env, key_state);
    Ok(())
}
