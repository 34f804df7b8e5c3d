//! REPL session management

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, info};

use crate::conversation::{ConversationError, ConversationManager, Outcome, Phase, Session};
use crate::itinerary::{ERROR_MESSAGE, ItineraryOutcome, RenderStyle, render_footer};
use crate::llm::Role;

const CHAT_HINT: &str = "Type your response here...";
const CONFIRM_HINT: &str = "Type 'yes' to proceed or 'no' to modify details.";
const CONFIRMED_MESSAGE: &str = "Great! Let me put together an amazing itinerary for you. ✨";

/// Interactive planning session
pub struct ReplSession {
    manager: ConversationManager,
    session: Session,
    style: RenderStyle,
}

impl ReplSession {
    /// Create a new REPL session with a fresh conversation
    pub fn new(manager: ConversationManager) -> Self {
        let session = manager.new_session();
        let style = RenderStyle::from(manager.profile().variant);
        Self {
            manager,
            session,
            style,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run the REPL main loop
    pub async fn run(&mut self, initial_message: Option<String>) -> Result<()> {
        self.print_welcome();

        if self.session.transcript().is_fresh() {
            self.print_assistant(&self.manager.prompts().greeting);
        }
        println!("{}", CHAT_HINT.dimmed());

        if let Some(message) = initial_message {
            let message = message.trim();
            if !message.is_empty() {
                println!("{} {}", ">".bright_green(), message);
                self.process_user_input(message).await;
            }
        }

        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        loop {
            let readline = rl.readline(&format!("{} ", ">".bright_green()));

            match readline {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(input);

                    if input.starts_with('/') {
                        match self.handle_slash_command(input).await {
                            SlashResult::Continue => continue,
                            SlashResult::Quit => break,
                        }
                    } else {
                        self.process_user_input(input).await;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }

        info!(session = %self.session.id(), phase = %self.session.phase(), "REPL session ended");
        println!("Safe travels!");
        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "✈ AI Travel Planner".bright_cyan().bold());
        println!("Hey there! I'm your AI travel assistant. Let’s plan your dream trip together! 😊");
        println!(
            "{}",
            format!(
                "Profile: {} ({})  Type /help for commands, /quit to exit",
                self.manager.profile().variant,
                self.manager.profile().model
            )
            .dimmed()
        );
        println!();
    }

    fn print_assistant(&self, text: &str) {
        println!("{} {}", "assistant:".bright_blue().bold(), text);
        println!();
    }

    /// Send one line through the conversation manager and show the result
    async fn process_user_input(&mut self, input: &str) {
        debug!(phase = %self.session.phase(), "process_user_input: called");
        match self.manager.handle_input(&mut self.session, input).await {
            Ok(Outcome::Replied {
                reply,
                nudge,
                awaiting_confirmation,
            }) => {
                self.print_assistant(&reply);
                if let Some(nudge) = nudge {
                    self.print_assistant(nudge.text());
                }
                if awaiting_confirmation {
                    println!("{}", CONFIRM_HINT.dimmed());
                }
            }
            Ok(Outcome::Confirmed) => {
                self.print_assistant(CONFIRMED_MESSAGE);
                self.generate_itinerary().await;
            }
            Ok(Outcome::Ignored) => {
                println!("{}", CONFIRM_HINT.dimmed());
            }
            Ok(Outcome::Finished) => {
                println!(
                    "{}",
                    "Your itinerary has been generated. Use /history to review or /quit to exit.".dimmed()
                );
            }
            Err(e) => self.print_error(&e),
        }
    }

    async fn generate_itinerary(&mut self) {
        println!("{}", "Generating itinerary...".dimmed());
        match self.manager.generate_itinerary(&mut self.session).await {
            Ok(outcome) => {
                println!();
                match &outcome {
                    ItineraryOutcome::Parsed(_) => print_markdown(&outcome.display(self.style)),
                    ItineraryOutcome::Malformed { .. } => println!("{}", ERROR_MESSAGE.red()),
                }
                println!();
                print_markdown(&render_footer());
            }
            Err(e) => {
                self.print_error(&e);
                if offers_itinerary_retry(&e) {
                    println!("{}", "Use /itinerary to try again.".dimmed());
                }
            }
        }
    }

    fn print_error(&self, e: &ConversationError) {
        println!("{} {}", "Error:".red(), e);
        if let Some(hint) = e.hint() {
            println!("{}", hint.dimmed());
        }
        println!();
    }

    /// Handle slash commands
    async fn handle_slash_command(&mut self, input: &str) -> SlashResult {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let cmd = parts.first().copied().unwrap_or("");

        match cmd {
            "/help" | "/h" => {
                self.print_help();
                SlashResult::Continue
            }
            "/quit" | "/q" | "/exit" => SlashResult::Quit,
            "/history" => {
                self.print_history();
                SlashResult::Continue
            }
            "/state" => {
                self.print_state();
                SlashResult::Continue
            }
            "/itinerary" => {
                match self.session.phase() {
                    Phase::Ready if !self.session.itinerary_requested() => self.generate_itinerary().await,
                    Phase::Ready => println!("{}", "The itinerary was already generated.".dimmed()),
                    _ => println!("{}", "Finish planning and confirm with 'yes' first.".dimmed()),
                }
                SlashResult::Continue
            }
            _ => {
                println!("{} Unknown command: {}", "?".yellow(), cmd);
                println!("Type {} for available commands", "/help".yellow());
                SlashResult::Continue
            }
        }
    }

    fn print_help(&self) {
        println!();
        println!("{}", "Available Commands:".bright_cyan());
        println!("  {:14} Show this help", "/help".yellow());
        println!("  {:14} Exit the planner", "/quit".yellow());
        println!("  {:14} Show the conversation so far", "/history".yellow());
        println!("  {:14} Show the planning phase", "/state".yellow());
        println!("  {:14} Retry a failed itinerary request", "/itinerary".yellow());
        println!();
    }

    /// Print the conversation, without the system prompt
    fn print_history(&self) {
        let visible = self.session.transcript().visible();
        if visible.is_empty() {
            println!("{}", "No conversation history.".dimmed());
            return;
        }

        println!();
        println!("{}", "Conversation History:".bright_cyan());
        for turn in visible {
            let role = match turn.role {
                Role::User => "user".bright_green(),
                _ => "assistant".bright_blue(),
            };
            println!("{}: {}", role, turn.content);
        }
        println!();
    }

    fn print_state(&self) {
        let flags = self.session.flags();
        println!();
        println!("{} {}", "Session:".bright_cyan(), self.session.id());
        println!("  phase:                 {}", self.session.phase());
        println!("  gathering_info:        {}", flags.gathering_info);
        println!("  awaiting_confirmation: {}", flags.awaiting_confirmation);
        println!("  itinerary_generated:   {}", flags.itinerary_generated);
        println!("  turns:                 {}", self.session.transcript().len());
        println!();
    }
}

/// Print markdown with coloured headings
pub fn print_markdown(markdown: &str) {
    for line in markdown.lines() {
        if let Some(heading) = line.strip_prefix("### ") {
            println!("{}", heading.cyan().bold());
        } else if let Some(heading) = line.strip_prefix("## ") {
            println!("{}", heading.bright_cyan().bold());
        } else {
            println!("{}", line);
        }
    }
}

/// Whether `/itinerary` can reissue the request after this failure
///
/// Any model failure leaves the session ready with nothing requested.
fn offers_itinerary_retry(e: &ConversationError) -> bool {
    matches!(e, ConversationError::Llm(_))
}

/// Result of handling a slash command
#[derive(Debug, PartialEq, Eq)]
enum SlashResult {
    Continue,
    Quit,
}
