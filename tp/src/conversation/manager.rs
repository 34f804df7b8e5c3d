//! Conversation manager
//!
//! Drives one session: appends turns, sends bounded windows to the LLM,
//! applies keyword nudges and phase transitions, and requests the final
//! itinerary.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use super::nudge::{self, Nudge};
use super::{Confirmation, ConversationError, Phase, SessionFlags, Transcript};
use crate::config::PlannerProfile;
use crate::itinerary::ItineraryOutcome;
use crate::llm::{CompletionRequest, LlmClient, LlmError, Role, StopReason, Turn};
use crate::prompts::PromptSet;

/// In-memory state of one planning conversation
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    transcript: Transcript,
    phase: Phase,
    itinerary_requested: bool,
}

impl Session {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        let id = Uuid::now_v7();
        info!(session = %id, "Session::new: started");
        Self {
            id,
            transcript: Transcript::new(system_prompt),
            phase: Phase::Collecting,
            itinerary_requested: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn flags(&self) -> SessionFlags {
        self.phase.flags()
    }

    /// True once the itinerary request has been answered (parsed or not)
    pub fn itinerary_requested(&self) -> bool {
        self.itinerary_requested
    }

    fn set_phase(&mut self, next: Phase) {
        if next != self.phase {
            info!(session = %self.id, from = %self.phase, to = %next, "phase transition");
            self.phase = next;
        }
    }
}

/// What happened to one user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The model answered; `nudge` is the canned follow-up appended after it
    Replied {
        reply: String,
        nudge: Option<Nudge>,
        awaiting_confirmation: bool,
    },
    /// The user said yes; the session is now ready for the itinerary
    Confirmed,
    /// Input at the confirmation gate that was neither yes nor no
    Ignored,
    /// The session already reached its terminal phase
    Finished,
}

/// Conversation manager bound to one client, profile and prompt set
pub struct ConversationManager {
    llm: Arc<dyn LlmClient>,
    profile: PlannerProfile,
    prompts: PromptSet,
}

impl ConversationManager {
    pub fn new(llm: Arc<dyn LlmClient>, profile: PlannerProfile, prompts: PromptSet) -> Self {
        debug!(variant = %profile.variant, model = %profile.model, "ConversationManager::new: called");
        Self { llm, profile, prompts }
    }

    pub fn profile(&self) -> &PlannerProfile {
        &self.profile
    }

    pub fn prompts(&self) -> &PromptSet {
        &self.prompts
    }

    /// Start a session seeded with this profile's system prompt
    pub fn new_session(&self) -> Session {
        Session::new(self.prompts.system.clone())
    }

    /// Route one user input according to the session phase
    pub async fn handle_input(&self, session: &mut Session, input: &str) -> Result<Outcome, ConversationError> {
        debug!(session = %session.id, phase = %session.phase, "handle_input: called");
        match session.phase {
            Phase::Collecting => self.send_message(session, input).await,
            Phase::AwaitingConfirmation => {
                let answer = Confirmation::classify(input);
                let next = session.phase.on_confirmation(answer);
                match answer {
                    Confirmation::Yes => {
                        session.set_phase(next);
                        Ok(Outcome::Confirmed)
                    }
                    Confirmation::No => {
                        let prior = session.phase;
                        session.set_phase(next);
                        let result = self.send_message(session, input).await;
                        if result.is_err() {
                            session.set_phase(prior);
                        }
                        result
                    }
                    Confirmation::Unrecognized => {
                        debug!(session = %session.id, "handle_input: confirmation input ignored");
                        Ok(Outcome::Ignored)
                    }
                }
            }
            Phase::Ready => Ok(Outcome::Finished),
        }
    }

    /// Send an ordinary chat message and record the reply
    ///
    /// On failure the user turn is removed again so the transcript is exactly
    /// as it was before the call. The phase is only advanced on success.
    async fn send_message(&self, session: &mut Session, input: &str) -> Result<Outcome, ConversationError> {
        let checkpoint = session.transcript.len();
        session.transcript.push(Turn::user(input));

        let request = CompletionRequest {
            model: self.profile.model.clone(),
            messages: session.transcript.window(self.profile.reply_window).to_vec(),
            max_tokens: self.profile.reply_max_tokens,
            temperature: self.profile.temperature,
        };

        let reply = match self.request_text(request).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(session = %session.id, error = %e, "send_message: request failed, rolling back");
                session.transcript.rollback_to(checkpoint);
                return Err(e.into());
            }
        };

        session.transcript.push(Turn::assistant(reply.clone()));

        let nudge = if self.profile.nudges {
            nudge::follow_up_for(input)
        } else {
            None
        };
        if let Some(n) = nudge {
            debug!(session = %session.id, nudge = ?n, "send_message: appending nudge");
            session.transcript.push(Turn::assistant(n.text()));
        }

        session.set_phase(session.phase.on_reply(&reply));

        Ok(Outcome::Replied {
            reply,
            nudge,
            awaiting_confirmation: session.phase == Phase::AwaitingConfirmation,
        })
    }

    /// Ask the model for the structured itinerary
    ///
    /// Allowed once per session, after confirmation. A transport failure
    /// leaves the session untouched so the request can be issued again; a
    /// response that does not parse is final.
    pub async fn generate_itinerary(&self, session: &mut Session) -> Result<ItineraryOutcome, ConversationError> {
        debug!(session = %session.id, "generate_itinerary: called");
        if session.phase != Phase::Ready {
            return Err(ConversationError::NotReady(session.phase));
        }
        if session.itinerary_requested {
            return Err(ConversationError::AlreadyGenerated);
        }

        let checkpoint = session.transcript.len();
        session.transcript.push(Turn::user(self.prompts.itinerary.clone()));

        let request = CompletionRequest {
            model: self.profile.model.clone(),
            messages: session.transcript.window(self.profile.itinerary_window).to_vec(),
            max_tokens: self.profile.itinerary_max_tokens,
            temperature: self.profile.temperature,
        };

        let raw = match self.request_text(request).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(session = %session.id, error = %e, "generate_itinerary: request failed, rolling back");
                session.transcript.rollback_to(checkpoint);
                return Err(e.into());
            }
        };

        session.itinerary_requested = true;
        let outcome = ItineraryOutcome::from_raw(&raw);
        match &outcome {
            ItineraryOutcome::Parsed(itinerary) => {
                info!(session = %session.id, days = itinerary.days(), "generate_itinerary: parsed");
            }
            ItineraryOutcome::Malformed { error, .. } => {
                warn!(session = %session.id, %error, "generate_itinerary: response did not parse");
            }
        }
        Ok(outcome)
    }

    /// Last assistant reply, if any
    pub fn last_reply<'a>(&self, session: &'a Session) -> Option<&'a str> {
        session
            .transcript
            .last_of(Role::Assistant)
            .map(|turn| turn.content.as_str())
    }

    async fn request_text(&self, request: CompletionRequest) -> Result<String, LlmError> {
        debug!(
            message_count = request.messages.len(),
            max_tokens = request.max_tokens,
            "request_text: called"
        );
        let response = self.llm.complete(request).await?;
        if response.stop_reason == StopReason::MaxTokens {
            warn!("request_text: response hit the max token limit");
        }
        response
            .content
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| LlmError::InvalidResponse("Response had no text content".to_string()))
    }
}
