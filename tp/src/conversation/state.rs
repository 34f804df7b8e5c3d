//! Session phase machine
//!
//! `Collecting -> AwaitingConfirmation -> Ready`, with "no" at the
//! confirmation gate returning to `Collecting`. Transitions are pure
//! functions so they can be tested without a client.

use serde::Serialize;
use tracing::debug;

use super::CONFIRMATION_PHRASE;

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Chatting with the model to gather trip details
    #[default]
    Collecting,
    /// The model asked whether to generate the itinerary
    AwaitingConfirmation,
    /// The user said yes; terminal for the session
    Ready,
}

/// How an input at the confirmation gate was read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Yes,
    No,
    Unrecognized,
}

impl Confirmation {
    /// Case-insensitive exact match on "yes" / "no"
    ///
    /// Surrounding whitespace is not stripped here; the REPL trims each line.
    pub fn classify(input: &str) -> Self {
        let normalized = input.to_lowercase();
        match normalized.as_str() {
            "yes" => Confirmation::Yes,
            "no" => Confirmation::No,
            _ => Confirmation::Unrecognized,
        }
    }
}

impl Phase {
    /// Transition after an assistant reply was appended
    pub fn on_reply(self, reply: &str) -> Phase {
        match self {
            Phase::Collecting if reply.contains(CONFIRMATION_PHRASE) => {
                debug!("Phase::on_reply: confirmation phrase detected");
                Phase::AwaitingConfirmation
            }
            other => other,
        }
    }

    /// Transition for an input received while awaiting confirmation
    pub fn on_confirmation(self, answer: Confirmation) -> Phase {
        match (self, answer) {
            (Phase::AwaitingConfirmation, Confirmation::Yes) => Phase::Ready,
            (Phase::AwaitingConfirmation, Confirmation::No) => Phase::Collecting,
            (other, _) => other,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Phase::Ready
    }

    /// Boolean view of the phase
    pub fn flags(self) -> SessionFlags {
        SessionFlags {
            gathering_info: self == Phase::Collecting,
            awaiting_confirmation: self == Phase::AwaitingConfirmation,
            itinerary_generated: self == Phase::Ready,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Collecting => write!(f, "collecting"),
            Phase::AwaitingConfirmation => write!(f, "awaiting confirmation"),
            Phase::Ready => write!(f, "ready"),
        }
    }
}

/// The three lifecycle flags, derived from [`Phase`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionFlags {
    pub gathering_info: bool,
    pub awaiting_confirmation: bool,
    pub itinerary_generated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_with_phrase_moves_to_awaiting() {
        let reply = format!("Great, I have everything. {}", CONFIRMATION_PHRASE);
        assert_eq!(Phase::Collecting.on_reply(&reply), Phase::AwaitingConfirmation);
    }

    #[test]
    fn test_reply_without_exact_phrase_stays_collecting() {
        assert_eq!(Phase::Collecting.on_reply("What is your budget?"), Phase::Collecting);
        // Case and punctuation must match exactly
        let lowered = CONFIRMATION_PHRASE.to_lowercase();
        assert_eq!(Phase::Collecting.on_reply(&lowered), Phase::Collecting);
        let no_mark = CONFIRMATION_PHRASE.trim_end_matches('?');
        assert_eq!(Phase::Collecting.on_reply(no_mark), Phase::Collecting);
    }

    #[test]
    fn test_confirmation_classify() {
        assert_eq!(Confirmation::classify("yes"), Confirmation::Yes);
        assert_eq!(Confirmation::classify("YES"), Confirmation::Yes);
        assert_eq!(Confirmation::classify(" Yes "), Confirmation::Unrecognized);
        assert_eq!(Confirmation::classify("no\n"), Confirmation::Unrecognized);
        assert_eq!(Confirmation::classify("No"), Confirmation::No);
        assert_eq!(Confirmation::classify("yes please"), Confirmation::Unrecognized);
        assert_eq!(Confirmation::classify("y"), Confirmation::Unrecognized);
        assert_eq!(Confirmation::classify(""), Confirmation::Unrecognized);
    }

    #[test]
    fn test_confirmation_transitions() {
        let awaiting = Phase::AwaitingConfirmation;
        assert_eq!(awaiting.on_confirmation(Confirmation::Yes), Phase::Ready);
        assert_eq!(awaiting.on_confirmation(Confirmation::No), Phase::Collecting);
        assert_eq!(awaiting.on_confirmation(Confirmation::Unrecognized), awaiting);
    }

    #[test]
    fn test_yes_outside_gate_does_nothing() {
        assert_eq!(Phase::Collecting.on_confirmation(Confirmation::Yes), Phase::Collecting);
    }

    #[test]
    fn test_ready_is_terminal() {
        let reply = CONFIRMATION_PHRASE;
        assert_eq!(Phase::Ready.on_reply(reply), Phase::Ready);
        assert_eq!(Phase::Ready.on_confirmation(Confirmation::No), Phase::Ready);
        assert!(Phase::Ready.is_terminal());
        assert!(!Phase::AwaitingConfirmation.is_terminal());
    }

    #[test]
    fn test_flags_view() {
        let flags = Phase::Collecting.flags();
        assert!(flags.gathering_info && !flags.awaiting_confirmation && !flags.itinerary_generated);

        let flags = Phase::AwaitingConfirmation.flags();
        assert!(!flags.gathering_info && flags.awaiting_confirmation && !flags.itinerary_generated);

        let flags = Phase::Ready.flags();
        assert!(!flags.gathering_info && !flags.awaiting_confirmation && flags.itinerary_generated);
    }
}
