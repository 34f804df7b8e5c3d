//! Append-only conversation transcript

use tracing::debug;

use crate::llm::{Role, Turn};

/// Ordered record of turns; the first turn is always the system prompt
#[derive(Debug, Clone)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            turns: vec![Turn::system(system_prompt)],
        }
    }

    pub fn push(&mut self, turn: Turn) {
        debug!(role = %turn.role, len = self.turns.len() + 1, "Transcript::push: called");
        self.turns.push(turn);
    }

    /// The last `n` turns, oldest first
    ///
    /// Returns the whole transcript when it is shorter than `n`. The system
    /// prompt is included only if it falls inside the window.
    pub fn window(&self, n: usize) -> &[Turn] {
        let start = self.turns.len().saturating_sub(n);
        &self.turns[start..]
    }

    /// Everything except the leading system prompt
    pub fn visible(&self) -> &[Turn] {
        &self.turns[1..]
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn system_prompt(&self) -> &str {
        &self.turns[0].content
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// True if nothing but the system prompt has been recorded
    pub fn is_fresh(&self) -> bool {
        self.turns.len() == 1
    }

    /// Most recent turn with the given role
    pub fn last_of(&self, role: Role) -> Option<&Turn> {
        self.turns.iter().rev().find(|t| t.role == role)
    }

    /// Drop turns appended after `len`, used to undo a failed exchange
    ///
    /// Never removes the system prompt.
    pub(crate) fn rollback_to(&mut self, len: usize) {
        debug!(from = self.turns.len(), to = len, "Transcript::rollback_to: called");
        self.turns.truncate(len.max(1));
    }
}
