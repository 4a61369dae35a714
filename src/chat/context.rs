//! Per-conversation state.
//!
//! A context travels with each conversation (client-side over HTTP, in memory
//! for the REPL). It holds the company-fit flag and a bounded transcript.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Turns kept in the transcript.
pub const MAX_HISTORY: usize = 20;

/// Who said something.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Bot,
}

/// One transcript line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
    pub at: DateTime<Utc>,
}

/// State of a single conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationContext {
    id: Uuid,
    awaiting_role_description: bool,
    history: VecDeque<Turn>,
}

impl Default for ConversationContext {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            awaiting_role_description: false,
            history: VecDeque::new(),
        }
    }
}

impl ConversationContext {
    /// Start a fresh conversation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// True when the next message is taken as a role description.
    #[must_use]
    pub fn is_awaiting_role_description(&self) -> bool {
        self.awaiting_role_description
    }

    /// Take the next message as a role description.
    pub fn await_role_description(&mut self) {
        self.awaiting_role_description = true;
    }

    /// Clear the company-fit flag, returning whether it was set.
    pub fn take_awaiting_role_description(&mut self) -> bool {
        std::mem::take(&mut self.awaiting_role_description)
    }

    /// Append a turn, dropping the oldest beyond [`MAX_HISTORY`].
    pub fn record(&mut self, speaker: Speaker, text: impl Into<String>) {
        self.history.push_back(Turn {
            speaker,
            text: text.into(),
            at: Utc::now(),
        });
        while self.history.len() > MAX_HISTORY {
            self.history.pop_front();
        }
    }

    /// Transcript, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &Turn> {
        self.history.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Forget the transcript and flag, keeping the id.
    pub fn reset(&mut self) {
        self.awaiting_role_description = false;
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_is_bounded() {
        let mut ctx = ConversationContext::new();
        for i in 0..(MAX_HISTORY + 5) {
            ctx.record(Speaker::User, format!("message {i}"));
        }
        assert_eq!(ctx.len(), MAX_HISTORY);
        assert_eq!(ctx.history().next().unwrap().text, "message 5");
    }

    #[test]
    fn test_awaiting_flag() {
        let mut ctx = ConversationContext::new();
        assert!(!ctx.take_awaiting_role_description());
        ctx.await_role_description();
        assert!(ctx.is_awaiting_role_description());
        assert!(ctx.take_awaiting_role_description());
        assert!(!ctx.is_awaiting_role_description());
    }

    #[test]
    fn test_reset_keeps_id() {
        let mut ctx = ConversationContext::new();
        let id = ctx.id();
        ctx.record(Speaker::Bot, "hello");
        ctx.await_role_description();
        ctx.reset();
        assert!(ctx.is_empty());
        assert!(!ctx.is_awaiting_role_description());
        assert_eq!(ctx.id(), id);
    }

    #[test]
    fn test_json_round_trip_and_partial_input() {
        let mut ctx = ConversationContext::new();
        ctx.record(Speaker::User, "hi");
        let json = serde_json::to_string(&ctx).unwrap();
        let back: ConversationContext = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ctx);

        let partial: ConversationContext =
            serde_json::from_str(r#"{"awaiting_role_description": true}"#).unwrap();
        assert!(partial.is_awaiting_role_description());
        assert!(partial.is_empty());
    }
}
