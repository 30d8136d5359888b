//! Session-scoped conversation storage
//!
//! Holds the transcript and the mood history for one session. Everything
//! lives in memory and disappears with the session.

mod types;

pub use types::*;

/// Ordered transcript plus one mood score per user message.
///
/// `mood_history.len()` always equals the number of user messages in
/// `messages`; the controller only mutates the store through
/// [`ConversationStore::record_turn`] and [`ConversationStore::clear`].
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    messages: Vec<Message>,
    mood_history: Vec<f64>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn append_score(&mut self, score: f64) {
        self.mood_history.push(score);
    }

    /// Commit a complete turn: the user message, its score and the reply
    pub fn record_turn(&mut self, user: Message, score: f64, assistant: Message) {
        debug_assert!(user.is_user());
        self.append(user);
        self.append_score(score);
        self.append(assistant);
    }

    /// Wipe transcript and mood history together
    pub fn clear(&mut self) {
        self.messages.clear();
        self.mood_history.clear();
    }

    /// Full transcript, oldest first
    pub fn transcript(&self) -> &[Message] {
        &self.messages
    }

    pub fn mood_history(&self) -> &[f64] {
        &self.mood_history
    }

    /// Most recent user-authored message, ignoring any replies after it
    pub fn latest_user_message(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| m.is_user())
    }

    /// Arithmetic mean of the mood history, `0.0` when empty
    #[allow(clippy::cast_precision_loss)] // history length is tiny
    pub fn average_mood(&self) -> f64 {
        if self.mood_history.is_empty() {
            return 0.0;
        }
        self.mood_history.iter().sum::<f64>() / self.mood_history.len() as f64
    }

    #[allow(dead_code)] // Used in tests
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[allow(dead_code)] // Used in tests
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
