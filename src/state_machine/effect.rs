//! Effects produced by state transitions

use crate::mood::Mood;
use crate::runtime::SessionEvent;
use crate::store::Message;

/// Effects to be executed after state transition
#[derive(Debug, Clone)]
pub enum Effect {
    /// Ask the reply generator for a companion reply
    RequestReply { text: String, mood: Mood },

    /// Commit a whole turn to the store
    PersistTurn {
        user: Message,
        score: f64,
        assistant: Message,
    },

    /// Wipe the transcript and mood history
    ClearStore,

    /// Notify connected clients
    NotifyClient(SessionEvent),
}

impl Effect {
    pub fn notify_state_change(state: &'static str) -> Self {
        Effect::NotifyClient(SessionEvent::StateChange { state })
    }

    pub fn notify_message(message: Message) -> Self {
        Effect::NotifyClient(SessionEvent::Message { message })
    }

    pub fn notify_cleared() -> Self {
        Effect::NotifyClient(SessionEvent::Cleared)
    }
}
