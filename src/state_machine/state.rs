//! Conversation state types

use crate::store::Message;

/// User message that has been classified but not yet committed to the store
#[derive(Debug, Clone, PartialEq)]
pub struct PendingTurn {
    pub message: Message,
    pub score: f64,
}

/// Conversation state
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConvState {
    /// Ready for user input, no pending operations
    #[default]
    Idle,

    /// Reply request in flight for the pending user message
    Processing { pending: PendingTurn },
}

impl ConvState {
    /// Check if a turn is in progress
    pub fn is_working(&self) -> bool {
        matches!(self, ConvState::Processing { .. })
    }

    /// Wire name, as sent to the UI
    pub fn name(&self) -> &'static str {
        match self {
            ConvState::Idle => "idle",
            ConvState::Processing { .. } => "processing",
        }
    }
}
