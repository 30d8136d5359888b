//! Pure state transition function
//!
//! A turn is Idle -> Processing -> Idle. Nothing reaches the store until the
//! reply is ready, so a turn either commits both messages or neither.

use super::{ConvState, Effect, Event, PendingTurn};
use crate::mood::classify;
use crate::store::Message;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ConvState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ConvState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("A reply is still being prepared, please wait")]
    Busy,
    #[error("Message is empty")]
    EmptyMessage,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function
///
/// Given the same inputs it always produces the same outputs, with no I/O.
pub fn transition(state: &ConvState, event: Event) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // ============================================================
        // User Message Handling
        // ============================================================
        (ConvState::Idle, Event::UserMessage { text, .. }) if text.is_empty() => {
            Err(TransitionError::EmptyMessage)
        }

        (ConvState::Idle, Event::UserMessage { text, time }) => {
            let (mood, score) = classify(&text);
            let pending = PendingTurn {
                message: Message::user_at(text.clone(), mood, time),
                score,
            };

            Ok(TransitionResult::new(ConvState::Processing { pending })
                .with_effect(Effect::notify_state_change("processing"))
                .with_effect(Effect::RequestReply { text, mood }))
        }

        (ConvState::Processing { .. }, Event::UserMessage { .. }) => Err(TransitionError::Busy),

        // ============================================================
        // Reply Handling
        // ============================================================
        (ConvState::Processing { pending }, Event::ReplyReady { reply, time }) => {
            let assistant = Message::assistant_at(reply.into_text(), time);

            Ok(TransitionResult::new(ConvState::Idle)
                .with_effect(Effect::PersistTurn {
                    user: pending.message.clone(),
                    score: pending.score,
                    assistant: assistant.clone(),
                })
                .with_effect(Effect::notify_message(pending.message.clone()))
                .with_effect(Effect::notify_message(assistant))
                .with_effect(Effect::notify_state_change("idle")))
        }

        (ConvState::Idle, Event::ReplyReady { .. }) => Err(TransitionError::InvalidTransition(
            "reply received with no turn in progress".to_string(),
        )),

        // ============================================================
        // Clearing
        // ============================================================
        (ConvState::Idle, Event::Clear) => Ok(TransitionResult::new(ConvState::Idle)
            .with_effect(Effect::ClearStore)
            .with_effect(Effect::notify_cleared())),

        (ConvState::Processing { .. }, Event::Clear) => Err(TransitionError::Busy),
    }
}
