//! Conversation record types

use crate::mood::Mood;
use chrono::Local;
use serde::{Deserialize, Serialize};

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single transcript entry. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub text: String,
    /// Set only on user messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
    /// Local wall-clock time, `HH:MM`
    pub time: String,
}

impl Message {
    #[allow(dead_code)] // Used in tests
    pub fn user(text: impl Into<String>, mood: Mood) -> Self {
        Self::user_at(text, mood, clock_time())
    }

    pub fn user_at(text: impl Into<String>, mood: Mood, time: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            mood: Some(mood),
            time: time.into(),
        }
    }

    #[allow(dead_code)] // Used in tests
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::assistant_at(text, clock_time())
    }

    pub fn assistant_at(text: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            mood: None,
            time: time.into(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// Current local time formatted as `HH:MM`
pub fn clock_time() -> String {
    Local::now().format("%H:%M").to_string()
}
