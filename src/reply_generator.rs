//! Companion reply generation
//!
//! Wraps one chat-completion call per turn. Every failure is absorbed here
//! and surfaces as a [`Reply`] variant; callers never see an error.

use crate::llm::{LlmMessage, LlmRequest, LlmResponse};
use crate::mood::Mood;
use crate::runtime::CompletionClient;
use crate::system_prompt::{user_turn, SYSTEM_PROMPT};
use std::time::Duration;
use tokio::time::timeout;

pub const TEMPERATURE: f32 = 0.7;
pub const MAX_REPLY_TOKENS: u32 = 150;

/// Upper bound on a whole generation, on top of the transport timeout
pub const REPLY_TIMEOUT: Duration = Duration::from_secs(30);

pub const RATE_LIMITED_REPLY: &str =
    "I'm experiencing high demand right now. Please try again in a moment. 💙";

pub const FALLBACK_REPLY: &str = "I hear you. Remember, you're doing your best, and that's enough. Would you like to try our breathing exercise? 💙";

/// Outcome of one generation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Success(String),
    RateLimited,
    OtherFailure,
}

impl Reply {
    /// Text shown to the user; failures map to their fixed fallbacks
    pub fn into_text(self) -> String {
        match self {
            Reply::Success(text) => text,
            Reply::RateLimited => RATE_LIMITED_REPLY.to_string(),
            Reply::OtherFailure => FALLBACK_REPLY.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Reply::Success(_))
    }
}

/// Build the completion request for one user message
pub fn build_request(user_text: &str, mood: Mood) -> LlmRequest {
    LlmRequest {
        system: SYSTEM_PROMPT.to_string(),
        messages: vec![LlmMessage::user(user_turn(user_text, mood))],
        temperature: Some(TEMPERATURE),
        max_tokens: Some(MAX_REPLY_TOKENS),
    }
}

/// Generates companion replies through an [`CompletionClient`]
pub struct ReplyGenerator<L: CompletionClient> {
    client: L,
    timeout: Duration,
}

impl<L: CompletionClient> ReplyGenerator<L> {
    pub fn new(client: L) -> Self {
        Self {
            client,
            timeout: REPLY_TIMEOUT,
        }
    }

    #[cfg(test)]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model_id(&self) -> &str {
        self.client.model_id()
    }

    /// Generate a reply for `user_text`. Never fails.
    pub async fn generate(&self, user_text: &str, mood: Mood) -> Reply {
        let request = build_request(user_text, mood);

        match timeout(self.timeout, self.client.complete(&request)).await {
            Ok(Ok(response)) => extract_reply(&response),
            Ok(Err(e)) if e.is_rate_limit() => {
                tracing::warn!(error = %e.message, "Reply generation rate limited");
                Reply::RateLimited
            }
            Ok(Err(e)) => {
                tracing::warn!(
                    error = %e.message,
                    kind = e.kind.as_str(),
                    "Reply generation failed"
                );
                Reply::OtherFailure
            }
            Err(_) => {
                tracing::warn!(timeout_secs = self.timeout.as_secs(), "Reply generation timed out");
                Reply::OtherFailure
            }
        }
    }
}

fn extract_reply(response: &LlmResponse) -> Reply {
    let trimmed = response.content.trim();
    if trimmed.is_empty() {
        tracing::warn!("Reply generation returned empty content");
        Reply::OtherFailure
    } else {
        Reply::Success(trimmed.to_string())
    }
}
