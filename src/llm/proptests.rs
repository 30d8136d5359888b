//! Property-based tests for the `OpenAI`-compatible translation layer
//!
//! - Translation keeps every turn, in order, after the system prompt
//! - Any 429 is classified as a rate limit, whatever the body
//! - Non-429 statuses never become rate limits without the provider code

use super::openai::OpenAIService;
use super::types::{LlmMessage, LlmRequest, MessageRole};
use super::LlmErrorKind;
use proptest::prelude::*;

fn arb_message() -> impl Strategy<Value = LlmMessage> {
    (
        prop_oneof![Just(MessageRole::User), Just(MessageRole::Assistant)],
        "[a-zA-Z0-9 _.!?,']{0,80}",
    )
        .prop_map(|(role, content)| LlmMessage { role, content })
}

fn arb_request() -> impl Strategy<Value = LlmRequest> {
    (
        "[a-zA-Z .]{0,40}",
        proptest::collection::vec(arb_message(), 1..6),
    )
        .prop_map(|(system, messages)| LlmRequest {
            system,
            messages,
            temperature: Some(0.7),
            max_tokens: Some(150),
        })
}

fn service() -> OpenAIService {
    OpenAIService::new("k".to_string(), "m", "m", None).unwrap()
}

proptest! {
    #[test]
    fn translation_preserves_turns(request in arb_request()) {
        let translated = service().translate_request(&request);
        let offset = usize::from(!request.system.is_empty());

        prop_assert_eq!(translated.messages.len(), request.messages.len() + offset);
        if offset == 1 {
            prop_assert_eq!(translated.messages[0].role.as_str(), "system");
        }
        for (original, wire) in request.messages.iter().zip(&translated.messages[offset..]) {
            prop_assert_eq!(wire.content.as_deref(), Some(original.content.as_str()));
        }
    }

    #[test]
    fn status_429_is_always_rate_limit(body in ".{0,120}") {
        prop_assert!(OpenAIService::classify_error(429, &body).is_rate_limit());
    }

    #[test]
    fn plain_bodies_never_rate_limit_without_429(
        status in prop_oneof![Just(400u16), Just(401), Just(403), Just(404), Just(500), Just(503)],
        body in "[a-z ]{0,60}",
    ) {
        let err = OpenAIService::classify_error(status, &body);
        prop_assert_ne!(err.kind, LlmErrorKind::RateLimit);
    }
}
