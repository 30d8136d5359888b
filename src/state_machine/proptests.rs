//! Property-based tests for the state machine
//!
//! These tests drive arbitrary event sequences through `transition` and a
//! store, applying store effects the way the controller does.

use super::transition::*;
use super::*;
use crate::reply_generator::Reply;
use crate::store::ConversationStore;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        Just("I feel great today".to_string()),
        Just("I'm so anxious about exams".to_string()),
        Just("happy sad".to_string()),
        "[a-zA-Z ]{1,40}",
    ]
}

fn arb_reply() -> impl Strategy<Value = Reply> {
    prop_oneof![
        "[a-zA-Z .]{1,40}".prop_map(Reply::Success),
        Just(Reply::RateLimited),
        Just(Reply::OtherFailure),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        3 => arb_text().prop_map(|text| Event::UserMessage { text, time: "12:00".to_string() }),
        3 => arb_reply().prop_map(|reply| Event::ReplyReady { reply, time: "12:01".to_string() }),
        1 => Just(Event::Clear),
    ]
}

fn apply_store_effects(store: &mut ConversationStore, effects: Vec<Effect>) {
    for effect in effects {
        match effect {
            Effect::PersistTurn {
                user,
                score,
                assistant,
            } => store.record_turn(user, score, assistant),
            Effect::ClearStore => store.clear(),
            Effect::RequestReply { .. } | Effect::NotifyClient(_) => {}
        }
    }
}

proptest! {
    #[test]
    fn history_tracks_user_messages(events in proptest::collection::vec(arb_event(), 0..40)) {
        let mut state = ConvState::Idle;
        let mut store = ConversationStore::new();

        for event in events {
            if let Ok(result) = transition(&state, event) {
                apply_store_effects(&mut store, result.effects);
                state = result.new_state;
            }

            let user_count = store.transcript().iter().filter(|m| m.is_user()).count();
            prop_assert_eq!(store.mood_history().len(), user_count);
            prop_assert_eq!(store.len(), user_count * 2);
        }
    }

    #[test]
    fn processing_rejects_user_messages(text in arb_text(), next in arb_text()) {
        let first = transition(&ConvState::Idle, Event::UserMessage { text, time: "08:00".to_string() });
        if let Ok(result) = first {
            let second = transition(&result.new_state, Event::UserMessage { text: next, time: "08:00".to_string() });
            prop_assert_eq!(second.err(), Some(TransitionError::Busy));
        }
    }

    #[test]
    fn accepted_clear_empties_store(events in proptest::collection::vec(arb_event(), 1..30)) {
        let mut state = ConvState::Idle;
        let mut store = ConversationStore::new();

        for event in events {
            let is_clear = matches!(event, Event::Clear);
            if let Ok(result) = transition(&state, event) {
                apply_store_effects(&mut store, result.effects);
                state = result.new_state;
                if is_clear {
                    prop_assert!(store.is_empty());
                    prop_assert!(store.mood_history().is_empty());
                }
            }
        }
    }
}
