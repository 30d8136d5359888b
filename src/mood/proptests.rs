//! Property-based tests for the mood classifier

use super::*;
use proptest::prelude::*;

fn arb_cue_message(cues: &'static [&'static str]) -> impl Strategy<Value = String> {
    proptest::collection::vec(proptest::sample::select(cues), 1..8)
        .prop_map(|words| words.join(" "))
}

/// Words sharing no substring with any cue
fn arb_filler() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            Just("the"),
            Just("today"),
            Just("exam"),
            Just("week"),
            Just("i"),
            Just("am"),
            Just("feeling"),
        ],
        0..6,
    )
    .prop_map(|words| words.join(" "))
}

proptest! {
    #[test]
    fn only_negative_cues_classify_negative(text in arb_cue_message(&NEGATIVE_CUES)) {
        prop_assert_eq!(classify(&text).0, Mood::Negative);
    }

    #[test]
    fn only_positive_cues_classify_positive(text in arb_cue_message(&POSITIVE_CUES)) {
        prop_assert_eq!(classify(&text).0, Mood::Positive);
    }

    #[test]
    fn filler_alone_is_neutral(text in arb_filler()) {
        prop_assert_eq!(classify(&text).0, Mood::Neutral);
    }

    #[test]
    fn classification_ignores_case(text in "[a-zA-Z ]{0,60}") {
        prop_assert_eq!(classify(&text.to_uppercase()), classify(&text.to_lowercase()));
    }

    #[test]
    fn score_matches_label(text in ".{0,80}") {
        let (mood, score) = classify(&text);
        prop_assert!((score - mood.score()).abs() < f64::EPSILON);
    }
}
