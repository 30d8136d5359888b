//! Bag-of-words mood classification
//!
//! Maps free text to a coarse mood label by counting which cue words from two
//! fixed vocabularies appear in it. There is no stemming and no negation
//! handling: "not happy" reads as positive because "happy" is present.

#[cfg(test)]
mod proptests;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cue words that pull a message towards [`Mood::Positive`]
pub const POSITIVE_CUES: [&str; 10] = [
    "happy",
    "good",
    "great",
    "excited",
    "love",
    "wonderful",
    "amazing",
    "joy",
    "fantastic",
    "excellent",
];

/// Cue words that pull a message towards [`Mood::Negative`]
pub const NEGATIVE_CUES: [&str; 10] = [
    "sad",
    "anxious",
    "stressed",
    "angry",
    "worried",
    "depressed",
    "upset",
    "tired",
    "lonely",
    "hurt",
];

/// Mood label derived from a single user message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Positive,
    Neutral,
    Negative,
}

impl Mood {
    /// Lowercase label, as used in the prompt and on the wire
    pub fn label(self) -> &'static str {
        match self {
            Mood::Positive => "positive",
            Mood::Neutral => "neutral",
            Mood::Negative => "negative",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Mood::Positive => "Positive",
            Mood::Neutral => "Neutral",
            Mood::Negative => "Negative",
        }
    }

    /// Numeric score appended to the mood history for each user turn
    pub fn score(self) -> f64 {
        match self {
            Mood::Positive => 0.5,
            Mood::Neutral => 0.0,
            Mood::Negative => -0.5,
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Mood::Positive => "😊",
            Mood::Neutral => "😐",
            Mood::Negative => "😟",
        }
    }

    /// Position on the 0-100 "Mood Level" gauge
    pub fn gauge_level(self) -> u8 {
        match self {
            Mood::Positive => 80,
            Mood::Neutral => 50,
            Mood::Negative => 20,
        }
    }

    /// Quick tip shown next to the current mood
    pub fn tip(self) -> &'static str {
        match self {
            Mood::Positive => "💖 Share your happiness with someone",
            Mood::Neutral => "🧘 Take a short mindful pause",
            Mood::Negative => "🌬️ Try slow breathing for one minute",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a message, returning its mood label and score.
///
/// Each cue counts at most once however often it repeats. Ties, including
/// the empty message, are neutral.
pub fn classify(text: &str) -> (Mood, f64) {
    let lowered = text.to_lowercase();

    let positive = count_cues(&lowered, &POSITIVE_CUES);
    let negative = count_cues(&lowered, &NEGATIVE_CUES);

    let mood = if negative > positive {
        Mood::Negative
    } else if positive > negative {
        Mood::Positive
    } else {
        Mood::Neutral
    };

    (mood, mood.score())
}

fn count_cues(lowered: &str, cues: &[&str]) -> usize {
    cues.iter().filter(|cue| lowered.contains(*cue)).count()
}

/// Caption for the running average of the mood history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallMood {
    Low,
    Neutral,
    Positive,
}

impl OverallMood {
    const LOW_THRESHOLD: f64 = -0.2;
    const POSITIVE_THRESHOLD: f64 = 0.2;

    pub fn from_average(average: f64) -> Self {
        if average < Self::LOW_THRESHOLD {
            OverallMood::Low
        } else if average > Self::POSITIVE_THRESHOLD {
            OverallMood::Positive
        } else {
            OverallMood::Neutral
        }
    }

    pub fn caption(self) -> &'static str {
        match self {
            OverallMood::Low => "Low 😟",
            OverallMood::Neutral => "Neutral 😐",
            OverallMood::Positive => "Positive 🙂",
        }
    }
}

/// Paced breathing routine offered alongside the mood panel
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BreathingExercise {
    pub name: &'static str,
    pub inhale_secs: u8,
    pub hold_secs: u8,
    pub exhale_secs: u8,
    pub min_repetitions: u8,
    pub max_repetitions: u8,
}

/// 4-4-6 breathing: inhale 4s, hold 4s, exhale 6s, three or four times
pub const BREATHING_EXERCISE: BreathingExercise = BreathingExercise {
    name: "4–4–6 Breathing Technique",
    inhale_secs: 4,
    hold_secs: 4,
    exhale_secs: 6,
    min_repetitions: 3,
    max_repetitions: 4,
};
