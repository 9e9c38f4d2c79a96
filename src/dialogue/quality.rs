//! Response quality scoring
//!
//! Four bounded metrics, each a fixed base plus additive bonuses.

use serde::{Deserialize, Serialize};

use crate::types::{Mood, Sentiment, Topic};

/// Quality metrics for a response, each within 0.0 - 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub confidence: f32,
    pub context_awareness: f32,
    pub emotional_intelligence: f32,
    pub personality_match: f32,
}

impl Default for QualityMetrics {
    fn default() -> Self {
        Self {
            confidence: 0.8,
            context_awareness: 0.7,
            emotional_intelligence: 0.75,
            personality_match: 0.85,
        }
    }
}

impl QualityMetrics {
    /// Mean of the four metrics
    pub fn overall(&self) -> f32 {
        (self.confidence + self.context_awareness + self.emotional_intelligence + self.personality_match)
            / 4.0
    }

    fn clamped(self) -> Self {
        Self {
            confidence: clamp_unit(self.confidence),
            context_awareness: clamp_unit(self.context_awareness),
            emotional_intelligence: clamp_unit(self.emotional_intelligence),
            personality_match: clamp_unit(self.personality_match),
        }
    }
}

/// What the scorer looks at
#[derive(Debug, Clone, Copy)]
pub struct ScoringInput<'a> {
    pub history_len: usize,
    pub topics: &'a [Topic],
    pub sentiment: Sentiment,
    pub mood: Mood,
    pub traits: &'a [String],
    pub text: &'a str,
}

pub struct QualityScorer {
    long_history_turns: usize,
}

impl Default for QualityScorer {
    fn default() -> Self {
        Self::new(5)
    }
}

impl QualityScorer {
    /// `long_history_turns`: history longer than this earns the context bonus
    pub fn new(long_history_turns: usize) -> Self {
        Self { long_history_turns }
    }

    pub fn score(&self, input: &ScoringInput<'_>) -> QualityMetrics {
        let mut metrics = QualityMetrics::default();

        if input.history_len > self.long_history_turns {
            metrics.context_awareness += 0.2;
        }
        if !input.topics.is_empty() {
            metrics.context_awareness += 0.1;
        }

        if labels_match(input.sentiment, input.mood) {
            metrics.emotional_intelligence += 0.1;
        }

        if trait_mentioned(input.traits, input.text) {
            metrics.personality_match += 0.1;
        }

        metrics.clamped()
    }
}

/// Sentiment and mood labels compare as plain strings. The built-in label
/// sets do not overlap, so this only fires for custom vocabularies.
fn labels_match(sentiment: Sentiment, mood: Mood) -> bool {
    sentiment.as_str() == mood.as_str()
}

/// Any trait name appears, case-insensitively, anywhere in the text
pub fn trait_mentioned(traits: &[String], text: &str) -> bool {
    let haystack = text.to_lowercase();
    traits
        .iter()
        .map(|t| t.trim().to_lowercase())
        .any(|t| !t.is_empty() && haystack.contains(&t))
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
