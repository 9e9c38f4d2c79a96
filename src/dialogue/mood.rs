//! Mood state machine
//!
//! Three deterministic override rules are checked in order; if none fires
//! the mood may drift to one of its three successors.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::random::RandomSource;
use crate::types::{Intent, Mood, Sentiment};

/// Which rule produced the next mood
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodRule {
    /// positive + fun intent
    PositiveFun,
    /// negative + emotional intent
    NegativeEmotional,
    /// question while playful
    PlayfulQuestion,
    /// random walk to a successor
    Drift,
    /// no change
    Stay,
}

/// Number of moods; the successor table has one row per mood
const MOOD_COUNT: usize = 6;

const _: () = assert!(Mood::ALL.len() == MOOD_COUNT);

/// Built-in successors of each mood
fn default_successors(mood: Mood) -> [Mood; 3] {
    use Mood::*;
    match mood {
        Playful => [Fun, Flirty, Thoughtful],
        Romantic => [Flirty, Thoughtful, Supportive],
        Supportive => [Thoughtful, Romantic, Playful],
        Thoughtful => [Supportive, Romantic, Playful],
        Fun => [Playful, Flirty, Romantic],
        Flirty => [Romantic, Playful, Fun],
    }
}

/// Row of `mood` in the successor table
fn slot(mood: Mood) -> usize {
    mood as usize
}

/// Successor sets, one ordered triple per mood
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodTransitions {
    successors: [[Mood; 3]; MOOD_COUNT],
}

impl Default for MoodTransitions {
    fn default() -> Self {
        let mut successors = [[Mood::Playful; 3]; MOOD_COUNT];
        for mood in Mood::ALL {
            successors[slot(*mood)] = default_successors(*mood);
        }
        Self { successors }
    }
}

impl MoodTransitions {
    /// Replace the successor triple of one mood
    pub fn with_successors(mut self, mood: Mood, next: [Mood; 3]) -> Self {
        self.successors[slot(mood)] = next;
        self
    }

    pub fn successors(&self, mood: Mood) -> [Mood; 3] {
        self.successors[slot(mood)]
    }

    /// Deterministic override for the classified message, if any
    pub fn override_rule(sentiment: Sentiment, intent: Intent, current: Mood) -> Option<(MoodRule, Mood)> {
        match (sentiment, intent, current) {
            (Sentiment::Positive, Intent::Fun, _) => Some((MoodRule::PositiveFun, Mood::Fun)),
            (Sentiment::Negative, Intent::Emotional, _) => {
                Some((MoodRule::NegativeEmotional, Mood::Supportive))
            }
            (_, Intent::Question, Mood::Playful) => Some((MoodRule::PlayfulQuestion, Mood::Thoughtful)),
            _ => None,
        }
    }

    /// Next mood and the rule that chose it
    pub fn next<R>(
        &self,
        sentiment: Sentiment,
        intent: Intent,
        current: Mood,
        shift_probability: f64,
        rng: &mut R,
    ) -> (Mood, MoodRule)
    where
        R: RandomSource + ?Sized,
    {
        if let Some((rule, mood)) = Self::override_rule(sentiment, intent, current) {
            debug!(?rule, from = %current, to = %mood, "Mood override");
            return (mood, rule);
        }

        if rng.chance(shift_probability) {
            let options = self.successors(current);
            let mood = options[rng.pick_index(options.len())];
            debug!(from = %current, to = %mood, "Mood drift");
            (mood, MoodRule::Drift)
        } else {
            (current, MoodRule::Stay)
        }
    }
}
