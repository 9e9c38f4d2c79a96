//! Affect tracking over the recent conversation window

use serde::{Deserialize, Serialize};

use super::lexicon::Lexicon;
use crate::types::{ConversationTurn, Sentiment};

/// Direction the conversation is heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationFlow {
    /// Long user messages that ask questions
    Deepening,
    /// Enough back and forth to keep going
    Engaging,
    /// Too little to go on
    Stagnant,
}

impl ConversationFlow {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationFlow::Deepening => "deepening",
            ConversationFlow::Engaging => "engaging",
            ConversationFlow::Stagnant => "stagnant",
        }
    }
}

/// Snapshot of the user's affective trend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffectState {
    /// Majority sentiment of recent user turns
    pub user_mood: Sentiment,
    pub conversation_flow: ConversationFlow,
    /// Closeness estimate (0.0 - 1.0)
    pub rapport: f32,
}

impl Default for AffectState {
    fn default() -> Self {
        Self {
            user_mood: Sentiment::Neutral,
            conversation_flow: ConversationFlow::Stagnant,
            rapport: 0.0,
        }
    }
}

/// Average user-turn length above which a conversation can deepen
const DEEPENING_MIN_AVG_CHARS: f32 = 50.0;

/// Window size from which a conversation counts as engaging
const ENGAGING_MIN_TURNS: usize = 3;

/// Derives [`AffectState`] from history
pub struct AffectTracker<'a> {
    lexicon: &'a Lexicon,
    window: usize,
}

impl<'a> AffectTracker<'a> {
    pub fn new(lexicon: &'a Lexicon, window: usize) -> Self {
        Self { lexicon, window }
    }

    /// Analyze the most recent turns; `history` is only read
    pub fn track(&self, history: &[ConversationTurn]) -> AffectState {
        let start = history.len().saturating_sub(self.window);
        let window = &history[start..];
        let user_turns: Vec<&ConversationTurn> = window.iter().filter(|t| t.is_user()).collect();

        let sentiments: Vec<Sentiment> = user_turns
            .iter()
            .map(|t| t.sentiment.unwrap_or_else(|| self.lexicon.sentiment(&t.text)))
            .collect();

        let positive_turns = sentiments
            .iter()
            .filter(|s| **s == Sentiment::Positive)
            .count();

        AffectState {
            user_mood: majority(&sentiments),
            conversation_flow: flow(&user_turns, window.len()),
            rapport: rapport(positive_turns, window.len()),
        }
    }
}

/// Strict majority label; ties (and no turns) are neutral
fn majority(sentiments: &[Sentiment]) -> Sentiment {
    let count = |label: Sentiment| sentiments.iter().filter(|s| **s == label).count();
    let mut counts = [
        (Sentiment::Positive, count(Sentiment::Positive)),
        (Sentiment::Negative, count(Sentiment::Negative)),
        (Sentiment::Neutral, count(Sentiment::Neutral)),
    ];
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    if counts[0].1 == 0 || counts[0].1 == counts[1].1 {
        Sentiment::Neutral
    } else {
        counts[0].0
    }
}

fn flow(user_turns: &[&ConversationTurn], window_len: usize) -> ConversationFlow {
    if !user_turns.is_empty() {
        let total_chars: usize = user_turns.iter().map(|t| t.text.chars().count()).sum();
        let avg = total_chars as f32 / user_turns.len() as f32;
        let asks = user_turns.iter().any(|t| t.text.contains('?'));
        if avg > DEEPENING_MIN_AVG_CHARS && asks {
            return ConversationFlow::Deepening;
        }
    }
    if window_len >= ENGAGING_MIN_TURNS {
        ConversationFlow::Engaging
    } else {
        ConversationFlow::Stagnant
    }
}

fn rapport(positive_turns: usize, window_len: usize) -> f32 {
    (0.2 * positive_turns as f32 + 0.1 * window_len as f32).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(text: &str) -> ConversationTurn {
        ConversationTurn::user(text, Utc::now())
    }

    fn agent(text: &str) -> ConversationTurn {
        ConversationTurn::agent(text, Utc::now())
    }

    fn tracker() -> AffectTracker<'static> {
        AffectTracker::new(Lexicon::builtin(), 5)
    }

    #[test]
    fn test_empty_history() {
        let state = tracker().track(&[]);
        assert_eq!(state, AffectState::default());
    }

    #[test]
    fn test_majority_and_ties() {
        assert_eq!(majority(&[Sentiment::Positive, Sentiment::Positive, Sentiment::Negative]), Sentiment::Positive);
        assert_eq!(majority(&[Sentiment::Positive, Sentiment::Negative]), Sentiment::Neutral);
        assert_eq!(majority(&[Sentiment::Negative]), Sentiment::Negative);
        assert_eq!(majority(&[]), Sentiment::Neutral);
    }

    #[test]
    fn test_only_window_counts() {
        // Old negative turns fall outside the five-turn window
        let history = vec![
            user("sad"),
            user("sad"),
            user("sad"),
            user("great"),
            agent("glad"),
            user("happy"),
            agent("yay"),
            user("awesome"),
        ];
        let state = tracker().track(&history);
        assert_eq!(state.user_mood, Sentiment::Positive);
        // 3 positive user turns, 5 turns in window
        assert!((state.rapport - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_cached_sentiment_wins() {
        let history = vec![user("this text is great").with_sentiment(Sentiment::Negative)];
        let state = tracker().track(&history);
        assert_eq!(state.user_mood, Sentiment::Negative);
        assert!((state.rapport - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_flow_deepening() {
        let long_q = "I have been wondering about this for a long time, what do you think it means?";
        let history = vec![user(long_q)];
        assert_eq!(tracker().track(&history).conversation_flow, ConversationFlow::Deepening);
    }

    #[test]
    fn test_flow_engaging_and_stagnant() {
        let history = vec![user("hi"), agent("hey"), user("ok")];
        assert_eq!(tracker().track(&history).conversation_flow, ConversationFlow::Engaging);

        let history = vec![user("hi"), agent("hey")];
        assert_eq!(tracker().track(&history).conversation_flow, ConversationFlow::Stagnant);
    }

    #[test]
    fn test_rapport_formula() {
        let history = vec![user("lovely"), agent("x"), user("meh")];
        let state = tracker().track(&history);
        // 0.2 * 1 + 0.1 * 3
        assert!((state.rapport - 0.5).abs() < 1e-6);
    }
}
