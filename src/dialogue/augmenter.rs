//! Empathetic clauses driven by the affect state

use super::affect::AffectState;
use crate::types::Sentiment;

pub const SUPPORT_CLAUSE: &str = " Remember, you're stronger than you think.";
pub const POSITIVITY_CLAUSE: &str = " Your good vibes are contagious!";
pub const CONNECTION_CLAUSE: &str = " I feel like we're really connecting.";

/// Appends support, positivity and connection clauses; rules stack
pub fn augment(text: &str, affect: &AffectState, sentiment: Sentiment, rapport_threshold: f32) -> String {
    let mut out = text.to_string();

    match (affect.user_mood, sentiment) {
        (Sentiment::Negative, Sentiment::Negative) => out.push_str(SUPPORT_CLAUSE),
        (Sentiment::Positive, Sentiment::Positive) => out.push_str(POSITIVITY_CLAUSE),
        _ => {}
    }

    if affect.rapport > rapport_threshold {
        out.push_str(CONNECTION_CLAUSE);
    }

    out
}
