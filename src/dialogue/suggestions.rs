//! Follow-up questions and suggested actions
//!
//! Deterministic lookup from intent and topics. Each source category adds
//! up to two entries; the concatenation is truncated to `max_suggestions`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::lexicon::Classification;
use crate::types::{Intent, SuggestedAction, Topic};

/// Entries each source category may contribute
const PER_CATEGORY: usize = 2;

/// Upper bound on follow-up questions and on action tags
pub const MAX_SUGGESTIONS: usize = 2;

const CLARIFYING_QUESTIONS: &[&str] = &[
    "What made you curious about that?",
    "Is there something specific you'd like to know?",
];

const WORK_QUESTIONS: &[&str] = &[
    "How are things going at work lately?",
    "What's the best part of your job?",
];

const RELATIONSHIP_QUESTIONS: &[&str] = &[
    "How are things with the people close to you?",
    "What do you value most in a relationship?",
];

const HOBBY_QUESTIONS: &[&str] = &[
    "What got you into that?",
    "What do you enjoy most about it?",
];

/// Output of the suggestion generator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestions {
    pub follow_up_questions: Vec<String>,
    pub actions: Vec<SuggestedAction>,
}

pub struct SuggestionEngine {
    max_suggestions: usize,
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::new(MAX_SUGGESTIONS)
    }
}

impl SuggestionEngine {
    /// Caps above [`MAX_SUGGESTIONS`] are lowered to it
    pub fn new(max_suggestions: usize) -> Self {
        Self {
            max_suggestions: max_suggestions.min(MAX_SUGGESTIONS),
        }
    }

    pub fn suggest(&self, classification: &Classification) -> Suggestions {
        let suggestions = Suggestions {
            follow_up_questions: self.follow_up_questions(classification.intent, &classification.topics),
            actions: self.actions(
                classification.intent,
                &classification.topics,
                classification.mentions_music,
            ),
        };
        debug!(
            questions = suggestions.follow_up_questions.len(),
            actions = suggestions.actions.len(),
            "Suggestions generated"
        );
        suggestions
    }

    /// Clarifying, work, relationship and hobby questions, in that order
    pub fn follow_up_questions(&self, intent: Intent, topics: &[Topic]) -> Vec<String> {
        let mut sources: Vec<&[&str]> = Vec::new();
        if intent == Intent::Question {
            sources.push(CLARIFYING_QUESTIONS);
        }
        if topics.contains(&Topic::Work) {
            sources.push(WORK_QUESTIONS);
        }
        if topics.contains(&Topic::Relationships) {
            sources.push(RELATIONSHIP_QUESTIONS);
        }
        if topics.contains(&Topic::Hobbies) {
            sources.push(HOBBY_QUESTIONS);
        }

        sources
            .into_iter()
            .flat_map(|list| list.iter().take(PER_CATEGORY))
            .take(self.max_suggestions)
            .map(|q| q.to_string())
            .collect()
    }

    /// Support, play and music actions, in that order
    pub fn actions(&self, intent: Intent, topics: &[Topic], mentions_music: bool) -> Vec<SuggestedAction> {
        let mut actions = Vec::new();
        if intent == Intent::Emotional && topics.contains(&Topic::Emotions) {
            actions.extend([SuggestedAction::SendCompliment, SuggestedAction::OfferSupport]);
        }
        if intent == Intent::Fun {
            actions.extend([SuggestedAction::ShareJoke, SuggestedAction::PlayGame]);
        }
        if mentions_music {
            actions.extend([SuggestedAction::RecommendSong, SuggestedAction::AskFavoriteArtist]);
        }
        actions.truncate(self.max_suggestions);
        actions
    }
}
