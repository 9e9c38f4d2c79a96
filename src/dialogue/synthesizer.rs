//! Base reply synthesis
//!
//! Selects a template for (intent, sentiment, mood), fills in the user's
//! name and optionally appends a time-of-day clause and a topic clause.

use tracing::debug;

use super::templates::{TemplateBank, FALLBACK_TEMPLATE, NAME_PLACEHOLDER};
use crate::random::{pick, RandomSource};
use crate::types::{Intent, Mood, Sentiment, TimeOfDay, Topic};

/// Inputs the synthesizer reads
#[derive(Debug, Clone, Copy)]
pub struct SynthesisInput<'a> {
    pub intent: Intent,
    pub sentiment: Sentiment,
    pub mood: Mood,
    pub topics: &'a [Topic],
    pub user_name: Option<&'a str>,
    pub time_of_day: TimeOfDay,
}

/// Chances of appending the optional clauses
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClauseChances {
    pub time_of_day: f64,
    pub topic: f64,
}

/// Synthesized base reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synthesis {
    pub text: String,
    /// The bank had no cell for the classification
    pub used_fallback: bool,
}

pub struct ResponseSynthesizer<'a> {
    bank: &'a TemplateBank,
    chances: ClauseChances,
}

impl<'a> ResponseSynthesizer<'a> {
    pub fn new(bank: &'a TemplateBank, chances: ClauseChances) -> Self {
        Self { bank, chances }
    }

    pub fn synthesize<R>(&self, input: &SynthesisInput<'_>, rng: &mut R) -> Synthesis
    where
        R: RandomSource + ?Sized,
    {
        let (template, used_fallback) =
            match self.bank.get(input.intent, input.sentiment, input.mood) {
                Some(templates) => match pick(rng, templates) {
                    Some(t) => (t.as_str(), false),
                    None => (self.bank.fallback(), true),
                },
                None => (self.bank.fallback(), true),
            };

        if used_fallback {
            debug!(
                intent = %input.intent,
                sentiment = %input.sentiment,
                mood = %input.mood,
                "No template cell, using fallback"
            );
        }

        let mut text = fill_name(template, input.user_name);
        if text.trim().is_empty() {
            // a name-only template without a name
            debug!("Template filled to blank, using fallback");
            text = fill_name(self.bank.fallback(), input.user_name);
            if text.trim().is_empty() {
                text = FALLBACK_TEMPLATE.to_string();
            }
        }

        if rng.chance(self.chances.time_of_day) {
            if let Some(clause) = self.bank.time_clause(input.time_of_day) {
                text.push_str(clause);
            }
        }

        if rng.chance(self.chances.topic) {
            if let Some(clause) = input.topics.first().and_then(|t| self.bank.topic_clause(*t)) {
                text.push_str(clause);
            }
        }

        Synthesis { text, used_fallback }
    }
}

/// Substitute the name placeholder. Without a name the placeholder and the
/// separator in front of it are dropped.
pub fn fill_name(template: &str, name: Option<&str>) -> String {
    match name {
        Some(name) => template.replace(NAME_PLACEHOLDER, name),
        None => template
            .replace(&format!(", {}", NAME_PLACEHOLDER), "")
            .replace(&format!(" {}", NAME_PLACEHOLDER), "")
            .replace(NAME_PLACEHOLDER, ""),
    }
}
