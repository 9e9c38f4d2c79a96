//! Engine tuning constants

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dialogue::suggestions::MAX_SUGGESTIONS;
use crate::error::{ParleyError, Result};
use crate::types::DEFAULT_HISTORY_CAPACITY;

/// Probabilities and window sizes used by the dialogue pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Chance of drifting to a successor mood when no override rule fires
    pub mood_shift_probability: f64,
    /// Chance of appending a time-of-day clause
    pub time_clause_probability: f64,
    /// Chance of appending a topic clause
    pub topic_clause_probability: f64,
    /// Activation chance of the `romantic` word swap
    pub romantic_probability: f64,
    /// Activation chance of the `funny` joke acknowledgement
    pub funny_probability: f64,
    /// Activation chance of the `attentive` affirmation
    pub attentive_probability: f64,
    /// Number of recent turns the affect tracker looks at
    pub affect_window: usize,
    /// Rapport above which the connection clause is appended
    pub connection_rapport_threshold: f32,
    /// Cap on follow-up questions and on action tags (at most 2)
    pub max_suggestions: usize,
    /// Turns a context may hold
    pub history_capacity: usize,
    /// History length above which context awareness gets its bonus
    pub long_history_turns: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mood_shift_probability: 0.3,
            time_clause_probability: 0.2,
            topic_clause_probability: 0.3,
            romantic_probability: 0.3,
            funny_probability: 0.2,
            attentive_probability: 0.4,
            affect_window: 5,
            connection_rapport_threshold: 0.7,
            max_suggestions: MAX_SUGGESTIONS,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            long_history_turns: 5,
        }
    }
}

impl EngineConfig {
    /// Load from a JSON file; absent keys keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let probabilities = [
            ("mood_shift_probability", self.mood_shift_probability),
            ("time_clause_probability", self.time_clause_probability),
            ("topic_clause_probability", self.topic_clause_probability),
            ("romantic_probability", self.romantic_probability),
            ("funny_probability", self.funny_probability),
            ("attentive_probability", self.attentive_probability),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ParleyError::Config(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.connection_rapport_threshold) {
            return Err(ParleyError::Config(format!(
                "connection_rapport_threshold must be within [0, 1], got {}",
                self.connection_rapport_threshold
            )));
        }
        if self.affect_window == 0 {
            return Err(ParleyError::Config("affect_window must be positive".into()));
        }
        if self.max_suggestions > MAX_SUGGESTIONS {
            return Err(ParleyError::Config(format!(
                "max_suggestions must be at most {}, got {}",
                MAX_SUGGESTIONS, self.max_suggestions
            )));
        }
        if self.history_capacity == 0 {
            return Err(ParleyError::Config("history_capacity must be positive".into()));
        }
        Ok(())
    }

    /// All optional behaviour switched off; useful for deterministic output
    pub fn deterministic() -> Self {
        Self {
            mood_shift_probability: 0.0,
            time_clause_probability: 0.0,
            topic_clause_probability: 0.0,
            romantic_probability: 0.0,
            funny_probability: 0.0,
            attentive_probability: 0.0,
            ..Self::default()
        }
    }
}
