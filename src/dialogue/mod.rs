//! Dialogue pipeline
//!
//! Provides:
//! - Lexical classification (sentiment, intent, topics)
//! - Affect tracking over recent turns
//! - Mood state machine
//! - Template synthesis and personality styling
//! - Emotional augmentation
//! - Quality scoring and follow-up suggestions
//! - The [`DialogueEngine`] orchestrator

pub mod affect;
pub mod augmenter;
pub mod engine;
pub mod lexicon;
pub mod mood;
pub mod personality;
pub mod quality;
pub mod suggestions;
pub mod synthesizer;
pub mod templates;

pub use affect::{AffectState, AffectTracker, ConversationFlow};
pub use augmenter::augment;
pub use engine::DialogueEngine;
pub use lexicon::{intent, sentiment, topics, Classification, Lexicon, Tokens};
pub use mood::{MoodRule, MoodTransitions};
pub use personality::{PersonalityAdapter, TraitChances};
pub use quality::{trait_mentioned, QualityMetrics, QualityScorer, ScoringInput};
pub use suggestions::{SuggestionEngine, Suggestions, MAX_SUGGESTIONS};
pub use synthesizer::{fill_name, ClauseChances, ResponseSynthesizer, Synthesis, SynthesisInput};
pub use templates::{TemplateBank, FALLBACK_TEMPLATE, NAME_PLACEHOLDER};
