//! Dialogue engine: classification through suggestions in one call
//!
//! ```text
//! message ──► Lexicon ──► AffectTracker(history) ──► MoodTransitions
//!                 │                                        │
//!                 └──► ResponseSynthesizer ◄───────────────┘
//!                          │
//!                          ▼
//!                 PersonalityAdapter ──► augment ──► QualityScorer
//!                                                       │
//!                 SuggestionEngine ─────────────────► ResponseEnvelope
//! ```
//!
//! The engine holds only immutable tables and configuration. History and
//! mood come in through [`ConversationContext`] and leave through
//! [`ResponseEnvelope`]; randomness comes from the caller's
//! [`RandomSource`].

use tracing::{debug, instrument};

use super::affect::AffectTracker;
use super::augmenter::augment;
use super::lexicon::Lexicon;
use super::mood::MoodTransitions;
use super::personality::{PersonalityAdapter, TraitChances};
use super::quality::{QualityScorer, ScoringInput};
use super::suggestions::SuggestionEngine;
use super::synthesizer::{ClauseChances, ResponseSynthesizer, SynthesisInput};
use super::templates::TemplateBank;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::random::{system_source, RandomSource};
use crate::types::{ConversationContext, ResponseAnalysis, ResponseEnvelope};

/// Stateless response generator
#[derive(Debug, Clone)]
pub struct DialogueEngine {
    config: EngineConfig,
    lexicon: Lexicon,
    templates: TemplateBank,
    transitions: MoodTransitions,
}

impl Default for DialogueEngine {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            lexicon: Lexicon::default(),
            templates: TemplateBank::builtin(),
            transitions: MoodTransitions::default(),
        }
    }
}

impl DialogueEngine {
    /// Engine with built-in tables and a validated configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn with_lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    pub fn with_templates(mut self, templates: TemplateBank) -> Self {
        self.templates = templates;
        self
    }

    pub fn with_transitions(mut self, transitions: MoodTransitions) -> Self {
        self.transitions = transitions;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Produce a reply to `message` given the conversation so far.
    ///
    /// Fails only when `context` is malformed. Empty messages classify as
    /// neutral/general and get the fallback template.
    #[instrument(skip_all, fields(participant = %context.participant_id, turn = context.turn_count))]
    pub fn generate_response<R>(
        &self,
        message: &str,
        context: &ConversationContext,
        rng: &mut R,
    ) -> Result<ResponseEnvelope>
    where
        R: RandomSource + ?Sized,
    {
        context.validate(self.config.history_capacity)?;
        let cfg = &self.config;

        let classification = self.lexicon.classify(message);
        debug!(
            sentiment = %classification.sentiment,
            intent = %classification.intent,
            topics = ?classification.topics,
            "Message classified"
        );

        let affect = AffectTracker::new(&self.lexicon, cfg.affect_window).track(&context.history);

        let (mood, rule) = self.transitions.next(
            classification.sentiment,
            classification.intent,
            context.current_mood,
            cfg.mood_shift_probability,
            rng,
        );

        let synthesis = ResponseSynthesizer::new(
            &self.templates,
            ClauseChances {
                time_of_day: cfg.time_clause_probability,
                topic: cfg.topic_clause_probability,
            },
        )
        .synthesize(
            &SynthesisInput {
                intent: classification.intent,
                sentiment: classification.sentiment,
                mood,
                topics: &classification.topics,
                user_name: context.user_name(),
                time_of_day: context.time_of_day,
            },
            rng,
        );

        let adapted = PersonalityAdapter::new(
            &context.personality,
            TraitChances {
                romantic: cfg.romantic_probability,
                funny: cfg.funny_probability,
                attentive: cfg.attentive_probability,
            },
        )
        .adapt(&synthesis.text, rng);

        let text = augment(
            &adapted,
            &affect,
            classification.sentiment,
            cfg.connection_rapport_threshold,
        );

        let quality = QualityScorer::new(cfg.long_history_turns).score(&ScoringInput {
            history_len: context.history.len(),
            topics: &classification.topics,
            sentiment: classification.sentiment,
            mood,
            traits: &context.personality.traits,
            text: &text,
        });

        let suggestions = SuggestionEngine::new(cfg.max_suggestions).suggest(&classification);

        debug!(
            from = %context.current_mood,
            to = %mood,
            ?rule,
            fallback = synthesis.used_fallback,
            "Response generated"
        );

        Ok(ResponseEnvelope {
            text,
            mood,
            quality,
            suggested_actions: suggestions.actions,
            follow_up_questions: suggestions.follow_up_questions,
            analysis: ResponseAnalysis {
                sentiment: classification.sentiment,
                intent: classification.intent,
                topics: classification.topics,
                previous_mood: context.current_mood,
                affect,
            },
        })
    }

    /// Same as [`generate_response`](Self::generate_response) with a fresh
    /// entropy-seeded generator
    pub fn generate_response_with_system_rng(
        &self,
        message: &str,
        context: &ConversationContext,
    ) -> Result<ResponseEnvelope> {
        let mut rng = system_source();
        self.generate_response(message, context, &mut rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::templates::FALLBACK_TEMPLATE;
    use crate::error::ParleyError;
    use crate::random::FixedSource;
    use crate::types::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn context(mood: Mood, traits: &[&str]) -> ConversationContext {
        let personality = PersonalityProfile::new("Ava", Mood::Playful).with_traits(traits.iter().copied());
        ConversationContext::new("user-1", personality, TimeOfDay::Evening)
            .with_mood(mood)
            .with_user_profile(UserProfile {
                name: Some("Sam".to_string()),
                ..Default::default()
            })
    }

    fn quiet_engine() -> DialogueEngine {
        DialogueEngine::new(EngineConfig::deterministic()).unwrap()
    }

    #[test]
    fn test_sad_message_turns_supportive() {
        let engine = DialogueEngine::default();
        let ctx = context(Mood::Flirty, &[]);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let env = engine
                .generate_response("I'm so sad and tired today", &ctx, &mut rng)
                .unwrap();
            assert_eq!(env.analysis.sentiment, Sentiment::Negative);
            assert_eq!(env.analysis.intent, Intent::Emotional);
            assert_eq!(env.mood, Mood::Supportive);
            assert!(!env.text.is_empty());
            let supportive = engine
                .templates
                .get(Intent::Emotional, Sentiment::Negative, Mood::Supportive)
                .unwrap();
            assert!(supportive
                .iter()
                .any(|t| env.text.starts_with(&t.replace("{name}", "Sam"))));
        }
    }

    #[test]
    fn test_empty_message_falls_back() {
        let engine = quiet_engine();
        let ctx = context(Mood::Romantic, &[]);
        let env = engine.generate_response("", &ctx, &mut FixedSource(0.0)).unwrap();
        assert_eq!(env.analysis.sentiment, Sentiment::Neutral);
        assert_eq!(env.analysis.intent, Intent::General);
        assert!(env.analysis.topics.is_empty());
        assert_eq!(env.text, FALLBACK_TEMPLATE);
        assert!(env.suggested_actions.is_empty());
        assert!(env.follow_up_questions.is_empty());
    }

    #[test]
    fn test_whitespace_message_with_default_engine() {
        let engine = DialogueEngine::default();
        let ctx = context(Mood::Romantic, &[]);
        let env = engine
            .generate_response("   \n\t", &ctx, &mut FixedSource(0.99))
            .unwrap();
        assert_eq!(env.text, FALLBACK_TEMPLATE);
        assert_eq!(env.mood, Mood::Romantic);
    }

    #[test]
    fn test_playful_question_turns_thoughtful() {
        let engine = DialogueEngine::default();
        let ctx = context(Mood::Playful, &[]);
        for draw in [0.0, 0.5, 0.99] {
            let env = engine
                .generate_response("What's your favorite song?", &ctx, &mut FixedSource(draw))
                .unwrap();
            assert_eq!(env.analysis.intent, Intent::Question);
            assert_eq!(env.mood, Mood::Thoughtful);
            assert_eq!(env.analysis.previous_mood, Mood::Playful);
            assert!(env.mood_changed());
            assert_eq!(
                env.suggested_actions,
                vec![SuggestedAction::RecommendSong, SuggestedAction::AskFavoriteArtist]
            );
            assert_eq!(env.follow_up_questions.len(), 2);
        }
    }

    #[test]
    fn test_same_seed_same_envelope() {
        let engine = DialogueEngine::default();
        let ctx = context(Mood::Fun, &["witty", "romantic", "funny", "attentive"]);
        let message = "I love my job but my boss is stressing me out";
        let a = engine
            .generate_response(message, &ctx, &mut StdRng::seed_from_u64(99))
            .unwrap();
        let b = engine
            .generate_response(message, &ctx, &mut StdRng::seed_from_u64(99))
            .unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_history_not_mutated() {
        let engine = DialogueEngine::default();
        let now = Utc::now();
        let ctx = context(Mood::Playful, &[]).with_history(vec![
            ConversationTurn::user("hey there", now),
            ConversationTurn::agent("hi!", now),
        ]);
        let before = ctx.clone();
        engine
            .generate_response("good morning", &ctx, &mut StdRng::seed_from_u64(1))
            .unwrap();
        assert_eq!(ctx, before);
    }

    #[test]
    fn test_invalid_context_fails_fast() {
        let engine = DialogueEngine::default();
        let mut ctx = context(Mood::Playful, &[]);
        ctx.personality.name = " ".to_string();
        let err = engine
            .generate_response("hello", &ctx, &mut FixedSource(0.0))
            .unwrap_err();
        assert!(matches!(err, ParleyError::Validation(_)));
    }

    #[test]
    fn test_history_over_capacity_rejected() {
        let engine = DialogueEngine::new(EngineConfig {
            history_capacity: 2,
            ..EngineConfig::default()
        })
        .unwrap();
        let now = Utc::now();
        let ctx = context(Mood::Playful, &[]).with_history(vec![
            ConversationTurn::user("a", now),
            ConversationTurn::agent("b", now),
            ConversationTurn::user("c", now),
        ]);
        assert!(engine.generate_response("hi", &ctx, &mut FixedSource(0.0)).is_err());
    }

    #[test]
    fn test_suggestion_cap_above_two_rejected() {
        let err = DialogueEngine::new(EngineConfig {
            max_suggestions: 5,
            ..EngineConfig::deterministic()
        })
        .unwrap_err();
        assert!(matches!(err, ParleyError::Config(_)));
    }

    #[test]
    fn test_many_sources_still_cap_suggestions() {
        let engine = quiet_engine();
        let ctx = context(Mood::Romantic, &[]);
        let env = engine
            .generate_response(
                "What about my boss and my girlfriend and my music? Let's play a game",
                &ctx,
                &mut FixedSource(0.0),
            )
            .unwrap();
        assert_eq!(env.follow_up_questions.len(), 2);
        assert!(env.suggested_actions.len() <= 2);
    }

    #[test]
    fn test_long_positive_history_earns_bonuses() {
        let engine = quiet_engine();
        let now = Utc::now();
        let history = (0..6)
            .map(|i| {
                if i % 2 == 0 {
                    ConversationTurn::user("this is great, I love it", now)
                } else {
                    ConversationTurn::agent("glad to hear", now)
                }
            })
            .collect();
        let ctx = context(Mood::Playful, &["witty"]).with_history(history);
        let env = engine
            .generate_response("I had an amazing day at work!", &ctx, &mut FixedSource(0.0))
            .unwrap();

        assert_eq!(env.analysis.affect.user_mood, Sentiment::Positive);
        assert!((env.quality.context_awareness - 1.0).abs() < 1e-6);
        assert!(env.text.contains("Your good vibes are contagious!"));
        // 2 positive user turns + 5 windowed turns
        assert!(env.analysis.affect.rapport > 0.7);
        assert!(env.text.contains("I feel like we're really connecting."));
    }

    #[test]
    fn test_trait_name_in_text_raises_personality_match() {
        let engine = quiet_engine().with_templates(
            TemplateBank::empty().with_fallback("You bring out my playful side."),
        );
        let ctx = context(Mood::Romantic, &["Playful"]);
        let env = engine.generate_response("", &ctx, &mut FixedSource(0.0)).unwrap();
        assert!((env.quality.personality_match - 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_name_only_fallback_without_name_is_not_empty() {
        let engine = quiet_engine().with_templates(TemplateBank::empty().with_fallback("{name}"));
        let mut ctx = context(Mood::Romantic, &[]);
        ctx.user_profile = None;
        let env = engine.generate_response("", &ctx, &mut FixedSource(0.0)).unwrap();
        assert_eq!(env.text, FALLBACK_TEMPLATE);
    }

    #[test]
    fn test_record_exchange_updates_context() {
        let engine = DialogueEngine::default();
        let mut ctx = context(Mood::Flirty, &[]);
        let now = Utc::now();
        for _ in 0..15 {
            let env = engine
                .generate_response("I'm so sad and tired today", &ctx, &mut StdRng::seed_from_u64(5))
                .unwrap();
            ctx.record_exchange("I'm so sad and tired today", &env, now, engine.config().history_capacity);
        }
        assert_eq!(ctx.turn_count, 15);
        assert_eq!(ctx.current_mood, Mood::Supportive);
        assert_eq!(ctx.history.len(), engine.config().history_capacity);
        assert_eq!(ctx.history[0].role, Role::User);
        assert_eq!(ctx.history[0].sentiment, Some(Sentiment::Negative));
        assert_eq!(ctx.last_interaction, Some(now));
        assert!(ctx.validate(engine.config().history_capacity).is_ok());
    }

    #[test]
    fn test_saved_context_reloads_at_configured_capacity() {
        let engine = DialogueEngine::new(EngineConfig {
            history_capacity: 50,
            ..EngineConfig::default()
        })
        .unwrap();
        let capacity = engine.config().history_capacity;
        let mut ctx = context(Mood::Playful, &[]);
        let now = Utc::now();
        for seed in 0..12 {
            let env = engine
                .generate_response("tell me about your day", &ctx, &mut StdRng::seed_from_u64(seed))
                .unwrap();
            ctx.record_exchange("tell me about your day", &env, now, capacity);
        }
        assert_eq!(ctx.history.len(), 24);

        let saved = serde_json::to_string(&ctx).unwrap();
        let reloaded = ConversationContext::from_json(&saved, capacity).unwrap();
        assert_eq!(reloaded, ctx);
        assert!(engine
            .generate_response("still there?", &reloaded, &mut FixedSource(0.0))
            .is_ok());
    }

    #[test]
    fn test_system_rng_entry_point() {
        let engine = DialogueEngine::default();
        let ctx = context(Mood::Playful, &["witty"]);
        let env = engine
            .generate_response_with_system_rng("tell me a joke", &ctx)
            .unwrap();
        assert!(!env.text.is_empty());
        assert!(env.suggested_actions.len() <= 2);
    }

    #[test]
    fn test_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DialogueEngine>();
    }
}
