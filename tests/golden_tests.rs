//! Golden tests - fixture-based tests that lock expected behavior
//!
//! These tests use JSON fixtures to verify that classification and full
//! engine responses stay stable. Any change in behavior will cause these
//! tests to fail, signaling a potential breaking change.
//!
//! Run with: cargo test --test golden_tests

use serde::Deserialize;
use std::fs;

// ============================================================================
// CLASSIFICATION GOLDEN TESTS
// ============================================================================

mod classification_golden {
    use super::*;
    use parley::dialogue::Lexicon;
    use parley::types::{Intent, Sentiment, Topic};

    #[derive(Debug, Deserialize)]
    struct TestCase {
        name: String,
        input: String,
        sentiment: Sentiment,
        intent: Intent,
        topics: Vec<Topic>,
    }

    #[derive(Debug, Deserialize)]
    struct Fixture {
        test_cases: Vec<TestCase>,
    }

    #[test]
    fn test_classification_golden() {
        let fixture_path = concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/fixtures/classification.json"
        );
        let content =
            fs::read_to_string(fixture_path).expect("Failed to read classification.json fixture");
        let fixture: Fixture =
            serde_json::from_str(&content).expect("Failed to parse fixture JSON");

        let lexicon = Lexicon::builtin();
        for case in fixture.test_cases {
            let result = lexicon.classify(&case.input);
            assert_eq!(
                result.sentiment, case.sentiment,
                "Case '{}': sentiment mismatch",
                case.name
            );
            assert_eq!(result.intent, case.intent, "Case '{}': intent mismatch", case.name);
            assert_eq!(result.topics, case.topics, "Case '{}': topics mismatch", case.name);
        }
    }
}

// ============================================================================
// ENGINE SCENARIO GOLDEN TESTS
// ============================================================================

mod scenario_golden {
    use super::*;
    use parley::random::FixedSource;
    use parley::types::{ConversationContext, Mood, SuggestedAction, DEFAULT_HISTORY_CAPACITY};
    use parley::{DialogueEngine, EngineConfig};

    #[derive(Debug, Deserialize)]
    struct Expected {
        mood: Mood,
        text: String,
        suggested_actions: Vec<SuggestedAction>,
        follow_up_questions: Vec<String>,
    }

    #[derive(Debug, Deserialize)]
    struct TestCase {
        name: String,
        message: String,
        context: serde_json::Value,
        expected: Expected,
    }

    #[derive(Debug, Deserialize)]
    struct Fixture {
        test_cases: Vec<TestCase>,
    }

    #[test]
    fn test_engine_scenarios_golden() {
        let fixture_path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/scenarios.json");
        let content =
            fs::read_to_string(fixture_path).expect("Failed to read scenarios.json fixture");
        let fixture: Fixture =
            serde_json::from_str(&content).expect("Failed to parse fixture JSON");

        let engine = DialogueEngine::new(EngineConfig::deterministic()).unwrap();

        for case in fixture.test_cases {
            let context = ConversationContext::from_json(
                &case.context.to_string(),
                engine.config().history_capacity,
            )
            .unwrap_or_else(|e| panic!("Case '{}': invalid context: {}", case.name, e));
            let envelope = engine
                .generate_response(&case.message, &context, &mut FixedSource(0.0))
                .unwrap_or_else(|e| panic!("Case '{}': engine failed: {}", case.name, e));

            assert_eq!(envelope.mood, case.expected.mood, "Case '{}': mood", case.name);
            assert_eq!(envelope.text, case.expected.text, "Case '{}': text", case.name);
            assert_eq!(
                envelope.suggested_actions, case.expected.suggested_actions,
                "Case '{}': actions",
                case.name
            );
            assert_eq!(
                envelope.follow_up_questions, case.expected.follow_up_questions,
                "Case '{}': follow-up questions",
                case.name
            );
        }
    }

    #[test]
    fn test_malformed_context_rejected() {
        let missing_personality = r#"{
            "participant_id": "user-9",
            "current_mood": "fun",
            "time_of_day": "night"
        }"#;
        let err = ConversationContext::from_json(missing_personality, DEFAULT_HISTORY_CAPACITY)
            .unwrap_err();
        assert!(err.is_caller_error());

        let unknown_mood = r#"{
            "participant_id": "user-9",
            "current_mood": "grumpy",
            "time_of_day": "night",
            "personality": {
                "name": "Ava", "baseline_mood": "fun", "tone": "dry", "compatibility": 50
            }
        }"#;
        assert!(ConversationContext::from_json(unknown_mood, DEFAULT_HISTORY_CAPACITY).is_err());
    }
}
