//! Lexical classification: sentiment, intent and topics
//!
//! Keyword tables live in an immutable [`Lexicon`]. Text is lowercased and
//! split into word tokens (apostrophes stay inside words, so "i'm" is one
//! token). Single-word keywords match whole tokens and multi-word keywords
//! match consecutive tokens, so "this" never matches "hi".
//!
//! ## Invariants
//!
//! - Classification never panics and is deterministic
//! - Empty/whitespace input yields `neutral`, `general` and no topics
//! - Topic output is duplicate-free and in declared category order

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::{Intent, Sentiment, Topic};

/// Score added per matched sentiment keyword
const KEYWORD_WEIGHT: i32 = 2;

/// Smileys, hearts and grinning faces
static POSITIVE_EMOJI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:[:;=]-?[)D\]]|<3|[\x{1F600}-\x{1F60D}\x{1F642}\x{1F970}\x{1F618}\x{2764}\x{1F495}\x{1F496}])")
        .expect("valid regex")
});

static BUILTIN: Lazy<Lexicon> = Lazy::new(Lexicon::default);

/// Lowercased word tokens of a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens(Vec<String>);

impl Tokens {
    pub fn new(text: &str) -> Self {
        let lowered = text.to_lowercase().replace('\u{2019}', "'");
        let tokens = lowered
            .split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .map(|t| t.trim_matches('\''))
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect();
        Self(tokens)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of occurrences of a (possibly multi-word) keyword
    pub fn count(&self, keyword: &str) -> usize {
        let parts: Vec<&str> = keyword.split_whitespace().collect();
        if parts.is_empty() || parts.len() > self.0.len() {
            return 0;
        }
        self.0
            .windows(parts.len())
            .filter(|window| window.iter().zip(&parts).all(|(t, p)| t == p))
            .count()
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.count(keyword) > 0
    }

    pub fn contains_any(&self, keywords: &[String]) -> bool {
        keywords.iter().any(|k| self.contains(k))
    }
}

/// Result of classifying one message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub sentiment: Sentiment,
    pub intent: Intent,
    pub topics: Vec<Topic>,
    /// Mentions music (songs, artists, playlists)
    pub mentions_music: bool,
}

/// Keyword tables for the classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lexicon {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    /// Intent keyword sets in priority order
    pub intents: Vec<(Intent, Vec<String>)>,
    /// Topic keyword sets in output order
    pub topics: Vec<(Topic, Vec<String>)>,
    pub music: Vec<String>,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            positive: words(&[
                "love", "happy", "great", "good", "amazing", "awesome", "wonderful", "excited",
                "fantastic", "beautiful", "glad", "nice", "perfect", "lovely", "joy", "enjoy",
                "enjoyed", "thanks", "thank", "cute", "sweet", "best", "yay", "haha", "lol",
                "fun", "cool", "proud",
            ]),
            negative: words(&[
                "sad", "tired", "angry", "upset", "bad", "terrible", "awful", "hate", "lonely",
                "depressed", "stressed", "anxious", "worried", "hurt", "bored", "annoyed",
                "frustrated", "exhausted", "cry", "crying", "sick", "worst", "scared", "afraid",
                "miserable", "lost",
            ]),
            intents: vec![
                (
                    Intent::Greeting,
                    words(&[
                        "hi", "hello", "hey", "hiya", "howdy", "yo", "greetings",
                        "good morning", "good afternoon", "good evening",
                    ]),
                ),
                (
                    Intent::Question,
                    words(&[
                        "what", "what's", "why", "how", "how's", "when", "where", "where's",
                        "who", "who's", "which", "do you", "are you", "is it",
                    ]),
                ),
                (
                    Intent::Emotional,
                    words(&[
                        "feel", "feeling", "feelings", "sad", "happy", "lonely", "depressed",
                        "anxious", "stressed", "upset", "tired", "cry", "crying", "hurt",
                        "scared", "afraid", "worried", "angry", "emotional", "miss you",
                    ]),
                ),
                (
                    Intent::Compliment,
                    words(&[
                        "beautiful", "pretty", "handsome", "cute", "gorgeous", "smart",
                        "amazing", "sweet", "lovely", "charming", "attractive", "you're so",
                        "you are so",
                    ]),
                ),
                (
                    Intent::Request,
                    words(&[
                        "please", "can you", "could you", "would you", "will you", "help me",
                        "i need", "i want",
                    ]),
                ),
                (
                    Intent::Statement,
                    words(&[
                        "i am", "i'm", "i think", "i believe", "i was", "i have", "i've",
                        "i did", "my",
                    ]),
                ),
                (
                    Intent::Fun,
                    words(&[
                        "joke", "jokes", "funny", "game", "games", "play", "fun", "laugh",
                        "lol", "haha", "silly", "riddle",
                    ]),
                ),
            ],
            topics: vec![
                (
                    Topic::Work,
                    words(&[
                        "work", "working", "job", "boss", "office", "career", "meeting",
                        "project", "colleague", "coworker", "deadline", "salary", "interview",
                    ]),
                ),
                (
                    Topic::Relationships,
                    words(&[
                        "boyfriend", "girlfriend", "partner", "date", "dating", "relationship",
                        "friend", "friends", "family", "husband", "wife", "ex", "crush",
                        "marriage", "parents",
                    ]),
                ),
                (
                    Topic::Hobbies,
                    words(&[
                        "hobby", "hobbies", "music", "song", "songs", "movie", "movies", "book",
                        "books", "reading", "gaming", "sport", "sports", "travel", "cooking",
                        "painting", "guitar", "dance", "dancing", "hiking",
                    ]),
                ),
                (
                    Topic::Emotions,
                    words(&[
                        "feel", "feeling", "feelings", "sad", "happy", "lonely", "anxious",
                        "stressed", "depressed", "emotion", "emotions", "mood", "upset",
                        "angry", "tired",
                    ]),
                ),
                (
                    Topic::Future,
                    words(&[
                        "tomorrow", "future", "plan", "plans", "someday", "next week",
                        "next year", "dream", "dreams", "goal", "goals", "hope",
                    ]),
                ),
                (
                    Topic::Past,
                    words(&[
                        "yesterday", "remember", "ago", "childhood", "used to", "last week",
                        "last year", "memory", "memories", "back then",
                    ]),
                ),
            ],
            music: words(&[
                "music", "song", "songs", "singer", "band", "bands", "artist", "artists",
                "album", "playlist", "concert", "listen", "listening",
            ]),
        }
    }
}

impl Lexicon {
    /// The built-in tables
    pub fn builtin() -> &'static Lexicon {
        &BUILTIN
    }

    /// Weighted keyword sentiment; ties and empty text are neutral
    pub fn sentiment(&self, text: &str) -> Sentiment {
        self.sentiment_of(&Tokens::new(text), text)
    }

    fn sentiment_of(&self, tokens: &Tokens, raw: &str) -> Sentiment {
        let score = |keywords: &[String]| -> i32 {
            keywords
                .iter()
                .map(|k| tokens.count(k) as i32 * KEYWORD_WEIGHT)
                .sum()
        };
        let mut positive = score(&self.positive);
        let mut negative = score(&self.negative);

        if raw.contains('!') || POSITIVE_EMOJI.is_match(raw) {
            positive += 1;
        }
        if raw.contains('?') && negative > 0 {
            negative -= 1;
        }

        match positive.cmp(&negative) {
            std::cmp::Ordering::Greater => Sentiment::Positive,
            std::cmp::Ordering::Less => Sentiment::Negative,
            std::cmp::Ordering::Equal => Sentiment::Neutral,
        }
    }

    /// First intent whose keyword set matches, else `general`
    pub fn intent(&self, text: &str) -> Intent {
        self.intent_of(&Tokens::new(text), text)
    }

    fn intent_of(&self, tokens: &Tokens, raw: &str) -> Intent {
        self.intents
            .iter()
            .find(|(intent, keywords)| {
                (*intent == Intent::Question && raw.contains('?')) || tokens.contains_any(keywords)
            })
            .map(|(intent, _)| *intent)
            .unwrap_or(Intent::General)
    }

    /// Every topic whose keyword set matches, in table order
    pub fn topics(&self, text: &str) -> Vec<Topic> {
        self.topics_of(&Tokens::new(text))
    }

    fn topics_of(&self, tokens: &Tokens) -> Vec<Topic> {
        let mut found = Vec::new();
        for (topic, keywords) in &self.topics {
            if !found.contains(topic) && tokens.contains_any(keywords) {
                found.push(*topic);
            }
        }
        found
    }

    pub fn mentions_music(&self, text: &str) -> bool {
        Tokens::new(text).contains_any(&self.music)
    }

    /// Run every classifier over one tokenization
    pub fn classify(&self, text: &str) -> Classification {
        let tokens = Tokens::new(text);
        Classification {
            sentiment: self.sentiment_of(&tokens, text),
            intent: self.intent_of(&tokens, text),
            topics: self.topics_of(&tokens),
            mentions_music: tokens.contains_any(&self.music),
        }
    }
}

/// Sentiment using the built-in lexicon
pub fn sentiment(text: &str) -> Sentiment {
    Lexicon::builtin().sentiment(text)
}

/// Intent using the built-in lexicon
pub fn intent(text: &str) -> Intent {
    Lexicon::builtin().intent(text)
}

/// Topics using the built-in lexicon
pub fn topics(text: &str) -> Vec<Topic> {
    Lexicon::builtin().topics(text)
}
