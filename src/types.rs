//! Core types for Parley

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::dialogue::{AffectState, QualityMetrics};
use crate::error::{ParleyError, Result};

/// Default number of turns a context keeps before evicting the oldest
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

/// Highest compatibility score a profile may declare
pub const MAX_COMPATIBILITY: f32 = 100.0;

macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Lowercase label used in logs, JSON and template keys
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($label => Ok($name::$variant),)+
                    _ => Err(format!("Unknown {}: {}", $kind, s)),
                }
            }
        }
    };
}

labelled_enum! {
    /// Polarity of a single message
    Sentiment, "sentiment" {
        Positive => "positive",
        Negative => "negative",
        Neutral => "neutral",
    }
}

labelled_enum! {
    /// Communicative purpose of a user message, in classifier priority order
    Intent, "intent" {
        Greeting => "greeting",
        Question => "question",
        Emotional => "emotional",
        Compliment => "compliment",
        Request => "request",
        Statement => "statement",
        Fun => "fun",
        /// Nothing matched
        General => "general",
    }
}

labelled_enum! {
    /// Subject-matter category detected in a message
    Topic, "topic" {
        Work => "work",
        Relationships => "relationships",
        Hobbies => "hobbies",
        Emotions => "emotions",
        Future => "future",
        Past => "past",
    }
}

labelled_enum! {
    /// The agent's current affective stance
    Mood, "mood" {
        Playful => "playful",
        Romantic => "romantic",
        Supportive => "supportive",
        Thoughtful => "thoughtful",
        Fun => "fun",
        Flirty => "flirty",
    }
}

labelled_enum! {
    /// Coarse time-of-day bucket supplied by the caller
    TimeOfDay, "time of day" {
        Morning => "morning",
        Afternoon => "afternoon",
        Evening => "evening",
        Night => "night",
    }
}

labelled_enum! {
    /// Follow-up action tag for suggestion chips
    SuggestedAction, "suggested action" {
        SendCompliment => "send_compliment",
        OfferSupport => "offer_support",
        ShareJoke => "share_joke",
        PlayGame => "play_game",
        RecommendSong => "recommend_song",
        AskFavoriteArtist => "ask_favorite_artist",
    }
}

labelled_enum! {
    /// Author of a conversation turn
    Role, "role" {
        User => "user",
        Agent => "agent",
    }
}

impl TimeOfDay {
    /// Bucket a local wall-clock hour (0-23)
    pub fn from_hour(hour: u32) -> Self {
        match hour % 24 {
            5..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=21 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    /// Bucket a timestamp by its UTC hour
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self::from_hour(at.hour())
    }
}

/// One message in the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// Sentiment computed when the turn was recorded, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            timestamp,
            sentiment: None,
        }
    }

    pub fn agent(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role: Role::Agent,
            text: text.into(),
            timestamp,
            sentiment: None,
        }
    }

    /// Attach a cached sentiment
    pub fn with_sentiment(mut self, sentiment: Sentiment) -> Self {
        self.sentiment = Some(sentiment);
        self
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// Snapshot of what the caller knows about the user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub interests: Vec<String>,
    /// Self-reported mood, free text
    #[serde(default)]
    pub mood: Option<String>,
}

impl UserProfile {
    /// Declared name, ignoring blank values
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Static descriptor of the agent's persona, loaded once per session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalityProfile {
    pub name: String,
    /// Trait multiset, e.g. "witty", "romantic", "attentive", "funny"
    #[serde(default)]
    pub traits: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    pub baseline_mood: Mood,
    pub tone: String,
    /// Declared compatibility score (0-100)
    pub compatibility: f32,
}

impl PersonalityProfile {
    pub fn new(name: impl Into<String>, baseline_mood: Mood) -> Self {
        Self {
            name: name.into(),
            traits: Vec::new(),
            interests: Vec::new(),
            baseline_mood,
            tone: "warm".to_string(),
            compatibility: 80.0,
        }
    }

    pub fn with_traits<I, S>(mut self, traits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.traits = traits.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }

    /// Case-insensitive trait membership
    pub fn has_trait(&self, name: &str) -> bool {
        self.traits.iter().any(|t| t.trim().eq_ignore_ascii_case(name))
    }

    /// Check required structure
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ParleyError::Validation(
                "personality name must not be empty".to_string(),
            ));
        }
        if self.tone.trim().is_empty() {
            return Err(ParleyError::Validation(
                "personality tone must not be empty".to_string(),
            ));
        }
        if !self.compatibility.is_finite()
            || !(0.0..=MAX_COMPATIBILITY).contains(&self.compatibility)
        {
            return Err(ParleyError::Validation(format!(
                "personality compatibility must be within 0-{}, got {}",
                MAX_COMPATIBILITY, self.compatibility
            )));
        }
        if self.traits.iter().any(|t| t.trim().is_empty()) {
            return Err(ParleyError::Validation(
                "personality traits must not contain blank entries".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a profile document
    pub fn from_json(json: &str) -> Result<Self> {
        let profile: Self = serde_json::from_str(json)
            .map_err(|e| ParleyError::Validation(format!("invalid personality profile: {}", e)))?;
        profile.validate()?;
        Ok(profile)
    }
}

/// Everything the engine knows about the conversation so far
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationContext {
    pub participant_id: String,
    /// Recent turns, oldest first
    #[serde(default)]
    pub history: Vec<ConversationTurn>,
    #[serde(default)]
    pub user_profile: Option<UserProfile>,
    pub current_mood: Mood,
    pub personality: PersonalityProfile,
    pub time_of_day: TimeOfDay,
    #[serde(default)]
    pub turn_count: u32,
    #[serde(default)]
    pub last_interaction: Option<DateTime<Utc>>,
}

impl ConversationContext {
    /// Start a session in the personality's baseline mood
    pub fn new(
        participant_id: impl Into<String>,
        personality: PersonalityProfile,
        time_of_day: TimeOfDay,
    ) -> Self {
        Self {
            participant_id: participant_id.into(),
            history: Vec::new(),
            user_profile: None,
            current_mood: personality.baseline_mood,
            personality,
            time_of_day,
            turn_count: 0,
            last_interaction: None,
        }
    }

    pub fn with_user_profile(mut self, profile: UserProfile) -> Self {
        self.user_profile = Some(profile);
        self
    }

    pub fn with_mood(mut self, mood: Mood) -> Self {
        self.current_mood = mood;
        self
    }

    pub fn with_history(mut self, history: Vec<ConversationTurn>) -> Self {
        self.history = history;
        self
    }

    /// User's declared name, if any
    pub fn user_name(&self) -> Option<&str> {
        self.user_profile.as_ref().and_then(UserProfile::display_name)
    }

    /// Check required structure against a history capacity
    pub fn validate(&self, history_capacity: usize) -> Result<()> {
        if self.participant_id.trim().is_empty() {
            return Err(ParleyError::Validation(
                "participant_id must not be empty".to_string(),
            ));
        }
        self.personality.validate()?;
        if self.history.len() > history_capacity {
            return Err(ParleyError::Validation(format!(
                "history holds {} turns, capacity is {}",
                self.history.len(),
                history_capacity
            )));
        }
        Ok(())
    }

    /// Parse a context document and validate it against `history_capacity`
    pub fn from_json(json: &str, history_capacity: usize) -> Result<Self> {
        let context: Self = serde_json::from_str(json)
            .map_err(|e| ParleyError::Validation(format!("invalid conversation context: {}", e)))?;
        context.validate(history_capacity)?;
        Ok(context)
    }

    /// Record one user message and the engine's reply.
    ///
    /// Caller-side bookkeeping: appends both turns, adopts the reply's mood
    /// and drops the oldest turns beyond `history_capacity`.
    pub fn record_exchange(
        &mut self,
        user_text: &str,
        envelope: &ResponseEnvelope,
        now: DateTime<Utc>,
        history_capacity: usize,
    ) {
        self.history
            .push(ConversationTurn::user(user_text, now).with_sentiment(envelope.analysis.sentiment));
        self.history.push(ConversationTurn::agent(&envelope.text, now));
        if self.history.len() > history_capacity {
            let excess = self.history.len() - history_capacity;
            self.history.drain(..excess);
        }
        self.current_mood = envelope.mood;
        self.turn_count = self.turn_count.saturating_add(1);
        self.last_interaction = Some(now);
    }
}

/// Classifier and tracker outputs for one call, kept for analytics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseAnalysis {
    pub sentiment: Sentiment,
    pub intent: Intent,
    pub topics: Vec<Topic>,
    /// Mood before this call
    pub previous_mood: Mood,
    pub affect: AffectState,
}

/// Complete output of one engine invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub text: String,
    /// Mood after this call
    pub mood: Mood,
    #[serde(flatten)]
    pub quality: QualityMetrics,
    pub suggested_actions: Vec<SuggestedAction>,
    pub follow_up_questions: Vec<String>,
    pub analysis: ResponseAnalysis,
}

impl ResponseEnvelope {
    /// Whether the mood changed during this call
    pub fn mood_changed(&self) -> bool {
        self.mood != self.analysis.previous_mood
    }
}
