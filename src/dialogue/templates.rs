//! Template bank keyed by (intent, sentiment, mood)

use std::collections::HashMap;

use crate::types::{Intent, Mood, Sentiment, TimeOfDay, Topic};

/// Token replaced with the user's name during synthesis
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Used for every (intent, sentiment, mood) cell the bank does not cover
pub const FALLBACK_TEMPLATE: &str = "I hear you. Tell me more about what's on your mind.";

type CellKey = (Intent, Sentiment, Mood);

/// Reply templates plus the clause tables appended after selection
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateBank {
    cells: HashMap<CellKey, Vec<String>>,
    fallback: String,
    time_clauses: HashMap<TimeOfDay, String>,
    topic_clauses: HashMap<Topic, String>,
}

impl Default for TemplateBank {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TemplateBank {
    /// Bank with no cells; every lookup falls back
    pub fn empty() -> Self {
        Self {
            cells: HashMap::new(),
            fallback: FALLBACK_TEMPLATE.to_string(),
            time_clauses: TimeOfDay::ALL
                .iter()
                .map(|t| (*t, default_time_clause(*t).to_string()))
                .collect(),
            topic_clauses: Topic::ALL
                .iter()
                .map(|t| (*t, default_topic_clause(*t).to_string()))
                .collect(),
        }
    }

    /// The built-in bank
    pub fn builtin() -> Self {
        use Intent as I;
        use Mood as M;
        use Sentiment as S;

        let mut bank = Self::empty();
        let cells: &[(CellKey, &[&str])] = &[
            // Greetings
            ((I::Greeting, S::Positive, M::Playful), &[
                "Well hello there, {name}! You just made my day a little brighter.",
                "Hey {name}! I was hoping you'd show up.",
            ]),
            ((I::Greeting, S::Positive, M::Flirty), &[
                "Hey you! Were you thinking about me? Because I was thinking about you.",
            ]),
            ((I::Greeting, S::Neutral, M::Playful), &[
                "Hey {name}! What kind of trouble are we getting into today?",
            ]),
            ((I::Greeting, S::Neutral, M::Romantic), &[
                "Hi {name}, it's really good to see you again.",
            ]),
            ((I::Greeting, S::Neutral, M::Thoughtful), &[
                "Hello {name}. How has your day been treating you so far?",
            ]),
            ((I::Greeting, S::Neutral, M::Supportive), &[
                "Hi {name}, I'm glad you're here. How are you holding up?",
            ]),
            ((I::Greeting, S::Neutral, M::Fun), &["Heyyy! Ready for some fun?"]),
            ((I::Greeting, S::Negative, M::Supportive), &[
                "Hi {name}. It sounds like things are rough, and I'm right here with you.",
            ]),
            // Questions
            ((I::Question, S::Neutral, M::Thoughtful), &[
                "That's a really good question. Let me think about it for a second.",
                "Hmm, I like questions like that. Honestly, I think it depends on the moment.",
            ]),
            ((I::Question, S::Positive, M::Thoughtful), &[
                "What a lovely thing to ask. I've actually thought about this before.",
            ]),
            ((I::Question, S::Negative, M::Thoughtful), &[
                "That's a heavy question, and it deserves a careful answer.",
            ]),
            ((I::Question, S::Neutral, M::Playful), &[
                "Ooh, a question! Guess first and I'll tell you if you're right.",
            ]),
            ((I::Question, S::Neutral, M::Flirty), &[
                "You want to know my secrets already? Ask me nicely.",
            ]),
            ((I::Question, S::Neutral, M::Romantic), &[
                "I like that you want to know me better. Here's the truth.",
            ]),
            ((I::Question, S::Neutral, M::Supportive), &[
                "Of course, ask me anything. I'm happy to help you figure it out.",
            ]),
            ((I::Question, S::Neutral, M::Fun), &[
                "Quiz time! I'll answer, but you owe me a question back.",
            ]),
            // Emotional
            ((I::Emotional, S::Negative, M::Supportive), &[
                "I'm so sorry you're feeling this way, {name}. I'm here for you.",
                "That sounds really hard. Take a breath, I'm right here with you.",
                "You don't have to carry this alone. Tell me what's weighing on you.",
            ]),
            ((I::Emotional, S::Positive, M::Supportive), &[
                "I love hearing you feel this way. You deserve every bit of it.",
            ]),
            ((I::Emotional, S::Positive, M::Playful), &["Look at you, glowing! Tell me everything."]),
            ((I::Emotional, S::Positive, M::Romantic), &[
                "Your happiness is my favorite thing, {name}.",
            ]),
            ((I::Emotional, S::Neutral, M::Thoughtful), &[
                "Feelings can be complicated. Want to talk through it together?",
            ]),
            ((I::Emotional, S::Neutral, M::Supportive), &[
                "Whatever you're feeling is valid. I'm listening.",
            ]),
            // Compliments
            ((I::Compliment, S::Positive, M::Flirty), &[
                "Stop it, you're making me blush! You're not so bad yourself.",
                "Careful, flattery like that works on me.",
            ]),
            ((I::Compliment, S::Positive, M::Romantic), &[
                "That's so sweet of you, {name}. You make me feel special.",
            ]),
            ((I::Compliment, S::Positive, M::Playful), &["Flattery will get you everywhere! Keep going."]),
            ((I::Compliment, S::Neutral, M::Flirty), &["Oh really? Tell me more about what you like."]),
            ((I::Compliment, S::Neutral, M::Romantic), &["Hearing that from you means a lot to me."]),
            // Requests
            ((I::Request, S::Neutral, M::Supportive), &["Of course, I'd be glad to help with that."]),
            ((I::Request, S::Neutral, M::Playful), &["Your wish is my command! Well, most of the time."]),
            ((I::Request, S::Neutral, M::Thoughtful), &["Let me see what I can do for you."]),
            ((I::Request, S::Positive, M::Fun), &["Absolutely! This is going to be fun."]),
            // Statements
            ((I::Statement, S::Neutral, M::Thoughtful), &[
                "That's interesting. What made you think of that?",
            ]),
            ((I::Statement, S::Neutral, M::Playful), &[
                "Noted! Filing that under fascinating facts about {name}.",
            ]),
            ((I::Statement, S::Positive, M::Playful), &["I love that for you! Tell me more."]),
            ((I::Statement, S::Negative, M::Supportive), &[
                "That sounds frustrating. I'm here if you want to vent.",
            ]),
            ((I::Statement, S::Positive, M::Romantic), &[
                "I could listen to you talk about this all day.",
            ]),
            ((I::Statement, S::Neutral, M::Supportive), &[
                "Thanks for sharing that with me. How do you feel about it?",
            ]),
            // Fun
            ((I::Fun, S::Positive, M::Fun), &[
                "Yes! Let's have some fun. I've got a joke ready if you want it.",
                "Game on! Loser has to tell an embarrassing story.",
            ]),
            ((I::Fun, S::Neutral, M::Fun), &["Okay, fun mode activated. What are we playing?"]),
            ((I::Fun, S::Neutral, M::Playful), &["You want fun? I'm basically made of fun."]),
            ((I::Fun, S::Neutral, M::Flirty), &["A game, huh? I like where this is going."]),
            // General
            ((I::General, S::Positive, M::Playful), &["I like your energy today! Keep it coming."]),
            ((I::General, S::Positive, M::Romantic), &[
                "Every conversation with you feels a little special.",
            ]),
            ((I::General, S::Negative, M::Supportive), &[
                "I can tell something's off. I'm here whenever you want to talk.",
            ]),
        ];

        for (key, templates) in cells {
            bank.insert(*key, templates.iter().map(|t| t.to_string()));
        }
        bank
    }

    /// Add templates to a cell
    pub fn insert<I, S>(&mut self, key: (Intent, Sentiment, Mood), templates: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entry = self.cells.entry(key).or_default();
        entry.extend(templates.into_iter().map(Into::into).filter(|t: &String| !t.trim().is_empty()));
        if entry.is_empty() {
            self.cells.remove(&key);
        }
    }

    /// Replace the fallback; blank values are ignored
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        let fallback = fallback.into();
        if !fallback.trim().is_empty() {
            self.fallback = fallback;
        }
        self
    }

    pub fn with_time_clause(mut self, time: TimeOfDay, clause: impl Into<String>) -> Self {
        self.time_clauses.insert(time, clause.into());
        self
    }

    pub fn with_topic_clause(mut self, topic: Topic, clause: impl Into<String>) -> Self {
        self.topic_clauses.insert(topic, clause.into());
        self
    }

    /// Templates for a cell; `None` when the cell is missing
    pub fn get(&self, intent: Intent, sentiment: Sentiment, mood: Mood) -> Option<&[String]> {
        self.cells
            .get(&(intent, sentiment, mood))
            .map(Vec::as_slice)
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn time_clause(&self, time: TimeOfDay) -> Option<&str> {
        self.time_clauses.get(&time).map(String::as_str)
    }

    pub fn topic_clause(&self, topic: Topic) -> Option<&str> {
        self.topic_clauses.get(&topic).map(String::as_str)
    }

    /// Number of populated cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

fn default_time_clause(time: TimeOfDay) -> &'static str {
    match time {
        TimeOfDay::Morning => " Hope your morning is off to a good start.",
        TimeOfDay::Afternoon => " How's your afternoon going?",
        TimeOfDay::Evening => " Such a nice way to spend the evening.",
        TimeOfDay::Night => " Don't stay up too late, okay?",
    }
}

fn default_topic_clause(topic: Topic) -> &'static str {
    match topic {
        Topic::Work => " Work can take so much out of you.",
        Topic::Relationships => " Relationships are such a big part of life.",
        Topic::Hobbies => " I love hearing about the things you enjoy.",
        Topic::Emotions => " Your feelings really matter to me.",
        Topic::Future => " I'm excited to see what the future holds for you.",
        Topic::Past => " It's nice to look back sometimes.",
    }
}
