//! Trait-gated stylistic rewriting

use once_cell::sync::Lazy;
use regex::Regex;

use crate::random::RandomSource;
use crate::types::PersonalityProfile;

static LOVE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\blove\b").expect("valid regex"));
static LIKE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\blike\b").expect("valid regex"));

const WINK_SUFFIX: &str = "! \u{1F609}";
const SMIRK_SUFFIX: &str = " \u{1F60F}.";
const JOKE_CLAUSE: &str = " Okay, that one was a little cheesy, I know.";
const AFFIRMATION_CLAUSE: &str = " I'm really paying attention to everything you tell me.";

/// Activation chances for the probabilistic transforms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraitChances {
    pub romantic: f64,
    pub funny: f64,
    pub attentive: f64,
}

/// Applies witty, romantic, funny and attentive transforms in that order
pub struct PersonalityAdapter<'a> {
    profile: &'a PersonalityProfile,
    chances: TraitChances,
}

impl<'a> PersonalityAdapter<'a> {
    pub fn new(profile: &'a PersonalityProfile, chances: TraitChances) -> Self {
        Self { profile, chances }
    }

    pub fn adapt<R>(&self, text: &str, rng: &mut R) -> String
    where
        R: RandomSource + ?Sized,
    {
        let mut out = text.to_string();

        if self.profile.has_trait("witty") {
            out = wink(&out);
        }
        if self.profile.has_trait("romantic") && rng.chance(self.chances.romantic) {
            out = romanticize(&out);
        }
        if self.profile.has_trait("funny") && rng.chance(self.chances.funny) {
            out.push_str(JOKE_CLAUSE);
        }
        if self.profile.has_trait("attentive") && rng.chance(self.chances.attentive) {
            out.push_str(AFFIRMATION_CLAUSE);
        }

        out
    }
}

/// Trailing `!` becomes a wink, trailing `.` a smirk
fn wink(text: &str) -> String {
    let trimmed = text.trim_end();
    if let Some(body) = trimmed.strip_suffix('!') {
        format!("{}{}", body, WINK_SUFFIX)
    } else if let Some(body) = trimmed.strip_suffix('.') {
        format!("{}{}", body, SMIRK_SUFFIX)
    } else {
        text.to_string()
    }
}

fn romanticize(text: &str) -> String {
    let swapped = LOVE.replace_all(text, "adore");
    LIKE.replace_all(&swapped, "cherish").into_owned()
}
