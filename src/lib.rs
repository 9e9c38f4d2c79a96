//! Parley - contextual dialogue-response engine
//!
//! Classifies a user message, tracks mood across turns, synthesizes a
//! styled reply from a template bank, scores it and proposes follow-ups.
//! All state is threaded through [`ConversationContext`]; randomness comes
//! from a caller-supplied [`random::RandomSource`].

pub mod config;
pub mod dialogue;
pub mod error;
pub mod random;
pub mod types;

pub use config::EngineConfig;
pub use dialogue::DialogueEngine;
pub use error::{ParleyError, Result};
pub use types::*;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
