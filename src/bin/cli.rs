//! Parley CLI
//!
//! Local inspection of the dialogue engine: classify text, answer a single
//! message against a saved context, or chat interactively.

use std::io::{self, Write};

use chrono::{Local, Timelike, Utc};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use parley::error::Result;
use parley::random::system_source;
use parley::types::*;
use parley::{DialogueEngine, EngineConfig, ParleyError};

#[derive(Parser)]
#[command(name = "parley")]
#[command(about = "Contextual dialogue-response engine CLI")]
#[command(version)]
struct Cli {
    /// Engine configuration file (JSON)
    #[arg(long, env = "PARLEY_CONFIG")]
    config: Option<String>,

    /// Seed for reproducible replies
    #[arg(long, env = "PARLEY_SEED")]
    seed: Option<u64>,

    /// Emit logs as JSON lines
    #[arg(long, env = "PARLEY_LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a message
    Classify {
        /// Text to classify
        text: String,
    },
    /// Reply to one message using a saved conversation context
    Respond {
        /// Conversation context file (JSON)
        #[arg(short, long)]
        context: String,
        /// User message
        #[arg(short, long)]
        message: String,
        /// Write the updated context back to the file
        #[arg(long)]
        save: bool,
    },
    /// Interactive chat
    Chat {
        /// Agent name
        #[arg(long, default_value = "Ava")]
        persona: String,
        /// Agent traits (comma-separated)
        #[arg(short = 'T', long, default_value = "witty,attentive")]
        traits: String,
        /// Starting mood
        #[arg(long, default_value = "playful")]
        mood: String,
        /// Your name
        #[arg(long)]
        name: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(cli.log_json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!cli.log_json).then(|| {
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
        }))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(shellexpand::tilde(path).to_string())?,
        None => EngineConfig::default(),
    };
    let engine = DialogueEngine::new(config)?;
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => system_source(),
    };

    match cli.command {
        Commands::Classify { text } => {
            let classification = engine.lexicon().classify(&text);
            println!("{}", serde_json::to_string_pretty(&classification)?);
        }

        Commands::Respond {
            context,
            message,
            save,
        } => {
            let path = shellexpand::tilde(&context).to_string();
            let mut ctx = ConversationContext::from_json(
                &std::fs::read_to_string(&path)?,
                engine.config().history_capacity,
            )?;
            let envelope = engine.generate_response(&message, &ctx, &mut rng)?;
            println!("{}", serde_json::to_string_pretty(&envelope)?);

            if save {
                ctx.record_exchange(&message, &envelope, Utc::now(), engine.config().history_capacity);
                std::fs::write(&path, serde_json::to_string_pretty(&ctx)?)?;
            }
        }

        Commands::Chat {
            persona,
            traits,
            mood,
            name,
        } => {
            let mood: Mood = mood.parse().map_err(ParleyError::Validation)?;
            let personality = PersonalityProfile::new(persona, mood).with_traits(
                traits
                    .split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(String::from),
            );
            personality.validate()?;

            let mut ctx = ConversationContext::new(
                "cli",
                personality,
                TimeOfDay::from_hour(Local::now().hour()),
            )
            .with_user_profile(UserProfile {
                name,
                ..Default::default()
            });

            println!("Parley Interactive Mode");
            println!("Type 'quit' to exit, 'mood' to show the current mood\n");

            let stdin = io::stdin();
            let mut stdout = io::stdout();

            loop {
                print!("you> ");
                stdout.flush()?;

                let mut line = String::new();
                if stdin.read_line(&mut line)? == 0 {
                    break;
                }
                let line = line.trim();

                match line {
                    "quit" | "exit" => break,
                    "mood" => println!("mood: {}", ctx.current_mood),
                    _ => {
                        ctx.time_of_day = TimeOfDay::from_hour(Local::now().hour());
                        let envelope = engine.generate_response(line, &ctx, &mut rng)?;
                        println!("{}> {}", ctx.personality.name, envelope.text);
                        for question in &envelope.follow_up_questions {
                            println!("    ? {}", question);
                        }
                        if !envelope.suggested_actions.is_empty() {
                            let tags: Vec<&str> =
                                envelope.suggested_actions.iter().map(|a| a.as_str()).collect();
                            println!("    [{}]", tags.join(", "));
                        }
                        if envelope.mood_changed() {
                            println!("    (mood: {} -> {})", ctx.current_mood, envelope.mood);
                        }
                        ctx.record_exchange(
                            line,
                            &envelope,
                            Utc::now(),
                            engine.config().history_capacity,
                        );
                    }
                }
            }

            println!("Goodbye!");
        }
    }

    Ok(())
}
