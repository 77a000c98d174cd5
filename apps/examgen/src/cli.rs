//! apps/examgen/src/cli.rs
//!
//! Command line flags. Every flag is optional: the interactive form is the
//! primary input surface and flags only pre-seed or override it.

use std::path::PathBuf;

use clap::Parser;
use examgen_core::domain::{Difficulty, GenerationConfig};
use tracing::{warn, Level};

/// Examgen - AI-generated computer science exams in your terminal
#[derive(Debug, Parser)]
#[command(name = "examgen")]
#[command(about = "Generates computer science exams from a topic or study material")]
pub struct Cli {
    /// Subject or topic area (e.g. "Distributed Systems")
    #[arg(long)]
    pub topic: Option<String>,

    /// Difficulty level (beginner, intermediate, advanced, mixed)
    #[arg(long)]
    pub difficulty: Option<Difficulty>,

    /// Number of questions to generate
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub questions: Option<u32>,

    /// File whose contents become the study material
    #[arg(long)]
    pub material: Option<PathBuf>,

    /// Where the exported exam text is written
    #[arg(long)]
    pub export_path: Option<PathBuf>,

    /// Chat model used for generation
    #[arg(long)]
    pub model: Option<String>,

    /// Diagnostic log level (error, warn, info, debug, trace)
    #[arg(long)]
    pub log_level: Option<Level>,
}

/// Builds the form's starting values from parsed flags.
///
/// A `--material` file that cannot be read is logged and skipped rather than
/// aborting: the user can still paste or load material from the form.
pub async fn seed_config(cli: &Cli) -> GenerationConfig {
    let mut config = GenerationConfig::default();

    if let Some(topic) = &cli.topic {
        config.topic = topic.clone();
    }
    if let Some(difficulty) = cli.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(count) = cli.questions {
        config.question_count = count;
    }
    if let Some(path) = &cli.material {
        match tokio::fs::read_to_string(path).await {
            Ok(text) => config.content = text,
            Err(e) => warn!(
                "Could not read study material from {}: {}",
                path.display(),
                e
            ),
        }
    }

    config
}
