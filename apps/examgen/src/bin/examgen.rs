//! apps/examgen/src/bin/examgen.rs

use std::sync::Arc;

use clap::Parser;
use examgen_core::AppState;
use examgen_lib::{
    adapters::exam_llm::OpenAiExamAdapter,
    cli::{self, Cli},
    config::Config,
    error::AppError,
    term,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // --- 1. Parse Flags, Load Configuration & Set Up Logging ---
    let args = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(model) = &args.model {
        config.exam_model = model.clone();
    }
    if let Some(path) = &args.export_path {
        config.export_path = path.clone();
    }
    if let Some(level) = args.log_level {
        config.log_level = level;
    }

    // Diagnostics go to stderr so the interactive screen stays clean.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    info!("Configuration loaded. Starting session...");

    // --- 2. Initialize the Generation Adapter ---
    let adapter = Arc::new(OpenAiExamAdapter::new(
        config.openai_api_key.clone(),
        config.exam_model.clone(),
    ));

    // --- 3. Seed the Form & Run the Session ---
    let form_defaults = cli::seed_config(&args).await;
    let state = AppState::Input {
        config: form_defaults,
        notice: None,
    };
    term::run(state, adapter, &config.export_path).await
}
