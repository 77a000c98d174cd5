//! apps/examgen/src/term/run.rs
//!
//! The interactive session loop. Walks the application state machine one
//! phase at a time; the only await point that leaves this process is the
//! generation call inside the loading phase.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use dialoguer::Select;
use examgen_core::{
    domain::GenerationConfig, run_generation, AppState, ExamGenerationService,
};
use owo_colors::OwoColorize;

use super::form::{self, FormOutcome};
use super::results::{self, ResultsOutcome};
use crate::error::AppError;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SPINNER_TAGLINE: &str = "Analyzing algorithms & synthesizing logic...";

/// Drives a whole interactive session over the application state machine.
/// Returns when the user quits from any phase.
pub async fn run(
    mut state: AppState,
    service: Arc<dyn ExamGenerationService>,
    export_path: &Path,
) -> Result<(), AppError> {
    print_banner();

    loop {
        state = match state {
            AppState::Input { mut config, notice } => {
                match form::edit_config(&mut config, notice.as_deref())? {
                    FormOutcome::Generate => AppState::Input {
                        config,
                        notice: None,
                    }
                    .submit(),
                    FormOutcome::Quit => return Ok(()),
                }
            }
            loading @ AppState::Loading { .. } => {
                let status = loading_line(loading.config());
                generate_with_spinner(loading, service.as_ref(), &status).await
            }
            AppState::Results { config, exam } => {
                match results::browse(&exam, export_path).await? {
                    ResultsOutcome::NewExam => AppState::Results { config, exam }.reset(),
                    ResultsOutcome::Quit => return Ok(()),
                }
            }
            AppState::Error { config, message } => {
                println!("\n{}", "Generation Failed".red().bold());
                println!("{}\n", message);
                let error = AppState::Error { config, message };
                if wants_retry()? {
                    error.retry()
                } else {
                    return Ok(());
                }
            }
        };
    }
}

fn print_banner() {
    println!("{}", "ExamGenAI".bold());
    println!("Master any CS topic. Load your lecture notes, code, or simply a topic name,");
    println!("and a comprehensive exam is constructed to test your knowledge.\n");
}

fn loading_line(config: &GenerationConfig) -> String {
    let subject = if config.topic.trim().is_empty() {
        "your material"
    } else {
        config.topic.trim()
    };
    format!(
        "Generating {} {} questions covering {}...",
        config.question_count,
        config.difficulty.to_string().to_lowercase(),
        subject
    )
}

fn wants_retry() -> Result<bool, AppError> {
    let choice = Select::new()
        .items(&["Try Again", "Quit"])
        .default(0)
        .interact()?;
    Ok(choice == 0)
}

/// Awaits the in-flight generation while animating a spinner line.
async fn generate_with_spinner(
    state: AppState,
    service: &dyn ExamGenerationService,
    status_line: &str,
) -> AppState {
    let generation = run_generation(state, service);
    tokio::pin!(generation);

    let mut ticker = tokio::time::interval(Duration::from_millis(80));
    let mut frame = 0usize;

    loop {
        tokio::select! {
            settled = &mut generation => {
                // Erase the spinner line before the next phase prints.
                print!("\r\x1b[2K");
                let _ = std::io::stdout().flush();
                return settled;
            }
            _ = ticker.tick() => {
                print!(
                    "\r{} {}  {}",
                    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()].cyan(),
                    status_line,
                    SPINNER_TAGLINE.dimmed(),
                );
                let _ = std::io::stdout().flush();
                frame += 1;
            }
        }
    }
}
