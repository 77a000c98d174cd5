//! apps/examgen/src/term/form.rs
//!
//! The editable exam setup form. This is a thin gesture layer: it only
//! mutates the configuration and reports what the user chose, while the
//! submission guard itself lives in the core state machine.

use dialoguer::{Editor, Input, Select};
use examgen_core::domain::{Difficulty, GenerationConfig};
use owo_colors::OwoColorize;

use crate::error::AppError;

/// What the user chose after finishing with the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormOutcome {
    Generate,
    Quit,
}

/// Runs the form until the user submits or quits.
pub fn edit_config(
    config: &mut GenerationConfig,
    notice: Option<&str>,
) -> Result<FormOutcome, AppError> {
    if let Some(notice) = notice {
        println!("\n{}", notice.yellow());
    }

    loop {
        let items = [
            format!("Subject / Topic Area: {}", topic_summary(&config.topic)),
            format!("Questions: {}", config.question_count),
            format!("Difficulty: {}", config.difficulty),
            format!("Study Material: {}", material_summary(&config.content)),
            "Generate Exam".to_string(),
            "Quit".to_string(),
        ];
        let choice = Select::new()
            .with_prompt("Exam setup")
            .items(&items)
            .default(4)
            .interact()?;

        match choice {
            0 => edit_topic(config)?,
            1 => edit_question_count(config)?,
            2 => edit_difficulty(config)?,
            3 => edit_material(config)?,
            4 => return Ok(FormOutcome::Generate),
            5 => return Ok(FormOutcome::Quit),
            _ => unreachable!(),
        }
    }
}

fn edit_topic(config: &mut GenerationConfig) -> Result<(), AppError> {
    let topic: String = Input::new()
        .with_prompt("Subject / Topic Area (e.g. Distributed Systems, React Hooks, O(n) complexity)")
        .with_initial_text(config.topic.clone())
        .allow_empty(true)
        .interact_text()?;
    config.topic = topic;
    Ok(())
}

fn edit_question_count(config: &mut GenerationConfig) -> Result<(), AppError> {
    let items = [
        "5 (Quick)",
        "10 (Standard)",
        "20 (Detailed)",
        "30 (Full Exam)",
        "Custom",
    ];
    let default = GenerationConfig::RECOMMENDED_COUNTS
        .iter()
        .position(|&n| n == config.question_count)
        .unwrap_or(items.len() - 1);
    let choice = Select::new()
        .with_prompt("Questions")
        .items(&items)
        .default(default)
        .interact()?;

    config.question_count = match choice {
        i if i < GenerationConfig::RECOMMENDED_COUNTS.len() => {
            GenerationConfig::RECOMMENDED_COUNTS[i]
        }
        _ => Input::new()
            .with_prompt("Number of questions")
            .default(config.question_count)
            .validate_with(|n: &u32| {
                if *n >= 1 {
                    Ok(())
                } else {
                    Err("need at least one question")
                }
            })
            .interact_text()?,
    };
    Ok(())
}

fn edit_difficulty(config: &mut GenerationConfig) -> Result<(), AppError> {
    let labels: Vec<&str> = Difficulty::ALL.iter().map(|d| d.label()).collect();
    let default = Difficulty::ALL
        .iter()
        .position(|d| *d == config.difficulty)
        .unwrap_or(0);
    let choice = Select::new()
        .with_prompt("Difficulty")
        .items(&labels)
        .default(default)
        .interact()?;
    config.difficulty = Difficulty::ALL[choice];
    Ok(())
}

fn edit_material(config: &mut GenerationConfig) -> Result<(), AppError> {
    let items = ["Write in your editor", "Load from a file", "Clear", "Back"];
    let choice = Select::new()
        .with_prompt("Study material (paste text or load a file)")
        .items(&items)
        .default(0)
        .interact()?;

    match choice {
        0 => {
            if let Some(text) = Editor::new().edit(&config.content)? {
                config.content = text;
            }
        }
        1 => {
            let path: String = Input::new().with_prompt("File to load").interact_text()?;
            match std::fs::read_to_string(path.trim()) {
                Ok(text) => config.content = text,
                Err(e) => {
                    println!("{}", format!("Could not read '{}': {}", path.trim(), e).red())
                }
            }
        }
        2 => config.content.clear(),
        3 => {}
        _ => unreachable!(),
    }
    Ok(())
}

fn topic_summary(topic: &str) -> String {
    if topic.trim().is_empty() {
        "(none)".to_string()
    } else {
        topic.to_string()
    }
}

/// Short description of the loaded material for the menu row.
fn material_summary(content: &str) -> String {
    if content.trim().is_empty() {
        "(none)".to_string()
    } else {
        format!(
            "{} chars, {} lines",
            content.chars().count(),
            content.lines().count()
        )
    }
}
