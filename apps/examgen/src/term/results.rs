//! apps/examgen/src/term/results.rs
//!
//! Read-through view of a generated exam: question cards with individually
//! revealable answers, plus the download action.

use std::path::Path;

use dialoguer::{Input, Select};
use examgen_core::domain::{ExamData, ExamQuestion};
use owo_colors::OwoColorize;

use crate::error::AppError;
use crate::export;

/// What the user chose after reviewing the exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsOutcome {
    NewExam,
    Quit,
}

/// Which answers are currently shown. Every card reveals independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealState {
    revealed: Vec<bool>,
}

impl RevealState {
    pub fn new(question_count: usize) -> Self {
        Self {
            revealed: vec![false; question_count],
        }
    }

    /// Flips one card. Out-of-range indexes are ignored.
    pub fn toggle(&mut self, index: usize) {
        if let Some(slot) = self.revealed.get_mut(index) {
            *slot = !*slot;
        }
    }

    pub fn reveal_all(&mut self) {
        self.revealed.fill(true);
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }
}

fn format_header(exam: &ExamData) -> String {
    format!("{}\n{}\n", exam.title.bold(), exam.description)
}

fn option_letter(index: usize) -> char {
    char::from_u32('A' as u32 + index as u32).unwrap_or('?')
}

fn format_question_card(question: &ExamQuestion, index: usize, revealed: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} [{}] {}\n",
        format!("{}.", index + 1).bold(),
        question.kind,
        question.question_text
    ));
    if let Some(snippet) = &question.code_snippet {
        for line in snippet.lines() {
            out.push_str(&format!("    {}\n", line));
        }
    }
    for (i, option) in question.options.iter().enumerate() {
        out.push_str(&format!("  {}) {}\n", option_letter(i), option));
    }
    if revealed {
        out.push_str(&format!(
            "  {} {}\n",
            "Answer:".green().bold(),
            question.correct_answer
        ));
        out.push_str(&format!(
            "  {} {}\n",
            "Explanation:".bold(),
            question.explanation
        ));
    } else {
        out.push_str(&format!("  {}\n", "[answer hidden]".dimmed()));
    }
    out
}

fn render(exam: &ExamData, reveal: &RevealState) -> String {
    let mut out = String::new();
    out.push_str(&format_header(exam));
    for (i, question) in exam.questions.iter().enumerate() {
        out.push('\n');
        out.push_str(&format_question_card(question, i, reveal.is_revealed(i)));
    }
    out
}

/// Runs the results view until the user starts over or quits.
pub async fn browse(exam: &ExamData, export_path: &Path) -> Result<ResultsOutcome, AppError> {
    let mut reveal = RevealState::new(exam.questions.len());
    println!("\n{}", render(exam, &reveal));

    loop {
        let download = format!("Download Exam ({})", export_path.display());
        let items = [
            "Reveal or hide an answer",
            "Reveal all answers",
            download.as_str(),
            "Generate New Exam",
            "Quit",
        ];
        let choice = Select::new()
            .with_prompt("Exam ready")
            .items(&items)
            .default(0)
            .interact()?;

        match choice {
            0 => {
                let number: usize = Input::new()
                    .with_prompt(format!("Question number (1-{})", exam.questions.len()))
                    .validate_with(|n: &usize| {
                        if (1..=exam.questions.len()).contains(n) {
                            Ok(())
                        } else {
                            Err("no such question")
                        }
                    })
                    .interact_text()?;
                reveal.toggle(number - 1);
                println!(
                    "\n{}",
                    format_question_card(
                        &exam.questions[number - 1],
                        number - 1,
                        reveal.is_revealed(number - 1),
                    )
                );
            }
            1 => {
                reveal.reveal_all();
                println!("\n{}", render(exam, &reveal));
            }
            2 => match export::save_exam(exam, export_path).await {
                Ok(()) => println!(
                    "{}",
                    format!("Saved to {}", export_path.display()).green()
                ),
                Err(e) => println!("{}", format!("Could not save exam: {}", e).red()),
            },
            3 => return Ok(ResultsOutcome::NewExam),
            4 => return Ok(ResultsOutcome::Quit),
            _ => unreachable!(),
        }
    }
}
