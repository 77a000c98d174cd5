//! apps/examgen/src/export.rs
//!
//! Plain-text rendering of a generated exam, plus the file write behind the
//! download action.

use std::path::Path;

use examgen_core::domain::ExamData;

/// Renders an exam as a portable plain-text document.
///
/// The layout is a header followed by one block per question, in generation
/// order, separated by `---` rules. Code snippets are a screen-only nicety
/// and do not appear here.
pub fn render_exam_text(exam: &ExamData) -> String {
    let body = exam
        .questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let mut block = format!("Q{} [{}]: {}\n", i + 1, q.kind, q.question_text);
            if !q.options.is_empty() {
                block.push_str(&format!("Options: {}\n", q.options.join(", ")));
            }
            block.push_str(&format!("Answer: {}\n", q.correct_answer));
            block.push_str(&format!("Explanation: {}\n", q.explanation));
            block
        })
        .collect::<Vec<_>>()
        .join("\n---\n\n");

    format!("EXAM: {}\n\n{}\n\n{}", exam.title, exam.description, body)
}

/// Writes the rendered exam to `path`, replacing any previous export.
pub async fn save_exam(exam: &ExamData, path: &Path) -> std::io::Result<()> {
    tokio::fs::write(path, render_exam_text(exam)).await
}
