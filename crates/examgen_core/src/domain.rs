//! crates/examgen_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any wire or serialization format; the
//! adapter that talks to the generation service converts into them and calls
//! [`ExamData::validate`] before anything here is trusted.

use std::fmt;
use std::str::FromStr;

/// Requested difficulty for a generated exam.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Mixed,
}

impl Difficulty {
    /// Every difficulty, in the order the form presents them.
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
        Difficulty::Mixed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
            Difficulty::Mixed => "Mixed",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string is not one of the difficulty labels.
#[derive(Debug, Clone, thiserror::Error)]
#[error("'{0}' is not a difficulty (expected Beginner, Intermediate, Advanced or Mixed)")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    // Case-insensitive: this parses operator input (CLI flags), not wire data.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseDifficultyError(s.to_string()))
    }
}

/// The closed set of question formats an exam may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
    Matching,
    ProblemSolving,
}

impl QuestionType {
    pub const ALL: [QuestionType; 5] = [
        QuestionType::MultipleChoice,
        QuestionType::TrueFalse,
        QuestionType::ShortAnswer,
        QuestionType::Matching,
        QuestionType::ProblemSolving,
    ];

    /// The canonical label, which is also the wire value the generation
    /// service is required to emit for the `type` field.
    pub fn label(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "Multiple Choice",
            QuestionType::TrueFalse => "True/False",
            QuestionType::ShortAnswer => "Short Answer",
            QuestionType::Matching => "Matching",
            QuestionType::ProblemSolving => "Problem Solving/Coding",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a wire string is not one of the closed `type` labels.
#[derive(Debug, Clone, thiserror::Error)]
#[error("'{0}' is not a recognized question type")]
pub struct ParseQuestionTypeError(pub String);

impl FromStr for QuestionType {
    type Err = ParseQuestionTypeError;

    // Exact match only. The type enumeration is a closed wire contract;
    // anything else is a shape error, never coerced.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuestionType::ALL
            .into_iter()
            .find(|t| t.label() == s)
            .ok_or_else(|| ParseQuestionTypeError(s.to_string()))
    }
}

/// Everything the user supplies to drive one generation request.
///
/// Mutated only while the application is collecting input; the state machine
/// snapshots it the instant a request is issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Subject or topic area. May be empty when `content` is supplied.
    pub topic: String,
    pub difficulty: Difficulty,
    pub question_count: u32,
    /// Study material: pasted text or the contents of a loaded file.
    pub content: String,
}

impl GenerationConfig {
    /// The question counts the form offers. Any positive count is accepted;
    /// these are just the recommended presets.
    pub const RECOMMENDED_COUNTS: [u32; 4] = [5, 10, 20, 30];

    /// True when at least one of `topic`/`content` is non-blank.
    ///
    /// A request may only be issued when this holds; the caller (not the
    /// generation client) enforces it.
    pub fn has_source_material(&self) -> bool {
        !self.topic.trim().is_empty() || !self.content.trim().is_empty()
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            topic: String::new(),
            difficulty: Difficulty::default(),
            question_count: 10,
            content: String::new(),
        }
    }
}

/// One generated exam item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamQuestion {
    /// Identifier assigned by the generation service. Expected unique within
    /// an exam but not guaranteed; nothing here may rely on uniqueness.
    pub id: i64,
    pub kind: QuestionType,
    pub question_text: String,
    /// Answer choices. Non-empty exactly when `kind` is multiple choice.
    pub options: Vec<String>,
    /// Optional code block the question refers to.
    pub code_snippet: Option<String>,
    pub correct_answer: String,
    pub explanation: String,
}

/// A named, described, ordered collection of generated questions.
///
/// Question order is display order and is preserved end to end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamData {
    pub title: String,
    pub description: String,
    pub questions: Vec<ExamQuestion>,
}

impl ExamData {
    /// Checks the shape rules the generation service is contractually bound
    /// to but cannot be trusted to honor. `number` in the returned error is
    /// the 1-based position of the offending question.
    pub fn validate(&self) -> Result<(), InvalidExam> {
        // A request always asks for at least one question.
        if self.questions.is_empty() {
            return Err(InvalidExam::NoQuestions);
        }
        for (i, question) in self.questions.iter().enumerate() {
            let number = i + 1;
            if question.question_text.trim().is_empty() {
                return Err(InvalidExam::EmptyQuestionText { number });
            }
            match question.kind {
                QuestionType::MultipleChoice => {
                    if question.options.is_empty() {
                        return Err(InvalidExam::MissingOptions { number });
                    }
                }
                kind => {
                    if !question.options.is_empty() {
                        return Err(InvalidExam::UnexpectedOptions { number, kind });
                    }
                }
            }
        }
        Ok(())
    }
}

/// Shape violations in data returned by the generation service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidExam {
    #[error("the exam contains no questions")]
    NoQuestions,
    #[error("question {number} has an empty question text")]
    EmptyQuestionText { number: usize },
    #[error("question {number} is multiple choice but has no options")]
    MissingOptions { number: usize },
    #[error("question {number} is '{kind}' but carries answer options")]
    UnexpectedOptions { number: usize, kind: QuestionType },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(kind: QuestionType) -> ExamQuestion {
        ExamQuestion {
            id: 1,
            kind,
            question_text: "What is a binary heap?".to_string(),
            options: match kind {
                QuestionType::MultipleChoice => {
                    vec!["A tree".to_string(), "A list".to_string()]
                }
                _ => Vec::new(),
            },
            code_snippet: None,
            correct_answer: "A tree".to_string(),
            explanation: "A binary heap is a complete binary tree.".to_string(),
        }
    }

    fn exam(questions: Vec<ExamQuestion>) -> ExamData {
        ExamData {
            title: "Heaps".to_string(),
            description: "Priority queues and heaps".to_string(),
            questions,
        }
    }

    #[test]
    fn difficulty_labels_round_trip() {
        for difficulty in Difficulty::ALL {
            let parsed: Difficulty = difficulty.label().parse().unwrap();
            assert_eq!(parsed, difficulty);
        }
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("beginner".parse::<Difficulty>().unwrap(), Difficulty::Beginner);
        assert_eq!(" MIXED ".parse::<Difficulty>().unwrap(), Difficulty::Mixed);
        assert!("impossible".parse::<Difficulty>().is_err());
    }

    #[test]
    fn question_type_parses_wire_labels_exactly() {
        for kind in QuestionType::ALL {
            let parsed: QuestionType = kind.label().parse().unwrap();
            assert_eq!(parsed, kind);
        }
        // Wire parsing is strict: no case folding, no aliases.
        assert!("multiple choice".parse::<QuestionType>().is_err());
        assert!("Essay".parse::<QuestionType>().is_err());
    }

    #[test]
    fn default_config_matches_form_defaults() {
        let config = GenerationConfig::default();
        assert_eq!(config.topic, "");
        assert_eq!(config.difficulty, Difficulty::Intermediate);
        assert_eq!(config.question_count, 10);
        assert_eq!(config.content, "");
    }

    #[test]
    fn source_material_requires_one_non_blank_field() {
        let mut config = GenerationConfig::default();
        assert!(!config.has_source_material());

        config.topic = "  \t ".to_string();
        config.content = "\n".to_string();
        assert!(!config.has_source_material());

        config.topic = "Big-O notation".to_string();
        assert!(config.has_source_material());

        config.topic.clear();
        config.content = "fn main() {}".to_string();
        assert!(config.has_source_material());
    }

    #[test]
    fn validate_accepts_a_well_formed_exam() {
        let exam = exam(vec![
            question(QuestionType::MultipleChoice),
            question(QuestionType::TrueFalse),
            question(QuestionType::ProblemSolving),
        ]);
        assert!(exam.validate().is_ok());
    }

    #[test]
    fn validate_rejects_an_exam_with_no_questions() {
        let exam = exam(Vec::new());
        assert_eq!(exam.validate(), Err(InvalidExam::NoQuestions));
    }

    #[test]
    fn validate_rejects_blank_question_text() {
        let mut bad = question(QuestionType::ShortAnswer);
        bad.question_text = "   ".to_string();
        let exam = exam(vec![question(QuestionType::TrueFalse), bad]);
        assert_eq!(
            exam.validate(),
            Err(InvalidExam::EmptyQuestionText { number: 2 })
        );
    }

    #[test]
    fn validate_rejects_options_on_non_multiple_choice() {
        let mut bad = question(QuestionType::TrueFalse);
        bad.options = vec!["True".to_string(), "False".to_string()];
        let exam = exam(vec![bad]);
        assert_eq!(
            exam.validate(),
            Err(InvalidExam::UnexpectedOptions {
                number: 1,
                kind: QuestionType::TrueFalse,
            })
        );
    }

    #[test]
    fn validate_rejects_multiple_choice_without_options() {
        let mut bad = question(QuestionType::MultipleChoice);
        bad.options.clear();
        let exam = exam(vec![bad]);
        assert_eq!(exam.validate(), Err(InvalidExam::MissingOptions { number: 1 }));
    }
}
