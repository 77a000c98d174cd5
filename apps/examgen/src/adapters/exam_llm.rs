//! apps/examgen/src/adapters/exam_llm.rs
//!
//! This module contains the adapter for the exam-generating LLM.
//! It implements the `ExamGenerationService` port from the `core` crate.

const SYSTEM_INSTRUCTIONS: &str = r#"You are a world-class Computer Science Professor and Exam Creator.
Your goal is to generate specialized exam questions based strictly on the provided material or topic.

Rules:
1. Read and understand the material in detail (theory, math, algos, architecture, code, terminology).
2. Handle any CS domain (Programming, DSA, OS, Networks, DB, AI/ML, etc.).
3. Create exactly {question_count} questions.
4. Difficulty level: {difficulty}.
5. Include these types: True/False, Multiple Choice, Matching, Short Answer, Problem-solving (coding/math/logic).
6. Questions must be original, not copied word-for-word.
7. Cover subtle details.

Output format must be strict JSON matching the provided schema."#;

const USER_PROMPT_TEMPLATE: &str = r#"Subject/Topic: {topic}

Study Material Content:
{content}

Generate the exam now."#;

const DEFAULT_TOPIC: &str = "General Computer Science";

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs, ResponseFormat,
        ResponseFormatJsonSchema,
    },
    Client, error::OpenAIError,
};
use async_trait::async_trait;
use examgen_core::{
    domain::{ExamData, ExamQuestion, GenerationConfig, QuestionType},
    ports::{ExamGenerationService, GenerationError, GenerationResult},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

//=========================================================================================
// Structured Output Contract
//=========================================================================================

/// JSON schema sent alongside the request so the model emits `ExamData` directly.
///
/// The provider's strict mode wants every property listed in `required` and
/// `additionalProperties: false` on each object, so the two optional fields
/// (`options`, `codeSnippet`) are expressed as nullable instead of omitted.
fn exam_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "title": { "type": "string", "description": "A creative title for the exam based on the content." },
            "description": { "type": "string", "description": "A brief summary of what this exam covers." },
            "questions": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "integer" },
                        "type": {
                            "type": "string",
                            "enum": QuestionType::ALL.map(|t| t.label())
                        },
                        "questionText": { "type": "string", "description": "The main question text." },
                        "options": {
                            "type": ["array", "null"],
                            "items": { "type": "string" },
                            "description": "Array of options for Multiple Choice. Null or empty for others."
                        },
                        "codeSnippet": {
                            "type": ["string", "null"],
                            "description": "Optional code block relevant to the question (e.g. 'What does this print?')."
                        },
                        "correctAnswer": { "type": "string", "description": "The direct correct answer." },
                        "explanation": { "type": "string", "description": "Detailed explanation of why the answer is correct." }
                    },
                    "required": ["id", "type", "questionText", "options", "codeSnippet", "correctAnswer", "explanation"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["title", "description", "questions"],
        "additionalProperties": false
    })
}

fn build_instructions(config: &GenerationConfig) -> String {
    SYSTEM_INSTRUCTIONS
        .replace("{question_count}", &config.question_count.to_string())
        .replace("{difficulty}", config.difficulty.label())
}

fn build_prompt(config: &GenerationConfig) -> String {
    let topic: &str = if config.topic.trim().is_empty() {
        DEFAULT_TOPIC
    } else {
        &config.topic
    };
    USER_PROMPT_TEMPLATE
        .replace("{topic}", topic)
        .replace("{content}", &config.content)
}

//=========================================================================================
// Wire Types & Validation
//=========================================================================================

/// Wire shape of the model reply. Field names follow the JSON contract, not
/// Rust conventions, hence the renames.
#[derive(Debug, Deserialize)]
struct RawExam {
    title: String,
    description: String,
    questions: Vec<RawQuestion>,
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    id: i64,
    #[serde(rename = "type")]
    kind: String,
    #[serde(rename = "questionText")]
    question_text: String,
    #[serde(default)]
    options: Option<Vec<String>>,
    #[serde(rename = "codeSnippet", default)]
    code_snippet: Option<String>,
    #[serde(rename = "correctAnswer")]
    correct_answer: String,
    explanation: String,
}

/// Parses and validates a model reply into domain `ExamData`.
///
/// Every rejection collapses into `GenerationError::Failed`; the specific
/// cause only goes to the log. Callers present one retryable message either
/// way, and the raw reply may be attacker-ish garbage not worth echoing.
fn parse_exam(text: &str) -> GenerationResult<ExamData> {
    let raw: RawExam = serde_json::from_str(text).map_err(|e| {
        error!("Exam response was not valid exam JSON: {}", e);
        GenerationError::Failed
    })?;

    let mut questions = Vec::with_capacity(raw.questions.len());
    for (idx, q) in raw.questions.into_iter().enumerate() {
        let kind: QuestionType = q.kind.parse().map_err(|e| {
            error!("Exam response rejected at question {}: {}", idx + 1, e);
            GenerationError::Failed
        })?;
        questions.push(ExamQuestion {
            id: q.id,
            kind,
            question_text: q.question_text,
            options: q.options.unwrap_or_default(),
            code_snippet: q.code_snippet.filter(|s| !s.trim().is_empty()),
            correct_answer: q.correct_answer,
            explanation: q.explanation,
        });
    }

    let exam = ExamData {
        title: raw.title,
        description: raw.description,
        questions,
    };
    if let Err(e) = exam.validate() {
        error!("Exam response failed validation: {}", e);
        return Err(GenerationError::Failed);
    }
    Ok(exam)
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `ExamGenerationService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiExamAdapter {
    client: Option<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiExamAdapter {
    /// Creates a new `OpenAiExamAdapter`.
    ///
    /// A missing `api_key` is not a construction error: the adapter is built
    /// without a client and every generation attempt reports the missing
    /// credential instead of touching the network.
    pub fn new(api_key: Option<String>, model: String) -> Self {
        let client =
            api_key.map(|key| Client::with_config(OpenAIConfig::new().with_api_key(key)));
        Self { client, model }
    }
}

//=========================================================================================
// `ExamGenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl ExamGenerationService for OpenAiExamAdapter {
    /// Generates a complete exam for `config` in a single model round trip.
    async fn generate_exam(&self, config: &GenerationConfig) -> GenerationResult<ExamData> {
        let Some(client) = &self.client else {
            return Err(GenerationError::MissingApiKey);
        };

        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(build_instructions(config))
                .build()
                .map_err(|e| {
                    error!("Failed to build exam system message: {}", e);
                    GenerationError::Failed
                })?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(build_prompt(config))
                .build()
                .map_err(|e| {
                    error!("Failed to build exam user message: {}", e);
                    GenerationError::Failed
                })?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .response_format(ResponseFormat::JsonSchema {
                json_schema: ResponseFormatJsonSchema {
                    description: Some("A complete generated exam.".to_string()),
                    name: "exam_data".to_string(),
                    schema: Some(exam_schema()),
                    strict: Some(true),
                },
            })
            .build()
            .map_err(|e| {
                error!("Failed to build exam generation request: {}", e);
                GenerationError::Failed
            })?;

        info!(
            "Requesting {} {} questions from model '{}'",
            config.question_count, config.difficulty, self.model
        );

        // Transport errors are mapped by hand; a From impl would hit the orphan rule.
        let response = client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| {
                error!("Exam generation request failed: {}", e);
                GenerationError::Failed
            })?;

        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();
        if text.trim().is_empty() {
            error!("No data received from API");
            return Err(GenerationError::Failed);
        }

        parse_exam(&text)
    }
}

//=========================================================================================
// Tests
//=========================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use examgen_core::domain::Difficulty;

    fn reply_with_all_types() -> String {
        json!({
            "title": "Systems Fundamentals Midterm",
            "description": "Covers processes, memory, and basic algorithms.",
            "questions": [
                {
                    "id": 1,
                    "type": "Multiple Choice",
                    "questionText": "Which scheduler state follows 'ready'?",
                    "options": ["Running", "Terminated", "Blocked", "New"],
                    "codeSnippet": null,
                    "correctAnswer": "Running",
                    "explanation": "The dispatcher moves a ready process onto the CPU."
                },
                {
                    "id": 2,
                    "type": "True/False",
                    "questionText": "A binary search requires sorted input.",
                    "options": null,
                    "codeSnippet": null,
                    "correctAnswer": "True",
                    "explanation": "The halving step relies on ordering."
                },
                {
                    "id": 3,
                    "type": "Short Answer",
                    "questionText": "Name the data structure behind LIFO semantics.",
                    "options": null,
                    "codeSnippet": null,
                    "correctAnswer": "A stack",
                    "explanation": "Push and pop both operate on the same end."
                },
                {
                    "id": 4,
                    "type": "Matching",
                    "questionText": "Match each protocol to its transport layer.",
                    "options": null,
                    "codeSnippet": null,
                    "correctAnswer": "HTTP-TCP, DNS-UDP",
                    "explanation": "DNS favors UDP for small lookups; HTTP needs TCP streams."
                },
                {
                    "id": 5,
                    "type": "Problem Solving/Coding",
                    "questionText": "What does this loop print?",
                    "options": null,
                    "codeSnippet": "for i in 0..3 { print!(\"{}\", i); }",
                    "correctAnswer": "012",
                    "explanation": "The range is half-open, so 3 is excluded."
                }
            ]
        })
        .to_string()
    }

    fn any_config() -> GenerationConfig {
        GenerationConfig {
            topic: "Operating Systems".to_string(),
            difficulty: Difficulty::Advanced,
            question_count: 7,
            content: String::new(),
        }
    }

    #[test]
    fn accepts_a_reply_using_every_question_kind() {
        let exam = parse_exam(&reply_with_all_types()).unwrap();
        assert_eq!(exam.title, "Systems Fundamentals Midterm");
        assert_eq!(exam.questions.len(), 5);
        assert_eq!(exam.questions[0].kind, QuestionType::MultipleChoice);
        assert_eq!(exam.questions[0].options.len(), 4);
        assert_eq!(exam.questions[4].kind, QuestionType::ProblemSolving);
        assert!(exam.questions[4].code_snippet.is_some());
    }

    #[test]
    fn null_options_become_an_empty_list() {
        let exam = parse_exam(&reply_with_all_types()).unwrap();
        assert!(exam.questions[1].options.is_empty());
    }

    #[test]
    fn blank_code_snippets_are_dropped() {
        let reply = json!({
            "title": "T",
            "description": "D",
            "questions": [{
                "id": 1,
                "type": "Short Answer",
                "questionText": "Q?",
                "codeSnippet": "   ",
                "correctAnswer": "A",
                "explanation": "E"
            }]
        })
        .to_string();
        let exam = parse_exam(&reply).unwrap();
        assert_eq!(exam.questions[0].code_snippet, None);
    }

    #[test]
    fn rejects_a_reply_that_is_not_json() {
        let err = parse_exam("Sure! Here is your exam:").unwrap_err();
        assert_eq!(err, GenerationError::Failed);
    }

    #[test]
    fn rejects_an_empty_reply() {
        assert_eq!(parse_exam("").unwrap_err(), GenerationError::Failed);
        assert_eq!(parse_exam("   \n\t").unwrap_err(), GenerationError::Failed);
    }

    #[test]
    fn rejects_a_reply_missing_a_required_field() {
        // No correctAnswer.
        let reply = json!({
            "title": "T",
            "description": "D",
            "questions": [{
                "id": 1,
                "type": "Short Answer",
                "questionText": "Q?",
                "explanation": "E"
            }]
        })
        .to_string();
        assert_eq!(parse_exam(&reply).unwrap_err(), GenerationError::Failed);
    }

    #[test]
    fn rejects_an_unknown_question_kind() {
        let reply = json!({
            "title": "T",
            "description": "D",
            "questions": [{
                "id": 1,
                "type": "Essay",
                "questionText": "Q?",
                "correctAnswer": "A",
                "explanation": "E"
            }]
        })
        .to_string();
        assert_eq!(parse_exam(&reply).unwrap_err(), GenerationError::Failed);
    }

    #[test]
    fn rejects_multiple_choice_without_options() {
        let reply = json!({
            "title": "T",
            "description": "D",
            "questions": [{
                "id": 1,
                "type": "Multiple Choice",
                "questionText": "Q?",
                "options": [],
                "correctAnswer": "A",
                "explanation": "E"
            }]
        })
        .to_string();
        assert_eq!(parse_exam(&reply).unwrap_err(), GenerationError::Failed);
    }

    #[test]
    fn rejects_options_attached_to_true_false() {
        let reply = json!({
            "title": "T",
            "description": "D",
            "questions": [{
                "id": 1,
                "type": "True/False",
                "questionText": "Q?",
                "options": ["True", "False"],
                "correctAnswer": "True",
                "explanation": "E"
            }]
        })
        .to_string();
        assert_eq!(parse_exam(&reply).unwrap_err(), GenerationError::Failed);
    }

    #[test]
    fn rejects_a_reply_with_no_questions() {
        // Well-formed JSON, but no exam to show. Every request asks for at
        // least one question, so this never reaches the results view.
        let reply = json!({
            "title": "T",
            "description": "D",
            "questions": []
        })
        .to_string();
        assert_eq!(parse_exam(&reply).unwrap_err(), GenerationError::Failed);
    }

    #[test]
    fn schema_names_every_question_kind_and_pins_the_shape() {
        let schema = exam_schema();
        assert_eq!(
            schema["required"],
            json!(["title", "description", "questions"])
        );

        let item = &schema["properties"]["questions"]["items"];
        assert_eq!(item["additionalProperties"], json!(false));
        let kinds = item["properties"]["type"]["enum"].as_array().unwrap();
        assert_eq!(kinds.len(), QuestionType::ALL.len());
        assert!(kinds.contains(&json!("Problem Solving/Coding")));

        // Optional fields ride along as nullable so strict mode accepts them.
        assert_eq!(
            item["properties"]["options"]["type"],
            json!(["array", "null"])
        );
        assert_eq!(
            item["properties"]["codeSnippet"]["type"],
            json!(["string", "null"])
        );
    }

    #[test]
    fn instructions_carry_the_count_and_difficulty() {
        let instructions = build_instructions(&any_config());
        assert!(instructions.contains("Create exactly 7 questions."));
        assert!(instructions.contains("Difficulty level: Advanced."));
    }

    #[test]
    fn prompt_falls_back_to_a_general_topic() {
        let mut config = any_config();
        config.topic = "   ".to_string();
        config.content = "B-trees keep leaves at equal depth.".to_string();
        let prompt = build_prompt(&config);
        assert!(prompt.starts_with("Subject/Topic: General Computer Science"));
        assert!(prompt.contains("Study Material Content:\nB-trees keep leaves at equal depth."));
        assert!(prompt.ends_with("Generate the exam now."));
    }

    #[test]
    fn prompt_uses_the_given_topic_verbatim() {
        let prompt = build_prompt(&any_config());
        assert!(prompt.starts_with("Subject/Topic: Operating Systems"));
    }

    #[tokio::test]
    async fn missing_credential_fails_before_any_network_activity() {
        let adapter = OpenAiExamAdapter::new(None, "gpt-4o-mini".to_string());
        let err = adapter.generate_exam(&any_config()).await.unwrap_err();
        assert_eq!(err, GenerationError::MissingApiKey);
    }
}
