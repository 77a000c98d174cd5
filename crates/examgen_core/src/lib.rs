pub mod domain;
pub mod ports;
pub mod state;

pub use domain::{
    Difficulty, ExamData, ExamQuestion, GenerationConfig, InvalidExam, QuestionType,
};
pub use ports::{ExamGenerationService, GenerationError, GenerationResult};
pub use state::{run_generation, AppState, VALIDATION_NOTICE};
