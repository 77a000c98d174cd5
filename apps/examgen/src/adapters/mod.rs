pub mod exam_llm;

pub use exam_llm::OpenAiExamAdapter;
