pub mod llm_service;
pub mod prompt;
pub mod report_writer;

pub use llm_service::LlmService;
pub use prompt::build_grading_prompt;
pub use report_writer::ReportWriter;
