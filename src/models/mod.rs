pub mod export;
pub mod grading;
pub mod job;
pub mod loaders;

pub use export::{export_rows, ExportRows, QuestionRow, SubmissionRow};
pub use grading::{FailureKind, GradingRecord, Provenance, QuestionResult};
pub use job::{GradingJob, Submission};
pub use loaders::{load_grading_job, load_submissions};
