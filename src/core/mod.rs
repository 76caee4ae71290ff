pub mod checks;
pub mod evaluator;
pub mod fetcher;
pub mod gate;
pub mod plot;
pub mod presets;
pub mod scoring;

pub use crate::domain::model::{CriterionResult, EvaluationReport, ScoreReport};
pub use crate::domain::ports::{ConfigProvider, Criterion, Storage, SubmissionSource};
pub use crate::utils::error::Result;
