pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::cli::LocalStorage;
#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::toml_config::TomlConfig;

pub use crate::core::{evaluator::Evaluator, fetcher::HttpSubmissionSource, scoring::Rubric};
pub use crate::domain::model::{Band, EvaluationReport, ScoreReport};
pub use crate::utils::error::{EvalError, Result};
