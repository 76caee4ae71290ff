pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::presets::QuestionPreset;
#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::ports::QuestionSource;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "cli")]
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/";
pub const DEFAULT_QUESTION_FILE: &str = "question.txt";
pub const DEFAULT_REPORT_FILE: &str = "evaluation_results.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 180;
pub const MAX_TIMEOUT_SECS: u64 = 3600;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "analyst-eval")]
#[command(about = "Score a data analyst agent endpoint against the 20-point rubric")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    #[arg(long, default_value = DEFAULT_QUESTION_FILE)]
    pub question_file: String,

    /// Send a built-in question instead of reading --question-file
    #[arg(long, value_enum)]
    pub preset: Option<QuestionPreset>,

    #[arg(long, default_value = ".")]
    pub output_path: String,

    #[arg(long, default_value = DEFAULT_REPORT_FILE)]
    pub report_file: String,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    #[arg(long, help = "Probe <origin>/health before evaluating")]
    pub health_check: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn api_url(&self) -> &str {
        &self.api_url
    }

    fn question(&self) -> QuestionSource {
        match self.preset {
            Some(preset) => preset.source(),
            None => QuestionSource::File(self.question_file.clone()),
        }
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn report_file(&self) -> &str {
        &self.report_file
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn health_check(&self) -> bool {
        self.health_check
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_url", &self.api_url)?;
        if self.preset.is_none() {
            validation::validate_path("question_file", &self.question_file)?;
        }
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_file_name("report_file", &self.report_file)?;
        validation::validate_range("timeout_secs", self.timeout_secs, 1, MAX_TIMEOUT_SECS)?;
        Ok(())
    }
}
