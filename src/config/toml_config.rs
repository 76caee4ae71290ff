use crate::config::{DEFAULT_QUESTION_FILE, DEFAULT_REPORT_FILE, DEFAULT_TIMEOUT_SECS, MAX_TIMEOUT_SECS};
use crate::core::presets::QuestionPreset;
use crate::core::ConfigProvider;
use crate::domain::ports::QuestionSource;
use crate::utils::error::{EvalError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub evaluation: Option<EvaluationConfig>,
    pub endpoint: EndpointConfig,
    pub question: Option<QuestionConfig>,
    pub output: Option<OutputConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub url: String,
    pub timeout_seconds: Option<u64>,
    pub health_check: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionConfig {
    pub file: Option<String>,
    pub preset: Option<QuestionPreset>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    pub report_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EvalError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EvalError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ANALYST_API_URL})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EvalError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn name(&self) -> &str {
        self.evaluation
            .as_ref()
            .map(|e| e.name.as_str())
            .unwrap_or("default")
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.endpoint.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    pub fn verbose(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.verbose).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    fn preset(&self) -> Option<QuestionPreset> {
        self.question.as_ref().and_then(|q| q.preset)
    }

    fn question_file(&self) -> &str {
        self.question
            .as_ref()
            .and_then(|q| q.file.as_deref())
            .unwrap_or(DEFAULT_QUESTION_FILE)
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("endpoint.url", &self.endpoint.url)?;
        validation::validate_range(
            "endpoint.timeout_seconds",
            self.timeout_seconds(),
            1,
            MAX_TIMEOUT_SECS,
        )?;

        if let Some(question) = &self.question {
            if question.file.is_some() && question.preset.is_some() {
                return Err(EvalError::ConfigError {
                    message: "question.file and question.preset are mutually exclusive"
                        .to_string(),
                });
            }
        }
        if self.preset().is_none() {
            validation::validate_path("question.file", self.question_file())?;
        }

        validation::validate_path("output.path", self.output_path())?;
        validation::validate_file_name("output.report_file", self.report_file())?;
        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn api_url(&self) -> &str {
        &self.endpoint.url
    }

    fn question(&self) -> QuestionSource {
        match self.preset() {
            Some(preset) => preset.source(),
            None => QuestionSource::File(self.question_file().to_string()),
        }
    }

    fn output_path(&self) -> &str {
        self.output
            .as_ref()
            .and_then(|o| o.path.as_deref())
            .unwrap_or(".")
    }

    fn report_file(&self) -> &str {
        self.output
            .as_ref()
            .and_then(|o| o.report_file.as_deref())
            .unwrap_or(DEFAULT_REPORT_FILE)
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds())
    }

    fn health_check(&self) -> bool {
        self.endpoint.health_check.unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_minimal_toml_config() {
        let toml_content = r#"
[endpoint]
url = "http://localhost:8000/api/"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.name(), "default");
        assert_eq!(config.api_url(), "http://localhost:8000/api/");
        assert_eq!(config.timeout(), Duration::from_secs(180));
        assert_eq!(
            config.question(),
            QuestionSource::File("question.txt".to_string())
        );
        assert_eq!(config.output_path(), ".");
        assert_eq!(config.report_file(), "evaluation_results.json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[evaluation]
name = "court-smoke"

[endpoint]
url = "https://agent.example.com/api/"
timeout_seconds = 60
health_check = true

[question]
preset = "court"

[output]
path = "./reports"
report_file = "court.json"

[logging]
verbose = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.name(), "court-smoke");
        assert_eq!(config.timeout_seconds(), 60);
        assert!(config.health_check());
        assert!(config.verbose());
        assert!(!config.json_logs());
        assert!(matches!(config.question(), QuestionSource::Inline { .. }));
        assert_eq!(config.report_file(), "court.json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ANALYST_EVAL_TEST_URL", "http://agent.internal:9000/api/");

        let toml_content = r#"
[endpoint]
url = "${ANALYST_EVAL_TEST_URL}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.endpoint.url, "http://agent.internal:9000/api/");

        std::env::remove_var("ANALYST_EVAL_TEST_URL");
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[endpoint]
url = "invalid-url"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str(
            r#"
[endpoint]
url = "http://localhost:8000/api/"

[question]
file = "question.txt"
preset = "films"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[evaluation]
name = "file-test"

[endpoint]
url = "http://localhost:8000/api/"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.name(), "file-test");
    }
}
