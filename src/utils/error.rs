use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvalError {
    #[error("HTTP error: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Request timed out after {seconds}s")]
    TimeoutError { seconds: u64 },

    #[error("API returned status {status}: {body}")]
    UnexpectedStatusError { status: u16, body: String },

    #[error("Response body is not valid JSON: {message}")]
    MalformedBodyError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Transport,
    Response,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EvalError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EvalError::ApiError(_) | EvalError::TimeoutError { .. } => ErrorCategory::Transport,
            EvalError::UnexpectedStatusError { .. } | EvalError::MalformedBodyError { .. } => {
                ErrorCategory::Response
            }
            EvalError::IoError(_) | EvalError::SerializationError(_) => ErrorCategory::Storage,
            EvalError::ConfigError { .. }
            | EvalError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Transport => ErrorSeverity::Medium,
            ErrorCategory::Response => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EvalError::ApiError(_) => "Check that the analysis service is running and reachable",
            EvalError::TimeoutError { .. } => {
                "Increase --timeout-secs or check why the analysis is slow"
            }
            EvalError::UnexpectedStatusError { .. } => {
                "Inspect the service logs for the failing request"
            }
            EvalError::MalformedBodyError { .. } => "The service must answer with a JSON body",
            EvalError::IoError(_) => "Check that the question file exists and the output path is writable",
            EvalError::SerializationError(_) => "The report could not be serialized; please report this",
            EvalError::ConfigError { .. } | EvalError::InvalidConfigValueError { .. } => {
                "Fix the command line arguments or the TOML configuration file"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EvalError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid configuration for '{}': {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    /// 將 reqwest 的逾時錯誤轉為 `TimeoutError`
    pub fn from_request(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            EvalError::TimeoutError {
                seconds: timeout_secs,
            }
        } else {
            EvalError::ApiError(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, EvalError>;
