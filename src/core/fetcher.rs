use crate::domain::ports::{FetchedSubmission, QuestionSource, SubmissionSource};
use crate::utils::error::{EvalError, Result};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use std::time::{Duration, Instant};
use url::Url;

pub const HEALTH_CHECK_TIMEOUT_SECS: u64 = 10;

/// 以 multipart 上傳題目到分析服務並取回 JSON 回應
pub struct HttpSubmissionSource {
    client: Client,
    api_url: String,
    question: QuestionSource,
    timeout: Duration,
    health_timeout: Duration,
}

impl HttpSubmissionSource {
    pub fn new(api_url: String, question: QuestionSource, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_url,
            question,
            timeout,
            health_timeout: Duration::from_secs(HEALTH_CHECK_TIMEOUT_SECS).min(timeout),
        })
    }

    async fn question_part(&self) -> Result<Part> {
        let (file_name, bytes) = match &self.question {
            QuestionSource::File(path) => {
                let bytes = tokio::fs::read(path).await?;
                let file_name = std::path::Path::new(path)
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("question.txt")
                    .to_string();
                (file_name, bytes)
            }
            QuestionSource::Inline { name, text } => (name.clone(), text.clone().into_bytes()),
        };

        tracing::debug!("Question payload: {} ({} bytes)", file_name, bytes.len());
        Ok(Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("text/plain")?)
    }

    /// 服務根目錄下的 /health 位址
    pub fn health_url(&self) -> Result<String> {
        let base = Url::parse(&self.api_url).map_err(|e| EvalError::InvalidConfigValueError {
            field: "api_url".to_string(),
            value: self.api_url.clone(),
            reason: format!("Invalid URL format: {}", e),
        })?;
        let health = base
            .join("/health")
            .map_err(|e| EvalError::ConfigError {
                message: format!("cannot derive health URL: {}", e),
            })?;
        Ok(health.to_string())
    }

    pub async fn health_check(&self) -> Result<Value> {
        let url = self.health_url()?;
        tracing::info!("🩺 Checking service health: {}", url);

        // 健康檢查使用較短的逾時，不沿用評估請求的時限
        let response = self
            .client
            .get(&url)
            .timeout(self.health_timeout)
            .send()
            .await
            .map_err(|e| EvalError::from_request(e, self.health_timeout.as_secs()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EvalError::UnexpectedStatusError {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| EvalError::MalformedBodyError {
            message: e.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl SubmissionSource for HttpSubmissionSource {
    async fn fetch(&self) -> Result<FetchedSubmission> {
        tracing::info!("🔄 Testing API endpoint: {}", self.api_url);
        let form = Form::new().part("file", self.question_part().await?);

        let start = Instant::now();
        let response = self
            .client
            .post(&self.api_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| EvalError::from_request(e, self.timeout.as_secs()))?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        // 只接受 200，與原評分腳本一致
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("❌ API error: {}", status);
            return Err(EvalError::UnexpectedStatusError {
                status: status.as_u16(),
                body,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| EvalError::from_request(e, self.timeout.as_secs()))?;
        let latency = start.elapsed();
        tracing::info!("⏱️  Response time: {:.2} seconds", latency.as_secs_f64());

        let value: Value = serde_json::from_str(&text).map_err(|e| EvalError::MalformedBodyError {
            message: e.to_string(),
        })?;

        let preview: String = value.to_string().chars().take(200).collect();
        tracing::info!("✅ API response received successfully");
        tracing::debug!("📄 Response preview: {}...", preview);

        Ok(FetchedSubmission { value, latency })
    }
}
