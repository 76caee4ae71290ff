use crate::domain::model::CriterionResult;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 題目來源：檔案或內建題組
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionSource {
    File(String),
    Inline { name: String, text: String },
}

pub trait ConfigProvider: Send + Sync {
    fn api_url(&self) -> &str;
    fn question(&self) -> QuestionSource;
    fn output_path(&self) -> &str;
    fn report_file(&self) -> &str;
    fn timeout(&self) -> Duration;
    fn health_check(&self) -> bool;
}

/// 從受測服務取得的回應
#[derive(Debug, Clone)]
pub struct FetchedSubmission {
    pub value: Value,
    pub latency: Duration,
}

#[async_trait]
pub trait SubmissionSource: Send + Sync {
    async fn fetch(&self) -> Result<FetchedSubmission>;
}

/// 單一評分項目，對 4 元素回應的某個位置評分
pub trait Criterion: Send + Sync {
    fn name(&self) -> &str;
    fn max_points(&self) -> u32;
    fn evaluate(&self, items: &[Value]) -> CriterionResult;
}
