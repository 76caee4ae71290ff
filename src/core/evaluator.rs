use crate::config::cli::LocalStorage;
use crate::core::fetcher::HttpSubmissionSource;
use crate::core::scoring::Rubric;
use crate::domain::model::{EvaluationReport, RunState};
use crate::domain::ports::{ConfigProvider, FetchedSubmission, Storage, SubmissionSource};
use crate::utils::error::{EvalError, Result};

pub struct Evaluator<Src: SubmissionSource, S: Storage> {
    source: Src,
    storage: S,
    rubric: Rubric,
    report_file: String,
    state: RunState,
}

impl<Src: SubmissionSource, S: Storage> Evaluator<Src, S> {
    pub fn new(source: Src, storage: S, report_file: String) -> Self {
        Self {
            source,
            storage,
            rubric: Rubric::standard(),
            report_file,
            state: RunState::Pending,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn source(&self) -> &Src {
        &self.source
    }

    /// 執行一次完整評估；任何失敗都轉成報告內容，不會回傳錯誤
    pub async fn run(&mut self) -> EvaluationReport {
        println!("🚀 Starting Data Analyst Agent Evaluation");
        println!("{}", "=".repeat(50));

        let report = match self.source.fetch().await {
            Ok(fetched) => {
                tracing::debug!("Fetched submission in {:?}", fetched.latency);
                self.rubric.evaluate(&fetched.value)
            }
            Err(e) => {
                tracing::error!(
                    "❌ Request failed: {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
                tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
                EvaluationReport::unscored(format!("API request failed: {}", e), None)
            }
        };

        self.complete(report).await
    }

    /// 以既有報告結束本次評估（例如健康檢查失敗）
    pub async fn finish_early(&mut self, report: EvaluationReport) -> EvaluationReport {
        self.complete(report).await
    }

    async fn complete(&mut self, report: EvaluationReport) -> EvaluationReport {
        self.state = RunState::Complete;
        print_summary(&report);

        match self.persist(&report).await {
            Ok(()) => println!("\n💾 Results saved to {}", self.report_file),
            Err(e) => tracing::error!("❌ Failed to save results to {}: {}", self.report_file, e),
        }

        report
    }

    async fn persist(&self, report: &EvaluationReport) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        tracing::debug!("Writing report ({} bytes)", json.len());
        self.storage
            .write_file(&self.report_file, json.as_bytes())
            .await
    }
}

/// 依設定建立 HTTP 來源與本機儲存後執行評估
pub async fn evaluate_with_config<C: ConfigProvider>(config: &C) -> EvaluationReport {
    let storage = LocalStorage::new(config.output_path().to_string());
    let report_file = config.report_file().to_string();

    let source = match HttpSubmissionSource::new(
        config.api_url().to_string(),
        config.question(),
        config.timeout(),
    ) {
        Ok(source) => source,
        Err(e) => {
            tracing::error!("❌ Failed to build HTTP client: {}", e);
            let mut evaluator = Evaluator::new(UnavailableSource, storage, report_file);
            return evaluator
                .finish_early(EvaluationReport::unscored(
                    format!("API request failed: {}", e),
                    None,
                ))
                .await;
        }
    };

    let mut evaluator = Evaluator::new(source, storage, report_file);

    if config.health_check() {
        match evaluator.source().health_check().await {
            Ok(status) => tracing::info!("✅ Health check passed: {}", status),
            Err(e) => {
                tracing::error!("❌ Health check failed: {}", e);
                return evaluator
                    .finish_early(EvaluationReport::unscored(
                        format!("API health check failed: {}", e),
                        None,
                    ))
                    .await;
            }
        }
    }

    evaluator.run().await
}

/// HTTP 客戶端無法建立時的佔位來源
struct UnavailableSource;

#[async_trait::async_trait]
impl SubmissionSource for UnavailableSource {
    async fn fetch(&self) -> Result<FetchedSubmission> {
        Err(EvalError::ConfigError {
            message: "no submission source available".to_string(),
        })
    }
}

fn print_summary(report: &EvaluationReport) {
    println!("\n{}", "=".repeat(50));
    for criterion in &report.criteria {
        let mark = if criterion.is_passed() { "✅" } else { "❌" };
        println!(
            "{} {}: {}/{}",
            mark, criterion.name, criterion.points_awarded, criterion.points_possible
        );
    }

    match report.band {
        Some(band) => {
            println!("🏆 EVALUATION COMPLETE");
            println!(
                "📊 Final Score: {}/{} ({:.1}%)",
                report.score, report.max_score, report.percentage
            );
            println!("🏷️  Band: {}", band.label());
            println!("{}", band.banner());
        }
        None => {
            println!("❌ EVALUATION FAILED: {}", report.details);
            println!("📊 Final Score: {}/{}", report.score, report.max_score);
        }
    }
}
