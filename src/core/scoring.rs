use crate::core::checks::{CorrelationCheck, CountCheck, TitleCheck};
use crate::core::gate::{check_keyed, check_structure};
use crate::core::plot::PlotCheck;
use crate::domain::model::{EvaluationReport, ScoreReport, SubmissionShape, MAX_SCORE};
use crate::domain::ports::Criterion;
use serde_json::Value;

/// 20 分制評分表：三個單值檢查加一個圖表檢查
pub struct Rubric {
    criteria: Vec<Box<dyn Criterion>>,
}

impl Rubric {
    fn new(criteria: Vec<Box<dyn Criterion>>) -> Self {
        Self { criteria }
    }

    pub fn standard() -> Self {
        let rubric = Self::new(vec![
            Box::new(CountCheck::default()),
            Box::new(TitleCheck::default()),
            Box::new(CorrelationCheck::default()),
            Box::new(PlotCheck),
        ]);
        debug_assert_eq!(rubric.max_points(), MAX_SCORE);
        rubric
    }

    pub fn max_points(&self) -> u32 {
        self.criteria.iter().map(|c| c.max_points()).sum()
    }

    /// 依固定順序執行所有項目；彼此獨立，不會提前中止
    pub fn score(&self, items: &[Value]) -> ScoreReport {
        let results = self
            .criteria
            .iter()
            .map(|criterion| {
                let result = criterion.evaluate(items);
                if result.is_passed() {
                    tracing::info!("✅ {}: {}", result.name, result.message);
                } else {
                    tracing::info!("❌ {}: {}", result.name, result.message);
                }
                result
            })
            .collect();

        ScoreReport::from_results(results)
    }

    /// 對已取得的回應評分，純函式：相同輸入產生相同報告
    pub fn evaluate(&self, submission: &Value) -> EvaluationReport {
        match SubmissionShape::classify(submission) {
            SubmissionShape::Keyed => {
                let summary = submission
                    .as_object()
                    .map(check_keyed)
                    .map(|s| s.to_string())
                    .unwrap_or_default();
                tracing::warn!("⚠️  Keyed-object submission is not scored by this rubric ({})", summary);
                EvaluationReport::unscored(
                    format!(
                        "Keyed-object submission (court judgments shape) is not scored by the 4-element rubric: {}",
                        summary
                    ),
                    Some(submission.clone()),
                )
            }
            SubmissionShape::Ordered | SubmissionShape::Scalar => {
                match check_structure(submission) {
                    Ok(items) => {
                        tracing::info!("✅ Response is a 4-element array");
                        let score = self.score(items);
                        EvaluationReport::scored(score, submission.clone())
                    }
                    Err(failure) => {
                        tracing::warn!("❌ Structural validation failed: {}", failure);
                        EvaluationReport::unscored(
                            format!(
                                "Failed structural validation - not a 4-element array ({})",
                                failure
                            ),
                            Some(submission.clone()),
                        )
                    }
                }
            }
        }
    }
}

impl Default for Rubric {
    fn default() -> Self {
        Self::standard()
    }
}
