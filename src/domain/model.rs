use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const MAX_SCORE: u32 = 20;

/// 回應的大致形狀：陣列（電影題）、物件（法院題）或其他
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionShape {
    Ordered,
    Keyed,
    Scalar,
}

impl SubmissionShape {
    pub fn classify(value: &Value) -> Self {
        match value {
            Value::Array(_) => SubmissionShape::Ordered,
            Value::Object(_) => SubmissionShape::Keyed,
            _ => SubmissionShape::Scalar,
        }
    }
}

/// JSON 值的種類名稱，用於診斷訊息
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Passed,
    Partial,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionResult {
    pub name: String,
    pub points_awarded: u32,
    pub points_possible: u32,
    pub outcome: Outcome,
    pub message: String,
}

impl CriterionResult {
    pub fn passed(name: &str, points: u32, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            points_awarded: points,
            points_possible: points,
            outcome: Outcome::Passed,
            message: message.into(),
        }
    }

    pub fn failed(name: &str, points_possible: u32, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            points_awarded: 0,
            points_possible,
            outcome: Outcome::Failed,
            message: message.into(),
        }
    }

    pub fn partial(
        name: &str,
        points_awarded: u32,
        points_possible: u32,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.to_string(),
            points_awarded,
            points_possible,
            outcome: Outcome::Partial,
            message: message.into(),
        }
    }

    pub fn is_passed(&self) -> bool {
        self.outcome == Outcome::Passed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Band {
    #[serde(rename = "excellent")]
    Excellent,
    #[serde(rename = "good")]
    Good,
    #[serde(rename = "fair")]
    Fair,
    #[serde(rename = "needs work")]
    NeedsWork,
}

impl Band {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            Band::Excellent
        } else if percentage >= 70.0 {
            Band::Good
        } else if percentage >= 50.0 {
            Band::Fair
        } else {
            Band::NeedsWork
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Band::Excellent => "excellent",
            Band::Good => "good",
            Band::Fair => "fair",
            Band::NeedsWork => "needs work",
        }
    }

    pub fn banner(&self) -> &'static str {
        match self {
            Band::Excellent => "🌟 EXCELLENT! The agent should pass the evaluation!",
            Band::Good => "✅ GOOD! The agent has a strong chance of success!",
            Band::Fair => "⚠️  FAIR! Some improvements needed for optimal performance!",
            Band::NeedsWork => "❌ NEEDS WORK! Significant improvements required!",
        }
    }
}

/// 各項評分結果的彙總，建立後不再修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub criteria: Vec<CriterionResult>,
    pub total: u32,
    pub max_score: u32,
    pub percentage: f64,
    pub band: Band,
}

impl ScoreReport {
    pub fn from_results(criteria: Vec<CriterionResult>) -> Self {
        let total: u32 = criteria.iter().map(|c| c.points_awarded).sum();
        let percentage = f64::from(total) / f64::from(MAX_SCORE) * 100.0;
        Self {
            criteria,
            total,
            max_score: MAX_SCORE,
            percentage,
            band: Band::from_percentage(percentage),
        }
    }
}

/// 寫入 evaluation_results.json 的報告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub success: bool,
    pub score: u32,
    pub max_score: u32,
    pub percentage: f64,
    pub details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub band: Option<Band>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub criteria: Vec<CriterionResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
}

impl EvaluationReport {
    /// 零分且未評分的報告（傳輸失敗、結構不符等）
    pub fn unscored(details: impl Into<String>, response: Option<Value>) -> Self {
        Self {
            success: false,
            score: 0,
            max_score: MAX_SCORE,
            percentage: 0.0,
            details: details.into(),
            band: None,
            criteria: Vec::new(),
            response,
        }
    }

    pub fn scored(score: ScoreReport, response: Value) -> Self {
        Self {
            success: true,
            score: score.total,
            max_score: score.max_score,
            percentage: score.percentage,
            details: "Evaluation completed successfully".to_string(),
            band: Some(score.band),
            criteria: score.criteria,
            response: Some(response),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Pending,
    Complete,
}
