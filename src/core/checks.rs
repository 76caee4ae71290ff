use crate::domain::model::CriterionResult;
use crate::domain::ports::Criterion;
use regex::Regex;
use serde_json::Value;

pub const SCALAR_POINTS: u32 = 4;

pub const EXPECTED_COUNT: i64 = 1;
pub const EXPECTED_TITLE_PATTERN: &str = "titanic";
pub const EXPECTED_CORRELATION: f64 = 0.485782;
pub const CORRELATION_TOLERANCE: f64 = 0.001;

fn element<'a>(items: &'a [Value], index: usize) -> Result<&'a Value, String> {
    items
        .get(index)
        .ok_or_else(|| format!("element[{}] is missing", index))
}

/// 字串原樣使用，其他值轉為 JSON 文字
fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn coerce_to_float(value: &Value) -> Result<f64, String> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| format!("number {} is not representable as f64", n)),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("could not convert string to float: {:?} ({})", s, e)),
        other => Err(format!("cannot convert {} to float", other)),
    }
}

/// 第一題：必須等於整數 1（`true` 視同 1，與數值比較一致）
#[derive(Debug, Clone)]
pub struct CountCheck {
    pub expected: i64,
}

impl Default for CountCheck {
    fn default() -> Self {
        Self {
            expected: EXPECTED_COUNT,
        }
    }
}

impl CountCheck {
    fn matches(&self, value: &Value) -> bool {
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    i == self.expected
                } else if let Some(f) = n.as_f64() {
                    f == self.expected as f64
                } else {
                    false
                }
            }
            Value::Bool(b) => i64::from(*b) == self.expected,
            _ => false,
        }
    }
}

impl Criterion for CountCheck {
    fn name(&self) -> &str {
        "First Answer"
    }

    fn max_points(&self) -> u32 {
        SCALAR_POINTS
    }

    fn evaluate(&self, items: &[Value]) -> CriterionResult {
        let value = match element(items, 0) {
            Ok(value) => value,
            Err(message) => return CriterionResult::failed(self.name(), SCALAR_POINTS, message),
        };

        if self.matches(value) {
            CriterionResult::passed(
                self.name(),
                SCALAR_POINTS,
                format!("First answer is correct: {}", value),
            )
        } else {
            CriterionResult::failed(
                self.name(),
                SCALAR_POINTS,
                format!(
                    "First answer is incorrect: {} (expected: {})",
                    value, self.expected
                ),
            )
        }
    }
}

/// 第二題：不分大小寫包含 "titanic"
#[derive(Debug, Clone)]
pub struct TitleCheck {
    pattern: Regex,
}

impl TitleCheck {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!("(?i){}", pattern))?;
        Ok(Self { pattern })
    }
}

impl Default for TitleCheck {
    fn default() -> Self {
        Self::new(EXPECTED_TITLE_PATTERN).unwrap()
    }
}

impl Criterion for TitleCheck {
    fn name(&self) -> &str {
        "Second Answer"
    }

    fn max_points(&self) -> u32 {
        SCALAR_POINTS
    }

    fn evaluate(&self, items: &[Value]) -> CriterionResult {
        let answer = match element(items, 1) {
            Ok(value) => coerce_to_string(value),
            Err(message) => return CriterionResult::failed(self.name(), SCALAR_POINTS, message),
        };

        if self.pattern.is_match(&answer) {
            CriterionResult::passed(
                self.name(),
                SCALAR_POINTS,
                format!("Second answer contains 'Titanic': {}", answer),
            )
        } else {
            CriterionResult::failed(
                self.name(),
                SCALAR_POINTS,
                format!("Second answer doesn't contain 'Titanic': {}", answer),
            )
        }
    }
}

/// 第三題：與 0.485782 的絕對誤差不超過 0.001
#[derive(Debug, Clone)]
pub struct CorrelationCheck {
    pub expected: f64,
    pub tolerance: f64,
}

impl Default for CorrelationCheck {
    fn default() -> Self {
        Self {
            expected: EXPECTED_CORRELATION,
            tolerance: CORRELATION_TOLERANCE,
        }
    }
}

impl Criterion for CorrelationCheck {
    fn name(&self) -> &str {
        "Third Answer"
    }

    fn max_points(&self) -> u32 {
        SCALAR_POINTS
    }

    fn evaluate(&self, items: &[Value]) -> CriterionResult {
        let answer = match element(items, 2).and_then(coerce_to_float) {
            Ok(answer) => answer,
            Err(message) => {
                return CriterionResult::failed(
                    self.name(),
                    SCALAR_POINTS,
                    format!("Error evaluating third answer: {}", message),
                )
            }
        };

        let difference = (answer - self.expected).abs();
        // NaN 的比較結果為 false，自然落入失敗分支
        if difference <= self.tolerance {
            CriterionResult::passed(
                self.name(),
                SCALAR_POINTS,
                format!(
                    "Third answer is within tolerance: {} (expected: {})",
                    answer, self.expected
                ),
            )
        } else {
            CriterionResult::failed(
                self.name(),
                SCALAR_POINTS,
                format!(
                    "Third answer outside tolerance: {} (diff: {}, max: {})",
                    answer, difference, self.tolerance
                ),
            )
        }
    }
}
