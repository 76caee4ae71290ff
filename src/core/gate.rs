use crate::core::presets::{COURT_DELAY_PLOT_KEY, COURT_QUESTION_KEYS};
use crate::domain::model::json_kind;
use serde_json::{Map, Value};
use std::fmt;

pub const EXPECTED_LEN: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateFailure {
    NotASequence { found: &'static str },
    WrongLength { len: usize },
}

impl fmt::Display for GateFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateFailure::NotASequence { found } => {
                write!(f, "response is not an array (found {})", found)
            }
            GateFailure::WrongLength { len } => {
                write!(f, "array has {} elements, expected {}", len, EXPECTED_LEN)
            }
        }
    }
}

/// 結構閘門：必須是恰好 4 個元素的陣列
pub fn check_structure(value: &Value) -> Result<&[Value], GateFailure> {
    let items = value.as_array().ok_or(GateFailure::NotASequence {
        found: json_kind(value),
    })?;

    if items.len() != EXPECTED_LEN {
        return Err(GateFailure::WrongLength { len: items.len() });
    }

    Ok(items.as_slice())
}

/// 物件形狀（法院題）回應的檢查摘要，不計分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedSummary {
    pub answered: usize,
    pub expected: usize,
    pub missing: Vec<String>,
    pub plot_is_data_uri: bool,
}

impl fmt::Display for KeyedSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} expected answers present, plot data URI: {}",
            self.answered, self.expected, self.plot_is_data_uri
        )
    }
}

pub fn check_keyed(map: &Map<String, Value>) -> KeyedSummary {
    let missing: Vec<String> = COURT_QUESTION_KEYS
        .iter()
        .filter(|key| !map.contains_key(**key))
        .map(|key| key.to_string())
        .collect();

    let plot_is_data_uri = map
        .get(COURT_DELAY_PLOT_KEY)
        .and_then(Value::as_str)
        .map(|s| s.starts_with("data:image/"))
        .unwrap_or(false);

    KeyedSummary {
        answered: COURT_QUESTION_KEYS.len() - missing.len(),
        expected: COURT_QUESTION_KEYS.len(),
        missing,
        plot_is_data_uri,
    }
}
