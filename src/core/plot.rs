use crate::domain::model::{json_kind, CriterionResult};
use crate::domain::ports::Criterion;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use serde_json::Value;

pub const PLOT_POINTS: u32 = 8;
pub const POINTS_PER_SUB_CRITERION: u32 = 2;
pub const MAX_PLOT_BYTES: usize = 100_000;

const DATA_URI_PREFIX: &str = "data:image/";
const BASE64_MARKER: &str = "base64,";

/// 四個子條件的判定結果，各自獨立
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotFindings {
    pub is_data_uri: bool,
    pub has_base64: bool,
    pub size_ok: bool,
    pub can_decode: bool,
    pub size_bytes: usize,
    pub decoded_bytes: Option<usize>,
}

impl PlotFindings {
    pub fn inspect(plot: &str) -> Self {
        let size_bytes = plot.len();
        let decoded_bytes = decode_payload(plot).map(|bytes| bytes.len());

        Self {
            is_data_uri: plot.starts_with(DATA_URI_PREFIX),
            has_base64: plot.contains(BASE64_MARKER),
            size_ok: size_bytes < MAX_PLOT_BYTES,
            can_decode: decoded_bytes.is_some(),
            size_bytes,
            decoded_bytes,
        }
    }

    pub fn criteria_met(&self) -> u32 {
        [self.is_data_uri, self.has_base64, self.size_ok, self.can_decode]
            .iter()
            .filter(|met| **met)
            .count() as u32
    }

    pub fn points(&self) -> u32 {
        self.criteria_met() * POINTS_PER_SUB_CRITERION
    }
}

// 容許不補齊與非標準尾端位元，字元篩選在 `normalize_payload` 處理
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

fn is_alphabet(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '+' || c == '/'
}

/// 丟棄字母表以外的字元，並在第一組補齊 `=` 結束處截斷。
/// 最後一組若不完整且沒有補齊則回傳 `None`。
fn normalize_payload(payload: &str) -> Option<String> {
    let mut kept = String::with_capacity(payload.len());
    let mut quad_pos = 0usize;
    let mut pads = 0usize;

    for c in payload.chars() {
        if c == '=' {
            // 組內前兩個位置出現的 `=` 直接略過
            if quad_pos >= 2 {
                pads += 1;
                if quad_pos + pads >= 4 {
                    return Some(kept);
                }
            }
            continue;
        }
        if !is_alphabet(c) {
            continue;
        }
        pads = 0;
        kept.push(c);
        quad_pos = (quad_pos + 1) % 4;
    }

    if quad_pos == 0 {
        Some(kept)
    } else {
        None
    }
}

/// 取第一個 `base64,` 之後的內容寬鬆解碼
fn decode_payload(plot: &str) -> Option<Vec<u8>> {
    let (_, payload) = plot.split_once(BASE64_MARKER)?;
    let Some(data) = normalize_payload(payload) else {
        tracing::debug!("Base64 decode failed: incomplete final group");
        return None;
    };

    match LENIENT.decode(data.as_bytes()) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            tracing::debug!("Base64 decode failed: {}", e);
            None
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlotCheck;

impl Criterion for PlotCheck {
    fn name(&self) -> &str {
        "Plot Validation"
    }

    fn max_points(&self) -> u32 {
        PLOT_POINTS
    }

    fn evaluate(&self, items: &[Value]) -> CriterionResult {
        let plot = match items.get(3) {
            Some(Value::String(plot)) => plot,
            Some(other) => {
                return CriterionResult::failed(
                    self.name(),
                    PLOT_POINTS,
                    format!("Error evaluating plot: expected a string, found {}", json_kind(other)),
                )
            }
            None => {
                return CriterionResult::failed(
                    self.name(),
                    PLOT_POINTS,
                    "Error evaluating plot: element[3] is missing",
                )
            }
        };

        let findings = PlotFindings::inspect(plot);
        tracing::debug!(
            "📊 Plot findings - data URI: {}, base64: {}, size: {} bytes, decodes: {:?}",
            findings.is_data_uri,
            findings.has_base64,
            findings.size_bytes,
            findings.decoded_bytes
        );

        let points = findings.points();
        let summary = format!(
            "data URI: {}, contains base64: {}, size {} bytes (<100KB: {}), decodes: {}",
            findings.is_data_uri,
            findings.has_base64,
            findings.size_bytes,
            findings.size_ok,
            findings.can_decode
        );

        if findings.criteria_met() == 4 {
            CriterionResult::passed(
                self.name(),
                PLOT_POINTS,
                format!("Plot validation passed: {}/{} points ({})", points, PLOT_POINTS, summary),
            )
        } else {
            CriterionResult::partial(
                self.name(),
                points,
                PLOT_POINTS,
                format!("Plot validation partial: {}/{} points ({})", points, PLOT_POINTS, summary),
            )
        }
    }
}
