//! Yearly financial snapshots and the ratios derived from them.
//!
//! Precomputed ratios from the backend always win; local computation is a
//! fallback and never substitutes zero for a missing input.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

pub const MSG_LOAD_FAILED: &str = "인사이트 로딩 실패";
pub const MSG_LOADING: &str = "분석 로딩 중...";
pub const MSG_NO_SELECTION: &str = "오른쪽 위시리스트에서 기업을 선택하세요.";
pub const MSG_NO_DATA: &str = "데이터가 없습니다. 연도/보고서 타입을 확인하세요.";
pub const MSG_NOT_AVAILABLE: &str = "데이터 없음";
pub const INTERPRETATION_FLOW: &str =
    "매출 증가 → 이익률 개선 → 유보율 확대 → 부채 축소 → 재무 안정성 상승";

/// Backend sends the year either as a number or a string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Year {
    Number(i64),
    Text(String),
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Year::Number(n) => write!(f, "{}", n),
            Year::Text(s) => f.write_str(s),
        }
    }
}

/// One year's record as returned by `/api/insights/:corp_code`.
///
/// Figures are read leniently: numeric strings are parsed, anything else
/// that is not a finite number becomes a missing value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct YearRecord {
    pub year: Option<Year>,
    #[serde(deserialize_with = "lenient_number")]
    pub revenue: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub op: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub ni: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub equity: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub liab: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub liabilities: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub retained: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub op_margin: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub ni_margin: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub debt_ratio: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub retained_ratio: Option<f64>,
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number.filter(|n| n.is_finite()))
}

impl YearRecord {
    pub fn total_liabilities(&self) -> Option<f64> {
        self.liab.or(self.liabilities)
    }

    pub fn year_label(&self) -> String {
        self.year.as_ref().map(Year::to_string).unwrap_or_default()
    }
}

/// Body of the insights endpoint
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightSnapshot {
    pub corp_name: Option<String>,
    pub snapshots: Vec<YearRecord>,
}

/// Query parameters sent with every insight fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightQuery {
    pub years: u32,
    pub reprt: String,
    pub fs: String,
}

impl Default for InsightQuery {
    /// Five years, automatic report priority (11014 > 11013 > 11012 > 11011), consolidated statements
    fn default() -> Self {
        Self {
            years: 5,
            reprt: "auto".to_string(),
            fs: "CFS".to_string(),
        }
    }
}

/// `numerator / denominator × 100`, missing when either side is missing or
/// the denominator is zero.
pub fn percent_of(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    let (n, d) = (numerator?, denominator?);
    if d == 0.0 {
        return None;
    }
    let value = n / d * 100.0;
    value.is_finite().then_some(value)
}

/// Display-ready ratios for one year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedRow {
    pub year: String,
    pub revenue: Option<f64>,
    pub op_margin: Option<f64>,
    pub ni_margin: Option<f64>,
    pub debt_ratio: Option<f64>,
    pub retained_ratio: Option<f64>,
}

impl DerivedRow {
    pub fn from_record(record: &YearRecord) -> Self {
        Self {
            year: record.year_label(),
            revenue: record.revenue,
            op_margin: record
                .op_margin
                .or_else(|| percent_of(record.op, record.revenue)),
            ni_margin: record
                .ni_margin
                .or_else(|| percent_of(record.ni, record.revenue)),
            debt_ratio: record
                .debt_ratio
                .or_else(|| percent_of(record.total_liabilities(), record.equity)),
            retained_ratio: record
                .retained_ratio
                .or_else(|| percent_of(record.retained, record.equity)),
        }
    }

    pub fn value(&self, metric: InsightMetric) -> Option<f64> {
        match metric {
            InsightMetric::Revenue => self.revenue,
            InsightMetric::OpMargin => self.op_margin,
            InsightMetric::NiMargin => self.ni_margin,
            InsightMetric::DebtRatio => self.debt_ratio,
            InsightMetric::RetainedRatio => self.retained_ratio,
        }
    }
}

pub fn derive_rows(records: &[YearRecord]) -> Vec<DerivedRow> {
    records.iter().map(DerivedRow::from_record).collect()
}

/// First present value walking from the newest (last) entry backwards.
pub fn latest_valid<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
    I::IntoIter: DoubleEndedIterator,
{
    values.into_iter().rev().flatten().next()
}

/// Presentation colour bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
pub enum Tone {
    #[strum(serialize = "text-gray-900")]
    Neutral,
    #[strum(serialize = "text-gray-400")]
    Muted,
    #[strum(serialize = "text-blue-600")]
    Blue,
    #[strum(serialize = "text-green-600")]
    Green,
    #[strum(serialize = "text-yellow-600")]
    Yellow,
    #[strum(serialize = "text-red-600")]
    Red,
}

impl Tone {
    pub fn css_class(&self) -> &'static str {
        (*self).into()
    }
}

/// Higher is better: `>= good` green, `>= warn` yellow, otherwise red.
pub fn rising_tone(value: Option<f64>, good: f64, warn: f64) -> Tone {
    match value {
        None => Tone::Muted,
        Some(v) if v >= good => Tone::Green,
        Some(v) if v >= warn => Tone::Yellow,
        Some(_) => Tone::Red,
    }
}

pub fn op_margin_tone(value: Option<f64>) -> Tone {
    rising_tone(value, 10.0, 5.0)
}

pub fn ni_margin_tone(value: Option<f64>) -> Tone {
    rising_tone(value, 8.0, 3.0)
}

pub fn retained_ratio_tone(value: Option<f64>) -> Tone {
    rising_tone(value, 200.0, 100.0)
}

/// Lower is better; band upper bounds are inclusive.
pub fn debt_ratio_tone(value: Option<f64>) -> Tone {
    match value {
        None => Tone::Muted,
        Some(v) if v <= 100.0 => Tone::Blue,
        Some(v) if v <= 200.0 => Tone::Green,
        Some(v) if v <= 300.0 => Tone::Yellow,
        Some(_) => Tone::Red,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    /// Hundreds of millions of won, two decimals
    Eok,
    /// Percentage, one decimal
    Pct,
}

impl ValueFormat {
    pub fn format(&self, value: Option<f64>) -> String {
        match (self, value) {
            (_, None) => MSG_NOT_AVAILABLE.to_string(),
            (ValueFormat::Eok, Some(v)) => format!("{:.2}억", v / 1e8),
            (ValueFormat::Pct, Some(v)) => format!("{:.1}%", v),
        }
    }

    /// Card headline: a dash instead of the "no data" text
    pub fn format_or_dash(&self, value: Option<f64>) -> String {
        match value {
            Some(_) => self.format(value),
            None => "-".to_string(),
        }
    }
}

/// The five dashboard cards, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum InsightMetric {
    Revenue,
    OpMargin,
    NiMargin,
    DebtRatio,
    RetainedRatio,
}

impl InsightMetric {
    pub fn key(&self) -> &'static str {
        (*self).into()
    }

    pub fn title(&self) -> &'static str {
        match self {
            InsightMetric::Revenue => "매출액",
            InsightMetric::OpMargin => "영업이익률",
            InsightMetric::NiMargin => "순이익률",
            InsightMetric::DebtRatio => "부채비율",
            InsightMetric::RetainedRatio => "유보율",
        }
    }

    pub fn format(&self) -> ValueFormat {
        match self {
            InsightMetric::Revenue => ValueFormat::Eok,
            _ => ValueFormat::Pct,
        }
    }

    pub fn tone(&self, value: Option<f64>) -> Tone {
        match self {
            InsightMetric::Revenue => Tone::Neutral,
            InsightMetric::OpMargin => op_margin_tone(value),
            InsightMetric::NiMargin => ni_margin_tone(value),
            InsightMetric::DebtRatio => debt_ratio_tone(value),
            InsightMetric::RetainedRatio => retained_ratio_tone(value),
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            InsightMetric::Revenue => "매출액: 기업 규모와 성장성",
            InsightMetric::OpMargin => "영업이익률: 본업 수익성",
            InsightMetric::NiMargin => "순이익률: 전체 경영 효율",
            InsightMetric::DebtRatio => "부채비율: 재무 건전성",
            InsightMetric::RetainedRatio => "유보율: 내부 자본 축적력",
        }
    }

    /// Legend shown under the cards
    pub fn ranges(&self) -> &'static [(&'static str, Tone)] {
        match self {
            InsightMetric::Revenue => &[],
            InsightMetric::OpMargin => &[
                ("10% 이상", Tone::Green),
                (" 5~10%", Tone::Yellow),
                (" 5% 미만", Tone::Red),
            ],
            InsightMetric::NiMargin => &[
                ("8% 이상", Tone::Green),
                (" 3~8%", Tone::Yellow),
                (" 3% 미만", Tone::Red),
            ],
            InsightMetric::DebtRatio => &[
                ("100% 이하", Tone::Blue),
                (" 100~200%", Tone::Green),
                (" 200~300%", Tone::Yellow),
                (" 300% 이상", Tone::Red),
            ],
            InsightMetric::RetainedRatio => &[
                ("200% 이상", Tone::Green),
                (" 100~200%", Tone::Yellow),
                (" 100% 미만", Tone::Red),
            ],
        }
    }
}

/// Everything one card needs to render
#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub metric: InsightMetric,
    pub latest: Option<f64>,
    pub headline: String,
    pub tone: Tone,
    pub series: Vec<(String, Option<f64>)>,
}

pub fn build_cards(records: &[YearRecord]) -> Vec<MetricCard> {
    let rows = derive_rows(records);
    InsightMetric::iter()
        .map(|metric| {
            let latest = latest_valid(rows.iter().map(|row| row.value(metric)));
            MetricCard {
                metric,
                latest,
                headline: metric.format().format_or_dash(latest),
                tone: metric.tone(latest),
                series: rows
                    .iter()
                    .map(|row| (row.year.clone(), row.value(metric)))
                    .collect(),
            }
        })
        .collect()
}

/// Polyline segments for a sparkline, split wherever a year is missing.
///
/// Points are laid out left to right across `width`; the y axis spans the
/// min/max of present values (a flat series sits on the middle line).
pub fn sparkline_segments(values: &[Option<f64>], width: f64, height: f64) -> Vec<Vec<(f64, f64)>> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    let Some(min) = present.iter().copied().reduce(f64::min) else {
        return Vec::new();
    };
    let max = present.iter().copied().fold(min, f64::max);
    let span = max - min;
    let step = if values.len() > 1 {
        width / (values.len() - 1) as f64
    } else {
        0.0
    };

    let mut segments = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    for (idx, value) in values.iter().enumerate() {
        match value {
            Some(v) => {
                let x = if values.len() > 1 { idx as f64 * step } else { width / 2.0 };
                let y = if span == 0.0 {
                    height / 2.0
                } else {
                    height - (v - min) / span * height
                };
                current.push((x, y));
            }
            None => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}
