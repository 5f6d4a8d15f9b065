use serde::{Deserialize, Serialize};

use crate::shared::filters::RecordFilter;
use crate::shared::metrics::MetricKind;
use crate::shared::pivot::GroupField;

/// Request for the year-on-year comparison table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearOnYearRequest {
    pub metric: MetricKind,
    pub group_by: GroupField,
    /// Year compared against the one before it; defaults to the clock's year
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub filter: RecordFilter,
}

/// Same calendar month in two consecutive years
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearOnYearCell {
    /// 1-12
    pub month: u32,
    /// e.g. "Mar"
    pub display: String,
    pub current: f64,
    pub previous: f64,
    /// Percent change, `None` when the previous value is ~0
    pub growth: Option<f64>,
}

/// One group of the year-on-year table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearOnYearRow {
    pub group_key: String,
    /// Always twelve cells, January first
    pub months: Vec<YearOnYearCell>,
    pub current_total: f64,
    pub previous_total: f64,
    pub growth: Option<f64>,
    #[serde(default)]
    pub is_total: bool,
}

/// Response for the year-on-year comparison table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearOnYearResponse {
    pub metric: MetricKind,
    pub current_year: i32,
    pub previous_year: i32,
    pub rows: Vec<YearOnYearRow>,
    pub totals: YearOnYearRow,
}
