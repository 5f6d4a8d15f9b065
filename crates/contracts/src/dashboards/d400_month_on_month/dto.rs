use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::shared::filters::RecordFilter;
use crate::shared::metrics::MetricKind;
use crate::shared::pivot::{GroupField, MonthWindow, PivotTable, QuarterDescriptor};

/// Request for the month-on-month table (category -> product by default)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthOnMonthRequest {
    pub metric: MetricKind,
    #[serde(default)]
    pub window: MonthWindow,
    /// Outer grouping
    pub group_by: GroupField,
    /// Optional nested grouping inside each outer group
    #[serde(default)]
    pub then_by: Option<GroupField>,
    #[serde(default)]
    pub filter: RecordFilter,
}

impl MonthOnMonthRequest {
    pub fn category_product(metric: MetricKind) -> Self {
        Self {
            metric,
            window: MonthWindow::default(),
            group_by: GroupField::Category,
            then_by: Some(GroupField::Product),
            filter: RecordFilter::default(),
        }
    }
}

/// Response for the month-on-month table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthOnMonthResponse {
    pub table: PivotTable,
    /// Quarter columns covering `table.months`, in order
    pub quarters: Vec<QuarterDescriptor>,
    /// Totals row per quarter (sum of the month totals in the quarter)
    pub quarterly_totals: BTreeMap<String, f64>,
    /// Month-over-month change of the totals row, in percent
    pub totals_growth: BTreeMap<String, Option<f64>>,
}
