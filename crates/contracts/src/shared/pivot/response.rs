use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::a001_sale_record::Record;
use crate::shared::metrics::MetricKind;

use super::months::MonthDescriptor;

/// One row of a pivot table.
///
/// `monthly_values[k]` is the metric over the records of `raw_data` dated in
/// month `k`; `aggregate_value` is the metric over all of `raw_data`. The
/// grand-total node is the exception: its values are column sums of the
/// rows above it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupNode {
    pub group_key: String,
    /// 0 = outer group, 1 = nested group
    pub level: u32,
    /// Nested groups; empty on leaf rows, whose records live in `raw_data`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<GroupNode>,
    /// Dense: one entry per month column
    pub monthly_values: BTreeMap<String, f64>,
    pub aggregate_value: f64,
    pub raw_data: Vec<Record>,
    #[serde(default)]
    pub is_total: bool,
}

impl GroupNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Value for a month column, 0 when the column is absent
    pub fn monthly_value(&self, month_key: &str) -> f64 {
        self.monthly_values.get(month_key).copied().unwrap_or(0.0)
    }
}

/// Fully assembled pivot: rows sorted for display plus the grand total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotTable {
    pub metric: MetricKind,
    pub months: Vec<MonthDescriptor>,
    pub rows: Vec<GroupNode>,
    pub totals: GroupNode,
}
