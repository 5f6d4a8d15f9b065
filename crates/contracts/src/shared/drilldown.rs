use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::a001_sale_record::Record;

/// Where the user clicked: a whole row, or a single month cell of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillDownContext {
    /// `YYYY-MM` of the clicked cell; `None` for a row click
    #[serde(default)]
    pub month_key: Option<String>,
    /// Column title shown in the modal header
    #[serde(default)]
    pub display: Option<String>,
}

impl DrillDownContext {
    pub fn for_row() -> Self {
        Self::default()
    }

    pub fn for_month(month_key: &str, display: &str) -> Self {
        Self {
            month_key: Some(month_key.to_string()),
            display: Some(display.to_string()),
        }
    }
}

/// Data handed to the detail modal.
///
/// Totals are recomputed from `records` at click time, never copied from the
/// cached row values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillDownPayload {
    /// `None` when drilling into a bare record subset
    pub group_key: Option<String>,
    pub month_key: Option<String>,
    pub display: Option<String>,
    /// Cached row values, copied as rendered
    #[serde(default)]
    pub monthly_values: BTreeMap<String, f64>,
    #[serde(default)]
    pub aggregate_value: Option<f64>,
    /// Exactly the records behind the clicked row or cell
    pub records: Vec<Record>,
    pub total_revenue: f64,
    pub total_transactions: usize,
    pub unique_members: usize,
    pub average_ticket_value: f64,
    pub is_dynamic: bool,
    pub calculated_from_filtered: bool,
}
