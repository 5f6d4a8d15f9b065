use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Filter applied to the loaded records before any table is built.
///
/// Empty lists mean "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFilter {
    /// Inclusive lower bound
    #[serde(default)]
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound
    #[serde(default)]
    pub date_to: Option<NaiveDate>,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl RecordFilter {
    pub fn is_empty(&self) -> bool {
        self.date_from.is_none()
            && self.date_to.is_none()
            && self.locations.is_empty()
            && self.categories.is_empty()
    }

    pub fn has_date_bounds(&self) -> bool {
        self.date_from.is_some() || self.date_to.is_some()
    }
}
