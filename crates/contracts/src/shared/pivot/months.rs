use serde::{Deserialize, Serialize};

/// One pivot column: a calendar month.
///
/// `key` is `YYYY-MM`, so lexical order of keys is chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthDescriptor {
    pub key: String,
    /// e.g. "Mar 2024"
    pub display: String,
    pub year: i32,
    /// 1-12
    pub month: u32,
    /// 1-4
    pub quarter: u32,
}

/// Quarter column derived from a month list
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuarterDescriptor {
    /// e.g. "2024-Q1"
    pub key: String,
    /// e.g. "Q1 2024"
    pub display: String,
    pub year: i32,
    pub quarter: u32,
}
