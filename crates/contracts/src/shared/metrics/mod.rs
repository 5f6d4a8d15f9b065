use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Metric identity
// ---------------------------------------------------------------------------

/// Closed set of metrics a pivot table can show (one per metric tab).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKind {
    Revenue,
    Transactions,
    Members,
    Units,
    /// Average transaction value
    Atv,
    /// Average unit value
    Auv,
    /// Average sale value (per member)
    Asv,
    /// Units per transaction
    Upt,
    Vat,
    NetRevenue,
    DiscountValue,
    DiscountPercentage,
}

impl MetricKind {
    pub const ALL: [MetricKind; 12] = [
        MetricKind::Revenue,
        MetricKind::Transactions,
        MetricKind::Members,
        MetricKind::Units,
        MetricKind::Atv,
        MetricKind::Auv,
        MetricKind::Asv,
        MetricKind::Upt,
        MetricKind::Vat,
        MetricKind::NetRevenue,
        MetricKind::DiscountValue,
        MetricKind::DiscountPercentage,
    ];

    /// Identifier used in config files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Revenue => "revenue",
            MetricKind::Transactions => "transactions",
            MetricKind::Members => "members",
            MetricKind::Units => "units",
            MetricKind::Atv => "atv",
            MetricKind::Auv => "auv",
            MetricKind::Asv => "asv",
            MetricKind::Upt => "upt",
            MetricKind::Vat => "vat",
            MetricKind::NetRevenue => "netRevenue",
            MetricKind::DiscountValue => "discountValue",
            MetricKind::DiscountPercentage => "discountPercentage",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown identifier passed where a closed enum was expected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseKindError {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for MetricKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseKindError {
                kind: "metric",
                value: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Display metadata
// ---------------------------------------------------------------------------

/// How a metric value is rendered in a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ValueFormat {
    Money { decimals: u8 },
    Number { decimals: u8 },
    Percent { decimals: u8 },
    Integer,
}

/// Static metadata describing one metric tab.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricMeta {
    pub kind: MetricKind,
    pub label: String,
    pub short_label: String,
    pub format: ValueFormat,
    pub description: Option<String>,
}
