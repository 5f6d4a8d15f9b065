use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::metrics::ParseKindError;

/// Record field a table groups rows by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupField {
    Category,
    Product,
    Location,
    SoldBy,
    PaymentMethod,
}

impl GroupField {
    pub const ALL: [GroupField; 5] = [
        GroupField::Category,
        GroupField::Product,
        GroupField::Location,
        GroupField::SoldBy,
        GroupField::PaymentMethod,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupField::Category => "category",
            GroupField::Product => "product",
            GroupField::Location => "location",
            GroupField::SoldBy => "soldBy",
            GroupField::PaymentMethod => "paymentMethod",
        }
    }

    /// Label used for records whose field is missing or blank
    pub fn fallback_label(&self) -> &'static str {
        match self {
            GroupField::Category | GroupField::Product => "Uncategorized",
            GroupField::Location | GroupField::SoldBy | GroupField::PaymentMethod => "Unknown",
        }
    }
}

impl fmt::Display for GroupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupField {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        GroupField::ALL
            .iter()
            .copied()
            .find(|field| {
                field.as_str().eq_ignore_ascii_case(wanted)
                    || (wanted.eq_ignore_ascii_case("trainer") && *field == GroupField::SoldBy)
            })
            .ok_or_else(|| ParseKindError {
                kind: "group field",
                value: s.to_string(),
            })
    }
}

/// Span of calendar months shown as pivot columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum MonthWindow {
    /// From a fixed first month through the anchor month, inclusive
    FixedStart { year: i32, month: u32 },
    /// The last `months` months ending at the anchor month
    Rolling { months: u32 },
}

impl Default for MonthWindow {
    fn default() -> Self {
        MonthWindow::Rolling { months: 18 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_group_field() {
        assert_eq!("category".parse::<GroupField>(), Ok(GroupField::Category));
        assert_eq!("SOLDBY".parse::<GroupField>(), Ok(GroupField::SoldBy));
        assert_eq!("trainer".parse::<GroupField>(), Ok(GroupField::SoldBy));
        assert!("colour".parse::<GroupField>().is_err());
    }

    #[test]
    fn test_month_window_serde() {
        let window: MonthWindow =
            serde_json::from_str(r#"{"mode":"fixedStart","year":2024,"month":1}"#).unwrap();
        assert_eq!(window, MonthWindow::FixedStart { year: 2024, month: 1 });
        assert_eq!(MonthWindow::default(), MonthWindow::Rolling { months: 18 });
    }
}
