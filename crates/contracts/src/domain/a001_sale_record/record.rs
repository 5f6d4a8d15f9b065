use serde::{Deserialize, Serialize};

/// Canonical sale record (A001).
///
/// Produced once by the sheet importer and never mutated afterwards. Every
/// field is optional: missing text fields fall back to a label at grouping
/// time, missing numbers count as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub member_id: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,

    // Sums
    #[serde(default)]
    pub payment_value: Option<f64>,
    #[serde(default, rename = "paymentVAT")]
    pub payment_vat: Option<f64>,
    #[serde(default)]
    pub discount_amount: Option<f64>,
    #[serde(default)]
    pub discount_percentage: Option<f64>,

    /// Raw date text as exported (`DD/MM/YYYY`, ISO, ...)
    #[serde(default)]
    pub payment_date: Option<String>,

    // Dimensions
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub cleaned_category: Option<String>,
    #[serde(default)]
    pub cleaned_product: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub sold_by: Option<String>,
}

impl Record {
    pub fn payment_value_or_zero(&self) -> f64 {
        self.payment_value.unwrap_or(0.0)
    }

    pub fn payment_vat_or_zero(&self) -> f64 {
        self.payment_vat.unwrap_or(0.0)
    }

    pub fn discount_amount_or_zero(&self) -> f64 {
        self.discount_amount.unwrap_or(0.0)
    }

    pub fn discount_percentage_or_zero(&self) -> f64 {
        self.discount_percentage.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_sheet_json() {
        let json = r#"{
            "memberId": "A",
            "paymentValue": 100.0,
            "paymentVAT": 18.0,
            "paymentDate": "01/01/2024",
            "cleanedCategory": "Gear"
        }"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.member_id.as_deref(), Some("A"));
        assert_eq!(record.payment_vat_or_zero(), 18.0);
        assert_eq!(record.cleaned_product, None);
        assert_eq!(record.discount_amount_or_zero(), 0.0);
    }
}
