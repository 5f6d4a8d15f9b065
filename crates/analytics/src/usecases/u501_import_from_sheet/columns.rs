//! Header aliases for sheet exports
//!
//! Headers are compared after lowercasing and dropping every character that
//! is not a letter or digit, so `Payment Value` and `paymentValue` are the
//! same column. Within one alias list the first non-empty cell wins.

use std::collections::HashMap;

pub const TRANSACTION_ID: &[&str] = &["Payment Transaction ID", "Transaction ID", "Sale Item ID"];
pub const MEMBER_ID: &[&str] = &["Member ID", "Customer ID"];
pub const CUSTOMER_NAME: &[&str] = &["Customer Name", "Member Name"];
pub const PAYMENT_VALUE: &[&str] = &["Payment Value", "Amount"];
pub const PAYMENT_VAT: &[&str] = &["Payment VAT", "VAT"];
pub const PAYMENT_DATE: &[&str] = &["Payment Date", "Date"];
pub const PAYMENT_METHOD: &[&str] = &["Payment Method"];
pub const CATEGORY: &[&str] = &["Cleaned Category", "Category"];
pub const PRODUCT: &[&str] = &["Cleaned Product", "Payment Item", "Product"];
pub const LOCATION: &[&str] = &["Calculated Location", "Location"];
pub const SOLD_BY: &[&str] = &["Sold By", "Trainer"];
pub const DISCOUNT_AMOUNT: &[&str] = &["Discount Amount -Mrp- Payment Value", "Discount Amount"];
pub const DISCOUNT_PERCENTAGE: &[&str] = &[
    "Discount Percentage - discount amount/mrp*100",
    "Discount Percentage",
];

pub fn normalize_header(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Column positions by normalised header; first occurrence wins.
#[derive(Debug, Clone, Default)]
pub struct HeaderIndex {
    positions: HashMap<String, usize>,
}

impl HeaderIndex {
    pub fn new<'a, I>(headers: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut positions = HashMap::new();
        for (i, header) in headers.into_iter().enumerate() {
            let key = normalize_header(header);
            if !key.is_empty() {
                positions.entry(key).or_insert(i);
            }
        }
        Self { positions }
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn has_any(&self, aliases: &[&str]) -> bool {
        aliases
            .iter()
            .any(|a| self.positions.contains_key(&normalize_header(a)))
    }

    /// First non-empty trimmed cell among the aliases
    pub fn get<'r>(&self, row: &[&'r str], aliases: &[&str]) -> Option<&'r str> {
        aliases
            .iter()
            .filter_map(|a| self.positions.get(&normalize_header(a)))
            .filter_map(|&i| row.get(i))
            .map(|cell| cell.trim())
            .find(|cell| !cell.is_empty())
    }
}
