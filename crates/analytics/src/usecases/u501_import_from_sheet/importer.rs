use contracts::domain::a001_sale_record::Record;
use thiserror::Error;

use super::columns::*;

/// Failures that make a whole sheet unusable. Bad individual rows are
/// skipped, not reported here.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("sheet has no header row")]
    MissingHeader,

    #[error("no payment date column among headers: {0}")]
    NoDateColumn(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Normalised records plus row accounting
#[derive(Debug, Clone, Default)]
pub struct ImportSummary {
    pub records: Vec<Record>,
    pub skipped: usize,
}

/// Import a CSV export of the sales sheet.
pub fn import_csv(csv_text: &str) -> Result<ImportSummary, ImportError> {
    // Strip UTF-8 BOM if present
    let text = csv_text.trim_start_matches('\u{FEFF}');

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let index = header_index(&headers.iter().collect::<Vec<_>>())?;

    let mut summary = ImportSummary::default();
    for result in reader.records() {
        let row = match result {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("Skipping malformed CSV record: {}", e);
                summary.skipped += 1;
                continue;
            }
        };
        let cells: Vec<&str> = row.iter().collect();
        push_row(&index, &cells, &mut summary);
    }

    log_summary(&summary);
    Ok(summary)
}

/// Import a Sheets-style value grid whose first row holds the headers.
pub fn import_values(values: &[Vec<String>]) -> Result<ImportSummary, ImportError> {
    let Some((headers, rows)) = values.split_first() else {
        return Err(ImportError::MissingHeader);
    };
    let index = header_index(&headers.iter().map(String::as_str).collect::<Vec<_>>())?;

    let mut summary = ImportSummary::default();
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        push_row(&index, &cells, &mut summary);
    }

    log_summary(&summary);
    Ok(summary)
}

fn header_index(headers: &[&str]) -> Result<HeaderIndex, ImportError> {
    let index = HeaderIndex::new(headers.iter().copied());
    if index.is_empty() {
        return Err(ImportError::MissingHeader);
    }
    if !index.has_any(PAYMENT_DATE) {
        return Err(ImportError::NoDateColumn(headers.join(", ")));
    }
    tracing::debug!("sheet headers: {:?}", headers);
    Ok(index)
}

fn push_row(index: &HeaderIndex, cells: &[&str], summary: &mut ImportSummary) {
    if cells.iter().all(|c| c.trim().is_empty()) {
        summary.skipped += 1;
        return;
    }
    summary.records.push(normalize_row(index, cells));
}

fn log_summary(summary: &ImportSummary) {
    tracing::info!(
        "Sheet import complete: {} records, {} skipped",
        summary.records.len(),
        summary.skipped
    );
}

/// Map one sheet row onto the canonical record shape.
pub fn normalize_row(index: &HeaderIndex, cells: &[&str]) -> Record {
    let text = |aliases: &[&str]| -> Option<String> {
        index
            .get(cells, aliases)
            .filter(|v| *v != "-")
            .map(str::to_string)
    };
    let number = |aliases: &[&str]| -> Option<f64> { index.get(cells, aliases).and_then(parse_amount) };

    Record {
        transaction_id: text(TRANSACTION_ID),
        member_id: text(MEMBER_ID),
        customer_name: text(CUSTOMER_NAME),
        payment_value: number(PAYMENT_VALUE),
        payment_vat: number(PAYMENT_VAT),
        discount_amount: number(DISCOUNT_AMOUNT),
        discount_percentage: number(DISCOUNT_PERCENTAGE),
        payment_date: text(PAYMENT_DATE),
        payment_method: text(PAYMENT_METHOD),
        cleaned_category: text(CATEGORY),
        cleaned_product: text(PRODUCT),
        location: text(LOCATION),
        sold_by: text(SOLD_BY),
    }
}

/// Parse an exported amount: `₹1,234.50`, `Rs. 1,200`, `INR 500`, `12.5%`, `-300`.
/// Commas are thousands separators. Blank cells and `-` are empty; any other
/// non-numeric leftover is logged and treated as empty.
pub fn parse_amount(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return None;
    }

    let mut token = trimmed;
    for prefix in ["₹", "Rs.", "Rs", "INR"] {
        if let Some(rest) = token.strip_prefix(prefix) {
            token = rest.trim_start();
            break;
        }
    }
    if let Some(rest) = token.strip_suffix('%') {
        token = rest.trim_end();
    }
    let token = token.replace(',', "");

    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            tracing::warn!("unparseable amount {:?}", s);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "\u{FEFF}Member ID,Customer Name,Payment Value,Payment VAT,Payment Date,Cleaned Category,Cleaned Product,Calculated Location,Sold By,Discount Amount -Mrp- Payment Value,Discount Percentage - discount amount/mrp*100
A,Asha,\"1,180.00\",180,01/01/2024 10:00:00,Gear,Mat,\"Supreme HQ, Bandra\",-,120,10%
B,Ben,200,,15/01/2024,Gear,Bottle,,Riya,,
,,,,,,,,,,
";

    #[test]
    fn test_import_csv() {
        let summary = import_csv(SHEET).unwrap();
        assert_eq!(summary.records.len(), 2);
        assert_eq!(summary.skipped, 1);

        let first = &summary.records[0];
        assert_eq!(first.member_id.as_deref(), Some("A"));
        assert_eq!(first.payment_value, Some(1180.0));
        assert_eq!(first.payment_vat, Some(180.0));
        assert_eq!(first.location.as_deref(), Some("Supreme HQ, Bandra"));
        assert_eq!(first.sold_by, None);
        assert_eq!(first.discount_amount, Some(120.0));
        assert_eq!(first.discount_percentage, Some(10.0));

        let second = &summary.records[1];
        assert_eq!(second.payment_vat, None);
        assert_eq!(second.location, None);
        assert_eq!(second.sold_by.as_deref(), Some("Riya"));
    }

    #[test]
    fn test_import_values_with_camel_case_headers() {
        let values = vec![
            vec!["memberId".to_string(), "paymentValue".to_string(), "paymentDate".to_string()],
            vec!["A".to_string(), "50".to_string(), "2024-02-01".to_string()],
        ];
        let summary = import_values(&values).unwrap();
        assert_eq!(summary.records.len(), 1);
        assert_eq!(summary.records[0].payment_value, Some(50.0));
        assert_eq!(summary.records[0].payment_date.as_deref(), Some("2024-02-01"));
    }

    #[test]
    fn test_missing_header_and_date_column() {
        assert!(matches!(import_values(&[]), Err(ImportError::MissingHeader)));
        assert!(matches!(import_csv(""), Err(ImportError::MissingHeader)));

        let values = vec![vec!["Member ID".to_string(), "Payment Value".to_string()]];
        assert!(matches!(import_values(&values), Err(ImportError::NoDateColumn(_))));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("₹1,234.50"), Some(1234.5));
        assert_eq!(parse_amount("12.5%"), Some(12.5));
        assert_eq!(parse_amount("-300"), Some(-300.0));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("-"), None);
        assert_eq!(parse_amount("n/a"), None);
    }

    #[test]
    fn test_parse_amount_currency_prefixes() {
        assert_eq!(parse_amount("Rs. 1,200"), Some(1200.0));
        assert_eq!(parse_amount("Rs 99"), Some(99.0));
        assert_eq!(parse_amount("INR 2,50,000"), Some(250000.0));
        assert_eq!(parse_amount("₹ 10.5"), Some(10.5));
        assert_eq!(parse_amount(" 15 % "), Some(15.0));
    }

    #[test]
    fn test_parse_amount_rejects_trailing_text() {
        assert_eq!(parse_amount("500 net"), None);
        assert_eq!(parse_amount("12-34"), None);
        assert_eq!(parse_amount("1e400"), None);
    }
}
