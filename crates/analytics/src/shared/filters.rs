use contracts::domain::a001_sale_record::Record;
use contracts::shared::filters::RecordFilter;

use super::date_utils::parse_record_date;

/// Apply the dashboard filter bar to the loaded records.
///
/// Records with an unparseable date are dropped only when a date bound is
/// set. Location and category matches are case-insensitive.
pub fn apply_filter<'a>(records: &'a [Record], filter: &RecordFilter) -> Vec<&'a Record> {
    if filter.is_empty() {
        return records.iter().collect();
    }

    let kept: Vec<&Record> = records.iter().filter(|r| matches(r, filter)).collect();
    tracing::debug!("filter kept {} of {} records", kept.len(), records.len());
    kept
}

fn matches(record: &Record, filter: &RecordFilter) -> bool {
    if filter.has_date_bounds() {
        let Some(date) = record.payment_date.as_deref().and_then(parse_record_date) else {
            return false;
        };
        if filter.date_from.map(|from| date < from).unwrap_or(false) {
            return false;
        }
        if filter.date_to.map(|to| date > to).unwrap_or(false) {
            return false;
        }
    }

    allowed(&filter.locations, record.location.as_deref())
        && allowed(&filter.categories, record.cleaned_category.as_deref())
}

fn allowed(list: &[String], value: Option<&str>) -> bool {
    if list.is_empty() {
        return true;
    }
    match value.map(str::trim) {
        Some(v) => list.iter().any(|item| item.trim().eq_ignore_ascii_case(v)),
        None => false,
    }
}
