use chrono::{Datelike, NaiveDate};
use contracts::dashboards::d401_year_on_year::{
    YearOnYearCell, YearOnYearRequest, YearOnYearResponse, YearOnYearRow,
};
use contracts::domain::a001_sale_record::Record;
use contracts::shared::metrics::MetricKind;
use contracts::shared::pivot::{GroupNode, MonthWindow};

use crate::shared::clock::Clock;
use crate::shared::date_utils::record_date;
use crate::shared::filters::apply_filter;
use crate::shared::metrics::{compute_metric, growth};
use crate::shared::pivot::{build_months, build_node, group_by_field, month_name, TOTAL_LABEL};

/// Build the year-on-year table: each calendar month of `year` against the
/// same month a year earlier.
pub fn get_year_on_year(
    records: &[Record],
    request: &YearOnYearRequest,
    clock: &impl Clock,
) -> YearOnYearResponse {
    let current_year = request.year.unwrap_or_else(|| clock.today().year());

    // Both years must lie inside chrono's calendar range.
    let window = current_year.checked_sub(1).and_then(|previous_year| {
        NaiveDate::from_ymd_opt(previous_year, 1, 1)?;
        let anchor = NaiveDate::from_ymd_opt(current_year, 12, 1)?;
        Some((previous_year, anchor))
    });
    let Some((previous_year, anchor)) = window else {
        tracing::warn!("year-on-year: year {} is out of range", current_year);
        return YearOnYearResponse {
            metric: request.metric,
            current_year,
            previous_year: current_year.saturating_sub(1),
            rows: vec![],
            totals: total_row(&[]),
        };
    };

    let filtered = apply_filter(records, &request.filter);
    let groups = group_by_field(filtered.iter().copied(), request.group_by);

    // Two full calendar years of month columns
    let months = build_months(
        MonthWindow::FixedStart {
            year: previous_year,
            month: 1,
        },
        anchor,
    );

    let mut rows: Vec<YearOnYearRow> = groups
        .iter()
        .map(|(key, members)| {
            let node = build_node(key, members, &months, request.metric, 0);
            build_row(&node, request.metric, current_year, previous_year)
        })
        .collect();

    rows.sort_by(|a, b| {
        b.current_total
            .partial_cmp(&a.current_total)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let totals = total_row(&rows);

    tracing::debug!(
        "year-on-year {} by {}: {} vs {}, {} rows",
        request.metric,
        request.group_by,
        current_year,
        previous_year,
        rows.len()
    );

    YearOnYearResponse {
        metric: request.metric,
        current_year,
        previous_year,
        rows,
        totals,
    }
}

fn build_row(node: &GroupNode, metric: MetricKind, current_year: i32, previous_year: i32) -> YearOnYearRow {
    let months = (1..=12)
        .map(|month| {
            let current = node.monthly_value(&format!("{:04}-{:02}", current_year, month));
            let previous = node.monthly_value(&format!("{:04}-{:02}", previous_year, month));
            YearOnYearCell {
                month,
                display: month_name(month).to_string(),
                current,
                previous,
                growth: growth(previous, current),
            }
        })
        .collect();

    let current_total = metric_in_year(&node.raw_data, metric, current_year);
    let previous_total = metric_in_year(&node.raw_data, metric, previous_year);

    YearOnYearRow {
        group_key: node.group_key.clone(),
        months,
        current_total,
        previous_total,
        growth: growth(previous_total, current_total),
        is_total: false,
    }
}

fn metric_in_year(records: &[Record], metric: MetricKind, year: i32) -> f64 {
    compute_metric(
        records
            .iter()
            .filter(|r| record_date(r).is_some_and(|d| d.year() == year)),
        metric,
    )
}

/// Column sums of the group rows, same policy as the month-on-month totals
fn total_row(rows: &[YearOnYearRow]) -> YearOnYearRow {
    let months = (1..=12u32)
        .map(|month| {
            let idx = (month - 1) as usize;
            let current: f64 = rows.iter().map(|r| r.months[idx].current).sum();
            let previous: f64 = rows.iter().map(|r| r.months[idx].previous).sum();
            YearOnYearCell {
                month,
                display: month_name(month).to_string(),
                current,
                previous,
                growth: growth(previous, current),
            }
        })
        .collect();

    let current_total: f64 = rows.iter().map(|r| r.current_total).sum();
    let previous_total: f64 = rows.iter().map(|r| r.previous_total).sum();

    YearOnYearRow {
        group_key: TOTAL_LABEL.to_string(),
        months,
        current_total,
        previous_total,
        growth: growth(previous_total, current_total),
        is_total: true,
    }
}
