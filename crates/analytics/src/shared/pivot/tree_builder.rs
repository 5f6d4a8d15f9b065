use chrono::{Datelike, NaiveDate};
use contracts::domain::a001_sale_record::Record;
use contracts::shared::metrics::MetricKind;
use contracts::shared::pivot::{
    GroupField, GroupNode, MonthDescriptor, PivotTable, QuarterDescriptor,
};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use super::classifier::{group_by_field, Groups};
use super::months::quarter_key;
use crate::shared::date_utils::{record_date, record_month_key};
use crate::shared::metrics::{compute_metric, growth};

pub const TOTAL_LABEL: &str = "Total";

/// Records bucketed by `YYYY-MM` of their parsed payment date. Records with
/// an unparseable date land in no bucket.
fn bucket_by_month<'a>(records: &[&'a Record]) -> HashMap<String, Vec<&'a Record>> {
    let mut buckets: HashMap<String, Vec<&'a Record>> = HashMap::new();
    for &record in records {
        if let Some(key) = record_month_key(record) {
            buckets.entry(key).or_default().push(record);
        }
    }
    buckets
}

/// Build one row: a dense month map plus the ungated aggregate.
pub fn build_node(
    group_key: &str,
    records: &[&Record],
    months: &[MonthDescriptor],
    metric: MetricKind,
    level: u32,
) -> GroupNode {
    let buckets = bucket_by_month(records);
    let empty: Vec<&Record> = Vec::new();

    let monthly_values = months
        .iter()
        .map(|m| {
            let subset = buckets.get(&m.key).unwrap_or(&empty);
            (m.key.clone(), compute_metric(subset.iter().copied(), metric))
        })
        .collect();

    GroupNode {
        group_key: group_key.to_string(),
        level,
        children: vec![],
        monthly_values,
        aggregate_value: compute_metric(records.iter().copied(), metric),
        raw_data: records.iter().map(|&r| r.clone()).collect(),
        is_total: false,
    }
}

/// Highest aggregate first; ties keep their current (first-seen) order.
pub fn sort_by_aggregate(nodes: &mut [GroupNode]) {
    nodes.sort_by(|a, b| {
        b.aggregate_value
            .partial_cmp(&a.aggregate_value)
            .unwrap_or(Ordering::Equal)
    });
}

/// One row per group, sorted by aggregate value
pub fn assemble(groups: &Groups<'_>, months: &[MonthDescriptor], metric: MetricKind) -> Vec<GroupNode> {
    let mut nodes: Vec<GroupNode> = groups
        .iter()
        .map(|(key, records)| build_node(key, records, months, metric, 0))
        .collect();
    sort_by_aggregate(&mut nodes);
    nodes
}

/// Two-level rows: each outer group carries its inner groups as children.
///
/// Outer rows are computed from their own records, not summed from children.
pub fn assemble_hierarchy<'a, I>(
    records: I,
    outer: GroupField,
    inner: GroupField,
    months: &[MonthDescriptor],
    metric: MetricKind,
) -> Vec<GroupNode>
where
    I: IntoIterator<Item = &'a Record>,
{
    let outer_groups = group_by_field(records, outer);

    let mut nodes: Vec<GroupNode> = outer_groups
        .iter()
        .map(|(key, members)| {
            let inner_groups = group_by_field(members.iter().copied(), inner);
            let mut children: Vec<GroupNode> = inner_groups
                .iter()
                .map(|(child_key, child_records)| {
                    build_node(child_key, child_records, months, metric, 1)
                })
                .collect();
            sort_by_aggregate(&mut children);

            let mut node = build_node(key, members, months, metric, 0);
            node.children = children;
            node
        })
        .collect();

    sort_by_aggregate(&mut nodes);
    nodes
}

/// Grand-total row: column-wise sum of the given rows.
///
/// The sum applies to every metric kind, averages and distinct counts
/// included, so the total of an `atv` table is the sum of row averages.
pub fn grand_totals(rows: &[GroupNode], months: &[MonthDescriptor]) -> GroupNode {
    let monthly_values = months
        .iter()
        .map(|m| {
            let sum: f64 = rows.iter().map(|row| row.monthly_value(&m.key)).sum();
            (m.key.clone(), sum)
        })
        .collect();

    GroupNode {
        group_key: TOTAL_LABEL.to_string(),
        level: 0,
        children: vec![],
        monthly_values,
        aggregate_value: rows.iter().map(|row| row.aggregate_value).sum(),
        raw_data: rows.iter().flat_map(|row| row.raw_data.iter().cloned()).collect(),
        is_total: true,
    }
}

/// Group, pivot, sort and total in one call.
pub fn build_pivot_table<'a, I>(
    records: I,
    group_by: GroupField,
    then_by: Option<GroupField>,
    months: Vec<MonthDescriptor>,
    metric: MetricKind,
) -> PivotTable
where
    I: IntoIterator<Item = &'a Record>,
{
    let rows = match then_by {
        Some(inner) => assemble_hierarchy(records, group_by, inner, &months, metric),
        None => assemble(&group_by_field(records, group_by), &months, metric),
    };
    let totals = grand_totals(&rows, &months);

    tracing::debug!(
        "pivot {} by {}: {} rows x {} months, {} records",
        metric,
        group_by,
        rows.len(),
        months.len(),
        totals.raw_data.len()
    );

    PivotTable {
        metric,
        months,
        rows,
        totals,
    }
}

/// Percent change against the previous month column; the first is `None`.
pub fn monthly_growth(node: &GroupNode, months: &[MonthDescriptor]) -> BTreeMap<String, Option<f64>> {
    let mut result = BTreeMap::new();
    let mut previous: Option<f64> = None;
    for m in months {
        let current = node.monthly_value(&m.key);
        result.insert(m.key.clone(), previous.and_then(|p| growth(p, current)));
        previous = Some(current);
    }
    result
}

/// Metric per quarter column, recomputed from the node's records.
pub fn quarterly_values(
    node: &GroupNode,
    quarters: &[QuarterDescriptor],
    metric: MetricKind,
) -> BTreeMap<String, f64> {
    let mut by_quarter: HashMap<String, Vec<&Record>> = HashMap::new();
    for record in &node.raw_data {
        if let Some(date) = record_date(record) {
            by_quarter
                .entry(quarter_key_of(date))
                .or_default()
                .push(record);
        }
    }

    quarters
        .iter()
        .map(|q| {
            let value = by_quarter
                .get(&q.key)
                .map(|records| compute_metric(records.iter().copied(), metric))
                .unwrap_or(0.0);
            (q.key.clone(), value)
        })
        .collect()
}

/// Quarter totals as sums of the month values inside each quarter
pub fn sum_months_by_quarter(
    node: &GroupNode,
    months: &[MonthDescriptor],
    quarters: &[QuarterDescriptor],
) -> BTreeMap<String, f64> {
    let mut result: BTreeMap<String, f64> = quarters.iter().map(|q| (q.key.clone(), 0.0)).collect();
    for m in months {
        if let Some(slot) = result.get_mut(&quarter_key(m.year, m.quarter)) {
            *slot += node.monthly_value(&m.key);
        }
    }
    result
}

fn quarter_key_of(date: NaiveDate) -> String {
    quarter_key(date.year(), date.month().div_ceil(3))
}
