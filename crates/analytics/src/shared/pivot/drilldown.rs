use contracts::domain::a001_sale_record::Record;
use contracts::shared::drilldown::{DrillDownContext, DrillDownPayload};
use contracts::shared::metrics::MetricKind;
use contracts::shared::pivot::GroupNode;
use std::collections::BTreeMap;

use crate::shared::date_utils::record_month_key;
use crate::shared::metrics::summarize;

/// What was clicked: a rendered row, or a bare record subset.
#[derive(Debug, Clone, Copy)]
pub enum DrillSource<'a> {
    Node(&'a GroupNode),
    Records(&'a [Record]),
}

/// Build the modal payload for a click.
///
/// Totals come from the exact records behind the click (narrowed to the
/// clicked month when the context names one). The source is not modified.
pub fn build_payload(source: DrillSource<'_>, context: &DrillDownContext) -> DrillDownPayload {
    let (group_key, monthly_values, aggregate_value, records) = match source {
        DrillSource::Node(node) => (
            Some(node.group_key.clone()),
            node.monthly_values.clone(),
            Some(node.aggregate_value),
            node.raw_data.as_slice(),
        ),
        DrillSource::Records(records) => (None, BTreeMap::new(), None, records),
    };

    let subset: Vec<Record> = match context.month_key.as_deref() {
        Some(key) => records
            .iter()
            .filter(|r| record_month_key(r).as_deref() == Some(key))
            .cloned()
            .collect(),
        None => records.to_vec(),
    };

    let summary = summarize(&subset);

    DrillDownPayload {
        group_key,
        month_key: context.month_key.clone(),
        display: context.display.clone(),
        monthly_values,
        aggregate_value,
        total_revenue: summary.revenue,
        total_transactions: summary.transactions,
        unique_members: summary.unique_members,
        average_ticket_value: summary.value(MetricKind::Atv),
        records: subset,
        is_dynamic: true,
        calculated_from_filtered: context.month_key.is_some(),
    }
}

/// Build the payload and hand it to `on_drill_down` (the modal opener).
pub fn drill_down<F>(source: DrillSource<'_>, context: &DrillDownContext, on_drill_down: F) -> DrillDownPayload
where
    F: FnOnce(&DrillDownPayload),
{
    let payload = build_payload(source, context);
    tracing::debug!(
        "drill-down {:?} {:?}: {} records",
        payload.group_key,
        payload.month_key,
        payload.records.len()
    );
    on_drill_down(&payload);
    payload
}
