use contracts::domain::a001_sale_record::Record;
use contracts::shared::metrics::MetricKind;
use std::collections::HashSet;

// ---------------------------------------------------------------------------
// Single-pass accumulation
// ---------------------------------------------------------------------------

/// Raw sums over a record subset, from which every `MetricKind` derives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesSummary {
    pub revenue: f64,
    pub vat: f64,
    pub discount_value: f64,
    pub discount_percentage_sum: f64,
    pub transactions: usize,
    /// One unit per line item
    pub units: usize,
    pub unique_members: usize,
}

impl SalesSummary {
    pub fn value(&self, kind: MetricKind) -> f64 {
        match kind {
            MetricKind::Revenue => self.revenue,
            MetricKind::Transactions => self.transactions as f64,
            MetricKind::Members => self.unique_members as f64,
            MetricKind::Units => self.units as f64,
            MetricKind::Atv => ratio(self.revenue, self.transactions as f64),
            MetricKind::Auv => ratio(self.revenue, self.units as f64),
            MetricKind::Asv => ratio(self.revenue, self.unique_members as f64),
            MetricKind::Upt => ratio(self.units as f64, self.transactions as f64),
            MetricKind::Vat => self.vat,
            MetricKind::NetRevenue => self.revenue - self.vat,
            MetricKind::DiscountValue => self.discount_value,
            MetricKind::DiscountPercentage => {
                ratio(self.discount_percentage_sum, self.transactions as f64)
            }
        }
    }
}

/// Division that yields 0 instead of NaN/inf on an empty denominator.
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Accumulate a summary in one pass. Records without a member id do not
/// count towards `unique_members`.
pub fn summarize<'a, I>(records: I) -> SalesSummary
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut summary = SalesSummary::default();
    let mut members: HashSet<&str> = HashSet::new();

    for record in records {
        summary.revenue += record.payment_value_or_zero();
        summary.vat += record.payment_vat_or_zero();
        summary.discount_value += record.discount_amount_or_zero();
        summary.discount_percentage_sum += record.discount_percentage_or_zero();
        summary.transactions += 1;
        summary.units += 1;

        if let Some(member) = record.member_id.as_deref().map(str::trim) {
            if !member.is_empty() {
                members.insert(member);
            }
        }
    }

    summary.unique_members = members.len();
    summary
}

/// Compute one metric over a record subset. Total: never NaN or infinite
/// for finite inputs, 0 for an empty subset.
pub fn compute_metric<'a, I>(records: I, kind: MetricKind) -> f64
where
    I: IntoIterator<Item = &'a Record>,
{
    summarize(records).value(kind)
}

/// Percent change from `previous` to `current`; `None` when `previous` is ~0.
pub fn growth(previous: f64, current: f64) -> Option<f64> {
    if previous.abs() < 0.01 {
        None
    } else {
        Some(((current - previous) / previous.abs()) * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(member: &str, value: f64) -> Record {
        Record {
            member_id: Some(member.to_string()),
            payment_value: Some(value),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_subset_is_zero_for_every_kind() {
        let empty: Vec<Record> = vec![];
        for kind in MetricKind::ALL {
            let value = compute_metric(&empty, kind);
            assert_eq!(value, 0.0, "{kind}");
            assert!(value.is_finite());
        }
    }

    #[test]
    fn test_gear_group_metrics() {
        let gear = vec![sale("A", 100.0), sale("B", 200.0)];
        assert_eq!(compute_metric(&gear, MetricKind::Revenue), 300.0);
        assert_eq!(compute_metric(&gear, MetricKind::Transactions), 2.0);
        assert_eq!(compute_metric(&gear, MetricKind::Atv), 150.0);
        assert_eq!(compute_metric(&gear, MetricKind::Members), 2.0);
        assert_eq!(compute_metric(&gear, MetricKind::Upt), 1.0);
    }

    #[test]
    fn test_repeat_member_counts_once() {
        let records = vec![sale("A", 100.0), sale("A", 50.0), sale(" ", 10.0)];
        assert_eq!(compute_metric(&records, MetricKind::Members), 1.0);
        assert_eq!(compute_metric(&records, MetricKind::Asv), 160.0);
        assert_eq!(compute_metric(&records, MetricKind::Auv), 160.0 / 3.0);
    }

    #[test]
    fn test_vat_and_discounts() {
        let records = vec![
            Record {
                payment_value: Some(118.0),
                payment_vat: Some(18.0),
                discount_amount: Some(20.0),
                discount_percentage: Some(10.0),
                ..Default::default()
            },
            Record {
                payment_value: Some(59.0),
                payment_vat: Some(9.0),
                discount_percentage: Some(20.0),
                ..Default::default()
            },
        ];
        assert_eq!(compute_metric(&records, MetricKind::Vat), 27.0);
        assert_eq!(compute_metric(&records, MetricKind::NetRevenue), 150.0);
        assert_eq!(compute_metric(&records, MetricKind::DiscountValue), 20.0);
        assert_eq!(compute_metric(&records, MetricKind::DiscountPercentage), 15.0);
    }

    #[test]
    fn test_members_zero_guards_asv() {
        let records = vec![Record {
            payment_value: Some(100.0),
            ..Default::default()
        }];
        assert_eq!(compute_metric(&records, MetricKind::Members), 0.0);
        assert_eq!(compute_metric(&records, MetricKind::Asv), 0.0);
    }

    #[test]
    fn test_growth() {
        assert_eq!(growth(100.0, 150.0), Some(50.0));
        assert_eq!(growth(200.0, 100.0), Some(-50.0));
        assert_eq!(growth(-100.0, -50.0), Some(50.0));
        assert_eq!(growth(0.0, 100.0), None);
        assert_eq!(growth(0.001, 100.0), None);
    }
}
