use contracts::shared::metrics::{MetricKind, MetricMeta, ValueFormat};

/// Rendering rule for each metric kind.
pub fn value_format(kind: MetricKind) -> ValueFormat {
    match kind {
        MetricKind::Revenue
        | MetricKind::Vat
        | MetricKind::NetRevenue
        | MetricKind::DiscountValue => ValueFormat::Money { decimals: 2 },
        MetricKind::Atv | MetricKind::Auv | MetricKind::Asv => ValueFormat::Money { decimals: 0 },
        MetricKind::Transactions | MetricKind::Members | MetricKind::Units => ValueFormat::Integer,
        MetricKind::Upt => ValueFormat::Number { decimals: 1 },
        MetricKind::DiscountPercentage => ValueFormat::Percent { decimals: 1 },
    }
}

pub fn metric_meta(kind: MetricKind) -> MetricMeta {
    let (label, short_label, description) = match kind {
        MetricKind::Revenue => ("Revenue", "Revenue", "Sum of payment values"),
        MetricKind::Transactions => ("Transactions", "Trans.", "Number of sale lines"),
        MetricKind::Members => ("Unique Members", "Members", "Distinct paying members"),
        MetricKind::Units => ("Units Sold", "Units", "One unit per sale line"),
        MetricKind::Atv => ("Avg. Transaction Value", "ATV", "Revenue per transaction"),
        MetricKind::Auv => ("Avg. Unit Value", "AUV", "Revenue per unit"),
        MetricKind::Asv => ("Avg. Spend per Member", "ASV", "Revenue per unique member"),
        MetricKind::Upt => ("Units per Transaction", "UPT", "Units divided by transactions"),
        MetricKind::Vat => ("VAT", "VAT", "Sum of payment VAT"),
        MetricKind::NetRevenue => ("Net Revenue", "Net", "Revenue minus VAT"),
        MetricKind::DiscountValue => ("Discount Value", "Discount", "Sum of discount amounts"),
        MetricKind::DiscountPercentage => {
            ("Avg. Discount %", "Disc. %", "Mean discount percentage per sale line")
        }
    };

    MetricMeta {
        kind,
        label: label.to_string(),
        short_label: short_label.to_string(),
        format: value_format(kind),
        description: Some(description.to_string()),
    }
}

/// Metric tabs in display order
pub fn metric_catalog() -> Vec<MetricMeta> {
    MetricKind::ALL.iter().copied().map(metric_meta).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_every_kind_once() {
        let catalog = metric_catalog();
        assert_eq!(catalog.len(), MetricKind::ALL.len());
        for (meta, kind) in catalog.iter().zip(MetricKind::ALL) {
            assert_eq!(meta.kind, kind);
        }
    }

    #[test]
    fn test_averages_render_without_decimals() {
        assert_eq!(value_format(MetricKind::Atv), ValueFormat::Money { decimals: 0 });
        assert_eq!(value_format(MetricKind::Revenue), ValueFormat::Money { decimals: 2 });
        assert_eq!(value_format(MetricKind::Upt), ValueFormat::Number { decimals: 1 });
    }
}
