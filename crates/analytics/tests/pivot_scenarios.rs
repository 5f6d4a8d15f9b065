use analytics::shared::clock::{Clock, FixedClock};
use analytics::shared::format::format_value;
use analytics::shared::metrics::compute_metric;
use analytics::shared::pivot::{
    assemble, build_months, build_payload, build_pivot_table, group_by_field, DrillSource,
};
use analytics::usecases::u501_import_from_sheet::import_csv;
use chrono::NaiveDate;
use contracts::domain::a001_sale_record::Record;
use contracts::shared::drilldown::DrillDownContext;
use contracts::shared::metrics::MetricKind;
use contracts::shared::pivot::{GroupField, MonthWindow};

fn sale(member: &str, value: f64, date: &str, category: &str) -> Record {
    Record {
        member_id: Some(member.to_string()),
        payment_value: Some(value),
        payment_date: Some(date.to_string()),
        cleaned_category: Some(category.to_string()),
        ..Default::default()
    }
}

fn scenario_records() -> Vec<Record> {
    vec![
        sale("A", 100.0, "01/01/2024", "Gear"),
        sale("B", 200.0, "15/01/2024", "Gear"),
        sale("A", 50.0, "01/02/2024", "Apparel"),
    ]
}

fn window_2024() -> Vec<contracts::shared::pivot::MonthDescriptor> {
    build_months(
        MonthWindow::FixedStart { year: 2024, month: 1 },
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
    )
}

#[test]
fn test_concrete_revenue_scenario() {
    let records = scenario_records();
    let table = build_pivot_table(&records, GroupField::Category, None, window_2024(), MetricKind::Revenue);

    let gear = table.rows.iter().find(|r| r.group_key == "Gear").unwrap();
    let apparel = table.rows.iter().find(|r| r.group_key == "Apparel").unwrap();

    assert_eq!(gear.monthly_value("2024-01"), 300.0);
    assert_eq!(gear.aggregate_value, 300.0);
    assert_eq!(apparel.monthly_value("2024-02"), 50.0);
    assert_eq!(table.totals.monthly_value("2024-01"), 300.0);
    assert_eq!(table.totals.monthly_value("2024-02"), 50.0);
}

#[test]
fn test_concrete_average_and_member_scenario() {
    let records = scenario_records();
    let groups = group_by_field(&records, GroupField::Category);
    let gear = groups.get("Gear").unwrap();

    assert_eq!(compute_metric(gear.iter().copied(), MetricKind::Atv), 150.0);
    assert_eq!(compute_metric(gear.iter().copied(), MetricKind::Members), 2.0);
}

#[test]
fn test_revenue_months_sum_to_aggregate_inside_window() {
    let records = scenario_records();
    let groups = group_by_field(&records, GroupField::Category);
    let months = window_2024();

    for metric in [MetricKind::Revenue, MetricKind::Transactions, MetricKind::Units, MetricKind::Members] {
        for row in assemble(&groups, &months, metric) {
            let month_sum: f64 = row.monthly_values.values().sum();
            if metric == MetricKind::Members {
                // a member can appear in several months
                assert!(month_sum >= row.aggregate_value);
            } else {
                assert_eq!(month_sum, row.aggregate_value, "{} {}", metric, row.group_key);
            }
        }
    }
}

#[test]
fn test_months_outside_window_never_exceed_aggregate() {
    let mut records = scenario_records();
    records.push(sale("C", 500.0, "01/06/2023", "Gear"));
    let groups = group_by_field(&records, GroupField::Category);

    for row in assemble(&groups, &window_2024(), MetricKind::Revenue) {
        let month_sum: f64 = row.monthly_values.values().sum();
        assert!(month_sum <= row.aggregate_value);
    }
}

#[test]
fn test_day_first_and_iso_dates_share_a_bucket() {
    let records = vec![
        sale("A", 10.0, "15/03/2024", "Gear"),
        sale("B", 20.0, "2024-03-15", "Gear"),
    ];
    let table = build_pivot_table(&records, GroupField::Category, None, window_2024(), MetricKind::Revenue);
    assert_eq!(table.rows[0].monthly_value("2024-03"), 30.0);
}

#[test]
fn test_rolling_window_from_clock() {
    let clock = FixedClock(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());
    let months = build_months(MonthWindow::Rolling { months: 18 }, clock.today());
    let keys: Vec<&str> = months.iter().map(|m| m.key.as_str()).collect();

    assert_eq!(keys.first(), Some(&"2024-01"));
    assert_eq!(keys.last(), Some(&"2025-06"));
    let mut deduped = keys.clone();
    deduped.dedup();
    assert_eq!(deduped.len(), 18);
}

#[test]
fn test_empty_input_everywhere() {
    let records: Vec<Record> = vec![];
    for kind in MetricKind::ALL {
        assert_eq!(compute_metric(&records, kind), 0.0);
    }
    let table = build_pivot_table(&records, GroupField::Category, None, window_2024(), MetricKind::Atv);
    assert!(table.rows.is_empty());
    assert_eq!(table.totals.aggregate_value, 0.0);
    assert_eq!(table.totals.monthly_values.len(), 12);
}

#[test]
fn test_sheet_to_drill_down() {
    let csv = "Member ID,Payment Value,Payment Date,Cleaned Category,Cleaned Product
A,100,01/01/2024,Gear,Mat
B,200,15/01/2024,Gear,Bottle
A,50,01/02/2024,Apparel,Tee
";
    let summary = import_csv(csv).unwrap();
    let table = build_pivot_table(
        &summary.records,
        GroupField::Category,
        Some(GroupField::Product),
        window_2024(),
        MetricKind::Revenue,
    );

    let gear = &table.rows[0];
    assert_eq!(gear.group_key, "Gear");
    assert_eq!(format_value(gear.aggregate_value, MetricKind::Revenue), "₹300.00");

    let ctx = DrillDownContext::for_month("2024-01", "Jan 2024");
    let payload = build_payload(DrillSource::Node(&gear.children[0]), &ctx);
    assert_eq!(payload.group_key.as_deref(), Some("Bottle"));
    assert_eq!(payload.total_revenue, 200.0);
    assert_eq!(payload.unique_members, 1);
}
