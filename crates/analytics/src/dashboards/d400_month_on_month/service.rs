use contracts::dashboards::d400_month_on_month::{MonthOnMonthRequest, MonthOnMonthResponse};
use contracts::domain::a001_sale_record::Record;

use crate::shared::clock::Clock;
use crate::shared::filters::apply_filter;
use crate::shared::pivot::{
    build_months, build_pivot_table, build_quarters, monthly_growth, sum_months_by_quarter,
};

/// Build the month-on-month table.
///
/// The month window is anchored at `clock.today()` on every call, so the
/// columns move forward when the calendar month changes.
pub fn get_month_on_month(
    records: &[Record],
    request: &MonthOnMonthRequest,
    clock: &impl Clock,
) -> MonthOnMonthResponse {
    let filtered = apply_filter(records, &request.filter);
    let months = build_months(request.window, clock.today());

    let table = build_pivot_table(
        filtered.iter().copied(),
        request.group_by,
        request.then_by,
        months,
        request.metric,
    );

    let quarters = build_quarters(&table.months);
    let quarterly_totals = sum_months_by_quarter(&table.totals, &table.months, &quarters);
    let totals_growth = monthly_growth(&table.totals, &table.months);

    MonthOnMonthResponse {
        table,
        quarters,
        quarterly_totals,
        totals_growth,
    }
}
