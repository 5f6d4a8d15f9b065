use chrono::{Datelike, NaiveDate};
use contracts::shared::pivot::{MonthDescriptor, MonthWindow, QuarterDescriptor};

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Short English month name for 1-12
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[((month.clamp(1, 12)) - 1) as usize]
}

pub fn quarter_of(month: u32) -> u32 {
    month.div_ceil(3)
}

pub fn month_descriptor(year: i32, month: u32) -> MonthDescriptor {
    MonthDescriptor {
        key: format!("{:04}-{:02}", year, month),
        display: format!("{} {}", month_name(month), year),
        year,
        month,
        quarter: quarter_of(month),
    }
}

/// Ordered month columns for a window ending at the anchor's month.
///
/// A fixed start later than the anchor yields an empty list; a rolling
/// window of 0 months likewise.
pub fn build_months(window: MonthWindow, anchor: NaiveDate) -> Vec<MonthDescriptor> {
    let end = month_index(anchor.year(), anchor.month());
    let start = match window {
        MonthWindow::FixedStart { year, month } => month_index(year, month.clamp(1, 12)),
        MonthWindow::Rolling { months } => end - i64::from(months) + 1,
    };

    (start..=end)
        .map(|index| {
            let (year, month) = from_month_index(index);
            month_descriptor(year, month)
        })
        .collect()
}

/// Quarter columns covering `months`, in first-seen order
pub fn build_quarters(months: &[MonthDescriptor]) -> Vec<QuarterDescriptor> {
    let mut quarters: Vec<QuarterDescriptor> = Vec::new();
    for m in months {
        let key = quarter_key(m.year, m.quarter);
        if quarters.last().map(|q| q.key != key).unwrap_or(true) {
            quarters.push(QuarterDescriptor {
                key,
                display: format!("Q{} {}", m.quarter, m.year),
                year: m.year,
                quarter: m.quarter,
            });
        }
    }
    quarters
}

pub fn quarter_key(year: i32, quarter: u32) -> String {
    format!("{:04}-Q{}", year, quarter)
}

fn month_index(year: i32, month: u32) -> i64 {
    i64::from(year) * 12 + i64::from(month) - 1
}

fn from_month_index(index: i64) -> (i32, u32) {
    (index.div_euclid(12) as i32, (index.rem_euclid(12) + 1) as u32)
}
