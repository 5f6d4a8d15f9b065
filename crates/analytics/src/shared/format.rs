//! Cell formatting for pivot tables
//!
//! Indian rupee with `en-IN` digit grouping: the last three integer digits
//! form one group, every two digits before that another (`12,34,567`).

use contracts::shared::metrics::{MetricKind, ValueFormat};

use super::metrics::value_format;

const CURRENCY_SYMBOL: &str = "₹";

/// Render a metric value for display. Pure: same input, same output.
pub fn format_value(value: f64, kind: MetricKind) -> String {
    render(value, value_format(kind))
}

/// Render a value according to an explicit format
pub fn render(value: f64, format: ValueFormat) -> String {
    match format {
        ValueFormat::Money { decimals } => {
            let body = format_number_with_decimals(value.abs(), decimals);
            if is_negative(value, decimals) {
                format!("-{CURRENCY_SYMBOL}{body}")
            } else {
                format!("{CURRENCY_SYMBOL}{body}")
            }
        }
        ValueFormat::Number { decimals } => format_number_with_decimals(value, decimals),
        ValueFormat::Percent { decimals } => {
            format!("{}%", format_number_with_decimals(value, decimals))
        }
        ValueFormat::Integer => format_number_with_decimals(value, 0),
    }
}

/// Month-over-month change, e.g. `+12.5%`; `-` when undefined
pub fn format_growth(growth: Option<f64>) -> String {
    match growth.map(|g| round_to(g, 1)) {
        Some(g) if g > 0.0 => format!("+{:.1}%", g),
        Some(g) => format!("{:.1}%", g),
        None => "-".to_string(),
    }
}

/// Format with `en-IN` grouping and a fixed number of decimals.
///
/// # Examples
/// ```
/// use analytics::shared::format::format_number_with_decimals;
/// assert_eq!(format_number_with_decimals(1234567.891, 2), "12,34,567.89");
/// assert_eq!(format_number_with_decimals(999.0, 0), "999");
/// ```
pub fn format_number_with_decimals(value: f64, decimals: u8) -> String {
    let rounded = round_to(value, decimals);
    let formatted = format!("{:.*}", decimals as usize, rounded);

    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (integer_part, decimal_part) = match unsigned.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (unsigned, None),
    };

    let grouped = group_en_in(integer_part);
    match decimal_part {
        Some(d) => format!("{sign}{grouped}.{d}"),
        None => format!("{sign}{grouped}"),
    }
}

fn group_en_in(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Round half away from zero, never returning negative zero or a
/// non-finite value.
fn round_to(value: f64, decimals: u8) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

fn is_negative(value: f64, decimals: u8) -> bool {
    round_to(value, decimals) < 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with_decimals(0.0, 0), "0");
        assert_eq!(format_number_with_decimals(1234.567, 0), "1,235");
        assert_eq!(format_number_with_decimals(1234.567, 1), "1,234.6");
        assert_eq!(format_number_with_decimals(1234567.0, 0), "12,34,567");
        assert_eq!(format_number_with_decimals(123456789.0, 2), "12,34,56,789.00");
        assert_eq!(format_number_with_decimals(-1234.0, 0), "-1,234");
        assert_eq!(format_number_with_decimals(-0.001, 2), "0.00");
    }

    #[test]
    fn test_money() {
        assert_eq!(format_value(300.0, MetricKind::Revenue), "₹300.00");
        assert_eq!(format_value(123456.5, MetricKind::NetRevenue), "₹1,23,456.50");
        assert_eq!(format_value(-1500.0, MetricKind::DiscountValue), "-₹1,500.00");
    }

    #[test]
    fn test_averages_are_rounded() {
        assert_eq!(format_value(150.0, MetricKind::Atv), "₹150");
        assert_eq!(format_value(149.5, MetricKind::Auv), "₹150");
        assert_eq!(format_value(1234.4, MetricKind::Asv), "₹1,234");
    }

    #[test]
    fn test_counts_ratios_and_percentages() {
        assert_eq!(format_value(2.0, MetricKind::Members), "2");
        assert_eq!(format_value(12345.0, MetricKind::Transactions), "12,345");
        assert_eq!(format_value(1.25, MetricKind::Upt), "1.3");
        assert_eq!(format_value(12.34, MetricKind::DiscountPercentage), "12.3%");
    }

    #[test]
    fn test_non_finite_renders_as_zero() {
        assert_eq!(format_value(f64::NAN, MetricKind::Revenue), "₹0.00");
        assert_eq!(format_value(f64::INFINITY, MetricKind::Units), "0");
    }

    #[test]
    fn test_same_input_same_output() {
        for kind in MetricKind::ALL {
            assert_eq!(format_value(9876.54, kind), format_value(9876.54, kind));
        }
    }

    #[test]
    fn test_format_growth() {
        assert_eq!(format_growth(Some(12.345)), "+12.3%");
        assert_eq!(format_growth(Some(-50.0)), "-50.0%");
        assert_eq!(format_growth(None), "-");
    }

    #[test]
    fn test_format_growth_near_zero_has_no_sign() {
        assert_eq!(format_growth(Some(0.04)), "0.0%");
        assert_eq!(format_growth(Some(-0.04)), "0.0%");
        assert_eq!(format_growth(Some(0.05)), "+0.1%");
        assert_eq!(format_growth(Some(-0.05)), "-0.1%");
    }
}
