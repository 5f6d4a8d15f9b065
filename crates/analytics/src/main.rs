use analytics::dashboards::d400_month_on_month::service::get_month_on_month;
use analytics::dashboards::d401_year_on_year::service::get_year_on_year;
use analytics::shared::clock::SystemClock;
use analytics::shared::config::load_config;
use analytics::shared::format::{format_growth, format_value};
use analytics::usecases::u501_import_from_sheet::import_csv;
use anyhow::Context;
use clap::Parser;
use contracts::dashboards::d400_month_on_month::{MonthOnMonthRequest, MonthOnMonthResponse};
use contracts::dashboards::d401_year_on_year::{YearOnYearRequest, YearOnYearResponse};
use contracts::shared::metrics::MetricKind;
use contracts::shared::pivot::GroupNode;
use std::path::PathBuf;

/// Month-on-month and year-on-year sales tables from a sheet export
#[derive(Debug, Parser)]
#[command(name = "studio-report")]
#[command(version)]
struct Cli {
    /// CSV export of the sales sheet
    input: PathBuf,

    /// Path to config.toml (defaults to the one next to the executable)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Metric tab, e.g. revenue, atv, discountPercentage
    #[arg(long)]
    metric: Option<MetricKind>,

    /// Year-on-year table instead of month-on-month
    #[arg(long)]
    yoy: bool,

    /// Print the response as JSON
    #[arg(long)]
    json: bool,
}

fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = std::path::Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("studio-report.log"))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let args = Cli::parse();
    let config = load_config(args.config.as_deref())?;

    let csv_text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let summary = import_csv(&csv_text)?;

    let metric = match args.metric {
        Some(kind) => kind,
        None => config.report.metric()?,
    };
    let (group_by, then_by) = config.report.grouping()?;
    let filter = config.filters.record_filter()?;

    if args.yoy {
        let request = YearOnYearRequest {
            metric,
            group_by,
            year: None,
            filter,
        };
        let response = get_year_on_year(&summary.records, &request, &SystemClock);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&response)?);
        } else {
            print!("{}", render_year_on_year(&response));
        }
    } else {
        let request = MonthOnMonthRequest {
            metric,
            window: config.report.month_window()?,
            group_by,
            then_by,
            filter,
        };
        let response = get_month_on_month(&summary.records, &request, &SystemClock);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&response)?);
        } else {
            print!("{}", render_month_on_month(&response));
        }
    }

    Ok(())
}

fn render_month_on_month(response: &MonthOnMonthResponse) -> String {
    let table = &response.table;
    let metric = table.metric;
    let mut out = String::new();

    out.push_str(&format!("{:<32}", metric.as_str()));
    for m in &table.months {
        out.push_str(&format!(" {:>14}", m.display));
    }
    out.push_str(&format!(" {:>16}\n", "Total"));

    fn push_row(out: &mut String, node: &GroupNode, response: &MonthOnMonthResponse, metric: MetricKind) {
        let indent = "  ".repeat(node.level as usize);
        out.push_str(&format!("{:<32}", format!("{indent}{}", node.group_key)));
        for m in &response.table.months {
            out.push_str(&format!(" {:>14}", format_value(node.monthly_value(&m.key), metric)));
        }
        out.push_str(&format!(" {:>16}\n", format_value(node.aggregate_value, metric)));
        for child in &node.children {
            push_row(out, child, response, metric);
        }
    }

    for row in &table.rows {
        push_row(&mut out, row, response, metric);
    }
    push_row(&mut out, &table.totals, response, metric);

    out.push_str(&format!("{:<32}", "MoM growth"));
    for m in &table.months {
        let g = response.totals_growth.get(&m.key).copied().flatten();
        out.push_str(&format!(" {:>14}", format_growth(g)));
    }
    out.push('\n');

    for q in &response.quarters {
        let value = response.quarterly_totals.get(&q.key).copied().unwrap_or(0.0);
        out.push_str(&format!("{:<10} {}\n", q.display, format_value(value, metric)));
    }

    out
}

fn render_year_on_year(response: &YearOnYearResponse) -> String {
    let metric = response.metric;
    let mut out = format!(
        "{} {} vs {}\n",
        metric.as_str(),
        response.current_year,
        response.previous_year
    );

    for row in response.rows.iter().chain(std::iter::once(&response.totals)) {
        out.push_str(&format!(
            "{:<32} {:>16} {:>16} {:>10}\n",
            row.group_key,
            format_value(row.current_total, metric),
            format_value(row.previous_total, metric),
            format_growth(row.growth)
        ));
    }

    out
}
