use anyhow::Context;
use chrono::NaiveDate;
use contracts::shared::filters::RecordFilter;
use contracts::shared::metrics::MetricKind;
use contracts::shared::pivot::{GroupField, MonthWindow};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub filters: FiltersConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    /// "rolling" or "fixed"
    #[serde(default = "default_window")]
    pub window: String,
    #[serde(default = "default_rolling_months")]
    pub rolling_months: u32,
    #[serde(default = "default_fixed_start_year")]
    pub fixed_start_year: i32,
    #[serde(default = "default_fixed_start_month")]
    pub fixed_start_month: u32,
    #[serde(default = "default_metric")]
    pub metric: String,
    #[serde(default = "default_group_by")]
    pub group_by: Vec<String>,
    #[serde(default)]
    pub top_level_only: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            window: default_window(),
            rolling_months: default_rolling_months(),
            fixed_start_year: default_fixed_start_year(),
            fixed_start_month: default_fixed_start_month(),
            metric: default_metric(),
            group_by: default_group_by(),
            top_level_only: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct FiltersConfig {
    /// YYYY-MM-DD
    pub date_from: Option<String>,
    /// YYYY-MM-DD
    pub date_to: Option<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

fn default_window() -> String {
    "rolling".to_string()
}

fn default_rolling_months() -> u32 {
    18
}

fn default_fixed_start_year() -> i32 {
    2024
}

fn default_fixed_start_month() -> u32 {
    1
}

fn default_metric() -> String {
    "revenue".to_string()
}

fn default_group_by() -> Vec<String> {
    vec!["category".to_string(), "product".to_string()]
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[report]
window = "rolling"
rolling_months = 18
fixed_start_year = 2024
fixed_start_month = 1
metric = "revenue"
group_by = ["category", "product"]
top_level_only = false

[filters]
locations = []
categories = []
"#;

/// Load configuration.
///
/// Search order:
/// 1. Explicit path, if given (must exist)
/// 2. config.toml next to the executable
/// 3. Embedded default config
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        tracing::info!("Loading config from: {}", path.display());
        return load_config_from(path);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                return load_config_from(&config_path);
            } else {
                tracing::debug!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

pub fn load_config_from(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    parse_config(&contents).with_context(|| format!("parsing {}", path.display()))
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    config.report.month_window()?;
    config.report.metric()?;
    config.report.grouping()?;
    config.filters.record_filter()?;
    Ok(config)
}

impl ReportConfig {
    pub fn month_window(&self) -> anyhow::Result<MonthWindow> {
        match self.window.trim().to_ascii_lowercase().as_str() {
            "rolling" => Ok(MonthWindow::Rolling {
                months: self.rolling_months,
            }),
            "fixed" => {
                if !(1..=12).contains(&self.fixed_start_month) {
                    anyhow::bail!("fixed_start_month out of range: {}", self.fixed_start_month);
                }
                Ok(MonthWindow::FixedStart {
                    year: self.fixed_start_year,
                    month: self.fixed_start_month,
                })
            }
            other => anyhow::bail!("unknown window mode: {other}"),
        }
    }

    pub fn metric(&self) -> anyhow::Result<MetricKind> {
        Ok(self.metric.parse()?)
    }

    /// Outer grouping and optional nested grouping
    pub fn grouping(&self) -> anyhow::Result<(GroupField, Option<GroupField>)> {
        let fields = self
            .group_by
            .iter()
            .map(|f| f.parse::<GroupField>())
            .collect::<Result<Vec<_>, _>>()?;

        match fields.as_slice() {
            [] => anyhow::bail!("group_by must name at least one field"),
            [outer] => Ok((*outer, None)),
            [outer, inner] if self.top_level_only => {
                tracing::debug!("top_level_only set, ignoring nested grouping by {inner}");
                Ok((*outer, None))
            }
            [outer, inner] => Ok((*outer, Some(*inner))),
            _ => anyhow::bail!("group_by supports at most two fields, got {}", fields.len()),
        }
    }
}

impl FiltersConfig {
    pub fn record_filter(&self) -> anyhow::Result<RecordFilter> {
        let parse = |value: &Option<String>| -> anyhow::Result<Option<NaiveDate>> {
            value
                .as_deref()
                .map(|s| {
                    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                        .with_context(|| format!("invalid filter date: {s}"))
                })
                .transpose()
        };

        Ok(RecordFilter {
            date_from: parse(&self.date_from)?,
            date_to: parse(&self.date_to)?,
            locations: self.locations.clone(),
            categories: self.categories.clone(),
        })
    }
}
