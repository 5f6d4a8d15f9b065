pub mod drilldown;
pub mod filters;
pub mod metrics;
pub mod pivot;
