pub mod clock;
pub mod config;
pub mod date_utils;
pub mod filters;
pub mod format;
pub mod metrics;
pub mod pivot;
