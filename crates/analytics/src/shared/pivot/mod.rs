pub mod classifier;
pub mod drilldown;
pub mod months;
pub mod tree_builder;

pub use classifier::*;
pub use drilldown::*;
pub use months::*;
pub use tree_builder::*;
