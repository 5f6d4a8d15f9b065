pub mod config;
pub mod months;
pub mod response;

pub use config::*;
pub use months::*;
pub use response::*;
