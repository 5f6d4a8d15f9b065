pub mod compute;
pub mod metadata;

pub use compute::*;
pub use metadata::*;
