pub mod columns;
pub mod importer;

pub use importer::*;
