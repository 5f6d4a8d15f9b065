pub mod dashboards;
pub mod shared;
pub mod system;
pub mod usecases;
