pub mod assessment;
pub mod config;
pub mod context;
pub mod report;
