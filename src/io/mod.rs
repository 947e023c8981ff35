//! IO module - configuration and result files.

mod config;
mod report;

pub use config::{Config, OutputPaths, Settings};
pub use report::{write_histogram, write_summary};
