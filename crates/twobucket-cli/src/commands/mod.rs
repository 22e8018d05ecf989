//! CLI command modules

pub mod batch;
pub mod config;
pub mod measure;
