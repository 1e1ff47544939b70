pub mod config;
pub mod criteria;
pub mod report;
pub mod scoring;
