pub mod boundary;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod report;
pub mod telemetry;
pub mod types;

pub use engine::evaluate;
pub use error::{Result, SiteScoreError};
