pub mod digest;
pub mod json;
pub mod md;

use crate::error::SiteScoreError;
use crate::types::report::{Benchmark, CohortReport, SiteReport, Trend};

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render_site(report: &SiteReport, format: OutputFormat) -> Result<String, SiteScoreError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(SiteScoreError::Json),
        OutputFormat::Md => Ok(md::site_markdown(report)),
    }
}

pub fn render_benchmark(
    report: &CohortReport<Benchmark>,
    format: OutputFormat,
) -> Result<String, SiteScoreError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(SiteScoreError::Json),
        OutputFormat::Md => Ok(md::benchmark_markdown(report)),
    }
}

pub fn render_trend(
    report: &CohortReport<Trend>,
    format: OutputFormat,
) -> Result<String, SiteScoreError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(SiteScoreError::Json),
        OutputFormat::Md => Ok(md::trend_markdown(report)),
    }
}
