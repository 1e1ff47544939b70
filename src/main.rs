mod cli;

use chrono::Utc;
use clap::Parser;
use sitescore::types::config::{ScoringConfig, DEFAULT_TABLE};
use sitescore::types::criteria::CriteriaSet;
use sitescore::types::report::{CohortReport, SiteReport, SiteResult};
use sitescore::types::scoring::Verdict;
use sitescore::{boundary, config, engine, input, report, telemetry, Result, SiteScoreError};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const CONDITIONAL: i32 = 1;
    pub const REJECTED: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn load_scoring_config(explicit: Option<&Path>) -> Result<ScoringConfig> {
    let root = std::env::current_dir()?;
    match config::load_config(&root, explicit)? {
        Some(cfg) => Ok(cfg),
        None => {
            warn!(
                "no {} found in {}; using built-in defaults",
                config::DEFAULT_CONFIG_FILE,
                root.display()
            );
            Ok(ScoringConfig::default())
        }
    }
}

fn load_criteria(path: &Path) -> Result<CriteriaSet> {
    let criteria = input::load_criteria(path)?;
    boundary::validate_criteria(&criteria)?;
    Ok(criteria)
}

fn output_format(format: &cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Md => report::OutputFormat::Md,
    }
}

fn score_directory(
    dir: &Path,
    exclude: &[PathBuf],
    criteria: &CriteriaSet,
    cfg: &ScoringConfig,
    table_name: &str,
) -> Result<Vec<SiteResult>> {
    if !dir.is_dir() {
        return Err(SiteScoreError::PathNotFound(dir.display().to_string()));
    }
    let table = cfg.table(table_name)?;

    let mut results = Vec::new();
    for path in input::discover::list_sheets(dir, exclude) {
        let sheet = input::load_sheet(&path)
            .and_then(|sheet| boundary::validate_sheet(&sheet, &cfg.scoring).map(|_| sheet))
            .map_err(|source| SiteScoreError::Sheet {
                path: path.display().to_string(),
                source: Box::new(source),
            })?;
        let result = engine::evaluate(&sheet.items, criteria, cfg, table_name, &table);
        info!(
            site = %sheet.site,
            score = result.total_score,
            status = %result.status,
            "scored sheet"
        );
        results.push(SiteResult {
            site: sheet.site,
            evaluated_at: sheet.evaluated_at,
            result,
        });
    }
    Ok(results)
}

fn run() -> Result<i32> {
    let cli = cli::Cli::parse();
    telemetry::init(cli.verbose, cli.quiet);
    let explicit_config = cli.config.as_deref();

    match cli.command {
        cli::Commands::Score(cmd) => {
            let cfg = load_scoring_config(explicit_config)?;
            let criteria = load_criteria(&cmd.criteria)?;
            let sheet = input::load_sheet(&cmd.sheet)?;
            boundary::validate_sheet(&sheet, &cfg.scoring)?;

            let table_names = if cmd.tables.is_empty() {
                vec![DEFAULT_TABLE.to_string()]
            } else {
                cmd.tables
            };

            let mut results = Vec::with_capacity(table_names.len());
            for name in &table_names {
                let table = cfg.table(name)?;
                let result = engine::evaluate(&sheet.items, &criteria, &cfg, name, &table);
                info!(
                    site = %sheet.site,
                    table = %name,
                    score = result.total_score,
                    status = %result.status,
                    "scored sheet"
                );
                results.push(result);
            }

            let site_report = SiteReport {
                site: sheet.site,
                evaluated_at: sheet.evaluated_at,
                generated_at: Utc::now().to_rfc3339(),
                config_digest: report::digest::config_digest(&criteria, &cfg)?,
                results,
            };
            let rendered = report::render_site(&site_report, output_format(&cmd.format))?;
            println!("{rendered}");

            Ok(match site_report.worst_verdict() {
                Some(Verdict::Rejected) => exit_code::REJECTED,
                Some(Verdict::Conditional) => exit_code::CONDITIONAL,
                _ => exit_code::SUCCESS,
            })
        }
        cli::Commands::Classify(cmd) => {
            let cfg = load_scoring_config(explicit_config)?;
            let table = cfg.table(&cmd.table)?;
            let classification = engine::classify::classify(cmd.score, &table);
            println!(
                "{} ({}: {})",
                classification.band.label, cmd.table, classification.scaled_score
            );
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Benchmark(cmd) => {
            let cfg = load_scoring_config(explicit_config)?;
            let criteria = load_criteria(&cmd.criteria)?;
            let exclude = [Some(cmd.criteria.clone()), cli.config.clone()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>();

            let results = score_directory(&cmd.dir, &exclude, &criteria, &cfg, &cmd.table)?;
            let latest = engine::benchmark::latest_per_site(results);
            let cohort = CohortReport {
                generated_at: Utc::now().to_rfc3339(),
                config_digest: report::digest::config_digest(&criteria, &cfg)?,
                body: engine::benchmark::benchmark(
                    &cmd.table,
                    &latest,
                    cfg.scoring.decimal_places,
                ),
            };
            let rendered = report::render_benchmark(&cohort, output_format(&cmd.format))?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Trend(cmd) => {
            let cfg = load_scoring_config(explicit_config)?;
            let criteria = load_criteria(&cmd.criteria)?;
            let exclude = [Some(cmd.criteria.clone()), cli.config.clone()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>();

            let results = score_directory(&cmd.dir, &exclude, &criteria, &cfg, &cmd.table)?;
            let trend = engine::trend::trend(
                &cmd.site,
                &cmd.table,
                &results,
                cfg.trend.stable_band,
                cfg.scoring.decimal_places,
            );
            if trend.points.is_empty() {
                return Err(SiteScoreError::SiteNotFound(cmd.site));
            }

            let cohort = CohortReport {
                generated_at: Utc::now().to_rfc3339(),
                config_digest: report::digest::config_digest(&criteria, &cfg)?,
                body: trend,
            };
            let rendered = report::render_trend(&cohort, output_format(&cmd.format))?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Validate(cmd) => {
            let cfg = load_scoring_config(explicit_config)?;
            let criteria = load_criteria(&cmd.criteria)?;
            let sheet = input::load_sheet(&cmd.sheet)?;
            boundary::validate(&sheet, &criteria, &cfg.scoring)?;

            let known = criteria.lookup();
            let unknown = sheet
                .items
                .iter()
                .filter(|item| !known.contains_key(&item.criterion))
                .map(|item| item.criterion.to_string())
                .collect::<Vec<_>>();
            if !unknown.is_empty() {
                warn!(
                    "items reference unknown criteria and will be skipped: {}",
                    unknown.join(", ")
                );
            }

            println!(
                "valid: {} ({} item(s), {} criteria)",
                sheet.site,
                sheet.items.len(),
                criteria.criteria.len()
            );
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Tables => {
            let cfg = load_scoring_config(explicit_config)?;
            for name in cfg.table_names() {
                let table = cfg.table(&name)?;
                let bands = table
                    .bands()
                    .iter()
                    .map(|band| format!("{}>={}", band.label, band.min_score))
                    .collect::<Vec<_>>();
                if table.scale() == 1.0 {
                    println!("{name}: {}", bands.join(", "));
                } else {
                    println!("{name} (scale {}): {}", table.scale(), bands.join(", "));
                }
            }
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
