use crate::types::report::{Benchmark, CohortReport, SiteReport, Trend};
use crate::types::scoring::ScoringResult;

pub fn site_markdown(report: &SiteReport) -> String {
    let mut output = String::new();
    output.push_str(&format!("# Site Evaluation: {}\n\n", report.site));
    if let Some(date) = report.evaluated_at {
        output.push_str(&format!("Evaluated: {date}\n"));
    }
    output.push_str(&format!("Generated: {}\n", report.generated_at));
    output.push_str(&format!("Config digest: {}\n\n", report.config_digest));

    for result in &report.results {
        push_result(&mut output, result);
    }

    output
}

fn push_result(output: &mut String, result: &ScoringResult) {
    output.push_str(&format!("## Table: {}\n\n", result.table));
    output.push_str(&format!(
        "- status: {} ({:?})\n- total score: {}\n",
        result.status, result.verdict, result.total_score
    ));
    if result.scaled_score != result.total_score {
        output.push_str(&format!("- scaled score: {}\n", result.scaled_score));
    }
    if result.doc_penalty > 0.0 {
        output.push_str(&format!(
            "- base score: {} (documentation penalty {})\n",
            result.base_score, result.doc_penalty
        ));
    }
    if let Some(confidence) = result.confidence_score {
        output.push_str(&format!("- confidence: {confidence}%\n"));
    }
    output.push_str(&format!(
        "- knockout failed: {}\n- manual review: {}\n\n",
        result.knockout_failed, result.requires_manual_review
    ));

    if !result.reasons.is_empty() {
        output.push_str("### Reasons\n\n");
        for reason in &result.reasons {
            output.push_str(&format!("- {reason}\n"));
        }
        output.push('\n');
    }

    output.push_str("### Breakdown\n\n");
    if result.breakdown.is_empty() {
        output.push_str("- none\n\n");
    } else {
        output.push_str("| criterion | score | weight | weighted | knockout | documentation |\n");
        output.push_str("|---|---|---|---|---|---|\n");
        for entry in &result.breakdown {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {:?} | {:?} |\n",
                entry.criterion,
                entry.raw_score,
                entry.weight,
                entry.weighted_score,
                entry.knockout,
                entry.documentation
            ));
        }
        output.push('\n');
    }

    if !result.skipped.is_empty() {
        let skipped = result
            .skipped
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>();
        output.push_str(&format!(
            "Skipped unknown criteria: {}\n\n",
            skipped.join(", ")
        ));
    }
}

pub fn benchmark_markdown(report: &CohortReport<Benchmark>) -> String {
    let benchmark = &report.body;
    let mut output = String::new();
    output.push_str(&format!("# Benchmark ({})\n\n", benchmark.table));
    output.push_str(&format!(
        "Sites: {}\nMean: {}\nMedian: {}\nGenerated: {}\nConfig digest: {}\n\n",
        benchmark.count, benchmark.mean, benchmark.median, report.generated_at, report.config_digest
    ));

    if benchmark.entries.is_empty() {
        output.push_str("- none\n");
        return output;
    }

    output.push_str("| rank | site | score | status | percentile | vs mean |\n");
    output.push_str("|---|---|---|---|---|---|\n");
    for entry in &benchmark.entries {
        output.push_str(&format!(
            "| {} | {} | {} | {} | {} | {:+} |\n",
            entry.rank,
            entry.site,
            entry.total_score,
            entry.status,
            entry.percentile,
            entry.delta_from_mean
        ));
    }

    output
}

pub fn trend_markdown(report: &CohortReport<Trend>) -> String {
    let trend = &report.body;
    let mut output = String::new();
    output.push_str(&format!("# Trend: {} ({})\n\n", trend.site, trend.table));
    output.push_str(&format!(
        "Direction: {:?}\nOverall change: {:+}\nTier changes: {}\nGenerated: {}\n\n",
        trend.direction, trend.overall_delta, trend.tier_changes, report.generated_at
    ));

    output.push_str("| evaluated | score | status | change |\n");
    output.push_str("|---|---|---|---|\n");
    for point in &trend.points {
        output.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            point
                .evaluated_at
                .map(|date| date.to_string())
                .unwrap_or_else(|| "-".to_string()),
            point.total_score,
            point.status,
            point
                .delta
                .map(|delta| format!("{delta:+}"))
                .unwrap_or_else(|| "-".to_string())
        ));
    }

    output
}
