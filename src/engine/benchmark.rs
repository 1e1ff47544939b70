use super::aggregate::round_to;
use crate::types::report::{Benchmark, BenchmarkEntry, SiteResult};
use std::cmp::Ordering;
use std::collections::BTreeMap;

// Undated sheets sort before dated ones; among equals the later input wins.
pub fn latest_per_site(results: Vec<SiteResult>) -> Vec<SiteResult> {
    let mut latest: BTreeMap<String, SiteResult> = BTreeMap::new();
    for entry in results {
        match latest.get(&entry.site) {
            Some(existing) if existing.evaluated_at > entry.evaluated_at => {}
            _ => {
                latest.insert(entry.site.clone(), entry);
            }
        }
    }
    latest.into_values().collect()
}

pub fn benchmark(table: &str, results: &[SiteResult], decimal_places: u32) -> Benchmark {
    let mut ordered = results.iter().collect::<Vec<_>>();
    ordered.sort_by(|a, b| {
        b.result
            .total_score
            .partial_cmp(&a.result.total_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.site.cmp(&b.site))
    });

    let count = ordered.len();
    let scores = ordered
        .iter()
        .map(|entry| entry.result.total_score)
        .collect::<Vec<_>>();
    let mean = if count == 0 {
        0.0
    } else {
        round_to(scores.iter().sum::<f64>() / count as f64, decimal_places)
    };
    let median = round_to(median_of_descending(&scores), decimal_places);

    let mut entries = Vec::with_capacity(count);
    for (position, entry) in ordered.iter().enumerate() {
        let score = entry.result.total_score;
        let rank = scores
            .iter()
            .position(|candidate| *candidate == score)
            .unwrap_or(position)
            + 1;
        let below = scores.iter().filter(|candidate| **candidate < score).count();
        let percentile = if count <= 1 {
            100.0
        } else {
            round_to(below as f64 / (count - 1) as f64 * 100.0, decimal_places)
        };

        entries.push(BenchmarkEntry {
            rank,
            site: entry.site.clone(),
            evaluated_at: entry.evaluated_at,
            total_score: score,
            status: entry.result.status.clone(),
            verdict: entry.result.verdict,
            percentile,
            delta_from_mean: round_to(score - mean, decimal_places),
        });
    }

    Benchmark {
        table: table.to_string(),
        count,
        mean,
        median,
        entries,
    }
}

fn median_of_descending(scores: &[f64]) -> f64 {
    match scores.len() {
        0 => 0.0,
        len if len % 2 == 1 => scores[len / 2],
        len => (scores[len / 2 - 1] + scores[len / 2]) / 2.0,
    }
}
