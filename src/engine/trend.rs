use super::aggregate::round_to;
use crate::types::report::{Direction, SiteResult, Trend, TrendPoint};

pub fn trend(
    site: &str,
    table: &str,
    results: &[SiteResult],
    stable_band: f64,
    decimal_places: u32,
) -> Trend {
    let mut history = results
        .iter()
        .filter(|entry| entry.site == site)
        .collect::<Vec<_>>();
    history.sort_by_key(|entry| entry.evaluated_at);

    let mut points: Vec<TrendPoint> = Vec::with_capacity(history.len());
    let mut tier_changes = 0;
    for entry in &history {
        let delta = points.last().map(|previous| {
            round_to(
                entry.result.total_score - previous.total_score,
                decimal_places,
            )
        });
        if points
            .last()
            .is_some_and(|previous| previous.status != entry.result.status)
        {
            tier_changes += 1;
        }
        points.push(TrendPoint {
            evaluated_at: entry.evaluated_at,
            total_score: entry.result.total_score,
            status: entry.result.status.clone(),
            delta,
        });
    }

    let overall_delta = match (points.first(), points.last()) {
        (Some(first), Some(last)) => {
            round_to(last.total_score - first.total_score, decimal_places)
        }
        _ => 0.0,
    };

    Trend {
        site: site.to_string(),
        table: table.to_string(),
        points,
        overall_delta,
        direction: direction(overall_delta, stable_band),
        tier_changes,
    }
}

pub fn direction(delta: f64, stable_band: f64) -> Direction {
    if delta > stable_band {
        Direction::Improving
    } else if delta < -stable_band {
        Direction::Declining
    } else {
        Direction::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::scoring::{ScoringResult, Verdict};
    use chrono::NaiveDate;

    fn point(site: &str, score: f64, status: &str, month: u32) -> SiteResult {
        SiteResult {
            site: site.to_string(),
            evaluated_at: NaiveDate::from_ymd_opt(2026, month, 1),
            result: ScoringResult {
                table: "maturity".to_string(),
                base_score: score,
                doc_penalty: 0.0,
                total_score: score,
                scaled_score: score,
                status: status.to_string(),
                verdict: Verdict::Approved,
                knockout_failed: false,
                requires_manual_review: false,
                confidence_score: None,
                reasons: vec![],
                breakdown: vec![],
                skipped: vec![],
            },
        }
    }

    #[test]
    fn trend_orders_by_date_and_counts_tier_changes() {
        let results = vec![
            point("Nord", 82.0, "managed", 6),
            point("Nord", 64.5, "developing", 1),
            point("Sud", 99.0, "optimized", 2),
            point("Nord", 73.0, "defined", 3),
        ];
        let trend = trend("Nord", "maturity", &results, 2.0, 2);

        assert_eq!(trend.points.len(), 3);
        assert_eq!(trend.points[0].total_score, 64.5);
        assert_eq!(trend.points[0].delta, None);
        assert_eq!(trend.points[1].delta, Some(8.5));
        assert_eq!(trend.points[2].delta, Some(9.0));
        assert_eq!(trend.overall_delta, 17.5);
        assert_eq!(trend.direction, Direction::Improving);
        assert_eq!(trend.tier_changes, 2);
    }

    #[test]
    fn small_movements_are_stable() {
        let results = vec![
            point("Nord", 80.0, "managed", 1),
            point("Nord", 78.5, "defined", 2),
        ];
        let trend = trend("Nord", "maturity", &results, 2.0, 2);
        assert_eq!(trend.direction, Direction::Stable);
        assert_eq!(trend.tier_changes, 1);
    }

    #[test]
    fn direction_thresholds_are_exclusive() {
        assert_eq!(direction(2.0, 2.0), Direction::Stable);
        assert_eq!(direction(-2.0, 2.0), Direction::Stable);
        assert_eq!(direction(2.01, 2.0), Direction::Improving);
        assert_eq!(direction(-2.01, 2.0), Direction::Declining);
    }

    #[test]
    fn unknown_site_yields_empty_trend() {
        let trend = trend("Ost", "maturity", &[point("Nord", 80.0, "managed", 1)], 2.0, 2);
        assert!(trend.points.is_empty());
        assert_eq!(trend.overall_delta, 0.0);
        assert_eq!(trend.direction, Direction::Stable);
    }
}
