use crate::types::config::{Band, BandTable};
use crate::types::scoring::Verdict;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification<'t> {
    pub band: &'t Band,
    pub index: usize,
    pub scaled_score: f64,
    pub verdict: Verdict,
}

/// First band, top-down, whose `min_score` the scaled score reaches. Scores
/// under every boundary fall into the lowest band.
pub fn classify(score: f64, table: &BandTable) -> Classification<'_> {
    let bands = table.bands();
    let scaled_score = score * table.scale();
    let index = bands
        .iter()
        .position(|band| scaled_score >= band.min_score)
        .unwrap_or(bands.len() - 1);

    Classification {
        band: &bands[index],
        index,
        scaled_score,
        verdict: Verdict::for_band(index, bands.len()),
    }
}

pub fn rejection_band(table: &BandTable) -> (usize, &Band) {
    let bands = table.bands();
    (bands.len() - 1, &bands[bands.len() - 1])
}

pub fn conditional_band(table: &BandTable) -> (usize, &Band) {
    let bands = table.bands();
    (bands.len() - 2, &bands[bands.len() - 2])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::config::BUILTIN_TABLES;

    fn label(score: f64, table: &BandTable) -> &str {
        &classify(score, table).band.label
    }

    #[test]
    fn approval_table_uses_descending_first_match() {
        let table = BandTable::builtin("approval").expect("builtin");
        assert_eq!(label(95.0, &table), "approved");
        assert_eq!(label(71.0, &table), "conditional");
        assert_eq!(label(12.0, &table), "rejected");
    }

    #[test]
    fn maturity_and_benchmark_tables_share_the_walk() {
        let maturity = BandTable::builtin("maturity").expect("builtin");
        assert_eq!(label(92.0, &maturity), "optimized");
        assert_eq!(label(85.0, &maturity), "managed");
        assert_eq!(label(72.5, &maturity), "defined");
        assert_eq!(label(55.0, &maturity), "developing");
        assert_eq!(label(10.0, &maturity), "initial");

        let benchmark = BandTable::builtin("benchmark").expect("builtin");
        assert_eq!(label(65.0, &benchmark), "needs-improvement");
        assert_eq!(label(59.99, &benchmark), "critical");
    }

    #[test]
    fn boundaries_belong_to_the_higher_band() {
        for name in BUILTIN_TABLES {
            let table = BandTable::builtin(name).expect("builtin");
            for (index, band) in table.bands().iter().enumerate() {
                let at = classify(band.min_score, &table);
                let above = classify(band.min_score + 1e-9, &table);
                assert_eq!(at.index, index, "{name}: boundary {}", band.min_score);
                assert_eq!(above.index, index, "{name}: above {}", band.min_score);

                if index + 1 < table.bands().len() {
                    let below = classify(band.min_score - 1e-9, &table);
                    assert_eq!(below.index, index + 1, "{name}: below {}", band.min_score);
                    let whole_step = classify(band.min_score - 1.0, &table);
                    assert_eq!(whole_step.index, index + 1);
                }
            }
        }
    }

    #[test]
    fn scores_below_every_boundary_fall_into_lowest_band() {
        let table = BandTable::new(vec![
            Band::new(80.0, "high"),
            Band::new(40.0, "mid"),
            Band::new(20.0, "low"),
        ])
        .expect("valid table");
        assert_eq!(label(10.0, &table), "low");
        assert_eq!(label(-5.0, &table), "low");
        assert_eq!(label(f64::NAN, &table), "low");
    }

    #[test]
    fn scale_converts_before_comparison() {
        let table = BandTable::scaled(
            vec![
                Band::new(700.0, "prime"),
                Band::new(500.0, "near-prime"),
                Band::new(0.0, "subprime"),
            ],
            10.0,
        )
        .expect("valid table");

        let result = classify(71.0, &table);
        assert_eq!(result.scaled_score, 710.0);
        assert_eq!(result.band.label, "prime");
        assert_eq!(label(69.9, &table), "near-prime");
    }

    #[test]
    fn verdicts_follow_band_position() {
        let table = BandTable::builtin("traffic").expect("builtin");
        assert_eq!(classify(90.0, &table).verdict, Verdict::Approved);
        assert_eq!(classify(60.0, &table).verdict, Verdict::Conditional);
        assert_eq!(classify(59.0, &table).verdict, Verdict::Rejected);
        assert_eq!(rejection_band(&table).1.label, "red");
        assert_eq!(conditional_band(&table).1.label, "yellow");
    }
}
