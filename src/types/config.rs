use crate::error::SiteScoreError;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashSet};

pub const DEFAULT_TABLE: &str = "approval";
pub const BUILTIN_TABLES: [&str; 4] = ["approval", "traffic", "maturity", "benchmark"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub scoring: ScaleConfig,
    pub knockout: Option<KnockoutConfig>,
    #[serde(default)]
    pub trend: TrendConfig,
    #[serde(default, deserialize_with = "deserialize_tables")]
    pub tables: BTreeMap<String, BandTable>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleConfig {
    /// 2 for the percentage variant, 0 for whole-number scores.
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
    #[serde(default = "default_max_score")]
    pub max_score: f64,
}

fn default_decimal_places() -> u32 {
    2
}

fn default_max_score() -> f64 {
    100.0
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            decimal_places: default_decimal_places(),
            max_score: default_max_score(),
        }
    }
}

/// Thresholds for the knockout variant. Absent config disables knockout
/// overrides and the documentation penalty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnockoutConfig {
    pub review_threshold: f64,
    pub knockout_threshold: f64,
    #[serde(default)]
    pub doc_penalty_per_missing: f64,
    #[serde(default)]
    pub max_doc_penalty: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendConfig {
    /// Overall movement within +/- this many points counts as stable.
    #[serde(default = "default_stable_band")]
    pub stable_band: f64,
}

fn default_stable_band() -> f64 {
    2.0
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            stable_band: default_stable_band(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub min_score: f64,
    pub label: String,
}

impl Band {
    pub fn new(min_score: f64, label: &str) -> Self {
        Self {
            min_score,
            label: label.to_string(),
        }
    }
}

/// Highest `min_score` first. Always holds three or more strictly descending
/// bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBandTable")]
pub struct BandTable {
    bands: Vec<Band>,
    scale: f64,
}

#[derive(Deserialize)]
struct RawBandTable {
    bands: Vec<Band>,
    #[serde(default = "default_scale")]
    scale: f64,
}

impl TryFrom<RawBandTable> for BandTable {
    type Error = String;

    fn try_from(raw: RawBandTable) -> Result<Self, Self::Error> {
        Self::checked(raw.bands, raw.scale).map_err(|message| format!("band table {message}"))
    }
}

fn default_scale() -> f64 {
    1.0
}

impl BandTable {
    pub fn new(bands: Vec<Band>) -> Result<Self, SiteScoreError> {
        Self::scaled(bands, default_scale())
    }

    pub fn scaled(bands: Vec<Band>, scale: f64) -> Result<Self, SiteScoreError> {
        Self::checked(bands, scale)
            .map_err(|message| SiteScoreError::ConfigParse(format!("band table {message}")))
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn builtin(name: &str) -> Option<Self> {
        let bands = match name {
            "approval" => vec![
                Band::new(80.0, "approved"),
                Band::new(60.0, "conditional"),
                Band::new(0.0, "rejected"),
            ],
            "traffic" => vec![
                Band::new(80.0, "green"),
                Band::new(60.0, "yellow"),
                Band::new(0.0, "red"),
            ],
            "maturity" => vec![
                Band::new(90.0, "optimized"),
                Band::new(80.0, "managed"),
                Band::new(70.0, "defined"),
                Band::new(50.0, "developing"),
                Band::new(0.0, "initial"),
            ],
            "benchmark" => vec![
                Band::new(90.0, "excellent"),
                Band::new(80.0, "good"),
                Band::new(70.0, "acceptable"),
                Band::new(60.0, "needs-improvement"),
                Band::new(0.0, "critical"),
            ],
            _ => return None,
        };
        Self::new(bands).ok()
    }

    fn checked(bands: Vec<Band>, scale: f64) -> Result<Self, String> {
        if bands.len() < 3 {
            return Err("must define at least three bands".to_string());
        }
        if !(scale.is_finite() && scale > 0.0) {
            return Err("scale must be a positive number".to_string());
        }

        let mut labels = HashSet::new();
        for band in &bands {
            if !band.min_score.is_finite() {
                return Err(format!("band '{}' has a non-finite min_score", band.label));
            }
            let label = band.label.trim();
            if label.is_empty() {
                return Err("band labels must be non-empty".to_string());
            }
            if !labels.insert(label) {
                return Err(format!("contains duplicate label: {label}"));
            }
        }

        for pair in bands.windows(2) {
            if pair[0].min_score <= pair[1].min_score {
                return Err(format!(
                    "bands must be listed in strictly descending min_score order ({} then {})",
                    pair[0].min_score, pair[1].min_score
                ));
            }
        }

        Ok(Self { bands, scale })
    }
}

fn deserialize_tables<'de, D>(deserializer: D) -> Result<BTreeMap<String, BandTable>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, RawBandTable>::deserialize(deserializer)?;
    let mut tables = BTreeMap::new();
    for (name, table) in raw {
        match BandTable::checked(table.bands, table.scale) {
            Ok(table) => {
                tables.insert(name, table);
            }
            Err(message) => return Err(de::Error::custom(format!("tables.{name} {message}"))),
        }
    }
    Ok(tables)
}

impl ScoringConfig {
    /// Resolves a table by name. Configured tables shadow the built-in ones.
    pub fn table(&self, name: &str) -> Result<BandTable, SiteScoreError> {
        self.tables
            .get(name)
            .cloned()
            .or_else(|| BandTable::builtin(name))
            .ok_or_else(|| SiteScoreError::UnknownTable(name.to_string()))
    }

    pub fn table_names(&self) -> Vec<String> {
        let mut names = BUILTIN_TABLES
            .iter()
            .map(|name| name.to_string())
            .collect::<Vec<_>>();
        for name in self.tables.keys() {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        names
    }

    pub fn validate(&self) -> Result<(), SiteScoreError> {
        if !(self.scoring.max_score.is_finite() && self.scoring.max_score > 0.0) {
            return Err(SiteScoreError::ConfigParse(
                "scoring.max_score must be a positive number".to_string(),
            ));
        }
        if self.scoring.decimal_places > 6 {
            return Err(SiteScoreError::ConfigParse(
                "scoring.decimal_places must be between 0 and 6".to_string(),
            ));
        }

        if let Some(knockout) = &self.knockout {
            if !knockout.review_threshold.is_finite() || !knockout.knockout_threshold.is_finite()
            {
                return Err(SiteScoreError::ConfigParse(
                    "knockout thresholds must be finite numbers".to_string(),
                ));
            }
            if knockout.review_threshold >= knockout.knockout_threshold {
                return Err(SiteScoreError::ConfigParse(
                    "knockout.review_threshold must be below knockout.knockout_threshold"
                        .to_string(),
                ));
            }
            if !(knockout.doc_penalty_per_missing >= 0.0) {
                return Err(SiteScoreError::ConfigParse(
                    "knockout.doc_penalty_per_missing must not be negative".to_string(),
                ));
            }
            if !(knockout.max_doc_penalty >= 0.0) {
                return Err(SiteScoreError::ConfigParse(
                    "knockout.max_doc_penalty must not be negative".to_string(),
                ));
            }
        }

        if !(self.trend.stable_band >= 0.0) {
            return Err(SiteScoreError::ConfigParse(
                "trend.stable_band must not be negative".to_string(),
            ));
        }

        for name in self.tables.keys() {
            if name.trim().is_empty() {
                return Err(SiteScoreError::ConfigParse(
                    "table names must be non-empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config_uses_defaults() {
        let cfg: ScoringConfig = toml::from_str("").expect("empty config should parse");
        assert_eq!(cfg.scoring.decimal_places, 2);
        assert_eq!(cfg.scoring.max_score, 100.0);
        assert!(cfg.knockout.is_none());
        assert_eq!(cfg.trend.stable_band, 2.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
[scoring]
decimal_places = 0

[knockout]
review_threshold = 30
knockout_threshold = 40
doc_penalty_per_missing = 5
max_doc_penalty = 15

[tables.credit]
scale = 10
bands = [
    { min_score = 700, label = "prime" },
    { min_score = 500, label = "near-prime" },
    { min_score = 0, label = "subprime" },
]
"#;
        let cfg: ScoringConfig = toml::from_str(toml_str).expect("full config should parse");
        assert_eq!(cfg.scoring.decimal_places, 0);
        let knockout = cfg.knockout.as_ref().expect("knockout section present");
        assert_eq!(knockout.max_doc_penalty, 15.0);
        let credit = cfg.table("credit").expect("custom table resolves");
        assert_eq!(credit.scale(), 10.0);
        assert_eq!(credit.bands()[1].label, "near-prime");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn builtin_tables_resolve_and_validate() {
        let cfg = ScoringConfig::default();
        for name in BUILTIN_TABLES {
            let table = cfg.table(name).expect("builtin table resolves");
            assert!(table.bands().len() >= 3, "{name} should hold three bands");
        }
        assert!(matches!(
            cfg.table("nope"),
            Err(SiteScoreError::UnknownTable(_))
        ));
    }

    #[test]
    fn configured_table_shadows_builtin() {
        let cfg: ScoringConfig = toml::from_str(
            r#"
[tables.approval]
bands = [
    { min_score = 85, label = "approved" },
    { min_score = 65, label = "conditional" },
    { min_score = 0, label = "rejected" },
]
"#,
        )
        .expect("config should parse");
        let table = cfg.table("approval").expect("table resolves");
        assert_eq!(table.bands()[0].min_score, 85.0);
        assert_eq!(cfg.table_names().len(), BUILTIN_TABLES.len());
    }

    #[test]
    fn validate_rejects_inverted_knockout_thresholds() {
        let cfg: ScoringConfig = toml::from_str(
            r#"
[knockout]
review_threshold = 40
knockout_threshold = 40
"#,
        )
        .expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err
            .to_string()
            .contains("knockout.review_threshold must be below knockout.knockout_threshold"));
    }

    #[test]
    fn validate_rejects_negative_penalty() {
        let cfg: ScoringConfig = toml::from_str(
            r#"
[knockout]
review_threshold = 30
knockout_threshold = 40
max_doc_penalty = -1
"#,
        )
        .expect("config should parse");
        assert!(cfg.validate().is_err());
    }

    fn table_error(toml_str: &str) -> String {
        toml::from_str::<ScoringConfig>(toml_str)
            .expect_err("table should be rejected")
            .to_string()
    }

    #[test]
    fn unsorted_bands_are_rejected_with_table_name() {
        let err = table_error(
            r#"
[tables.odd]
bands = [
    { min_score = 60, label = "conditional" },
    { min_score = 80, label = "approved" },
    { min_score = 0, label = "rejected" },
]
"#,
        );
        assert!(err.contains("tables.odd bands must be listed in strictly descending"));
    }

    #[test]
    fn duplicate_labels_are_rejected() {
        let err = table_error(
            r#"
[tables.dup]
bands = [
    { min_score = 80, label = "ok" },
    { min_score = 40, label = "meh" },
    { min_score = 0, label = "ok" },
]
"#,
        );
        assert!(err.contains("tables.dup contains duplicate label: ok"));
    }

    #[test]
    fn two_band_tables_are_rejected() {
        let err = table_error(
            r#"
[tables.pass_fail]
bands = [
    { min_score = 80, label = "pass" },
    { min_score = 0, label = "fail" },
]
"#,
        );
        assert!(err.contains("tables.pass_fail must define at least three bands"));

        let err = table_error(
            r#"
[tables.one]
bands = [{ min_score = 0, label = "all" }]
"#,
        );
        assert!(err.contains("tables.one must define at least three bands"));
    }

    #[test]
    fn band_table_constructor_rejects_short_and_empty_tables() {
        let err = BandTable::new(vec![Band::new(80.0, "pass"), Band::new(0.0, "fail")])
            .expect_err("two bands rejected");
        assert!(matches!(err, SiteScoreError::ConfigParse(_)));
        assert!(err.to_string().contains("at least three bands"));

        assert!(BandTable::new(Vec::new()).is_err());
        assert!(BandTable::scaled(
            vec![
                Band::new(80.0, "high"),
                Band::new(40.0, "mid"),
                Band::new(0.0, "low"),
            ],
            0.0,
        )
        .is_err());
    }

    #[test]
    fn band_table_deserializes_standalone_with_validation() {
        let table: BandTable = toml::from_str(
            r#"
scale = 10
bands = [
    { min_score = 700, label = "prime" },
    { min_score = 500, label = "near-prime" },
    { min_score = 0, label = "subprime" },
]
"#,
        )
        .expect("table should parse");
        assert_eq!(table.scale(), 10.0);

        let err = toml::from_str::<BandTable>("bands = []
")
            .expect_err("empty table rejected")
            .to_string();
        assert!(err.contains("band table must define at least three bands"));
    }

    #[test]
    fn validate_rejects_excessive_precision() {
        let cfg: ScoringConfig = toml::from_str(
            r#"
[scoring]
decimal_places = 9
"#,
        )
        .expect("config should parse");
        assert!(cfg.validate().is_err());
    }
}
