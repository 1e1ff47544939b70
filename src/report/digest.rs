use crate::types::config::ScoringConfig;
use crate::types::criteria::CriteriaSet;
use serde_json::json;
use sha2::{Digest, Sha256};

pub fn config_digest(
    criteria: &CriteriaSet,
    config: &ScoringConfig,
) -> Result<String, serde_json::Error> {
    let canonical = serde_json::to_vec(&json!({
        "criteria": criteria,
        "config": config,
    }))?;
    let hash = Sha256::digest(&canonical);
    Ok(hash.iter().map(|byte| format!("{byte:02x}")).collect())
}
