pub mod discover;

use crate::error::{Result, SiteScoreError};
use crate::types::criteria::{CriteriaSet, EvaluationSheet};
use serde::de::DeserializeOwned;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Toml,
    Json,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("toml") => Some(Self::Toml),
            Some("json") => Some(Self::Json),
            _ => None,
        }
    }
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(SiteScoreError::PathNotFound(path.display().to_string()));
    }
    let format = InputFormat::from_path(path)
        .ok_or_else(|| SiteScoreError::UnsupportedFormat(path.display().to_string()))?;
    let content = std::fs::read_to_string(path)?;
    match format {
        InputFormat::Toml => Ok(toml::from_str(&content)?),
        InputFormat::Json => Ok(serde_json::from_str(&content)?),
    }
}

pub fn load_criteria(path: &Path) -> Result<CriteriaSet> {
    read_document(path)
}

pub fn load_sheet(path: &Path) -> Result<EvaluationSheet> {
    read_document(path)
}
