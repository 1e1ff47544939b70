use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteScoreError {
    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("unknown band table: {0}")]
    UnknownTable(String),

    #[error("invalid score for criterion {criterion}: must be between 0 and {max}")]
    InvalidScore { criterion: String, max: f64 },

    #[error("criterion {0} is answered more than once")]
    DuplicateAnswer(String),

    #[error("invalid criteria: {0}")]
    InvalidCriteria(String),

    #[error("unsupported input format: {0}")]
    UnsupportedFormat(String),

    #[error("{path}: {source}")]
    Sheet {
        path: String,
        source: Box<SiteScoreError>,
    },

    #[error("no evaluations found for site: {0}")]
    SiteNotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SiteScoreError>;
