use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("failed to fetch issue {number} from {url}")]
    Fetch {
        number: u32,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The page was retrieved but a region the extractors rely on is missing.
    #[error("issue {number}: {what} not found on page")]
    Structure { number: u32, what: &'static str },

    #[error("failed to access page store {}", path.display())]
    Store {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize page store")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("didn't find {xpath}")]
    ControlNotFound { xpath: String },

    #[error("webdriver request failed")]
    WebDriver(#[from] reqwest::Error),

    #[error("webdriver error: {0}")]
    Protocol(String),
}
