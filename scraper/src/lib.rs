pub mod config;
pub mod date;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod novel;
pub mod repository;
pub mod stats;
pub mod synopsis;
pub mod upload;

#[cfg(test)]
pub mod tests;

// Re-export key types and functions for easier access
pub use crate::config::{Cli, Config, Credentials, OutputMode};
pub use crate::date::parse_date;
pub use crate::error::{ScrapeError, UploadError};
pub use crate::fetch::{parse_novel_page, DocumentSource, HttpSource, PageFetcher};
pub use crate::novel::NovelRecord;
pub use crate::repository::{Fetch, Repository};
pub use crate::stats::{authors_by_frequency, count_authors, count_with_synopsis};
pub use crate::synopsis::{EpubLibrary, SynopsisResolver};
pub use crate::upload::{Browser, Publisher, Uploader, WebDriver};
