use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use tempfile::NamedTempFile;

use crate::error::{Result, ScrapeError};
use crate::fetch::{DocumentSource, PageFetcher};
use crate::novel::NovelRecord;

pub const DEFAULT_STORE: &str = "novels.json";

/// Produces the record for one issue number.
pub trait Fetch {
    fn fetch(&self, number: u32) -> Result<NovelRecord>;
}

impl<S: DocumentSource> Fetch for PageFetcher<S> {
    fn fetch(&self, number: u32) -> Result<NovelRecord> {
        PageFetcher::fetch(self, number)
    }
}

type ProgressFn = Box<dyn FnMut(&NovelRecord)>;

/// All issues fetched so far, backed by a JSON file.
///
/// Pages are kept contiguous from issue 1. Every fetched page is written to
/// disk before the next one is requested, so an interrupted run only loses
/// the page in flight.
pub struct Repository<F> {
    path: PathBuf,
    pages: Vec<NovelRecord>,
    fetcher: F,
    on_fetched: ProgressFn,
}

impl<F: Fetch> Repository<F> {
    /// Open the store at `path`. A missing or unreadable store starts empty.
    pub fn open<P: Into<PathBuf>>(path: P, fetcher: F) -> Self {
        let path = path.into();
        let pages = load(&path);
        info!("loaded {} pages from {}", pages.len(), path.display());
        Repository {
            path,
            pages,
            fetcher,
            on_fetched: Box::new(|_| {}),
        }
    }

    /// Called with every newly fetched page.
    pub fn with_progress<P: FnMut(&NovelRecord) + 'static>(mut self, progress: P) -> Self {
        self.on_fetched = Box::new(progress);
        self
    }

    pub fn pages(&self) -> &[NovelRecord] {
        &self.pages
    }

    /// Fetch issues up to `end` that are not in the store yet.
    ///
    /// Fetching resumes after the last stored issue. A `start` beyond that
    /// point still fills the gap first so the store stays contiguous. The
    /// first failing fetch aborts the run; pages fetched before it are kept.
    pub fn generate(&mut self, start: u32, end: u32) -> Result<()> {
        let next = self.pages.len() as u32 + 1;
        if start > next {
            info!("store ends at issue {}, fetching from {} instead of {}", next - 1, next, start);
        }

        for number in next..=end {
            let novel = self.fetcher.fetch(number)?;
            debug!("fetched issue {}: {}", novel.number, novel.title);
            self.pages.push(novel);
            self.save()?;
            if let Some(novel) = self.pages.last() {
                (self.on_fetched)(novel);
            }
        }

        Ok(())
    }

    /// Issues `start..=end`, generating the store first if it is empty.
    ///
    /// Only an empty store triggers fetching; otherwise the result is
    /// truncated to what has been stored.
    pub fn slice(&mut self, start: u32, end: u32) -> Result<&[NovelRecord]> {
        if self.pages.is_empty() {
            self.generate(1, end)?;
        }

        let from = start.saturating_sub(1) as usize;
        let to = (end as usize).min(self.pages.len());
        Ok(if from < to { &self.pages[from..to] } else { &[] })
    }

    fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.pages)?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir).map_err(|err| self.store_error(err))?;
        file.write_all(json.as_bytes())
            .map_err(|err| self.store_error(err))?;
        file.persist(&self.path)
            .map_err(|err| self.store_error(err.error))?;
        Ok(())
    }

    fn store_error(&self, source: io::Error) -> ScrapeError {
        ScrapeError::Store {
            path: self.path.clone(),
            source,
        }
    }
}

/// Read a page store. Anything unreadable is treated as an empty store.
pub fn load(path: &Path) -> Vec<NovelRecord> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Vec::new(),
        Err(err) => {
            warn!("cannot read {}, starting empty: {}", path.display(), err);
            return Vec::new();
        }
    };

    match serde_json::from_str(&text) {
        Ok(pages) => contiguous_prefix(pages),
        Err(err) => {
            warn!("cannot parse {}, starting empty: {}", path.display(), err);
            Vec::new()
        }
    }
}

fn contiguous_prefix(mut pages: Vec<NovelRecord>) -> Vec<NovelRecord> {
    let valid = pages
        .iter()
        .enumerate()
        .take_while(|(index, page)| page.number as usize == index + 1)
        .count();
    if valid < pages.len() {
        warn!(
            "page store is not contiguous after issue {}, dropping {} pages",
            valid,
            pages.len() - valid
        );
        pages.truncate(valid);
    }
    pages
}
