use log::{debug, warn};
use reqwest::blocking::Client;
use scraper::{Html, Selector};

use crate::error::{Result, ScrapeError};
use crate::extract::{extract_overview, extract_title};
use crate::novel::{NovelRecord, PUBLISHER};
use crate::synopsis::SynopsisResolver;

pub const DEFAULT_BASE_URL: &str = "http://www.perrypedia.proc.org/wiki";

/// Where issue pages come from.
pub trait DocumentSource {
    fn fetch_document(&self, number: u32) -> Result<String>;
}

/// Perrypedia over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Self {
        HttpSource {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url_for_novel(&self, number: u32) -> String {
        format!("{}/Quelle:PR{}", self.base_url, number)
    }

    fn get(&self, url: &str) -> reqwest::Result<String> {
        self.client.get(url).send()?.error_for_status()?.text()
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        HttpSource::new(DEFAULT_BASE_URL)
    }
}

impl DocumentSource for HttpSource {
    /// A transient failure is retried once before giving up.
    fn fetch_document(&self, number: u32) -> Result<String> {
        let url = self.url_for_novel(number);
        debug!("fetching {}", url);

        match self.get(&url) {
            Ok(html) => Ok(html),
            Err(source) if !is_transient(&source) => Err(ScrapeError::Fetch { number, url, source }),
            Err(err) => {
                warn!("fetching {} failed, retrying: {}", url, err);
                self.get(&url)
                    .map_err(|source| ScrapeError::Fetch { number, url, source })
            }
        }
    }
}

/// Network trouble and server errors may go away on a second attempt,
/// client errors such as a missing page will not.
fn is_transient(err: &reqwest::Error) -> bool {
    match err.status() {
        Some(status) => status.is_server_error(),
        None => err.is_connect() || err.is_timeout() || err.is_request() || err.is_body(),
    }
}

/// Assembles a [`NovelRecord`] from a fetched issue page.
#[derive(Debug, Clone)]
pub struct PageFetcher<S> {
    source: S,
    synopsis: SynopsisResolver,
}

impl<S: DocumentSource> PageFetcher<S> {
    pub fn new(source: S, synopsis: SynopsisResolver) -> Self {
        PageFetcher { source, synopsis }
    }

    pub fn fetch(&self, number: u32) -> Result<NovelRecord> {
        let html = self.source.fetch_document(number)?;
        parse_novel_page(&html, number, &self.synopsis)
    }
}

/// Parse one issue page.
///
/// Missing content, body or overview regions are errors; missing fields
/// inside them are not.
pub fn parse_novel_page(
    html: &str,
    number: u32,
    synopsis: &SynopsisResolver,
) -> Result<NovelRecord> {
    let document = Html::parse_document(html);
    let content_selector = Selector::parse("#content").unwrap();
    let body_selector = Selector::parse("#bodyContent").unwrap();
    let table_selector = Selector::parse("div.perrypedia_std_rframe.overview > table").unwrap();

    let structure_error = |what| ScrapeError::Structure { number, what };

    let content = document
        .select(&content_selector)
        .next()
        .ok_or_else(|| structure_error("content region"))?;
    let title = extract_title(content).ok_or_else(|| structure_error("title"))?;

    let body = content
        .select(&body_selector)
        .next()
        .ok_or_else(|| structure_error("body content"))?;
    let table = body
        .select(&table_selector)
        .next()
        .ok_or_else(|| structure_error("overview table"))?;

    let overview = extract_overview(table);

    Ok(NovelRecord {
        number,
        title,
        author: overview.author,
        cycle: overview.cycle,
        publish_date: overview.publish_date,
        synopsis: synopsis.resolve_synopsis(body, number),
        publisher: PUBLISHER.to_string(),
    })
}
