use std::path::PathBuf;

use clap::Parser;

use crate::error::{Result, ScrapeError};
use crate::fetch::DEFAULT_BASE_URL;
use crate::repository::DEFAULT_STORE;
use crate::upload::DEFAULT_WEBDRIVER_URL;

/// Read Perrypedia and print info about Perry Rhodan issues
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// First issue
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub start: u32,

    /// Last issue (defaults to the first issue)
    #[arg(short, long)]
    pub end: Option<u32>,

    /// Print info required by goodreads
    #[arg(short, long)]
    pub goodreads: bool,

    /// Upload novel descriptions to goodreads, if not present
    #[arg(short, long)]
    pub upload: bool,

    /// Email used for the goodreads account
    #[arg(short = 'a', long, env = "GOODREADS_ACCOUNT")]
    pub goodreads_account: Option<String>,

    /// Password used for the goodreads account
    #[arg(short = 'p', long, env = "GOODREADS_PASSWORD", hide_env_values = true)]
    pub goodreads_password: Option<String>,

    /// File holding the pages fetched so far
    #[arg(long, env = "PERRYPEDIA_STORE", default_value = DEFAULT_STORE)]
    pub store: PathBuf,

    /// EPUB collection searched for synopses missing on Perrypedia
    #[arg(long, env = "PERRYPEDIA_EPUB_DIR")]
    pub epub_dir: Option<PathBuf>,

    /// Wiki base URL the issue pages are fetched from
    #[arg(long, env = "PERRYPEDIA_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// WebDriver endpoint driving the browser for uploads
    #[arg(long, env = "WEBDRIVER_URL", default_value = DEFAULT_WEBDRIVER_URL)]
    pub webdriver_url: String,

    /// Don't print a line per fetched issue
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Synopsis count and author statistics
    Summary,
    /// Full record text per issue
    Goodreads,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub account: String,
    pub password: String,
}

/// Validated settings for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub start: u32,
    pub end: u32,
    pub output: OutputMode,
    pub upload: Option<Credentials>,
    pub store: PathBuf,
    pub epub_dir: Option<PathBuf>,
    pub base_url: String,
    pub webdriver_url: String,
    pub verbose: bool,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Config> {
        let end = cli.end.unwrap_or(cli.start);
        if end < cli.start {
            return Err(ScrapeError::Config(format!(
                "last issue {} is before first issue {}",
                end, cli.start
            )));
        }

        let upload = if cli.upload {
            match (cli.goodreads_account, cli.goodreads_password) {
                (Some(account), Some(password)) if !account.is_empty() && !password.is_empty() => {
                    Some(Credentials { account, password })
                }
                _ => {
                    return Err(ScrapeError::Config(
                        "when choosing upload, account and password must be given".to_string(),
                    ))
                }
            }
        } else {
            None
        };

        Ok(Config {
            start: cli.start,
            end,
            output: if cli.goodreads {
                OutputMode::Goodreads
            } else {
                OutputMode::Summary
            },
            upload,
            store: cli.store,
            epub_dir: cli.epub_dir,
            base_url: cli.base_url,
            webdriver_url: cli.webdriver_url,
            verbose: !cli.quiet,
        })
    }
}
