use anyhow::{Context, Result};
use clap::Parser;
use perrypedia_scraper::{
    authors_by_frequency, count_with_synopsis, Cli, Config, EpubLibrary, HttpSource, NovelRecord,
    OutputMode, PageFetcher, Repository, SynopsisResolver, Uploader, WebDriver,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_cli(Cli::parse())?;

    let fetcher = PageFetcher::new(
        HttpSource::new(&config.base_url),
        SynopsisResolver::new(config.epub_dir.clone().map(EpubLibrary::new)),
    );
    let mut repository = Repository::open(config.store.clone(), fetcher);
    if config.verbose {
        repository = repository.with_progress(print_progress);
    }

    let pages = repository
        .slice(config.start, config.end)
        .with_context(|| format!("Failed to read issues {}-{}", config.start, config.end))?;

    match config.output {
        OutputMode::Goodreads => {
            for page in pages {
                println!("{}", page.catalog_text());
            }
        }
        OutputMode::Summary => {
            println!("{} with synopsis", count_with_synopsis(pages));
            for (author, count) in authors_by_frequency(pages) {
                println!("{:>5}  {}", count, author.unwrap_or("(unknown)"));
            }
        }
    }

    if let Some(credentials) = &config.upload {
        let browser = WebDriver::connect(&config.webdriver_url)
            .with_context(|| format!("Failed to start browser at {}", config.webdriver_url))?;
        let mut uploader = Uploader::new(browser);
        uploader
            .login(&credentials.account, &credentials.password)
            .context("Failed to log in to goodreads")?;
        let uploaded = uploader.upload(pages);
        println!("Uploaded {} of {} issues", uploaded.len(), pages.len());
    }

    Ok(())
}

fn print_progress(novel: &NovelRecord) {
    println!("{} {}", novel.number, novel.title);
    if let Some(synopsis) = &novel.synopsis {
        println!("   {}", synopsis);
    }
}
