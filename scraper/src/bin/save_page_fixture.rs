use anyhow::{Context, Result};
use perrypedia_scraper::{parse_novel_page, DocumentSource, HttpSource, SynopsisResolver};
use std::env;
use std::fs;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Please provide an issue number and a test name");
        eprintln!("Usage: cargo run --bin save_page_fixture <NUMBER> <test_name>");
        std::process::exit(1);
    }

    let number = args[1]
        .parse::<u32>()
        .with_context(|| format!("Invalid issue number: {}", args[1]))?;
    let test_name = &args[2];

    let source = HttpSource::default();
    println!("Fetching HTML from {}...", source.url_for_novel(number));
    let html = source.fetch_document(number)?;

    // Create failures directory if it doesn't exist
    let failures_dir = Path::new("src/tests/fixtures/failures");
    fs::create_dir_all(failures_dir).context("Failed to create failures directory")?;

    let file_path = failures_dir.join(format!("{}.html", test_name));
    fs::write(&file_path, &html).context("Failed to write HTML file")?;

    println!(
        "Saved HTML to {} for regression testing",
        file_path.display()
    );

    // Regression fixtures only cover the page itself, not the EPUB fallback
    match parse_novel_page(&html, number, &SynopsisResolver::default()) {
        Ok(novel) => {
            println!("Parse succeeded, this may not be a failure case.");
            println!("{}", novel.catalog_text());
        }
        Err(e) => {
            println!("Parse failed with error: {}", e);
            println!("\nThis page has been saved and will be included in regression tests.");
        }
    }

    Ok(())
}
