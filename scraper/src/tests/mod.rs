use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::novel::{NovelRecord, PUBLISHER};

pub mod date_tests;
pub mod fixtures;
pub mod upload_tests;

/// Helper function to log and save failed HTML for future regression testing
pub fn save_failed_html(html: &str, test_name: &str) -> Result<()> {
    // Create tests/fixtures/failures directory if it doesn't exist
    let failures_dir = Path::new("src/tests/fixtures/failures");
    fs::create_dir_all(failures_dir)?;

    // Save the HTML for further analysis
    let file_path = failures_dir.join(format!("{}.html", test_name));
    fs::write(&file_path, html)?;

    println!("Saved failed HTML to {}", file_path.display());
    Ok(())
}

/// A record as the fetcher would produce it, with only the number and author varying.
pub fn novel(number: u32, author: Option<&str>) -> NovelRecord {
    NovelRecord {
        number,
        title: format!("Roman {}", number),
        author: author.map(str::to_string),
        cycle: Some("Die Dritte Macht".to_string()),
        publish_date: chrono::NaiveDate::from_ymd_opt(1961, 9, 8),
        synopsis: None,
        publisher: PUBLISHER.to_string(),
    }
}
