use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use scraper::{ElementRef, Html, Selector};
use zip::ZipArchive;

use crate::extract::text_of;

/// Heading text that introduces the short summary on an issue page.
pub const SYNOPSIS_MARKER: &str = "Kurzzusammenfassung";

/// More candidate paragraphs than this means the EPUB document is not the blurb.
pub const MAX_SYNOPSIS_PARAGRAPHS: usize = 20;

const MIN_PARAGRAPH_CHARS: usize = 10;

/// Finds a synopsis on the page itself, falling back to the EPUB collection.
#[derive(Debug, Clone, Default)]
pub struct SynopsisResolver {
    library: Option<EpubLibrary>,
}

impl SynopsisResolver {
    pub fn new(library: Option<EpubLibrary>) -> Self {
        SynopsisResolver { library }
    }

    pub fn resolve_synopsis(&self, body: ElementRef, number: u32) -> Option<String> {
        synopsis_from_page(body).or_else(|| {
            self.library
                .as_ref()
                .and_then(|library| library.synopsis(number))
        })
    }
}

/// The first paragraph after the "Kurzzusammenfassung" heading, tags stripped.
pub fn synopsis_from_page(body: ElementRef) -> Option<String> {
    let mut found_heading = false;

    for element in body.descendants().filter_map(ElementRef::wrap) {
        match element.value().name() {
            "h2" if text_of(element).contains(SYNOPSIS_MARKER) => found_heading = true,
            "p" if found_heading => {
                let text = text_of(element).trim().to_string();
                return if text.is_empty() { None } else { Some(text) };
            }
            _ => {}
        }
    }

    None
}

/// A directory of EPUB files grouped in hundred-issue buckets.
#[derive(Debug, Clone)]
pub struct EpubLibrary {
    base_dir: PathBuf,
}

impl EpubLibrary {
    pub fn new<P: Into<PathBuf>>(base_dir: P) -> Self {
        EpubLibrary {
            base_dir: base_dir.into(),
        }
    }

    /// Path of the EPUB for an issue, if the collection has one.
    pub fn epub_for_novel(&self, number: u32) -> Option<PathBuf> {
        let pattern = format!(
            "{}/{}/{:04}*.epub",
            glob::Pattern::escape(&self.base_dir.to_string_lossy()),
            bucket_for(number),
            number
        );

        let paths = match glob::glob(&pattern) {
            Ok(paths) => paths,
            Err(err) => {
                warn!("invalid EPUB search pattern {}: {}", pattern, err);
                return None;
            }
        };

        paths.filter_map(|entry| entry.ok()).next()
    }

    pub fn synopsis(&self, number: u32) -> Option<String> {
        let path = self.epub_for_novel(number);
        match &path {
            Some(path) => debug!("issue {}: reading synopsis from {}", number, path.display()),
            None => debug!("issue {}: no EPUB found", number),
        }
        synopsis_from_epub(&path?)
    }
}

/// Bucket directory name for an issue: `0001-0099`, `0100-0199`, ...
pub fn bucket_for(number: u32) -> String {
    let hundreds = number / 100;
    let first = if number > 99 { "00" } else { "01" };
    format!("{:02}{}-{:02}99", hundreds, first, hundreds)
}

/// Search the content documents of an EPUB for the blurb paragraphs.
///
/// A missing or corrupt archive counts as "no synopsis".
pub fn synopsis_from_epub(path: &Path) -> Option<String> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            warn!("cannot open {}: {}", path.display(), err);
            return None;
        }
    };
    let mut archive = match ZipArchive::new(file) {
        Ok(archive) => archive,
        Err(err) => {
            warn!("{} is not a valid EPUB: {}", path.display(), err);
            return None;
        }
    };

    for index in 0..archive.len() {
        let mut entry = match archive.by_index(index) {
            Ok(entry) => entry,
            Err(err) => {
                warn!("skipping unreadable entry {} in {}: {}", index, path.display(), err);
                continue;
            }
        };
        if !is_content_document(entry.name()) {
            continue;
        }

        let mut content = String::new();
        if let Err(err) = entry.read_to_string(&mut content) {
            warn!("skipping {} in {}: {}", entry.name(), path.display(), err);
            continue;
        }

        if let Some(synopsis) = synopsis_from_content(&content) {
            return Some(synopsis);
        }
    }

    None
}

/// Blurb paragraphs of one EPUB content document, joined by newlines.
pub fn synopsis_from_content(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let p_selector = Selector::parse(r#"body > p[class="P-P2"]"#).unwrap();

    let paragraphs: Vec<String> = document
        .select(&p_selector)
        .map(|p| text_of(p).trim().to_string())
        .filter(|text| text.chars().count() > MIN_PARAGRAPH_CHARS)
        .collect();

    if (1..=MAX_SYNOPSIS_PARAGRAPHS).contains(&paragraphs.len()) {
        Some(paragraphs.join("\n"))
    } else {
        None
    }
}

fn is_content_document(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    name.ends_with(".html") || name.ends_with(".xhtml") || name.ends_with(".htm")
}
