use std::collections::BTreeMap;

use crate::novel::NovelRecord;

/// Number of issues per author. Issues without an author count under `None`.
pub fn count_authors(pages: &[NovelRecord]) -> BTreeMap<Option<&str>, usize> {
    let mut authors = BTreeMap::new();
    for page in pages {
        *authors.entry(page.author.as_deref()).or_insert(0) += 1;
    }
    authors
}

/// Authors ordered by number of issues, most prolific first.
pub fn authors_by_frequency(pages: &[NovelRecord]) -> Vec<(Option<&str>, usize)> {
    let mut authors: Vec<_> = count_authors(pages).into_iter().collect();
    authors.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    authors
}

pub fn count_with_synopsis(pages: &[NovelRecord]) -> usize {
    pages.iter().filter(|page| page.synopsis.is_some()).count()
}
