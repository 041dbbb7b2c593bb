//! Pure extractors turning fragments of a Perrypedia page into typed values.

use chrono::NaiveDate;
use scraper::{ElementRef, Selector};

use crate::date::parse_date;

const TITLE_SUFFIX: &str = " (Roman)";

/// Metadata found in the overview table of an issue page.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Overview {
    pub author: Option<String>,
    pub cycle: Option<String>,
    pub publish_date: Option<NaiveDate>,
}

type TitleStrategy = fn(ElementRef) -> Option<String>;

/// Read the issue title from the page heading inside the content region.
///
/// The inline `span` of the heading is preferred, the heading's own text is
/// used when the span is missing or empty.
pub fn extract_title(content: ElementRef) -> Option<String> {
    let h1_selector = Selector::parse("h1").unwrap();
    let heading = content.select(&h1_selector).next()?;

    let strategies: [TitleStrategy; 2] = [heading_span_title, heading_title];
    strategies.iter().find_map(|strategy| strategy(heading))
}

fn heading_span_title(heading: ElementRef) -> Option<String> {
    child_elements(heading, "span")
        .next()
        .and_then(|span| clean_title(&text_of(span)))
}

fn heading_title(heading: ElementRef) -> Option<String> {
    clean_title(&text_of(heading))
}

fn clean_title(text: &str) -> Option<String> {
    non_empty(text.replace(TITLE_SUFFIX, "").trim())
}

/// Scan the rows of the overview table for author, cycle and publication date.
pub fn extract_overview(table: ElementRef) -> Overview {
    let tr_selector = Selector::parse("tr").unwrap();
    let mut overview = Overview::default();

    for row in table.select(&tr_selector) {
        let cells: Vec<ElementRef> = child_elements(row, "td").collect();
        let label = match cells.first().map(|cell| text_of(*cell)) {
            Some(label) if !label.trim().is_empty() => label,
            _ => continue,
        };
        let value = cells.get(1).copied();

        if label.contains("Autor:") {
            overview.author = value.and_then(extract_link_text);
        } else if label.contains("Zyklus:") {
            overview.cycle = value.and_then(extract_link_text);
        } else if label.contains("Erstmals") && label.contains("erschienen") {
            overview.publish_date = value.and_then(|cell| parse_date(&text_of(cell)));
        }
    }

    overview
}

/// Text of the first link in a table cell, or the cell's own text if it has
/// no usable link. Non-breaking spaces become regular spaces.
pub fn extract_link_text(cell: ElementRef) -> Option<String> {
    let a_selector = Selector::parse("a").unwrap();
    cell.select(&a_selector)
        .find_map(|link| normalize_text(&text_of(link)))
        .or_else(|| normalize_text(&text_of(cell)))
}

/// Plain text of an element with all markup stripped.
pub fn text_of(element: ElementRef) -> String {
    element.text().collect::<String>()
}

pub fn normalize_text(text: &str) -> Option<String> {
    non_empty(text.replace('\u{a0}', " ").trim())
}

pub(crate) fn child_elements<'a>(
    element: ElementRef<'a>,
    name: &'static str,
) -> impl Iterator<Item = ElementRef<'a>> {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |child| child.value().name() == name)
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
