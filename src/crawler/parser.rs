//! HTML parser for extracting page data
//!
//! This module turns a fetched document into a [`PageRecord`]:
//! - The first `<h1>` text
//! - The first paragraph, preferring one inside `<main>`
//! - Anchor targets and image sources, resolved to absolute URLs
//!
//! `scraper` recovers from malformed markup, so extraction never fails; a
//! document without the expected elements simply yields empty fields.

use crate::state::PageRecord;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// A page record together with the links the crawl should follow
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// Extracted data, links resolved against the page URL
    pub record: PageRecord,

    /// Anchor targets resolved against the crawl's base URL
    pub fan_out_links: Vec<String>,
}

/// Extracts the page record for `html` fetched from `page_url`
///
/// # Example
///
/// ```
/// use site_ripple::crawler::extract_page_data;
/// use url::Url;
///
/// let html = r#"<html><body><h1>Test Page</h1><p>first</p><a href="/x">x</a></body></html>"#;
/// let page_url = Url::parse("https://example.com").unwrap();
/// let record = extract_page_data(html, &page_url);
/// assert_eq!(record.h1, "Test Page");
/// assert_eq!(record.outgoing_links, vec!["https://example.com/x".to_string()]);
/// ```
pub fn extract_page_data(html: &str, page_url: &Url) -> PageRecord {
    let document = Html::parse_document(html);
    build_record(&document, page_url)
}

/// Parses `html` once and produces both the record and the fan-out links
///
/// Fan-out links are resolved against `link_base` (the crawl's base URL),
/// while the record's own links are resolved against `page_url`.
pub fn parse_page(html: &str, page_url: &Url, link_base: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        record: build_record(&document, page_url),
        fan_out_links: collect_urls(&document, "a", "href", link_base),
    }
}

/// Returns the absolute targets of every anchor with a non-empty `href`
pub fn extract_links(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    collect_urls(&document, "a", "href", base_url)
}

fn build_record(document: &Html, page_url: &Url) -> PageRecord {
    PageRecord {
        url: page_url.to_string(),
        h1: extract_h1(document),
        first_paragraph: extract_first_paragraph(document),
        outgoing_links: collect_urls(document, "a", "href", page_url),
        image_urls: collect_urls(document, "img", "src", page_url),
    }
}

/// Extracts the trimmed text of the first `<h1>`
fn extract_h1(document: &Html) -> String {
    first_match(document, "h1")
        .map(element_text)
        .unwrap_or_default()
}

/// Extracts the first paragraph, looking inside `<main>` first
fn extract_first_paragraph(document: &Html) -> String {
    let Ok(p_selector) = Selector::parse("p") else {
        return String::new();
    };

    let in_main = first_match(document, "main")
        .and_then(|main| main.select(&p_selector).next());

    in_main
        .or_else(|| document.select(&p_selector).next())
        .map(element_text)
        .unwrap_or_default()
}

fn first_match<'a>(document: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    document.select(&selector).next()
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Collects `attr` of every `tag` element, resolved against `base_url`
///
/// Empty attributes and values that cannot be resolved are skipped.
fn collect_urls(document: &Html, tag: &str, attr: &str, base_url: &Url) -> Vec<String> {
    let Ok(selector) = Selector::parse(tag) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr(attr))
        .filter(|value| !value.is_empty())
        .filter_map(|value| resolve_link(value, base_url))
        .collect()
}

/// Resolves a link to an absolute URL
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    match base_url.join(href) {
        Ok(absolute_url) => Some(absolute_url.to_string()),
        Err(e) => {
            tracing::trace!("Dropping unresolvable link {:?}: {}", href, e);
            None
        }
    }
}
