//! HTML parser for extracting page content
//!
//! This module handles parsing HTML bodies to extract:
//! - The page title
//! - The meta description
//! - Paragraph text
//! - Outbound links, resolved to absolute URLs

use crate::text::normalize;
use crate::url::resolve;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").expect("valid selector"));
static META: Lazy<Selector> = Lazy::new(|| Selector::parse("meta").expect("valid selector"));
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").expect("valid selector"));
static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("valid selector"));

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// Normalized text of the title element; empty when the page has none
    pub title: String,

    /// Meta description, taken verbatim from the tag; empty when the page
    /// has none
    pub description: String,

    /// Resolved absolute outbound links, deduplicated in first-occurrence
    /// order
    pub links: Vec<String>,

    /// Normalized non-empty paragraph texts, document order, duplicates
    /// retained
    pub paragraphs: Vec<String>,
}

/// Parses an HTML body and extracts everything a page record stores
///
/// # Extraction Rules
///
/// - **Title**: normalized text of the title element; with several title
///   elements the last one wins.
/// - **Description**: the `content` attribute of a meta tag whose `name`
///   case-insensitively equals "description". A matching tag without a
///   content attribute falls back to the title. The attribute value is kept
///   verbatim, not normalized.
/// - **Paragraphs**: normalized text of every paragraph element, in document
///   order, skipping those that normalize to empty; duplicates are retained.
/// - **Links**: resolved href of every anchor carrying an href attribute.
///   Hrefs that fail resolution are dropped silently. Duplicates collapse to
///   their first occurrence.
///
/// Parsing itself never fails: the underlying HTML parser recovers from any
/// malformed input.
///
/// # Arguments
///
/// * `html` - The HTML body to parse
/// * `page_url` - Absolute URL of the page, used to resolve relative links
///
/// # Returns
///
/// The extracted page content
pub fn parse_html(html: &str, page_url: &str) -> ParsedPage {
    let document = Html::parse_document(html);

    let title = extract_title(&document);
    let description = extract_description(&document, &title);
    let paragraphs = extract_paragraphs(&document);
    let links = extract_links(&document, page_url);

    ParsedPage {
        title,
        description,
        links,
        paragraphs,
    }
}

/// Extracts the page title; with several title elements the last one wins
fn extract_title(document: &Html) -> String {
    let mut title = String::new();
    for element in document.select(&TITLE) {
        title = normalize(&element.text().collect::<String>());
    }
    title
}

/// Extracts the meta description, falling back to the title for a matching
/// tag without a content attribute
fn extract_description(document: &Html, title: &str) -> String {
    let mut description = String::new();
    for element in document.select(&META) {
        let name = element.value().attr("name").unwrap_or("");
        if name.eq_ignore_ascii_case("description") {
            description = match element.value().attr("content") {
                Some(content) => content.to_string(),
                None => title.to_string(),
            };
        }
    }
    description
}

/// Extracts normalized paragraph texts, skipping those that normalize to
/// empty
fn extract_paragraphs(document: &Html) -> Vec<String> {
    let mut paragraphs = Vec::new();
    for element in document.select(&PARAGRAPH) {
        let text = normalize(&element.text().collect::<String>());
        if !text.is_empty() {
            paragraphs.push(text);
        }
    }
    paragraphs
}

/// Extracts resolved outbound links, deduplicated in first-occurrence order
fn extract_links(document: &Html, page_url: &str) -> Vec<String> {
    let mut links: Vec<String> = Vec::new();
    for element in document.select(&ANCHOR) {
        if let Some(href) = element.value().attr("href") {
            if let Ok(resolved) = resolve(page_url, href) {
                if !links.contains(&resolved) {
                    links.push(resolved);
                }
            }
        }
    }
    links
}
