//! Text normalization for extracted page content
//!
//! Titles and paragraph text arrive from the parser with whatever
//! indentation, line breaks, and stray markup the document carried. This
//! module compacts that text into the form stored on page records.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches script and style elements with their contents, or any other
/// residual tag
static MARKUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script>|<style\b[^>]*>.*?</style>|<[^>]*>")
        .expect("markup pattern is valid")
});

/// Matches runs of two or more whitespace characters, including Unicode
/// space separators
static WHITESPACE_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s\p{Zs}]{2,}").expect("whitespace pattern is valid"));

/// Compacts extracted text for storage.
///
/// Residual markup is stripped first: script and style elements disappear
/// with their contents, any other tag loses its brackets. Runs of two or
/// more whitespace characters are then deleted outright, not replaced with
/// a single space; interior single spaces survive untouched. The result is
/// trimmed at both ends. Formatting whitespace from markup (indentation,
/// line breaks between tags) disappears entirely while ordinary word
/// spacing is preserved.
///
/// # Arguments
///
/// * `text` - Raw text content extracted from the document
///
/// # Returns
///
/// The compacted string, possibly empty
pub fn normalize(text: &str) -> String {
    let stripped = MARKUP.replace_all(text, "");
    WHITESPACE_RUNS.replace_all(&stripped, "").trim().to_string()
}
