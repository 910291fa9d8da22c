//! HTML parsing boundary
//!
//! Projects a fetched document into the three views the crawler consumes:
//! the page title, the raw hyperlink targets, and the visible-text word
//! tokens. Script and style elements and stylesheet links are stripped
//! before text extraction so the index holds prose, not CSS class names.

use scraper::{ElementRef, Html, Selector};

/// The three projections of a parsed document.
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// Text of the title element, empty when the document has none.
    pub title: String,

    /// Raw href targets in document order, unfiltered and unresolved.
    pub links: Vec<String>,

    /// Word tokens from the visible text, case preserved.
    pub words: Vec<String>,
}

/// Parses an HTML document into its title, link, and word projections.
pub fn parse_page(html: &str) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        links: extract_links(&document),
        words: extract_words(&document),
    }
}

/// Extracts the page title from the document head.
fn extract_title(document: &Html) -> String {
    let selector = match Selector::parse("head title") {
        Ok(selector) => selector,
        Err(_) => return String::new(),
    };

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Collects every anchor's href, exactly as written in the document.
///
/// Filtering (self-links, mail links, archives) and resolution to absolute
/// form are the fetcher's job; the parser reports what the page says.
fn extract_links(document: &Html) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                links.push(href.to_string());
            }
        }
    }

    links
}

/// Extracts word tokens from the document's visible text.
fn extract_words(document: &Html) -> Vec<String> {
    let mut words = Vec::new();
    collect_words(document.root_element(), &mut words);
    words
}

/// Walks the element tree, tokenizing each text node once.
///
/// Subtrees that never render as content (script, style, and link elements)
/// are skipped entirely.
fn collect_words(element: ElementRef, words: &mut Vec<String>) {
    if matches!(element.value().name(), "script" | "style" | "link") {
        return;
    }

    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            collect_words(child_element, words);
        } else if let Some(text) = child.value().as_text() {
            tokenize(text, words);
        }
    }
}

/// Splits text into alphanumeric runs; everything else is a separator.
fn tokenize(text: &str, words: &mut Vec<String>) {
    let cleaned: String = text
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();

    words.extend(cleaned.split_whitespace().map(str::to_string));
}
