use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;

/// A parsed documentation page
pub struct DocPage {
    document: Html,
}

impl DocPage {
    /// Parses page HTML; malformed markup is repaired, never rejected
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// The page title (from the <title> tag)
    pub fn title(&self) -> Option<String> {
        let title_selector = Selector::parse("title").ok()?;

        self.document
            .select(&title_selector)
            .next()
            .map(element_text)
            .filter(|s| !s.is_empty())
    }

    /// Collects every element carrying an `id` or `name` attribute
    ///
    /// Member anchors point into this map. The first element wins when a
    /// page repeats an identifier.
    pub fn anchors(&self) -> AnchorIndex<'_> {
        let mut by_id = HashMap::new();

        if let Ok(selector) = Selector::parse("[id], a[name]") {
            for element in self.document.select(&selector) {
                let value = element.value();
                for key in [value.attr("id"), value.attr("name")].into_iter().flatten() {
                    by_id.entry(key.to_string()).or_insert(element);
                }
            }
        }

        AnchorIndex { by_id }
    }

    /// Selects elements matching a CSS selector; an invalid selector matches nothing
    pub fn select_all(&self, css: &str) -> Vec<ElementRef<'_>> {
        match Selector::parse(css) {
            Ok(selector) => self.document.select(&selector).collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// Page elements keyed by their anchor name
pub struct AnchorIndex<'a> {
    by_id: HashMap<String, ElementRef<'a>>,
}

impl<'a> AnchorIndex<'a> {
    pub fn get(&self, anchor: &str) -> Option<ElementRef<'a>> {
        self.by_id.get(anchor).copied()
    }
}

/// Returns the element's text with whitespace runs collapsed
///
/// Text nodes are joined with a single space, so a link followed by plain
/// text (`<a>play</a>(int x)`) keeps a visible separation.
pub fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(collapse_whitespace)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Selects descendants of an element; an invalid selector matches nothing
pub fn select_in<'a>(element: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => element.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

pub fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
