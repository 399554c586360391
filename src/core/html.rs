// src/core/html.rs
// Small CSS-selector helpers over `scraper`. Every lookup is best-effort:
// a bad selector or a missing element is `None`, never an error.

use scraper::{ElementRef, Html, Selector};

use super::sanitize::normalize_ws;

pub fn parse(doc: &str) -> Html {
    Html::parse_document(doc)
}

/// First element under `scope` matching `css`.
pub fn select_first<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let sel = Selector::parse(css).ok()?;
    scope.select(&sel).next()
}

/// All elements under `scope` matching `css`, in document order.
pub fn select_all<'a>(scope: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(sel) => scope.select(&sel).collect(),
        Err(_) => Vec::new(),
    }
}

/// Visible text with whitespace collapsed. Empty text is `None`.
pub fn text_of(el: ElementRef<'_>) -> Option<String> {
    let text = normalize_ws(&el.text().collect::<String>());
    if text.is_empty() { None } else { Some(text) }
}

/// Trimmed attribute value. Empty values are `None`.
pub fn attr_of(el: ElementRef<'_>, name: &str) -> Option<String> {
    let v = el.value().attr(name)?.trim();
    if v.is_empty() { None } else { Some(v.to_string()) }
}

pub fn first_text(scope: ElementRef<'_>, css: &str) -> Option<String> {
    select_first(scope, css).and_then(text_of)
}

pub fn first_attr(scope: ElementRef<'_>, css: &str, name: &str) -> Option<String> {
    select_first(scope, css).and_then(|el| attr_of(el, name))
}
