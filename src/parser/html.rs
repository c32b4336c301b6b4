use scraper::{ElementRef, Selector};

/// Compile a selector literal. Only called with constant patterns.
pub fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("bad selector {:?}: {}", css, e))
}

/// Concatenated descendant text, untouched.
pub fn raw_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Descendant text with ends trimmed and every internal whitespace run
/// (source line breaks, indentation, NBSP) collapsed to one space, so a
/// phrase wrapped across lines in the page reads as a single line.
pub fn text(el: ElementRef<'_>) -> String {
    normalize_ws(&raw_text(el))
}

pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

pub fn attr<'a>(el: ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value().attr(name)
}
