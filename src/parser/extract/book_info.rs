use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::parser::html;

static TITLE_SEL: LazyLock<Selector> = LazyLock::new(|| html::selector("header#main-header h1"));
static AUTHOR_SEL: LazyLock<Selector> = LazyLock::new(|| html::selector("header#main-header h2"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookInfo {
    pub title: String,
    pub authors: String,
}

impl Default for BookInfo {
    fn default() -> Self {
        BookInfo {
            title: "Unknown".to_string(),
            authors: String::new(),
        }
    }
}

/// Title and author line from the page header; absent parts keep their defaults.
pub fn extract(page: &str) -> BookInfo {
    let doc = Html::parse_document(page);
    let mut info = BookInfo::default();
    if let Some(h1) = doc.select(&TITLE_SEL).next() {
        info.title = html::text(h1);
    }
    if let Some(h2) = doc.select(&AUTHOR_SEL).next() {
        info.authors = html::text(h2);
    }
    info
}
