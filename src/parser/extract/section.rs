use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

use super::{choices, combat};
use crate::model::{SectionRecord, SectionType};
use crate::parser::html;
use crate::parser::tables::Tables;

static BODY_SEL: LazyLock<Selector> = LazyLock::new(|| html::selector("div.numbered div.maintext"));
static NUMBER_SEL: LazyLock<Selector> = LazyLock::new(|| html::selector("h3"));
static PARA_SEL: LazyLock<Selector> = LazyLock::new(|| html::selector("p"));
static COMBAT_SEL: LazyLock<Selector> = LazyLock::new(|| html::selector("p.combat"));
static IMG_SEL: LazyLock<Selector> = LazyLock::new(|| html::selector("img[src]"));
static LINK_SEL: LazyLock<Selector> = LazyLock::new(|| html::selector("a[href]"));

/// Why a page was not turned into a section.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SectionError {
    #[error("no div.numbered > div.maintext body")]
    NoBody,
    #[error("no section-number heading")]
    NoHeading,
    #[error("section heading {0:?} is not a number")]
    BadNumber(String),
}

pub fn parse(page: &str, tables: &Tables) -> Result<SectionRecord, SectionError> {
    let doc = Html::parse_document(page);
    let body = doc.select(&BODY_SEL).next().ok_or(SectionError::NoBody)?;

    let heading = body
        .select(&NUMBER_SEL)
        .next()
        .map(html::text)
        .ok_or(SectionError::NoHeading)?;
    let section = match heading.parse::<u32>() {
        Ok(n) if n >= 1 => n,
        _ => return Err(SectionError::BadNumber(heading)),
    };

    let text = narrative(body);
    let choices = choices::extract(body, tables);
    let combat = body
        .select(&COMBAT_SEL)
        .next()
        .and_then(|p| combat::parse(&html::raw_text(p), &text));
    let kind = SectionType::classify(&choices, combat.as_ref(), &text);

    Ok(SectionRecord {
        section,
        kind,
        choices,
        illustrations: illustrations(body),
        combat,
        text,
    })
}

/// Non-choice, non-combat paragraphs in body order, blank-line separated.
fn narrative(body: ElementRef<'_>) -> String {
    body.select(&PARA_SEL)
        .filter(|p| !html::has_class(*p, "choice") && !html::has_class(*p, "combat"))
        .map(html::text)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Local image sources, then links to illustration sub-pages (`ill*.htm`).
fn illustrations(body: ElementRef<'_>) -> Vec<String> {
    let images = body
        .select(&IMG_SEL)
        .filter_map(|img| html::attr(img, "src"))
        .filter(|src| !src.is_empty() && !src.starts_with("http"));

    let pages = body
        .select(&LINK_SEL)
        .filter_map(|a| html::attr(a, "href"))
        .filter(|href| {
            let path = href.split('#').next().unwrap_or("");
            path.contains("ill") && path.ends_with(".htm")
        });

    images.chain(pages).map(str::to_string).collect()
}
