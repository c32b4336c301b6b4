use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::model::ChoiceRecord;
use crate::parser::html;
use crate::parser::tables::Tables;

static CHOICE_SEL: LazyLock<Selector> = LazyLock::new(|| html::selector("p.choice"));
static LINK_SEL: LazyLock<Selector> = LazyLock::new(|| html::selector("a"));
static TARGET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"sect(\d+)\.htm").unwrap());

/// Every `p.choice` under `body` whose first link points at a section page.
pub fn extract(body: ElementRef<'_>, tables: &Tables) -> Vec<ChoiceRecord> {
    body.select(&CHOICE_SEL)
        .filter_map(|p| parse_choice(p, tables))
        .collect()
}

fn parse_choice(p: ElementRef<'_>, tables: &Tables) -> Option<ChoiceRecord> {
    let link = p.select(&LINK_SEL).next()?;
    let target = target_section(html::attr(link, "href").unwrap_or(""))?;
    let text = html::text(p);

    let conditional = tables.is_conditional(&text);
    let requires = if conditional {
        tables.required_discipline(&text).map(str::to_string)
    } else {
        None
    };

    Some(ChoiceRecord {
        text,
        target,
        conditional,
        requires,
    })
}

pub fn target_section(href: &str) -> Option<u32> {
    TARGET_RE.captures(href)?[1].parse().ok()
}
