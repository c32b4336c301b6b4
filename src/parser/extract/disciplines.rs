use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::model::DisciplineRecord;
use crate::parser::html;
use crate::parser::tables::Tables;

static BODY_SEL: LazyLock<Selector> = LazyLock::new(|| html::selector("div.maintext"));
static HEADING_SEL: LazyLock<Selector> = LazyLock::new(|| html::selector("h4"));
static ANCHOR_SEL: LazyLock<Selector> = LazyLock::new(|| html::selector("a"));

/// Disciplines from the rules page, in document order.
pub fn extract(page: &str, tables: &Tables) -> Vec<DisciplineRecord> {
    let doc = Html::parse_document(page);
    let Some(body) = doc.select(&BODY_SEL).next() else {
        return Vec::new();
    };

    body.select(&HEADING_SEL)
        .map(|heading| {
            let name = html::text(heading);
            let id = heading
                .select(&ANCHOR_SEL)
                .next()
                .and_then(|a| html::attr(a, "name"))
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| slug(&name));

            DisciplineRecord {
                id,
                description: description(heading, tables),
                name,
            }
        })
        .collect()
}

/// `Mind Over Matter` → `mind_over_matter`
pub fn slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

/// Paragraph siblings after `heading` up to the next `h4`.
fn description(heading: ElementRef<'_>, tables: &Tables) -> String {
    heading
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .take_while(|el| el.value().name() != "h4")
        .filter(|el| el.value().name() == "p")
        .map(html::text)
        .filter(|t| !t.is_empty() && !t.starts_with(tables.description_boilerplate))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_page_fixture() {
        let page = std::fs::read_to_string("tests/fixtures/01fftd/discplnz.htm").unwrap();
        let d = extract(&page, &Tables::default());
        let ids: Vec<&str> = d.iter().map(|x| x.id.as_str()).collect();
        assert_eq!(ids, vec!["camflage", "sixthsns", "mind_over_matter"]);
        assert_eq!(d[0].name, "Camouflage");
        assert_eq!(
            d[0].description,
            "This Discipline enables a Kai Lord to blend in with his surroundings. \
             In the countryside, he can hide undetected among trees and rocks."
        );
        assert!(!d[1].description.contains("If you choose"));
        assert_eq!(d[2].name, "Mind Over Matter");
        assert_eq!(d[2].description, "Small objects can be moved by concentration alone.");
    }

    #[test]
    fn no_body_no_disciplines() {
        assert!(extract("<html><body><h4>Healing</h4></body></html>", &Tables::default()).is_empty());
    }

    #[test]
    fn slug_is_json_safe() {
        assert_eq!(slug("Animal Kinship"), "animal_kinship");
    }
}
