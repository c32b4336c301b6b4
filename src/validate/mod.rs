//! Consistency checks over an extracted book.
//!
//! Nothing here fails the run: every finding lands in [`ValidationResult`]
//! and the caller decides how to report it.

pub mod report;

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;

use crate::model::{BookRecord, SectionType};

static BOOK_FILE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^book-.*\.json$").unwrap());

/// A choice pointing at a section the book does not contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenLink {
    pub from: u32,
    pub to: u32,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookStats {
    pub title: String,
    pub book_number: u32,
    pub total_sections: usize,
    pub disciplines: usize,
    pub section_types: BTreeMap<SectionType, usize>,
    pub conditional_choices: usize,
    pub combat_encounters: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<BrokenLink>,
    pub stats: BookStats,
    /// Non-terminal sections without choices. Reported, not counted.
    pub sections_without_choices: Vec<u32>,
    /// Sections whose stored `type` differs from the re-derived one. Reported, not counted.
    pub type_mismatches: Vec<(u32, SectionType, SectionType)>,
}

impl ValidationResult {
    pub fn passed(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Section numbers absent from `1..=max(observed)`.
pub fn missing_sections(present: &BTreeSet<u32>) -> Vec<u32> {
    let max = present.iter().next_back().copied().unwrap_or(0);
    (1..=max).filter(|n| !present.contains(n)).collect()
}

pub fn validate_book(book: &BookRecord) -> ValidationResult {
    let mut result = ValidationResult {
        stats: BookStats {
            title: book.title.clone(),
            book_number: book.book_number,
            total_sections: book.sections.len(),
            disciplines: book.disciplines.len(),
            ..Default::default()
        },
        ..Default::default()
    };

    let present: BTreeSet<u32> = book.sections.keys().copied().collect();
    let missing = missing_sections(&present);
    if !missing.is_empty() {
        result.errors.push(format!("Missing sections: {:?}", missing));
    }

    for (&number, section) in &book.sections {
        *result.stats.section_types.entry(section.kind).or_default() += 1;

        if section.choices.is_empty() && !section.kind.is_terminal() {
            result.sections_without_choices.push(number);
        }

        let derived = section.derived_type();
        if derived != section.kind {
            result.type_mismatches.push((number, section.kind, derived));
        }

        for choice in &section.choices {
            if choice.target != 0 && !present.contains(&choice.target) {
                result.warnings.push(BrokenLink {
                    from: number,
                    to: choice.target,
                    text: choice.text.chars().take(50).collect(),
                });
            }
            if choice.conditional {
                result.stats.conditional_choices += 1;
            }
        }

        if let Some(combat) = &section.combat {
            result.stats.combat_encounters += 1;
            if combat.enemy_name.is_empty() {
                result.errors.push(format!("Section {}: Combat missing enemy name", number));
            }
            if combat.combat_skill == 0 {
                result.errors.push(format!("Section {}: Combat missing CS", number));
            }
            if combat.endurance == 0 {
                result.errors.push(format!("Section {}: Combat missing END", number));
            }
        }
    }

    result
}

pub fn load_book(path: &Path) -> Result<BookRecord> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

pub fn validate_file(path: &Path) -> Result<ValidationResult> {
    Ok(validate_book(&load_book(path)?))
}

/// `book-*.json` files in `dir`, sorted by name.
pub fn book_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let entry = entry?;
        if BOOK_FILE_RE.is_match(&entry.file_name().to_string_lossy()) {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

/// Totals across every validated book.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub books: usize,
    pub total_sections: usize,
    pub combat_encounters: usize,
    pub conditional_choices: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
}

impl Summary {
    pub fn from_results(results: &[ValidationResult]) -> Self {
        results.iter().fold(
            Summary {
                books: results.len(),
                ..Default::default()
            },
            |mut s, r| {
                s.total_sections += r.stats.total_sections;
                s.combat_encounters += r.stats.combat_encounters;
                s.conditional_choices += r.stats.conditional_choices;
                s.total_errors += r.errors.len();
                s.total_warnings += r.warnings.len();
                s
            },
        )
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChoiceRecord, CombatRecord, SectionRecord};
    use crate::parser::extract::equipment;

    fn section(number: u32, targets: &[u32]) -> SectionRecord {
        let choices: Vec<ChoiceRecord> = targets
            .iter()
            .map(|&t| ChoiceRecord {
                text: format!("If you wish to follow the long winding road north, turn to {}", t),
                target: t,
                conditional: false,
                requires: None,
            })
            .collect();
        let kind = SectionType::classify(&choices, None, "");
        SectionRecord {
            section: number,
            text: String::new(),
            kind,
            choices,
            illustrations: vec![],
            combat: None,
        }
    }

    fn book(sections: Vec<SectionRecord>) -> BookRecord {
        BookRecord {
            series: "kai".into(),
            book_number: 1,
            title: "Test".into(),
            authors: String::new(),
            version: "1.0.0".into(),
            disciplines: vec![],
            equipment_rules: equipment::kai_rules(),
            sections: sections.into_iter().map(|s| (s.section, s)).collect(),
        }
    }

    #[test]
    fn gap_is_reported_exactly() {
        let present: BTreeSet<u32> = [1, 2, 4].into_iter().collect();
        assert_eq!(missing_sections(&present), vec![3]);
        assert!(missing_sections(&BTreeSet::new()).is_empty());

        let r = validate_book(&book(vec![section(1, &[2]), section(2, &[4]), section(4, &[])]));
        assert_eq!(r.errors, vec!["Missing sections: [3]".to_string()]);
    }

    #[test]
    fn dangling_target_is_a_warning() {
        let mut sections: Vec<SectionRecord> = (1..=50).map(|n| section(n, &[])).collect();
        sections[9] = section(10, &[11, 99]);
        let r = validate_book(&book(sections));

        assert!(r.errors.is_empty());
        assert_eq!(r.warnings.len(), 1);
        assert_eq!(r.warnings[0].from, 10);
        assert_eq!(r.warnings[0].to, 99);
        assert_eq!(r.warnings[0].text.chars().count(), 50);
        assert!(!r.passed());
    }

    #[test]
    fn combat_fields_checked() {
        let mut s = section(1, &[]);
        s.combat = Some(CombatRecord {
            enemy_name: String::new(),
            combat_skill: 0,
            endurance: 12,
            can_evade: false,
            modifiers: None,
        });
        s.kind = SectionType::Combat;
        let r = validate_book(&book(vec![s]));
        assert_eq!(
            r.errors,
            vec![
                "Section 1: Combat missing enemy name".to_string(),
                "Section 1: Combat missing CS".to_string(),
            ]
        );
        assert_eq!(r.stats.combat_encounters, 1);
        // a fight with nowhere to go is still flagged
        assert_eq!(r.sections_without_choices, vec![1]);
    }

    #[test]
    fn choiceless_non_terminal_is_listed_not_counted() {
        let mut s = section(1, &[]);
        s.kind = SectionType::Narrative;
        let r = validate_book(&book(vec![s]));
        assert_eq!(r.sections_without_choices, vec![1]);
        assert_eq!(r.type_mismatches, vec![(1, SectionType::Narrative, SectionType::Ending)]);
        assert!(r.errors.is_empty());
        assert!(r.warnings.is_empty());
    }

    #[test]
    fn stats_and_summary() {
        let mut c = section(2, &[1]);
        c.choices[0].conditional = true;
        let r1 = validate_book(&book(vec![section(1, &[2, 3]), c, section(3, &[7])]));
        assert_eq!(r1.stats.total_sections, 3);
        assert_eq!(r1.stats.conditional_choices, 1);
        assert_eq!(r1.stats.section_types[&SectionType::Choice], 1);
        assert_eq!(r1.stats.section_types[&SectionType::Narrative], 2);

        let r2 = validate_book(&book(vec![section(2, &[])]));
        let s = Summary::from_results(&[r1, r2]);
        assert_eq!(s.books, 2);
        assert_eq!(s.total_sections, 4);
        assert_eq!(s.total_errors, 1);
        assert_eq!(s.total_warnings, 1);
        assert_eq!(s.conditional_choices, 1);
    }

    #[test]
    fn only_book_files_are_picked_up() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["book-2.json", "book-1.json", "notes.json", "book-1.json.bak"] {
            fs::write(dir.path().join(name), "{}").unwrap();
        }
        let names: Vec<String> = book_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["book-1.json", "book-2.json"]);
    }

    #[test]
    fn null_combat_fields_are_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book-1.json");
        let mut value = serde_json::to_value(book(vec![section(1, &[])])).unwrap();
        value["sections"]["1"]["combat"] = serde_json::json!({
            "enemy_name": null,
            "combat_skill": 12,
            "endurance": null,
            "can_evade": false
        });
        value["sections"]["1"]["type"] = "combat".into();
        fs::write(&path, serde_json::to_string_pretty(&value).unwrap()).unwrap();

        let r = validate_file(&path).unwrap();
        assert_eq!(
            r.errors,
            vec![
                "Section 1: Combat missing enemy name".to_string(),
                "Section 1: Combat missing END".to_string(),
            ]
        );
        assert_eq!(Summary::from_results(&[r]).total_errors, 2);
    }

    #[test]
    fn sections_missing_keys_still_validate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book-1.json");
        let mut value = serde_json::to_value(book(vec![section(1, &[]), section(2, &[])])).unwrap();
        value["sections"]["2"] = serde_json::json!({ "section": 2, "type": "mystery" });
        fs::write(&path, value.to_string()).unwrap();

        let r = validate_file(&path).unwrap();
        assert!(r.errors.is_empty());
        assert_eq!(r.stats.section_types[&SectionType::Unknown], 1);
        assert_eq!(r.sections_without_choices, vec![2]);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book-1.json");
        fs::write(&path, "{\"series\": 1}").unwrap();
        assert!(validate_file(&path).is_err());
    }
}
