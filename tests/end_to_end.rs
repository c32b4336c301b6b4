// tests/end_to_end.rs
use lw_content::model::SectionType;
use lw_content::parser::{self, Extractor};
use lw_content::settings::Settings;
use lw_content::validate::{self, Summary};

#[test]
fn extract_write_validate_fixture_book() {
    let book = Extractor::new("tests/fixtures/01fftd")
        .extract_all()
        .unwrap()
        .value;

    let dir = tempfile::tempdir().unwrap();
    let settings = Settings {
        output_dir: dir.path().join("extracted-content"),
    };
    let out = settings.book_path(book.book_number);
    parser::write_book(&book, &out).unwrap();

    let files = validate::book_files(&settings.output_dir).unwrap();
    assert_eq!(files, vec![out.clone()]);

    let result = validate::validate_file(&out).unwrap();
    assert_eq!(result.errors, vec!["Missing sections: [6]".to_string()]);
    assert_eq!(result.warnings.len(), 1);
    assert_eq!((result.warnings[0].from, result.warnings[0].to), (7, 99));
    assert!(result.sections_without_choices.is_empty());
    assert!(result.type_mismatches.is_empty());

    let stats = &result.stats;
    assert_eq!(stats.total_sections, 6);
    assert_eq!(stats.disciplines, 3);
    assert_eq!(stats.combat_encounters, 1);
    assert_eq!(stats.conditional_choices, 2);
    assert_eq!(stats.section_types[&SectionType::Choice], 2);
    assert_eq!(stats.section_types[&SectionType::Defeat], 1);
    assert_eq!(stats.section_types[&SectionType::Victory], 1);

    let summary = Summary::from_results(&[result]);
    assert_eq!(summary.total_errors, 1);
    assert_eq!(summary.total_warnings, 1);
}

#[test]
fn rerun_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("book-1.json");

    let first = Extractor::new("tests/fixtures/01fftd").extract_all().unwrap().value;
    parser::write_book(&first, &out).unwrap();
    let a = std::fs::read(&out).unwrap();

    let second = Extractor::new("tests/fixtures/01fftd").extract_all().unwrap().value;
    parser::write_book(&second, &out).unwrap();
    let b = std::fs::read(&out).unwrap();

    assert_eq!(a, b);
}
