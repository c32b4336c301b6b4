use std::path::Path;

use super::{Summary, ValidationResult};

const MAX_LISTED: usize = 10;
const MAX_SECTIONS_LISTED: usize = 20;

pub fn print_header(path: &Path) {
    let name = path.file_name().unwrap_or_default().to_string_lossy();
    println!("\n{}", "=".repeat(60));
    println!("Validating: {}", name);
    println!("{}", "=".repeat(60));
}

pub fn print_book(result: &ValidationResult) {
    let s = &result.stats;
    println!("\nStatistics:");
    println!("  Title: {}", s.title);
    println!("  Book Number: {}", s.book_number);
    println!("  Total Sections: {}", s.total_sections);
    println!("  Disciplines: {}", s.disciplines);
    println!("  Combat Encounters: {}", s.combat_encounters);
    println!("  Conditional Choices: {}", s.conditional_choices);

    println!("\nSection Types:");
    let mut types: Vec<_> = s.section_types.iter().collect();
    types.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
    for (kind, count) in types {
        println!("  {}: {}", kind, count);
    }

    if !result.errors.is_empty() {
        println!("\nErrors ({}):", result.errors.len());
        for error in result.errors.iter().take(MAX_LISTED) {
            println!("  - {}", error);
        }
        print_more(result.errors.len(), MAX_LISTED);
    }

    if !result.warnings.is_empty() {
        println!("\nBroken Links ({}):", result.warnings.len());
        for link in result.warnings.iter().take(MAX_LISTED) {
            println!("  - Section {} -> {}: {}", link.from, link.to, link.text);
        }
        print_more(result.warnings.len(), MAX_LISTED);
    }

    if !result.sections_without_choices.is_empty() {
        let mut listed = result.sections_without_choices.clone();
        listed.sort_unstable();
        println!("\nSections with No Choices ({}):", listed.len());
        listed.truncate(MAX_SECTIONS_LISTED);
        println!("  {:?}", listed);
        print_more(result.sections_without_choices.len(), MAX_SECTIONS_LISTED);
    }

    if !result.type_mismatches.is_empty() {
        println!("\nType Mismatches ({}):", result.type_mismatches.len());
        for (number, stored, derived) in result.type_mismatches.iter().take(MAX_LISTED) {
            println!("  - Section {}: stored {}, content says {}", number, stored, derived);
        }
        print_more(result.type_mismatches.len(), MAX_LISTED);
    }

    if result.passed() {
        println!("\nValidation PASSED - no critical issues found");
    } else if result.errors.is_empty() {
        println!("\nValidation passed with {} warnings", result.warnings.len());
    } else {
        println!("\nValidation FAILED - {} errors found", result.errors.len());
    }
}

pub fn print_summary(summary: &Summary) {
    println!("\n\n{}", "=".repeat(60));
    println!("OVERALL SUMMARY");
    println!("{}", "=".repeat(60));
    println!("\nBooks Validated:     {}", summary.books);
    println!("Total Sections:      {}", summary.total_sections);
    println!("Combat Encounters:   {}", summary.combat_encounters);
    println!("Conditional Choices: {}", summary.conditional_choices);
    println!("Total Errors:        {}", summary.total_errors);
    println!("Total Warnings:      {}", summary.total_warnings);

    if summary.total_errors == 0 {
        println!("\nAll books validated successfully!");
    } else {
        println!("\nValidation issues found - please review errors above");
    }
}

fn print_more(total: usize, shown: usize) {
    if total > shown {
        println!("  ... and {} more", total - shown);
    }
}
