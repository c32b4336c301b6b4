use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use lw_content::settings::Settings;
use lw_content::validate::{self, report, Summary};

/// Checks every `book-*.json` under the output directory (`LW_OUTPUT_DIR`,
/// default `extracted-content`).
#[derive(Parser)]
#[command(name = "lw_validate", about = "Validate extracted Lone Wolf book JSON")]
struct Cli {}

fn main() -> Result<()> {
    lw_content::init_tracing();
    let _cli = Cli::parse();
    let settings = Settings::load()?;
    info!(settings = ?settings, "starting validator");

    let dir = &settings.output_dir;
    if !dir.is_dir() {
        println!("No {} directory found!", dir.display());
        return Ok(());
    }

    let files = validate::book_files(dir)?;
    if files.is_empty() {
        println!("No book JSON files found!");
        return Ok(());
    }
    println!("Found {} books to validate", files.len());

    let mut results = Vec::with_capacity(files.len());
    for path in &files {
        report::print_header(path);
        match validate::validate_file(path) {
            Ok(result) => {
                report::print_book(&result);
                results.push(result);
            }
            Err(e) => error!(path = %path.display(), "could not validate: {:#}", e),
        }
    }

    report::print_summary(&Summary::from_results(&results));
    Ok(())
}
