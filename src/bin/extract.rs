use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use lw_content::parser::{self, Extractor};
use lw_content::settings::Settings;

#[derive(Parser)]
#[command(name = "lw_extract", about = "Extract a Lone Wolf book from Project Aon HTML into JSON")]
struct Cli {
    /// Book directory of sect*.htm pages (e.g. source-materials/01fftd)
    book_path: PathBuf,
    /// Output JSON file (default: <output_dir>/book-<n>.json)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    lw_content::init_tracing();
    let settings = Settings::load()?;
    info!(settings = ?settings, "starting extractor");

    let cli = Cli::parse();
    let t0 = Instant::now();

    let extractor = Extractor::new(&cli.book_path).with_progress(true);
    println!("Extracting content from: {}", extractor.book_path().display());
    let result = extractor.extract_all()?;
    let book = result.value;

    let output = cli
        .output
        .unwrap_or_else(|| settings.book_path(book.book_number));
    parser::write_book(&book, &output)?;

    println!("\nExtraction complete in {:.1}s", t0.elapsed().as_secs_f64());
    println!("Stats:");
    println!("  - Sections:    {}", book.sections.len());
    println!("  - Disciplines: {}", book.disciplines.len());
    println!("  - Warnings:    {}", result.warnings.len());
    println!("  - Output:      {}", output.display());
    Ok(())
}
