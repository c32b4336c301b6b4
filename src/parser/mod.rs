pub mod extract;
pub mod html;
pub mod tables;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;
use tracing::{debug, info, warn};

use crate::model::{
    BookRecord, DisciplineRecord, EquipmentRules, SectionRecord, FORMAT_VERSION, SERIES,
};
use extract::book_info::BookInfo;
use extract::{book_info, disciplines, equipment, section, ExtractWarning, Extracted};
use tables::Tables;

pub const FIRST_SECTION_PAGE: &str = "sect1.htm";
pub const DISCIPLINES_PAGE: &str = "discplnz.htm";
pub const EQUIPMENT_PAGE: &str = "equipmnt.htm";

static SECTION_FILE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^sect.*\.htm$").unwrap());

/// Turns one book directory of Project Aon pages into a [`BookRecord`].
pub struct Extractor {
    book_path: PathBuf,
    tables: Tables,
    progress: bool,
}

impl Extractor {
    pub fn new(book_path: impl Into<PathBuf>) -> Self {
        Extractor {
            book_path: book_path.into(),
            tables: Tables::default(),
            progress: false,
        }
    }

    pub fn with_tables(mut self, tables: Tables) -> Self {
        self.tables = tables;
        self
    }

    /// Draw a progress bar while section pages are parsed.
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn book_path(&self) -> &Path {
        &self.book_path
    }

    pub fn extract_all(&self) -> Result<Extracted<BookRecord>> {
        info!(path = %self.book_path.display(), "extracting book");

        let mut out = Extracted::new(());
        let info = out.absorb(self.extract_book_info()?);
        let disciplines = out.absorb(self.extract_disciplines()?);
        let equipment_rules = out.absorb(self.extract_equipment_rules());
        let sections = out.absorb(self.extract_all_sections()?);

        let book = BookRecord {
            series: SERIES.to_string(),
            book_number: self.book_number(),
            title: info.title,
            authors: info.authors,
            version: FORMAT_VERSION.to_string(),
            disciplines,
            equipment_rules,
            sections,
        };
        Ok(Extracted {
            value: book,
            warnings: out.warnings,
        })
    }

    pub fn extract_book_info(&self) -> Result<Extracted<BookInfo>> {
        let mut out = Extracted::new(BookInfo::default());
        match self.read_page(FIRST_SECTION_PAGE)? {
            Some(page) => out.value = book_info::extract(&page),
            None => self.missing(&mut out, FIRST_SECTION_PAGE),
        }
        Ok(out)
    }

    pub fn extract_disciplines(&self) -> Result<Extracted<Vec<DisciplineRecord>>> {
        let mut out = Extracted::new(Vec::new());
        match self.read_page(DISCIPLINES_PAGE)? {
            Some(page) => {
                out.value = disciplines::extract(&page, &self.tables);
                info!(count = out.value.len(), "extracted disciplines");
            }
            None => self.missing(&mut out, DISCIPLINES_PAGE),
        }
        Ok(out)
    }

    pub fn extract_equipment_rules(&self) -> Extracted<EquipmentRules> {
        let mut out = Extracted::new(equipment::kai_rules());
        if !self.book_path.join(EQUIPMENT_PAGE).exists() {
            self.missing(&mut out, EQUIPMENT_PAGE);
        }
        out
    }

    /// Parse every `sect*.htm` page. Pages that are not sections are skipped
    /// with a warning; unreadable files abort the run.
    pub fn extract_all_sections(&self) -> Result<Extracted<BTreeMap<u32, SectionRecord>>> {
        let files = self.section_files()?;
        info!(count = files.len(), "found section files");

        let pb = if self.progress {
            let pb = ProgressBar::new(files.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                    .progress_chars("#>-"),
            );
            pb
        } else {
            ProgressBar::hidden()
        };

        let mut out = Extracted::new(BTreeMap::new());
        for path in files {
            let page = fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;

            match section::parse(&page, &self.tables) {
                Ok(record) => {
                    for choice in &record.choices {
                        if choice.conditional && choice.requires.is_none() {
                            debug!(section = record.section, text = %choice.text, "unresolved discipline");
                            out.warn(ExtractWarning::UnresolvedDiscipline {
                                section: record.section,
                                text: choice.text.clone(),
                            });
                        }
                    }
                    out.value.insert(record.section, record);
                }
                Err(reason) => {
                    debug!(path = %path.display(), %reason, "skipping page");
                    out.warn(ExtractWarning::SkippedSection { path, reason });
                }
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        info!(count = out.value.len(), "extracted sections");
        Ok(out)
    }

    pub fn book_number(&self) -> u32 {
        self.tables.book_number(&self.book_path.to_string_lossy())
    }

    fn section_files(&self) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.book_path)
            .with_context(|| format!("reading book directory {}", self.book_path.display()))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            if SECTION_FILE_RE.is_match(&name.to_string_lossy()) && entry.file_type()?.is_file() {
                files.push(entry.path());
            }
        }
        files.sort();
        Ok(files)
    }

    fn read_page(&self, name: &str) -> Result<Option<String>> {
        let path = self.book_path.join(name);
        if !path.exists() {
            return Ok(None);
        }
        let page = fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
        Ok(Some(page))
    }

    fn missing<T>(&self, out: &mut Extracted<T>, name: &str) {
        let path = self.book_path.join(name);
        warn!(path = %path.display(), "page not found");
        out.warn(ExtractWarning::MissingPage(path));
    }
}

/// Write `book` as indented UTF-8 JSON, creating parent directories.
pub fn write_book(book: &BookRecord, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(book)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

// ── Tests ──
