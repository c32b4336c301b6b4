pub mod book_info;
pub mod choices;
pub mod combat;
pub mod disciplines;
pub mod equipment;
pub mod section;

use std::path::PathBuf;

use thiserror::Error;

pub use section::SectionError;

/// A gap the extractor worked around instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractWarning {
    #[error("{} not found", .0.display())]
    MissingPage(PathBuf),
    #[error("skipped {}: {reason}", .path.display())]
    SkippedSection { path: PathBuf, reason: SectionError },
    #[error("section {section}: conditional choice names no known discipline: {text:?}")]
    UnresolvedDiscipline { section: u32, text: String },
}

/// A value plus the warnings gathered while producing it.
#[derive(Debug, Clone)]
pub struct Extracted<T> {
    pub value: T,
    pub warnings: Vec<ExtractWarning>,
}

impl<T> Extracted<T> {
    pub fn new(value: T) -> Self {
        Extracted {
            value,
            warnings: Vec::new(),
        }
    }

    pub fn warn(&mut self, warning: ExtractWarning) {
        self.warnings.push(warning);
    }

    /// Move `other`'s warnings into `self` and hand back its value.
    pub fn absorb<U>(&mut self, other: Extracted<U>) -> U {
        self.warnings.extend(other.warnings);
        other.value
    }
}
