use std::path::PathBuf;

use anyhow::Result;
use config::{Config, Environment};
use serde::Deserialize;

pub const DEFAULT_OUTPUT_DIR: &str = "extracted-content";

/// Runtime settings, overridable through `LW_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Where extracted books are written and where the validator looks for them.
    pub output_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("output_dir", DEFAULT_OUTPUT_DIR)?
            .add_source(Environment::with_prefix("LW"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// Default output path for a book: `<output_dir>/book-<n>.json`.
    pub fn book_path(&self, book_number: u32) -> PathBuf {
        self.output_dir.join(format!("book-{}.json", book_number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_book_path() {
        let s = Settings::default();
        assert_eq!(
            s.book_path(3),
            PathBuf::from("extracted-content").join("book-3.json")
        );
    }
}
