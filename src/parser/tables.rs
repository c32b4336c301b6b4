//! Fixed lookup tables the extractor matches page text against.

/// Discipline display names and the ids a conditional choice resolves to.
/// Order matters: the first name found in the choice text wins.
pub const KAI_DISCIPLINES: &[(&str, &str)] = &[
    ("Sixth Sense", "sixth_sense"),
    ("Camouflage", "camouflage"),
    ("Hunting", "hunting"),
    ("Tracking", "tracking"),
    ("Healing", "healing"),
    ("Weaponskill", "weaponskill"),
    ("Mindshield", "mindshield"),
    ("Mindblast", "mindblast"),
    ("Animal Kinship", "animal_kinship"),
    ("Mind Over Matter", "mind_over_matter"),
];

/// Phrases (matched case-insensitively) that mark a choice as conditional.
pub const CONDITIONAL_PHRASES: &[&str] = &[
    "If you wish to use your Kai Discipline",
    "If you have the Kai Discipline",
    "If you possess",
    "If you have",
];

/// Directory-name codes used by the Project Aon book folders.
pub const BOOK_CODES: &[(&str, u32)] = &[
    ("01fftd", 1),
    ("02fotw", 2),
    ("03tcok", 3),
    ("04tcod", 4),
    ("05sots", 5),
];

/// Rules-page paragraphs starting with this are selection boilerplate, not description.
pub const DESCRIPTION_BOILERPLATE: &str = "If you choose";

#[derive(Debug, Clone, Copy)]
pub struct Tables {
    pub disciplines: &'static [(&'static str, &'static str)],
    pub conditional_phrases: &'static [&'static str],
    pub book_codes: &'static [(&'static str, u32)],
    pub description_boilerplate: &'static str,
}

impl Default for Tables {
    fn default() -> Self {
        Tables {
            disciplines: KAI_DISCIPLINES,
            conditional_phrases: CONDITIONAL_PHRASES,
            book_codes: BOOK_CODES,
            description_boilerplate: DESCRIPTION_BOILERPLATE,
        }
    }
}

impl Tables {
    pub fn is_conditional(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.conditional_phrases
            .iter()
            .any(|p| lower.contains(&p.to_lowercase()))
    }

    /// First discipline (in table order) whose name appears verbatim in `text`.
    pub fn required_discipline(&self, text: &str) -> Option<&'static str> {
        self.disciplines
            .iter()
            .find(|(name, _)| text.contains(name))
            .map(|(_, id)| *id)
    }

    /// Book number from a code embedded in the source path; 1 when nothing matches.
    pub fn book_number(&self, path: &str) -> u32 {
        self.book_codes
            .iter()
            .find(|(code, _)| path.contains(code))
            .map(|(_, n)| *n)
            .unwrap_or(1)
    }
}
