use std::sync::LazyLock;

use regex::Regex;

use crate::model::CombatRecord;

static ENEMY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([^:]+):").unwrap());
static SKILL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"COMBAT\s+SKILL\s*(\d+)").unwrap());
static ENDURANCE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"ENDURANCE\s*(\d+)").unwrap());

/// Narrative phrasings that adjust the player's COMBAT SKILL, with the sign they carry.
static MODIFIER_PATTERNS: LazyLock<[(Regex, char); 2]> = LazyLock::new(|| {
    [
        (
            Regex::new(r"(?i)deduct (\d+) points? from your COMBAT SKILL").unwrap(),
            '-',
        ),
        (
            Regex::new(r"(?i)add (\d+) points? to your COMBAT SKILL").unwrap(),
            '+',
        ),
    ]
});

/// Parse `"<Enemy>: COMBAT SKILL <n> ENDURANCE <m>"`.
///
/// All three parts must be present or nothing is returned. Evasion and
/// modifiers come from the section's narrative, not the stat line.
pub fn parse(raw: &str, narrative: &str) -> Option<CombatRecord> {
    let enemy_name = ENEMY_RE.captures(raw)?[1].trim().to_string();
    if enemy_name.is_empty() {
        return None;
    }
    let combat_skill = SKILL_RE.captures(raw)?[1].parse().ok()?;
    let endurance = ENDURANCE_RE.captures(raw)?[1].parse().ok()?;

    let modifiers = extract_modifiers(narrative);

    Some(CombatRecord {
        enemy_name,
        combat_skill,
        endurance,
        can_evade: narrative.to_lowercase().contains("evade"),
        modifiers: if modifiers.is_empty() { None } else { Some(modifiers) },
    })
}

/// One entry per phrasing found, e.g. `"-3 COMBAT SKILL"`.
pub fn extract_modifiers(text: &str) -> Vec<String> {
    MODIFIER_PATTERNS
        .iter()
        .filter_map(|(re, sign)| {
            re.captures(text)
                .map(|caps| format!("{}{} COMBAT SKILL", sign, &caps[1]))
        })
        .collect()
}
