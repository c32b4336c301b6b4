//! Book records as written by the extractor and read back by the validator.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const SERIES: &str = "kai";
pub const FORMAT_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    pub series: String,
    pub book_number: u32,
    pub title: String,
    pub authors: String,
    pub version: String,
    pub disciplines: Vec<DisciplineRecord>,
    pub equipment_rules: EquipmentRules,
    /// Keyed by section number; serialized as an object with decimal string keys.
    pub sections: BTreeMap<u32, SectionRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisciplineRecord {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentRules {
    pub starting_items: StartingItems,
    pub carry_limits: CarryLimits,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartingItems {
    pub guaranteed: Vec<StartingItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StartingItem {
    Weapon { name: String },
    Meal { quantity: u32 },
    SpecialItem { name: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarryLimits {
    pub weapons: u32,
    pub backpack_items: u32,
    pub gold_crowns: u32,
}

/// Section fields read back leniently: missing or null values take their
/// default so the validator can report on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub section: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: SectionType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub choices: Vec<ChoiceRecord>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub illustrations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combat: Option<CombatRecord>,
}

/// `conditional` and `requires` are written only for conditional choices;
/// an unresolved discipline is written as `"requires": null`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChoiceRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub target: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub conditional: bool,
    #[serde(default)]
    pub requires: Option<String>,
}

impl Serialize for ChoiceRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.conditional { 4 } else { 2 };
        let mut st = serializer.serialize_struct("ChoiceRecord", len)?;
        st.serialize_field("text", &self.text)?;
        st.serialize_field("target", &self.target)?;
        if self.conditional {
            st.serialize_field("conditional", &true)?;
            st.serialize_field("requires", &self.requires)?;
        }
        st.end()
    }
}

/// Missing or null stat fields deserialize to their zero value so the
/// validator can report them instead of rejecting the whole file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub enemy_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub combat_skill: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub endurance: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub can_evade: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<Vec<String>>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `Unknown` is never produced by [`SectionType::classify`]; it only stands in
/// for a missing or unrecognised `type` in a file being validated.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Combat,
    Choice,
    Narrative,
    Ending,
    Victory,
    Defeat,
    #[default]
    #[serde(other)]
    Unknown,
}

impl SectionType {
    /// Derive a section's role from its content shape.
    ///
    /// Priority order matters: a section with a fight and a single onward
    /// choice is `Combat`, never `Narrative`.
    pub fn classify(choices: &[ChoiceRecord], combat: Option<&CombatRecord>, text: &str) -> Self {
        if combat.is_some() {
            return SectionType::Combat;
        }
        match choices.len() {
            0 => {
                let lower = text.to_lowercase();
                if lower.contains("dead") || lower.contains("slain") {
                    SectionType::Defeat
                } else if lower.contains("reach") && text.contains("Holmgard") {
                    SectionType::Victory
                } else {
                    SectionType::Ending
                }
            }
            1 => SectionType::Narrative,
            _ => SectionType::Choice,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SectionType::Combat => "combat",
            SectionType::Choice => "choice",
            SectionType::Narrative => "narrative",
            SectionType::Ending => "ending",
            SectionType::Victory => "victory",
            SectionType::Defeat => "defeat",
            SectionType::Unknown => "unknown",
        }
    }

    /// Types that legitimately have no outgoing choices.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SectionType::Ending | SectionType::Victory | SectionType::Defeat
        )
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SectionRecord {
    /// Recompute `type` from the stored choices, combat and text.
    pub fn derived_type(&self) -> SectionType {
        SectionType::classify(&self.choices, self.combat.as_ref(), &self.text)
    }
}

// ── Tests ──
