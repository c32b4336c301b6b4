use crate::model::{CarryLimits, EquipmentRules, StartingItem, StartingItems};

/// Kai starting kit and carry limits. Not read from the equipment page.
// TODO: parse equipmnt.htm once a later-series book with different limits is extracted.
pub fn kai_rules() -> EquipmentRules {
    EquipmentRules {
        starting_items: StartingItems {
            guaranteed: vec![
                StartingItem::Weapon {
                    name: "Axe".to_string(),
                },
                StartingItem::Meal { quantity: 1 },
                StartingItem::SpecialItem {
                    name: "Map of Sommerlund".to_string(),
                },
            ],
        },
        carry_limits: CarryLimits {
            weapons: 2,
            backpack_items: 8,
            gold_crowns: 50,
        },
    }
}
