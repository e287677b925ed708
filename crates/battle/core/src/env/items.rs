//! Item definitions.

use crate::combat::Element;

use super::skills::Targeting;

/// What a consumable does when used.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ItemEffect {
    /// Restore a fixed amount of HP.
    Heal { amount: u32 },

    /// Restore a fixed amount of SP.
    RestoreSp { amount: u32 },

    /// Fixed-power attack item (thrown bomb, flask). No stat scaling.
    Damage { power: u32, element: Element },

    /// Remove the listed states from the target. An empty or non-matching
    /// list resolves as a zero-effect success, never an error.
    Cure { states: Vec<String> },

    /// Apply a state to the target (smoke, tonic). 0 turns = state default.
    ApplyState { state: String, turns: u8 },

    /// Guaranteed escape from combat, bypassing the flee roll.
    Escape,
}

/// One item record from the content database.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDef {
    pub name: String,
    pub effect: ItemEffect,
    pub targeting: Targeting,
}

/// Read-only lookup of item records.
pub trait ItemOracle: Send + Sync {
    fn item(&self, id: &str) -> Option<&ItemDef>;
}
