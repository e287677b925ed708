//! Base attributes and the effective-stat bonus stack.
//!
//! Combatants store only their base attributes. Everything a formula reads is
//! an *effective* value computed on demand: `(base + flat bonuses) * rate
//! bonuses`, clamped at zero. Nothing is cached, so a status effect gained or
//! lost mid-combat is visible to the very next query.
//!
//! All multipliers use integer per-mille arithmetic (1000 = 1.0x) so the
//! engine stays deterministic across platforms.

mod bonus;

pub use bonus::BonusStack;

/// Named base attribute of a combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatKind {
    /// Physical offense scaling.
    Strength,
    /// Magical offense scaling.
    Intelligence,
    /// Default physical defense stat (balance tables may remap).
    Dexterity,
    /// Turn order and flee chance.
    Agility,
}

/// Base attribute block before any modifiers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes {
    pub strength: i32,
    pub intelligence: i32,
    pub dexterity: i32,
    pub agility: i32,
}

impl Attributes {
    pub const fn new(strength: i32, intelligence: i32, dexterity: i32, agility: i32) -> Self {
        Self {
            strength,
            intelligence,
            dexterity,
            agility,
        }
    }

    /// Returns the base value of the given attribute.
    pub const fn get(&self, kind: StatKind) -> i32 {
        match kind {
            StatKind::Strength => self.strength,
            StatKind::Intelligence => self.intelligence,
            StatKind::Dexterity => self.dexterity,
            StatKind::Agility => self.agility,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn stat_kind_round_trips_through_snake_case() {
        assert_eq!(StatKind::Strength.to_string(), "strength");
        assert_eq!(StatKind::from_str("agility").unwrap(), StatKind::Agility);
    }

    #[test]
    fn attributes_get_matches_fields() {
        let attrs = Attributes::new(12, 8, 10, 14);
        assert_eq!(attrs.get(StatKind::Strength), 12);
        assert_eq!(attrs.get(StatKind::Intelligence), 8);
        assert_eq!(attrs.get(StatKind::Dexterity), 10);
        assert_eq!(attrs.get(StatKind::Agility), 14);
    }
}
