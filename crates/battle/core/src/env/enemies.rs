//! Enemy template definitions.

use crate::combat::Affinities;
use crate::stats::Attributes;

/// Condition gating an enemy skill before the normal preference chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Trigger {
    /// Usable only while the actor's HP is strictly below the percentage.
    HpBelow { percent: u32 },
    /// Usable only from the given round onward.
    RoundAtLeast { round: u32 },
}

/// One entry in an enemy's skill list.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemySkill {
    /// Skill record id in the content database.
    pub skill: String,
    /// Preference weight; the selector picks the highest affordable rating.
    pub rating: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub trigger: Option<Trigger>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub once_per_battle: bool,
}

/// Target heuristic an enemy uses against the player party.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ThreatPolicy {
    /// Attack the fastest living player.
    #[default]
    HighestAgility,
    /// Finish off the weakest living player.
    LowestHp,
    /// Uniform pick among living players (seeded, reproducible).
    Random,
}

/// One entry of an enemy drop table.
///
/// Entries are evaluated with a single cumulative roll per defeated enemy;
/// any remainder below 1000 per-mille is the declared "no drop" outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropEntry {
    pub item: String,
    pub per_mille: u32,
}

/// One enemy template from the content database.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyDef {
    pub name: String,
    pub attributes: Attributes,
    pub max_hp: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_sp: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub affinities: Affinities,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<EnemySkill>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub threat: ThreatPolicy,
    /// States the enemy enters combat with (innate shields, death throes).
    #[cfg_attr(feature = "serde", serde(default))]
    pub innate_states: Vec<String>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub exp: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub gold: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub drops: Vec<DropEntry>,
}

/// Read-only lookup of enemy templates.
pub trait EnemyOracle: Send + Sync {
    fn template(&self, id: &str) -> Option<&EnemyDef>;
}
