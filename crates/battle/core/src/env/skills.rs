//! Skill definitions.

use crate::combat::Element;
use crate::stats::StatKind;

/// Broad formula family a skill belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SkillKind {
    /// Offensive, mitigated by the physical defense stat.
    Physical,
    /// Offensive, mitigated by the magical defense stat.
    Magical,
    /// Restores target HP; no mitigation, no elemental modifier.
    Heal,
    /// No direct HP change; only applies its declared state.
    Utility,
}

impl SkillKind {
    /// True for the kinds that run the offensive damage formula.
    pub const fn is_damaging(&self) -> bool {
        matches!(self, SkillKind::Physical | SkillKind::Magical)
    }
}

/// How a skill or item selects its targets.
///
/// Group selectors are expanded at execution time, so a combatant defeated
/// earlier in the same round is excluded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Targeting {
    /// One living combatant on the opposing side.
    Enemy,
    /// Every living combatant on the opposing side.
    AllEnemies,
    /// One living combatant on the user's side.
    Ally,
    /// Every living combatant on the user's side.
    AllAllies,
    /// The user only.
    SelfOnly,
}

impl Targeting {
    /// True when the selector expands to a group at execution time.
    pub const fn is_group(&self) -> bool {
        matches!(self, Targeting::AllEnemies | Targeting::AllAllies)
    }
}

/// One stat-scaling term of a skill formula.
///
/// Contributes `stat * per_mille / 1000` to the raw value, so a 1.3x
/// strength skill declares `per_mille: 1300`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scaling {
    pub stat: StatKind,
    pub per_mille: u32,
}

/// State application rider on a skill or item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppliedState {
    /// State record id in the content database.
    pub state: String,
    /// Duration in rounds; 0 means the state's declared default.
    #[cfg_attr(feature = "serde", serde(default))]
    pub turns: u8,
    /// Application chance in percent, rolled per landed hit.
    pub chance: u32,
}

/// One skill record from the content database.
///
/// The engine treats this as an opaque capability descriptor: power,
/// element, scaling coefficients, hit data. How the record was authored is
/// not its concern.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDef {
    pub name: String,
    pub kind: SkillKind,
    #[cfg_attr(feature = "serde", serde(default = "SkillDef::default_element"))]
    pub element: Element,

    /// Flat power term added before stat scaling.
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_power: u32,
    /// Stat scaling terms; empty for fixed-formula utility skills.
    #[cfg_attr(feature = "serde", serde(default))]
    pub scaling: Vec<Scaling>,

    pub sp_cost: u32,
    /// Accuracy in percent, rolled once per sub-hit.
    pub hit_rate: u32,
    /// Number of independent sub-hits, at least 1.
    #[cfg_attr(feature = "serde", serde(default = "SkillDef::default_hits"))]
    pub hits: u8,
    /// Multi-hit skills may roll variance per sub-hit instead of sharing
    /// one draw across the action.
    #[cfg_attr(feature = "serde", serde(default))]
    pub independent_variance: bool,
    /// Declared variance half-band in per-mille; None uses the balance
    /// tables' default band.
    #[cfg_attr(feature = "serde", serde(default))]
    pub variance_per_mille: Option<u32>,
    /// Heal bonus per point of stored charge, in per-mille of one point.
    #[cfg_attr(feature = "serde", serde(default))]
    pub charge_bonus_per_mille: u32,

    pub targeting: Targeting,
    /// Optional state applied to each target on hit.
    #[cfg_attr(feature = "serde", serde(default))]
    pub applies: Option<AppliedState>,
}

impl SkillDef {
    fn default_element() -> Element {
        Element::Neutral
    }

    fn default_hits() -> u8 {
        1
    }
}

/// Read-only lookup of skill records.
pub trait SkillOracle: Send + Sync {
    fn skill(&self, id: &str) -> Option<&SkillDef>;
}
