//! Balance tables oracle.
//!
//! Every tunable constant of the damage and flee formulas lives here so
//! content balancing never touches engine code. Defaults follow the classic
//! values: 0.8 physical / 0.4 magical mitigation, +/-10% variance band,
//! 1.5x weakness, 0.5x resistance.

use crate::stats::StatKind;

use super::skills::{Scaling, SkillDef, SkillKind, Targeting};

/// Damage formula parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageParams {
    /// Defense multiplier applied against physical hits (800 = 0.8x).
    pub physical_mitigation_per_mille: u32,
    /// Defense multiplier applied against magical hits (400 = 0.4x).
    pub magical_mitigation_per_mille: u32,
    /// Which attribute serves as physical defense.
    pub physical_defense_stat: StatKind,
    /// Which attribute serves as magical defense.
    pub magical_defense_stat: StatKind,
    /// Floor applied to raw damage before variance and element.
    pub minimum_damage: u32,
    /// Default variance half-band when a skill declares none (100 = +/-10%).
    pub variance_band_per_mille: u32,
    /// Critical chance in percent for damaging hits.
    pub crit_chance_percent: u32,
    /// Critical multiplier in per-mille (1500 = 1.5x).
    pub crit_per_mille: u32,
    /// Elemental weakness multiplier in per-mille.
    pub weak_per_mille: u32,
    /// Elemental resistance multiplier in per-mille.
    pub resist_per_mille: u32,
    /// Incoming damage multiplier while the target is guarding.
    pub guard_per_mille: u32,
    /// Charge points a combatant can bank by defending.
    pub charge_max: u32,
}

impl Default for DamageParams {
    fn default() -> Self {
        Self {
            physical_mitigation_per_mille: 800,
            magical_mitigation_per_mille: 400,
            physical_defense_stat: StatKind::Dexterity,
            magical_defense_stat: StatKind::Intelligence,
            minimum_damage: 1,
            variance_band_per_mille: 100,
            crit_chance_percent: 5,
            crit_per_mille: 1500,
            weak_per_mille: 1500,
            resist_per_mille: 500,
            guard_per_mille: 500,
            charge_max: 3,
        }
    }
}

/// Flee formula parameters.
///
/// Chance = `base + (fleer_agi - fastest_enemy_agi) * agility_scale`,
/// clamped to `[min, max]`, all in per-mille.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleeParams {
    pub base_per_mille: u32,
    pub agility_scale_per_mille: u32,
    pub min_per_mille: u32,
    pub max_per_mille: u32,
}

impl Default for FleeParams {
    fn default() -> Self {
        Self {
            base_per_mille: 500,
            agility_scale_per_mille: 20,
            min_per_mille: 100,
            max_per_mille: 950,
        }
    }
}

/// Complete balance table set.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BalanceTables {
    pub damage: DamageParams,
    pub flee: FleeParams,
    /// Profile used by the basic attack action. Costs no SP regardless of
    /// the declared `sp_cost`.
    pub basic_attack: SkillDef,
}

impl Default for BalanceTables {
    fn default() -> Self {
        Self {
            damage: DamageParams::default(),
            flee: FleeParams::default(),
            basic_attack: SkillDef {
                name: "Attack".to_string(),
                kind: SkillKind::Physical,
                element: crate::combat::Element::Neutral,
                base_power: 0,
                scaling: vec![Scaling {
                    stat: StatKind::Strength,
                    per_mille: 1000,
                }],
                sp_cost: 0,
                hit_rate: 95,
                hits: 1,
                independent_variance: false,
                variance_per_mille: None,
                charge_bonus_per_mille: 0,
                targeting: Targeting::Enemy,
                applies: None,
            },
        }
    }
}

/// Oracle providing the balance tables.
pub trait TablesOracle: Send + Sync {
    fn balance(&self) -> &BalanceTables;
}
