//! Damage and healing formulas.
//!
//! Pure functions over resolved numbers; the executor looks up effective
//! stats and balance parameters, these functions only do arithmetic. All
//! intermediate math runs in i64 milli-units (value * 1000) and floors once
//! at the end, so `20 * 1.3 - 10 * 0.8` comes out as exactly 18.

use crate::env::DamageParams;

use super::element::Affinity;

/// Resolved inputs for one offensive hit.
#[derive(Clone, Debug)]
pub struct DamageInput {
    /// Flat power term of the skill.
    pub base_power: u32,
    /// Resolved scaling terms: (effective stat value, per-mille coefficient).
    pub scaling: Vec<(i32, u32)>,
    /// Target's effective defense stat for this damage kind.
    pub defense: i32,
    /// Mitigation multiplier for this damage kind (800 = 0.8x).
    pub mitigation_per_mille: u32,
    /// Rolled variance multiplier (1000 = no variance).
    pub variance_per_mille: u32,
    /// Elemental modifier from the target's affinity table.
    pub element_per_mille: u32,
    /// Ordered passive/derived multipliers (critical, guard, ...), applied
    /// after the base formula and before the final floor.
    pub passives: Vec<u32>,
}

/// Calculate the final damage of one hit.
///
/// # Formula
///
/// ```text
/// raw = base_power + sum(stat * coefficient) - defense * mitigation
/// mitigated = max(raw, minimum_damage)
/// final = floor(mitigated * variance * element * passives...)
/// ```
///
/// Zero-valued stats and negative raw values are valid inputs; the minimum
/// floor keeps every landed hit visible, and an immune element zeroes the
/// result regardless of the floor.
pub fn calculate_damage(input: &DamageInput, params: &DamageParams) -> u32 {
    let mut value: i64 = input.base_power as i64 * 1000;
    for (stat, per_mille) in &input.scaling {
        value += *stat as i64 * *per_mille as i64;
    }
    value -= input.defense.max(0) as i64 * input.mitigation_per_mille as i64;

    // Minimum floor applies to the raw value, before any multiplier.
    value = value.max(params.minimum_damage as i64 * 1000);

    value = value * input.variance_per_mille as i64 / 1000;
    value = value * input.element_per_mille as i64 / 1000;
    for per_mille in &input.passives {
        value = value * *per_mille as i64 / 1000;
    }

    (value / 1000).max(0) as u32
}

/// Resolved inputs for one healing application.
#[derive(Clone, Debug)]
pub struct HealInput {
    pub base_power: u32,
    /// Resolved scaling terms, same shape as damage.
    pub scaling: Vec<(i32, u32)>,
    /// Rolled variance multiplier (1000 = no variance).
    pub variance_per_mille: u32,
    /// Caster's banked charge points; tracked outside this calculator.
    pub charge: u32,
    /// Heal bonus per charge point in per-mille of one point.
    pub charge_bonus_per_mille: u32,
}

/// Calculate a healing amount.
///
/// Same stat-scaling shape as damage, without mitigation or elemental
/// modifier, plus an optional bonus proportional to the charge counter.
pub fn calculate_heal(input: &HealInput) -> u32 {
    let mut value: i64 = input.base_power as i64 * 1000;
    for (stat, per_mille) in &input.scaling {
        value += *stat as i64 * *per_mille as i64;
    }
    value += input.charge as i64 * input.charge_bonus_per_mille as i64;
    value = value * input.variance_per_mille as i64 / 1000;
    (value / 1000).max(0) as u32
}

/// Look up the per-mille multiplier for an elemental affinity.
pub fn element_modifier(affinity: Affinity, params: &DamageParams) -> u32 {
    match affinity {
        Affinity::Weak => params.weak_per_mille,
        Affinity::Neutral => 1000,
        Affinity::Resist => params.resist_per_mille,
        Affinity::Immune => 0,
    }
}
