//! Compile-time engine limits.

/// Fixed capacities used by the combat engine.
///
/// These bound the per-combatant collections so state stays small and
/// allocation-free on the hot path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CombatConfig;

impl CombatConfig {
    /// Maximum number of simultaneously active status effects per combatant.
    ///
    /// Applying an effect to a combatant already at the cap is ignored.
    pub const MAX_ACTIVE_EFFECTS: usize = 16;

    /// Maximum sub-hits a single skill may declare.
    pub const MAX_HITS: u8 = 8;
}
