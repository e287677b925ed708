//! Round turn order.

use crate::env::StateOracle;
use crate::state::{CombatState, CombatantId};
use crate::stats::StatKind;

/// Computes the acting order for one round.
///
/// Living combatants sorted by effective agility, highest first. Ties keep
/// roster enumeration order (players before enemies), so the order is fully
/// deterministic for a given state. Agility modifiers are evaluated at
/// round start only; a mid-round slow takes effect next round.
pub(crate) fn compute_order(state: &CombatState, states: &dyn StateOracle) -> Vec<CombatantId> {
    let mut entries: Vec<(CombatantId, i32)> = state
        .combatants()
        .iter()
        .filter(|c| !c.is_defeated())
        .map(|c| (c.id, c.effective_stat(StatKind::Agility, states)))
        .collect();
    // Stable sort preserves roster order between equal keys.
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.into_iter().map(|(id, _)| id).collect()
}
