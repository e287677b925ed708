//! Combat end detection and rewards.

use tracing::debug;

use crate::env::{ContentEnv, compute_seed};
use crate::state::{CombatRewards, CombatState, CombatantKind, Phase};

use super::roll;

/// Checks victory and defeat conditions, transitioning the phase.
///
/// Defeat takes precedence when both sides fall in the same resolution (a
/// death-throes cascade can do this): the players' wipe is checked first.
/// On any terminal phase all lingering effects are cleared. Returns true
/// when combat ended.
pub(crate) fn check_end(state: &mut CombatState, env: &ContentEnv<'_>) -> bool {
    if !state.phase.is_terminal() {
        if state.side_defeated(CombatantKind::Player) {
            state.phase = Phase::Defeat;
        } else if state.side_defeated(CombatantKind::Enemy) {
            state.rewards = collect_rewards(state, env);
            state.phase = Phase::Victory;
        }
    }

    if state.phase.is_terminal() {
        state.clear_all_effects();
        debug!(phase = ?state.phase, round = state.round, "combat ended");
        true
    } else {
        false
    }
}

/// Sums rewards over every defeated enemy and rolls its drop table.
///
/// Each enemy gets exactly one per-mille roll, checked against its drop
/// entries cumulatively: entry weights partition [0, 1000) and the
/// remainder is the no-drop band. Entry order in the template therefore
/// fixes the partition, and the roll seed is derived from the enemy's id so
/// a replay yields identical loot.
fn collect_rewards(state: &CombatState, env: &ContentEnv<'_>) -> CombatRewards {
    let mut rewards = CombatRewards::default();
    for enemy in state
        .combatants()
        .iter()
        .filter(|c| c.kind == CombatantKind::Enemy && c.is_defeated())
    {
        let Some(template) = enemy
            .template
            .as_deref()
            .and_then(|id| env.enemies().template(id))
        else {
            continue;
        };
        rewards.exp += template.exp;
        rewards.gold += template.gold;

        if template.drops.is_empty() {
            continue;
        }
        let seed = compute_seed(
            state.seed,
            state.nonce,
            enemy.id.0,
            roll::context(roll::DROP, 0, 0),
        );
        let drawn = env.rng().roll_per_mille(seed);
        let mut threshold = 0;
        for entry in &template.drops {
            threshold += entry.per_mille;
            if drawn < threshold {
                rewards.drops.push(entry.item.clone());
                break;
            }
        }
    }
    rewards
}
