//! Status effect lifecycle.
//!
//! Application, periodic ticks, duration countdown, and death-triggered
//! reactions. The executor calls into this module; nothing here validates
//! actions or rolls accuracy.
//!
//! Timing model: periodic effects tick at their owner's turn start, before
//! the owner acts. Durations count whole rounds and are decremented once for
//! every combatant at round end, so an effect applied mid-round survives the
//! remainder of that round at full strength.

use tracing::warn;

use crate::env::{ContentEnv, PeriodicKind, StateBehaviour};
use crate::result::{AppliedValue, HitOutcome, HitRecord, TurnOrigin, TurnResult};
use crate::state::{ApplyOutcome, CombatState, CombatantId};

/// Applies a state instance to a target, recording the outcome.
///
/// `turns == 0` uses the state's declared default duration. Unknown state
/// ids are content bugs: logged and skipped, never an action error.
pub(crate) fn apply_state(
    state: &mut CombatState,
    env: &ContentEnv<'_>,
    target: CombatantId,
    state_id: &str,
    turns: u8,
    source: CombatantId,
    result: &mut TurnResult,
) {
    let Some(def) = env.states().state(state_id) else {
        warn!(state = state_id, "unknown state id referenced by content");
        return;
    };
    let turns = if turns == 0 { def.default_turns } else { turns };

    let Some(combatant) = state.combatant_mut(target) else {
        return;
    };
    match combatant.effects.apply(state_id, def, turns, source) {
        ApplyOutcome::Added | ApplyOutcome::Refreshed => {
            result.states_applied.push((target, state_id.to_string()));
        }
        ApplyOutcome::Ignored => {
            warn!(state = state_id, target = target.0, "effect set full");
        }
    }
}

/// Removes the listed states from a target, recording removals.
///
/// States the target does not carry are skipped; curing nothing is a valid
/// zero-effect resolution.
pub(crate) fn cure_states(
    state: &mut CombatState,
    target: CombatantId,
    states: &[String],
    result: &mut TurnResult,
) {
    let Some(combatant) = state.combatant_mut(target) else {
        return;
    };
    for state_id in states {
        if combatant.effects.remove(state_id) {
            result.states_removed.push((target, state_id.clone()));
        }
    }
}

/// Deals damage to a combatant through its absorption shields.
///
/// Shields soak in effect order and are removed when depleted. Returns the
/// total absorbed and the HP actually lost; the caller records both.
pub(crate) fn soak_and_deplete(
    state: &mut CombatState,
    target: CombatantId,
    amount: u32,
    env: &ContentEnv<'_>,
    result: &mut TurnResult,
) -> (u32, u32) {
    let Some(combatant) = state.combatant_mut(target) else {
        return (0, 0);
    };

    let mut remaining = amount;
    let mut absorbed = 0;
    for effect in combatant.effects.iter_mut() {
        if remaining == 0 {
            break;
        }
        let is_shield = env
            .states()
            .state(&effect.state)
            .is_some_and(|def| matches!(def.behaviour, StateBehaviour::Shield { .. }));
        if !is_shield || effect.shield_hp == 0 {
            continue;
        }
        let soak = effect.shield_hp.min(remaining);
        effect.shield_hp -= soak;
        absorbed += soak;
        remaining -= soak;
    }

    if absorbed > 0 {
        let depleted = combatant.effects.retain_with_removed(|e| {
            let shielded = env
                .states()
                .state(&e.state)
                .is_some_and(|def| matches!(def.behaviour, StateBehaviour::Shield { .. }));
            !(shielded && e.shield_hp == 0)
        });
        for id in depleted {
            result.states_removed.push((target, id));
        }
    }

    let combatant = match state.combatant_mut(target) {
        Some(c) => c,
        None => return (absorbed, 0),
    };
    let lost = combatant.hp.deplete(remaining);
    (absorbed, lost)
}

/// Resolves death-triggered reactions for newly defeated combatants.
///
/// `worklist` pairs each death with the combatant responsible for it. A
/// death-throes state fires once, is removed, and deals unavoidable damage
/// to the killer, which can cascade into further deaths.
pub(crate) fn resolve_deaths(
    state: &mut CombatState,
    env: &ContentEnv<'_>,
    result: &mut TurnResult,
    mut worklist: Vec<(CombatantId, CombatantId)>,
) {
    while let Some((dead, killer)) = worklist.pop() {
        result.deaths.push(dead);

        let mut parting = 0u32;
        if let Some(combatant) = state.combatant_mut(dead) {
            let fired = combatant.effects.retain_with_removed(|e| {
                match env.states().state(&e.state).map(|def| &def.behaviour) {
                    Some(StateBehaviour::OnDeath { damage }) => {
                        parting += damage;
                        false
                    }
                    _ => true,
                }
            });
            for id in fired {
                result.states_removed.push((dead, id));
            }
        }

        if parting == 0 || dead == killer {
            continue;
        }
        let Some(target) = state.combatant(killer) else {
            continue;
        };
        if target.is_defeated() {
            continue;
        }

        // Parting damage ignores shields, guard, and affinities.
        let lost = state
            .combatant_mut(killer)
            .map(|c| c.hp.deplete(parting))
            .unwrap_or(0);
        result.hits.push(HitRecord {
            target: killer,
            outcome: HitOutcome::Hit,
            value: AppliedValue::Damage { amount: lost },
            redirected_from: None,
            absorbed: 0,
        });
        if state.combatant(killer).is_some_and(|c| c.is_defeated()) {
            worklist.push((killer, dead));
        }
    }
}

/// Resolves a combatant's start-of-turn phase.
///
/// Clears the guard flag from the previous round and applies periodic
/// effects in their stored order. Periodic damage bypasses shields and can
/// defeat the owner; the poison's source is then credited with the kill so
/// death-throes still aim at someone.
pub(crate) fn tick_turn_start(
    state: &mut CombatState,
    env: &ContentEnv<'_>,
    actor: CombatantId,
) -> TurnResult {
    let mut result = TurnResult::new(TurnOrigin::StatusTick(actor));

    let mut killer = actor;
    let mut defeated = false;
    if let Some(combatant) = state.combatant_mut(actor) {
        combatant.guarding = false;

        let ticks: Vec<(PeriodicKind, u32, CombatantId)> = combatant
            .effects
            .iter()
            .filter_map(|e| match env.states().state(&e.state).map(|d| &d.behaviour) {
                Some(StateBehaviour::Periodic { kind, amount }) => {
                    Some((*kind, *amount, e.source))
                }
                _ => None,
            })
            .collect();

        for (kind, amount, source) in ticks {
            if combatant.is_defeated() {
                break;
            }
            let value = match kind {
                PeriodicKind::Damage => {
                    let lost = combatant.hp.deplete(amount);
                    if combatant.is_defeated() {
                        defeated = true;
                        killer = source;
                    }
                    AppliedValue::Damage { amount: lost }
                }
                PeriodicKind::Heal => AppliedValue::Healing {
                    amount: combatant.hp.restore(amount),
                },
            };
            result.hits.push(HitRecord {
                target: actor,
                outcome: HitOutcome::Hit,
                value,
                redirected_from: None,
                absorbed: 0,
            });
        }
    }

    if defeated {
        resolve_deaths(state, env, &mut result, vec![(actor, killer)]);
    }
    result.finish()
}

/// Resolves the end-of-round phase: every living combatant's effect
/// durations tick down once, expired instances are removed.
pub(crate) fn tick_round_end(state: &mut CombatState) -> TurnResult {
    let mut result = TurnResult::new(TurnOrigin::RoundEnd);
    let ids: Vec<CombatantId> = state.combatants().iter().map(|c| c.id).collect();
    for id in ids {
        let Some(combatant) = state.combatant_mut(id) else {
            continue;
        };
        if combatant.is_defeated() {
            continue;
        }
        for expired in combatant.effects.decrement() {
            result.states_removed.push((id, expired));
        }
    }
    result.finish()
}
