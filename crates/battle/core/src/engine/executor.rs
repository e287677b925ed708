//! Action resolution.
//!
//! The executor validates a requested action against the current state,
//! resolves every sub-hit through the damage formulas, and returns the
//! [`TurnResult`] record. Validation failures leave the state untouched;
//! once resolution starts the action is committed (SP and item counts are
//! paid even if every sub-hit misses).

use tracing::debug;

use crate::action::{ActionError, ActionKind, CombatAction, Target};
use crate::combat::{
    DamageInput, HealInput, calculate_damage, calculate_heal, check_hit, element_modifier,
};
use crate::effect;
use crate::env::{
    ContentEnv, ItemEffect, Restriction, SkillDef, SkillKind, StateBehaviour, Targeting,
    compute_seed,
};
use crate::result::{AppliedValue, HitOutcome, HitRecord, TurnOrigin, TurnResult};
use crate::state::{CombatState, CombatantId, Phase};

use super::roll;

/// Validates and resolves one action, advancing the nonce on success.
pub(crate) fn execute_action(
    state: &mut CombatState,
    env: &ContentEnv<'_>,
    action: &CombatAction,
) -> Result<TurnResult, ActionError> {
    if state.phase.is_terminal() {
        return Err(ActionError::CombatOver);
    }
    let actor = state
        .combatant(action.actor)
        .ok_or(ActionError::UnknownActor(action.actor))?;
    if actor.is_defeated() {
        return Err(ActionError::ActorDefeated(action.actor));
    }

    let restriction = actor.restriction(env.states());
    let blocked = match &action.kind {
        ActionKind::Attack { .. } => restriction.contains(Restriction::ATTACK),
        ActionKind::Skill { .. } => restriction.contains(Restriction::SKILL),
        ActionKind::Item { .. } => restriction.contains(Restriction::ITEM),
        ActionKind::Flee => restriction.contains(Restriction::FLEE),
        ActionKind::Defend => false,
    };
    if blocked {
        return Err(ActionError::Restricted {
            action: action.kind.verb(),
        });
    }

    let mut result = TurnResult::new(TurnOrigin::Action(action.clone()));
    match &action.kind {
        ActionKind::Attack { target } => {
            let def = &env.tables().balance().basic_attack;
            resolve_skill(
                state,
                env,
                action.actor,
                def,
                Target::Single(*target),
                true,
                &mut result,
            )?;
        }
        ActionKind::Skill { skill, target } => {
            let known = state
                .combatant(action.actor)
                .is_some_and(|c| c.skills.iter().any(|s| s == skill));
            let def = env
                .skills()
                .skill(skill)
                .filter(|_| known)
                .ok_or_else(|| ActionError::UnknownSkill(skill.clone()))?;
            resolve_skill(state, env, action.actor, def, *target, false, &mut result)?;
            // Record for once-per-battle gating only after the use resolved.
            if let Some(combatant) = state.combatant_mut(action.actor) {
                combatant.used_skills.insert(skill.clone());
            }
        }
        ActionKind::Item { item, target } => {
            resolve_item(state, env, action.actor, item, *target, &mut result)?;
        }
        ActionKind::Defend => resolve_defend(state, env, action.actor),
        ActionKind::Flee => resolve_flee(state, env, action.actor, &mut result),
    }

    state.nonce += 1;
    Ok(result.finish())
}

/// Expands a target selection against a capability's declared targeting.
fn expand_targets(
    state: &CombatState,
    actor: CombatantId,
    targeting: Targeting,
    selected: Target,
) -> Result<Vec<CombatantId>, ActionError> {
    let actor_kind = state
        .combatant(actor)
        .ok_or(ActionError::UnknownActor(actor))?
        .kind;

    let single = |same_side: bool| -> Result<Vec<CombatantId>, ActionError> {
        let Target::Single(id) = selected else {
            return Err(ActionError::InvalidTarget);
        };
        let target = state.combatant(id).ok_or(ActionError::UnknownTarget(id))?;
        if (target.kind == actor_kind) != same_side {
            return Err(ActionError::InvalidTarget);
        }
        if target.is_defeated() {
            return Err(ActionError::TargetDefeated(id));
        }
        Ok(vec![id])
    };

    match targeting {
        Targeting::Enemy => single(false),
        Targeting::Ally => single(true),
        Targeting::SelfOnly => match selected {
            Target::Group => Ok(vec![actor]),
            Target::Single(id) if id == actor => Ok(vec![actor]),
            Target::Single(_) => Err(ActionError::InvalidTarget),
        },
        Targeting::AllEnemies | Targeting::AllAllies => {
            if selected != Target::Group {
                return Err(ActionError::InvalidTarget);
            }
            let same_side = targeting == Targeting::AllAllies;
            Ok(state
                .combatants()
                .iter()
                .filter(|c| (c.kind == actor_kind) == same_side && !c.is_defeated())
                .map(|c| c.id)
                .collect())
        }
    }
}

/// Finds the combatant that actually receives a single-target hit.
///
/// A redirect effect on the target reroutes the hit to the effect's source
/// at full value, provided the protector is still standing. Only the first
/// redirect instance is honored; area damage never redirects.
fn redirect_recipient(
    state: &CombatState,
    env: &ContentEnv<'_>,
    target: CombatantId,
) -> CombatantId {
    let Some(combatant) = state.combatant(target) else {
        return target;
    };
    for effect in combatant.effects.iter() {
        let is_redirect = env
            .states()
            .state(&effect.state)
            .is_some_and(|def| matches!(def.behaviour, StateBehaviour::Redirect));
        if !is_redirect || effect.source == target {
            continue;
        }
        if state
            .combatant(effect.source)
            .is_some_and(|protector| !protector.is_defeated())
        {
            return effect.source;
        }
    }
    target
}

fn resolve_skill(
    state: &mut CombatState,
    env: &ContentEnv<'_>,
    actor: CombatantId,
    def: &SkillDef,
    selected: Target,
    free: bool,
    result: &mut TurnResult,
) -> Result<(), ActionError> {
    let cost = if free { 0 } else { def.sp_cost };
    {
        let combatant = state
            .combatant(actor)
            .ok_or(ActionError::UnknownActor(actor))?;
        if combatant.sp.current() < cost {
            return Err(ActionError::InsufficientSp {
                required: cost,
                available: combatant.sp.current(),
            });
        }
    }
    let targets = expand_targets(state, actor, def.targeting, selected)?;

    // Validation is done; the action is now committed. Effective stats are
    // snapshotted here so nothing that happens mid-action (a death-throes
    // cascade, a depleted shield) changes later sub-hits.
    let (scaling, charge) = {
        let combatant = state
            .combatant_mut(actor)
            .ok_or(ActionError::UnknownActor(actor))?;
        combatant.sp.deplete(cost);
        let charge = combatant.charge;
        let combatant = &*combatant;
        let scaling: Vec<(i32, u32)> = def
            .scaling
            .iter()
            .map(|s| (combatant.effective_stat(s.stat, env.states()), s.per_mille))
            .collect();
        (scaling, charge)
    };

    let params = env.tables().balance().damage.clone();
    let band = def.variance_per_mille.unwrap_or(params.variance_band_per_mille);
    let nonce = state.nonce;
    let rng = env.rng();

    // One variance draw is shared across the whole action unless the skill
    // declares independent rolls per sub-hit.
    let shared_variance = if def.independent_variance {
        None
    } else {
        let seed = compute_seed(state.seed, nonce, actor.0, roll::context(roll::VARIANCE, 0, 0));
        Some(rng.variance_roll(seed, band))
    };

    let mut deaths: Vec<(CombatantId, CombatantId)> = Vec::new();
    let single_target = !def.targeting.is_group();

    let hits = def.hits.clamp(1, crate::config::CombatConfig::MAX_HITS);
    for (slot, &target) in targets.iter().enumerate() {
        let slot = slot as u32;
        for hit in 0..hits {
            let hit = hit as u32;
            if state.combatant(target).is_none_or(|c| c.is_defeated()) {
                break;
            }

            let hit_seed =
                compute_seed(state.seed, nonce, actor.0, roll::context(roll::HIT, slot, hit));
            if !check_hit(def.hit_rate, rng.roll_d100(hit_seed)) {
                result.hits.push(HitRecord::miss(target));
                continue;
            }

            let variance = shared_variance.unwrap_or_else(|| {
                let seed = compute_seed(
                    state.seed,
                    nonce,
                    actor.0,
                    roll::context(roll::VARIANCE, slot, hit),
                );
                rng.variance_roll(seed, band)
            });

            match def.kind {
                SkillKind::Physical | SkillKind::Magical => {
                    let crit_seed = compute_seed(
                        state.seed,
                        nonce,
                        actor.0,
                        roll::context(roll::CRIT, slot, hit),
                    );
                    let critical = rng.roll_d100(crit_seed) <= params.crit_chance_percent;

                    let (mitigation, defense_stat) = match def.kind {
                        SkillKind::Physical => (
                            params.physical_mitigation_per_mille,
                            params.physical_defense_stat,
                        ),
                        _ => (
                            params.magical_mitigation_per_mille,
                            params.magical_defense_stat,
                        ),
                    };
                    // Damage is computed for the aimed-at target; a redirect
                    // reroutes the finished amount, so the protector's own
                    // defense and affinities never soften the hit.
                    let (defense, element, guarding) = {
                        let Some(c) = state.combatant(target) else {
                            break;
                        };
                        (
                            c.effective_stat(defense_stat, env.states()),
                            element_modifier(c.affinities.of(def.element), &params),
                            c.guarding,
                        )
                    };
                    let mut passives = Vec::new();
                    if critical {
                        passives.push(params.crit_per_mille);
                    }
                    if guarding {
                        passives.push(params.guard_per_mille);
                    }

                    let damage = calculate_damage(
                        &DamageInput {
                            base_power: def.base_power,
                            scaling: scaling.clone(),
                            defense,
                            mitigation_per_mille: mitigation,
                            variance_per_mille: variance,
                            element_per_mille: element,
                            passives,
                        },
                        &params,
                    );
                    let recipient = if single_target && def.kind.is_damaging() {
                        redirect_recipient(state, env, target)
                    } else {
                        target
                    };
                    let redirected_from = (recipient != target).then_some(target);
                    let (absorbed, lost) =
                        effect::soak_and_deplete(state, recipient, damage, env, result);
                    result.hits.push(HitRecord {
                        target: recipient,
                        outcome: if critical {
                            HitOutcome::Critical
                        } else {
                            HitOutcome::Hit
                        },
                        value: AppliedValue::Damage { amount: lost },
                        redirected_from,
                        absorbed,
                    });

                    let now_dead = state
                        .combatant(recipient)
                        .is_some_and(|c| c.is_defeated());
                    if now_dead {
                        if !deaths.iter().any(|(d, _)| *d == recipient) {
                            deaths.push((recipient, actor));
                        }
                    } else {
                        apply_rider(state, env, def, actor, recipient, slot, hit, result);
                    }
                }
                SkillKind::Heal => {
                    let heal = calculate_heal(&HealInput {
                        base_power: def.base_power,
                        scaling: scaling.clone(),
                        variance_per_mille: variance,
                        charge,
                        charge_bonus_per_mille: def.charge_bonus_per_mille,
                    });
                    let restored = state
                        .combatant_mut(target)
                        .map(|c| c.hp.restore(heal))
                        .unwrap_or(0);
                    result.hits.push(HitRecord {
                        target,
                        outcome: HitOutcome::Hit,
                        value: AppliedValue::Healing { amount: restored },
                        redirected_from: None,
                        absorbed: 0,
                    });
                    apply_rider(state, env, def, actor, target, slot, hit, result);
                }
                SkillKind::Utility => {
                    result.hits.push(HitRecord {
                        target,
                        outcome: HitOutcome::Hit,
                        value: AppliedValue::None,
                        redirected_from: None,
                        absorbed: 0,
                    });
                    apply_rider(state, env, def, actor, target, slot, hit, result);
                }
            }
        }
    }

    // Spending charge is tied to using a charge-scaling skill, not to the
    // amount actually healed.
    if def.charge_bonus_per_mille > 0
        && let Some(combatant) = state.combatant_mut(actor)
    {
        combatant.charge = 0;
    }

    effect::resolve_deaths(state, env, result, deaths);
    Ok(())
}

/// Rolls and applies a skill's state rider against one recipient.
#[allow(clippy::too_many_arguments)]
fn apply_rider(
    state: &mut CombatState,
    env: &ContentEnv<'_>,
    def: &SkillDef,
    actor: CombatantId,
    recipient: CombatantId,
    slot: u32,
    hit: u32,
    result: &mut TurnResult,
) {
    let Some(rider) = &def.applies else {
        return;
    };
    let seed = compute_seed(
        state.seed,
        state.nonce,
        actor.0,
        roll::context(roll::STATUS, slot, hit),
    );
    if env.rng().roll_d100(seed) <= rider.chance {
        effect::apply_state(state, env, recipient, &rider.state, rider.turns, actor, result);
    }
}

fn resolve_item(
    state: &mut CombatState,
    env: &ContentEnv<'_>,
    actor: CombatantId,
    item: &str,
    selected: Target,
    result: &mut TurnResult,
) -> Result<(), ActionError> {
    let def = env
        .items()
        .item(item)
        .ok_or_else(|| ActionError::UnknownItem(item.to_string()))?;
    {
        let combatant = state
            .combatant(actor)
            .ok_or(ActionError::UnknownActor(actor))?;
        if combatant.items.get(item).copied().unwrap_or(0) == 0 {
            return Err(ActionError::ItemExhausted {
                item: item.to_string(),
            });
        }
    }
    let targets = expand_targets(state, actor, def.targeting, selected)?;

    if let Some(combatant) = state.combatant_mut(actor)
        && let Some(count) = combatant.items.get_mut(item)
    {
        *count -= 1;
    }

    let params = env.tables().balance().damage.clone();
    let mut deaths: Vec<(CombatantId, CombatantId)> = Vec::new();
    let single_target = !def.targeting.is_group();

    // Items never miss and never crit; their numbers are fixed by content.
    for &target in &targets {
        match &def.effect {
            ItemEffect::Heal { amount } => {
                let restored = state
                    .combatant_mut(target)
                    .map(|c| c.hp.restore(*amount))
                    .unwrap_or(0);
                result.hits.push(HitRecord {
                    target,
                    outcome: HitOutcome::Hit,
                    value: AppliedValue::Healing { amount: restored },
                    redirected_from: None,
                    absorbed: 0,
                });
            }
            ItemEffect::RestoreSp { amount } => {
                let restored = state
                    .combatant_mut(target)
                    .map(|c| c.sp.restore(*amount))
                    .unwrap_or(0);
                result.hits.push(HitRecord {
                    target,
                    outcome: HitOutcome::Hit,
                    value: AppliedValue::SpRestored { amount: restored },
                    redirected_from: None,
                    absorbed: 0,
                });
            }
            ItemEffect::Damage { power, element } => {
                // As with skills, the amount is fixed by the aimed-at target
                // before any redirect reroutes it.
                let (element_pm, guarding) = {
                    let Some(c) = state.combatant(target) else {
                        continue;
                    };
                    (
                        element_modifier(c.affinities.of(*element), &params),
                        c.guarding,
                    )
                };
                let damage = calculate_damage(
                    &DamageInput {
                        base_power: *power,
                        scaling: Vec::new(),
                        defense: 0,
                        mitigation_per_mille: 0,
                        variance_per_mille: 1000,
                        element_per_mille: element_pm,
                        passives: if guarding {
                            vec![params.guard_per_mille]
                        } else {
                            Vec::new()
                        },
                    },
                    &params,
                );
                let recipient = if single_target {
                    redirect_recipient(state, env, target)
                } else {
                    target
                };
                let redirected_from = (recipient != target).then_some(target);
                let (absorbed, lost) =
                    effect::soak_and_deplete(state, recipient, damage, env, result);
                result.hits.push(HitRecord {
                    target: recipient,
                    outcome: HitOutcome::Hit,
                    value: AppliedValue::Damage { amount: lost },
                    redirected_from,
                    absorbed,
                });
                if state
                    .combatant(recipient)
                    .is_some_and(|c| c.is_defeated())
                    && !deaths.iter().any(|(d, _)| *d == recipient)
                {
                    deaths.push((recipient, actor));
                }
            }
            ItemEffect::Cure { states } => {
                // An empty or non-matching list is a zero-effect success.
                effect::cure_states(state, target, states, result);
                result.hits.push(HitRecord {
                    target,
                    outcome: HitOutcome::Hit,
                    value: AppliedValue::None,
                    redirected_from: None,
                    absorbed: 0,
                });
            }
            ItemEffect::ApplyState { state: id, turns } => {
                effect::apply_state(state, env, target, id, *turns, actor, result);
                result.hits.push(HitRecord {
                    target,
                    outcome: HitOutcome::Hit,
                    value: AppliedValue::None,
                    redirected_from: None,
                    absorbed: 0,
                });
            }
            ItemEffect::Escape => {
                result.fled = true;
                state.phase = Phase::Fled;
            }
        }
    }

    effect::resolve_deaths(state, env, result, deaths);
    Ok(())
}

fn resolve_defend(state: &mut CombatState, env: &ContentEnv<'_>, actor: CombatantId) {
    let charge_max = env.tables().balance().damage.charge_max;
    if let Some(combatant) = state.combatant_mut(actor) {
        combatant.guarding = true;
        combatant.charge = (combatant.charge + 1).min(charge_max);
    }
}

/// Resolves a flee attempt.
///
/// Chance scales with the agility gap between the fleer and the fastest
/// living opponent, clamped to the tables' band. Success is terminal;
/// failure just wastes the turn.
fn resolve_flee(
    state: &mut CombatState,
    env: &ContentEnv<'_>,
    actor: CombatantId,
    result: &mut TurnResult,
) {
    let flee = env.tables().balance().flee.clone();
    let Some(fleer) = state.combatant(actor) else {
        return;
    };
    let own_agility = fleer.effective_stat(crate::stats::StatKind::Agility, env.states());
    let fleer_kind = fleer.kind;

    let fastest = state
        .combatants()
        .iter()
        .filter(|c| c.kind != fleer_kind && !c.is_defeated())
        .map(|c| c.effective_stat(crate::stats::StatKind::Agility, env.states()))
        .max()
        .unwrap_or(0);

    let chance = (flee.base_per_mille as i64
        + (own_agility as i64 - fastest as i64) * flee.agility_scale_per_mille as i64)
        .clamp(flee.min_per_mille as i64, flee.max_per_mille as i64) as u32;

    let seed = compute_seed(
        state.seed,
        state.nonce,
        actor.0,
        roll::context(roll::FLEE, 0, 0),
    );
    let drawn = env.rng().roll_per_mille(seed);
    debug!(actor = actor.0, chance, drawn, "flee attempt");
    if drawn < chance {
        result.fled = true;
        state.phase = Phase::Fled;
    }
}
