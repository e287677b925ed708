//! Enemy action selection.
//!
//! A rating-driven selector over the enemy template's skill list: gate by
//! trigger, once-per-battle use, restrictions, and SP, then take the
//! highest-rated survivor. Target choice follows the template's threat
//! policy. The selector never returns an action the executor would reject;
//! when nothing else is possible the enemy defends.

use tracing::debug;

use crate::action::{ActionKind, CombatAction, Target};
use crate::engine::roll;
use crate::env::{ContentEnv, Restriction, SkillDef, SkillKind, Targeting, ThreatPolicy, Trigger, compute_seed};
use crate::state::{CombatState, Combatant, CombatantId, CombatantKind};
use crate::stats::StatKind;

/// Picks the action an enemy takes this turn.
pub fn select_action(
    state: &CombatState,
    env: &ContentEnv<'_>,
    actor: CombatantId,
) -> CombatAction {
    let Some(combatant) = state.combatant(actor) else {
        return CombatAction::new(actor, ActionKind::Defend);
    };
    let template = combatant
        .template
        .as_deref()
        .and_then(|id| env.enemies().template(id));

    let restriction = combatant.restriction(env.states());
    let threat = template.map(|t| t.threat).unwrap_or_default();

    if let Some(template) = template
        && !restriction.contains(Restriction::SKILL)
    {
        let mut best: Option<(&str, &SkillDef, u8)> = None;
        for entry in &template.skills {
            if entry.once_per_battle && combatant.used_skills.contains(&entry.skill) {
                continue;
            }
            if !trigger_met(entry.trigger, combatant, state.round) {
                continue;
            }
            let Some(def) = env.skills().skill(&entry.skill) else {
                continue;
            };
            if def.sp_cost > combatant.sp.current() {
                continue;
            }
            if def.kind == SkillKind::Heal && !side_needs_healing(state, combatant.kind) {
                continue;
            }
            // Strict comparison keeps list order as the tie-break.
            if best.is_none_or(|(_, _, rating)| entry.rating > rating) {
                best = Some((&entry.skill, def, entry.rating));
            }
        }

        if let Some((skill_id, def, rating)) = best
            && let Some(target) = pick_target(state, env, combatant, def.targeting, def.kind, threat)
        {
            debug!(actor = actor.0, skill = skill_id, rating, "enemy skill selected");
            return CombatAction::skill(actor, skill_id, target);
        }
    }

    if !restriction.contains(Restriction::ATTACK)
        && let Some(target) = threat_target(state, env, combatant, threat)
    {
        debug!(actor = actor.0, target = target.0, "enemy basic attack");
        return CombatAction::attack(actor, target);
    }

    debug!(actor = actor.0, "enemy defends");
    CombatAction::new(actor, ActionKind::Defend)
}

fn trigger_met(trigger: Option<Trigger>, combatant: &Combatant, round: u32) -> bool {
    match trigger {
        None => true,
        Some(Trigger::HpBelow { percent }) => {
            (combatant.hp.current() as u64 * 100) < (percent as u64 * combatant.hp.max() as u64)
        }
        Some(Trigger::RoundAtLeast { round: from }) => round >= from,
    }
}

/// True when anyone on the side is missing HP.
fn side_needs_healing(state: &CombatState, kind: CombatantKind) -> bool {
    state
        .living(kind)
        .any(|c| c.hp.current() < c.hp.max())
}

fn pick_target(
    state: &CombatState,
    env: &ContentEnv<'_>,
    actor: &Combatant,
    targeting: Targeting,
    kind: SkillKind,
    threat: ThreatPolicy,
) -> Option<Target> {
    match targeting {
        Targeting::Enemy => threat_target(state, env, actor, threat).map(Target::Single),
        Targeting::Ally => {
            let pick = if kind == SkillKind::Heal {
                // Triage: the ally missing the largest share of its HP.
                state.living(actor.kind).min_by_key(|c| {
                    (c.hp.current() as u64 * 1000) / c.hp.max().max(1) as u64
                })
            } else {
                state.living(actor.kind).next()
            };
            pick.map(|c| Target::Single(c.id))
        }
        Targeting::SelfOnly | Targeting::AllEnemies | Targeting::AllAllies => Some(Target::Group),
    }
}

/// Chooses an opposing target per the threat policy. Ties keep roster
/// order; the random policy draws from the combat seed so selection
/// replays identically.
fn threat_target(
    state: &CombatState,
    env: &ContentEnv<'_>,
    actor: &Combatant,
    threat: ThreatPolicy,
) -> Option<CombatantId> {
    let opposing = match actor.kind {
        CombatantKind::Player => CombatantKind::Enemy,
        CombatantKind::Enemy => CombatantKind::Player,
    };
    let candidates: Vec<&Combatant> = state.living(opposing).collect();
    if candidates.is_empty() {
        return None;
    }
    let chosen = match threat {
        ThreatPolicy::HighestAgility => candidates.iter().copied().max_by_key(|c| {
            (
                c.effective_stat(StatKind::Agility, env.states()),
                std::cmp::Reverse(c.id),
            )
        })?,
        ThreatPolicy::LowestHp => candidates
            .iter()
            .copied()
            .min_by_key(|c| (c.hp.current(), c.id))?,
        ThreatPolicy::Random => {
            let seed = compute_seed(
                state.seed,
                state.nonce,
                actor.id.0,
                roll::context(roll::AI_TARGET, 0, 0),
            );
            let index = env.rng().range(seed, 0, candidates.len() as u32 - 1) as usize;
            candidates[index]
        }
    };
    Some(chosen.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::Affinities;
    use crate::env::{
        BalanceTables, EnemyDef, EnemyOracle, EnemySkill, ItemDef, ItemOracle, PcgRng, SkillOracle,
        StateDef, StateOracle, TablesOracle,
    };
    use crate::state::ResourceMeter;
    use crate::stats::Attributes;
    use std::collections::BTreeMap;

    struct Oracles {
        skills: BTreeMap<String, SkillDef>,
        enemies: BTreeMap<String, EnemyDef>,
        tables: BalanceTables,
    }

    impl SkillOracle for Oracles {
        fn skill(&self, id: &str) -> Option<&SkillDef> {
            self.skills.get(id)
        }
    }
    impl ItemOracle for Oracles {
        fn item(&self, _: &str) -> Option<&ItemDef> {
            None
        }
    }
    impl EnemyOracle for Oracles {
        fn template(&self, id: &str) -> Option<&EnemyDef> {
            self.enemies.get(id)
        }
    }
    impl StateOracle for Oracles {
        fn state(&self, _: &str) -> Option<&StateDef> {
            None
        }
    }
    impl TablesOracle for Oracles {
        fn balance(&self) -> &BalanceTables {
            &self.tables
        }
    }

    fn attack_skill(power: u32) -> SkillDef {
        SkillDef {
            name: "Strike".into(),
            kind: SkillKind::Physical,
            element: crate::combat::Element::Neutral,
            base_power: power,
            scaling: Vec::new(),
            sp_cost: 3,
            hit_rate: 100,
            hits: 1,
            independent_variance: false,
            variance_per_mille: Some(0),
            charge_bonus_per_mille: 0,
            targeting: Targeting::Enemy,
            applies: None,
        }
    }

    fn entry(skill: &str, rating: u8, trigger: Option<Trigger>, once: bool) -> EnemySkill {
        EnemySkill {
            skill: skill.into(),
            rating,
            trigger,
            once_per_battle: once,
        }
    }

    fn fighter(id: u32, kind: CombatantKind, agility: i32, hp: u32, sp: u32) -> Combatant {
        Combatant {
            id: CombatantId(id),
            kind,
            name: format!("c{id}"),
            attributes: Attributes {
                strength: 10,
                intelligence: 10,
                dexterity: 10,
                agility,
            },
            hp: ResourceMeter::full(hp),
            sp: ResourceMeter::full(sp),
            affinities: Affinities::default(),
            skills: Vec::new(),
            items: BTreeMap::new(),
            effects: Default::default(),
            guarding: false,
            charge: 0,
            used_skills: Default::default(),
            template: Some("imp".into()),
        }
    }

    fn oracles(skills: Vec<(&str, SkillDef)>, entries: Vec<EnemySkill>) -> Oracles {
        Oracles {
            skills: skills
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            enemies: BTreeMap::from([(
                "imp".to_string(),
                EnemyDef {
                    name: "Imp".into(),
                    attributes: Attributes {
                        strength: 8,
                        intelligence: 4,
                        dexterity: 5,
                        agility: 6,
                    },
                    max_hp: 20,
                    max_sp: 10,
                    affinities: Affinities::default(),
                    skills: entries,
                    threat: ThreatPolicy::HighestAgility,
                    innate_states: Vec::new(),
                    exp: 0,
                    gold: 0,
                    drops: Vec::new(),
                },
            )]),
            tables: BalanceTables::default(),
        }
    }

    fn battle() -> CombatState {
        CombatState::new(
            7,
            vec![
                fighter(0, CombatantKind::Player, 5, 30, 10),
                fighter(1, CombatantKind::Player, 12, 30, 10),
                fighter(2, CombatantKind::Enemy, 6, 20, 10),
            ],
        )
    }

    #[test]
    fn highest_rating_wins_and_targets_fastest_player() {
        let oracles = oracles(
            vec![("jab", attack_skill(2)), ("smash", attack_skill(9))],
            vec![entry("jab", 1, None, false), entry("smash", 5, None, false)],
        );
        let rng = PcgRng;
        let env = ContentEnv::new(&oracles, &oracles, &oracles, &oracles, &oracles, &rng);
        let state = battle();

        let action = select_action(&state, &env, CombatantId(2));
        assert_eq!(
            action.kind,
            ActionKind::Skill {
                skill: "smash".into(),
                target: Target::Single(CombatantId(1)),
            }
        );
    }

    #[test]
    fn unmet_trigger_falls_down_the_chain() {
        let oracles = oracles(
            vec![("jab", attack_skill(2)), ("rage", attack_skill(9))],
            vec![
                entry("jab", 1, None, false),
                entry("rage", 9, Some(Trigger::HpBelow { percent: 50 }), false),
            ],
        );
        let rng = PcgRng;
        let env = ContentEnv::new(&oracles, &oracles, &oracles, &oracles, &oracles, &rng);
        let state = battle();

        // Full HP: the HpBelow gate is strict, rage is unavailable.
        let action = select_action(&state, &env, CombatantId(2));
        assert!(matches!(
            action.kind,
            ActionKind::Skill { ref skill, .. } if skill == "jab"
        ));
    }

    #[test]
    fn once_per_battle_skill_is_not_repeated() {
        let oracles = oracles(
            vec![("nova", attack_skill(9))],
            vec![entry("nova", 9, None, true)],
        );
        let rng = PcgRng;
        let env = ContentEnv::new(&oracles, &oracles, &oracles, &oracles, &oracles, &rng);
        let mut state = battle();
        state
            .combatant_mut(CombatantId(2))
            .unwrap()
            .used_skills
            .insert("nova".into());

        let action = select_action(&state, &env, CombatantId(2));
        assert!(matches!(action.kind, ActionKind::Attack { .. }));
    }

    #[test]
    fn unaffordable_skills_fall_back_to_basic_attack() {
        let mut costly = attack_skill(9);
        costly.sp_cost = 99;
        let oracles = oracles(vec![("nova", costly)], vec![entry("nova", 9, None, false)]);
        let rng = PcgRng;
        let env = ContentEnv::new(&oracles, &oracles, &oracles, &oracles, &oracles, &rng);
        let state = battle();

        let action = select_action(&state, &env, CombatantId(2));
        assert_eq!(
            action.kind,
            ActionKind::Attack {
                target: CombatantId(1)
            }
        );
    }
}
