//! Combat engine.
//!
//! [`CombatEngine`] owns the combat state and drives it through rounds:
//! turn order at round start, start-of-turn ticks, queued player actions,
//! enemy selection, end-of-round duration countdown, and end detection.
//! All reads of content go through the [`ContentEnv`] oracles; all
//! randomness goes through seeds derived from `(seed, nonce, actor, roll)`.

mod executor;
mod outcome;
mod turn_order;

use tracing::debug;

use crate::action::{ActionError, CombatAction, SetupError};
use crate::ai;
use crate::combat::Affinities;
use crate::effect;
use crate::env::ContentEnv;
use crate::result::TurnResult;
use crate::state::{
    CombatRewards, CombatState, Combatant, CombatantId, CombatantKind, Phase, ResourceMeter,
};
use crate::stats::Attributes;

/// Roll purposes for seed derivation.
///
/// The context word packs `purpose | target_slot << 8 | sub_hit << 16` so
/// every roll inside one action draws from a distinct stream.
pub(crate) mod roll {
    pub const HIT: u32 = 0;
    pub const VARIANCE: u32 = 1;
    pub const CRIT: u32 = 2;
    pub const STATUS: u32 = 3;
    pub const FLEE: u32 = 4;
    pub const DROP: u32 = 5;
    pub const AI_TARGET: u32 = 6;

    pub const fn context(purpose: u32, target_slot: u32, sub_hit: u32) -> u32 {
        purpose | target_slot << 8 | sub_hit << 16
    }
}

/// A persistent status carried into combat from the world layer, keeping
/// the duration it had outside (field poison, a lingering blessing).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarriedEffect {
    pub state: String,
    pub remaining_turns: u8,
}

/// One player entering combat, with resources carried over from the world
/// layer.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartyMember {
    pub name: String,
    pub attributes: Attributes,
    pub max_hp: u32,
    /// Current HP on entry; clamped to max.
    pub hp: u32,
    pub max_sp: u32,
    pub sp: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub affinities: Affinities,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<String>,
    /// Carried consumables: item id -> count.
    #[cfg_attr(feature = "serde", serde(default))]
    pub items: std::collections::BTreeMap<String, u32>,
    /// Statuses already on the member when combat starts.
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<CarriedEffect>,
}

impl PartyMember {
    /// A member entering at full resources.
    pub fn fresh(name: impl Into<String>, attributes: Attributes, max_hp: u32, max_sp: u32) -> Self {
        Self {
            name: name.into(),
            attributes,
            max_hp,
            hp: max_hp,
            max_sp,
            sp: max_sp,
            affinities: Affinities::default(),
            skills: Vec::new(),
            items: std::collections::BTreeMap::new(),
            effects: Vec::new(),
        }
    }
}

/// Owns one combat encounter from setup to a terminal phase.
#[derive(Debug)]
pub struct CombatEngine<'a> {
    state: CombatState,
    env: ContentEnv<'a>,
    /// Results produced by the round in progress; drained when the round
    /// completes so a retried round hands back the full record.
    round_log: Vec<TurnResult>,
}

impl<'a> CombatEngine<'a> {
    /// Initializes a combat from a party roster and an encounter's enemy
    /// template ids.
    ///
    /// Players are assigned ids before enemies, in roster order. Every
    /// content id referenced by the roster must resolve; a dangling
    /// reference fails setup rather than surfacing mid-battle.
    pub fn new(
        party: Vec<PartyMember>,
        encounter: &[String],
        seed: u64,
        env: ContentEnv<'a>,
    ) -> Result<Self, SetupError> {
        if party.is_empty() {
            return Err(SetupError::EmptyParty);
        }
        if encounter.is_empty() {
            return Err(SetupError::EmptyEncounter);
        }

        let mut combatants = Vec::with_capacity(party.len() + encounter.len());
        for (index, mut member) in party.into_iter().enumerate() {
            for skill in &member.skills {
                if env.skills().skill(skill).is_none() {
                    return Err(SetupError::UnknownContent {
                        kind: "skill",
                        id: skill.clone(),
                    });
                }
            }
            for item in member.items.keys() {
                if env.items().item(item).is_none() {
                    return Err(SetupError::UnknownContent {
                        kind: "item",
                        id: item.clone(),
                    });
                }
            }
            for carried in &member.effects {
                if env.states().state(&carried.state).is_none() {
                    return Err(SetupError::UnknownContent {
                        kind: "state",
                        id: carried.state.clone(),
                    });
                }
            }

            let id = CombatantId(index as u32);
            let carried = std::mem::take(&mut member.effects);
            let mut player = Combatant {
                id,
                kind: CombatantKind::Player,
                name: member.name,
                attributes: member.attributes,
                hp: ResourceMeter::with_current(member.hp, member.max_hp),
                sp: ResourceMeter::with_current(member.sp, member.max_sp),
                affinities: member.affinities,
                skills: member.skills,
                items: member.items,
                effects: Default::default(),
                guarding: false,
                charge: 0,
                used_skills: Default::default(),
                template: None,
            };
            for effect in &carried {
                // Already-expired entries carry nothing in.
                if effect.remaining_turns == 0 {
                    continue;
                }
                if let Some(def) = env.states().state(&effect.state) {
                    player.effects.apply(&effect.state, def, effect.remaining_turns, id);
                }
            }
            combatants.push(player);
        }

        let base = combatants.len() as u32;
        for (index, template_id) in encounter.iter().enumerate() {
            let template = env
                .enemies()
                .template(template_id)
                .ok_or_else(|| SetupError::UnknownTemplate(template_id.clone()))?;
            for entry in &template.skills {
                if env.skills().skill(&entry.skill).is_none() {
                    return Err(SetupError::UnknownContent {
                        kind: "skill",
                        id: entry.skill.clone(),
                    });
                }
            }
            for state_id in &template.innate_states {
                if env.states().state(state_id).is_none() {
                    return Err(SetupError::UnknownContent {
                        kind: "state",
                        id: state_id.clone(),
                    });
                }
            }

            let id = CombatantId(base + index as u32);
            let mut enemy = Combatant {
                id,
                kind: CombatantKind::Enemy,
                name: template.name.clone(),
                attributes: template.attributes,
                hp: ResourceMeter::full(template.max_hp),
                sp: ResourceMeter::full(template.max_sp),
                affinities: template.affinities.clone(),
                skills: template.skills.iter().map(|s| s.skill.clone()).collect(),
                items: Default::default(),
                effects: Default::default(),
                guarding: false,
                charge: 0,
                used_skills: Default::default(),
                template: Some(template_id.clone()),
            };
            for state_id in &template.innate_states {
                // Resolvability was checked above.
                if let Some(def) = env.states().state(state_id) {
                    enemy.effects.apply(state_id, def, def.default_turns, id);
                }
            }
            combatants.push(enemy);
        }

        debug!(seed, roster = combatants.len(), "combat initialized");
        Ok(Self {
            state: CombatState::new(seed, combatants),
            env,
            round_log: Vec::new(),
        })
    }

    /// Resumes a previously serialized combat.
    pub fn from_state(state: CombatState, env: ContentEnv<'a>) -> Self {
        Self {
            state,
            env,
            round_log: Vec::new(),
        }
    }

    pub fn into_state(self) -> CombatState {
        self.state
    }

    pub fn state(&self) -> &CombatState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Rewards accumulated so far; non-empty only after victory.
    pub fn rewards(&self) -> &CombatRewards {
        &self.state.rewards
    }

    /// Queues a player action for the current round.
    pub fn enqueue(&mut self, action: CombatAction) {
        self.state.queue.push(action);
    }

    /// Executes a single action outside the round flow.
    ///
    /// Validation errors leave the state untouched; the caller may submit a
    /// corrected action. End conditions are checked after every execution.
    pub fn execute(&mut self, action: &CombatAction) -> Result<TurnResult, ActionError> {
        let result = executor::execute_action(&mut self.state, &self.env, action)?;
        outcome::check_end(&mut self.state, &self.env);
        Ok(result)
    }

    /// Drives one full round: order, per-turn ticks and actions, round-end
    /// countdown.
    ///
    /// A validation failure on a queued player action aborts mid-round with
    /// the state intact; re-queue a corrected action and call again to
    /// resume from the same turn. On completion (or combat end) the round's
    /// accumulated results are returned in resolution order.
    pub fn run_round(&mut self) -> Result<Vec<TurnResult>, ActionError> {
        if self.state.phase.is_terminal() {
            return Err(ActionError::CombatOver);
        }

        if self.state.turn.order.is_empty() {
            self.state.turn.order = turn_order::compute_order(&self.state, self.env.states());
            self.state.turn.cursor = 0;
            self.state.turn.awaiting_action = false;
            debug!(round = self.state.round, order = ?self.state.turn.order, "round start");
        }

        while self.state.turn.cursor < self.state.turn.order.len() {
            let actor = self.state.turn.order[self.state.turn.cursor];

            if !self.state.turn.awaiting_action {
                if self
                    .state
                    .combatant(actor)
                    .is_none_or(|c| c.is_defeated())
                {
                    self.state.turn.cursor += 1;
                    continue;
                }

                let tick = effect::tick_turn_start(&mut self.state, &self.env, actor);
                if !tick.is_empty() {
                    self.round_log.push(tick);
                }
                if outcome::check_end(&mut self.state, &self.env) {
                    return Ok(std::mem::take(&mut self.round_log));
                }
                if self
                    .state
                    .combatant(actor)
                    .is_none_or(|c| c.is_defeated())
                {
                    self.state.turn.cursor += 1;
                    continue;
                }
                if self
                    .state
                    .combatant(actor)
                    .is_some_and(|c| c.restriction(self.env.states()).is_total())
                {
                    debug!(actor = actor.0, "turn skipped by restriction");
                    self.state.turn.cursor += 1;
                    continue;
                }
                self.state.turn.awaiting_action = true;
            }

            let action = self.next_action(actor)?;
            let result = executor::execute_action(&mut self.state, &self.env, &action)?;
            self.round_log.push(result);
            self.state.turn.awaiting_action = false;
            self.state.turn.cursor += 1;

            if outcome::check_end(&mut self.state, &self.env) || self.state.phase.is_terminal() {
                return Ok(std::mem::take(&mut self.round_log));
            }
        }

        let countdown = effect::tick_round_end(&mut self.state);
        if !countdown.is_empty() {
            self.round_log.push(countdown);
        }

        self.state.round += 1;
        self.state.turn = Default::default();
        self.state.queue.clear();
        Ok(std::mem::take(&mut self.round_log))
    }

    /// Pulls the actor's action: queued for players, selected for enemies.
    fn next_action(&mut self, actor: CombatantId) -> Result<CombatAction, ActionError> {
        let kind = self
            .state
            .combatant(actor)
            .ok_or(ActionError::UnknownActor(actor))?
            .kind;
        match kind {
            CombatantKind::Player => {
                let position = self
                    .state
                    .queue
                    .iter()
                    .position(|a| a.actor == actor)
                    .ok_or(ActionError::MissingAction(actor))?;
                Ok(self.state.queue.remove(position))
            }
            CombatantKind::Enemy => Ok(ai::select_action(&self.state, &self.env, actor)),
        }
    }
}
