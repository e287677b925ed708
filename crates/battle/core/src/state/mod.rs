//! Authoritative combat state representation.
//!
//! This module owns the data structures describing combatants, round
//! bookkeeping, and rewards. Callers clone or query this state but mutate it
//! exclusively through the engine; a `TurnResult` is the only other output.

mod combatant;
mod status;

pub use combatant::{Combatant, CombatantId, CombatantKind, ResourceMeter};
pub use status::{ActiveEffect, ActiveEffects, ApplyOutcome};

use crate::action::CombatAction;

/// Combat state machine phase. Every non-`Active` phase is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Phase {
    #[default]
    Active,
    /// Every enemy defeated; rewards have been paid out.
    Victory,
    /// Every player defeated.
    Defeat,
    /// A flee action resolved successfully.
    Fled,
}

impl Phase {
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Phase::Active)
    }
}

/// Rewards accumulated on victory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatRewards {
    pub exp: u32,
    pub gold: u32,
    /// Item ids resolved from each defeated enemy's drop table.
    pub drops: Vec<String>,
}

/// Per-round turn bookkeeping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// Acting order for the current round; empty until the round starts.
    pub order: Vec<CombatantId>,
    /// Next position in `order` to act.
    pub cursor: usize,
    /// True once the current actor's start-of-turn ticks have resolved and
    /// the engine is waiting for that actor's action.
    pub awaiting_action: bool,
}

/// The aggregate root of one combat encounter.
///
/// Created by the initializer, advanced exclusively through the engine's
/// execute pipeline, discarded once a terminal phase is reached and rewards
/// are read out. With the `serde` feature the whole value serializes
/// verbatim for mid-battle save/resume.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatState {
    /// RNG seed fixed at combat start, never modified.
    pub seed: u64,
    /// Action sequence number; increments once per executed action or tick.
    pub nonce: u64,
    pub phase: Phase,
    /// 1-based round counter.
    pub round: u32,
    pub turn: TurnState,
    combatants: Vec<Combatant>,
    /// Player actions queued for the current round, consumed by the round
    /// driver in turn order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub queue: Vec<CombatAction>,
    pub rewards: CombatRewards,
}

impl CombatState {
    /// Creates an active round-1 state from an assembled roster.
    pub(crate) fn new(seed: u64, combatants: Vec<Combatant>) -> Self {
        Self {
            seed,
            nonce: 0,
            phase: Phase::Active,
            round: 1,
            turn: TurnState::default(),
            combatants,
            queue: Vec::new(),
            rewards: CombatRewards::default(),
        }
    }

    /// Full roster in original enumeration order (players before enemies).
    pub fn combatants(&self) -> &[Combatant] {
        &self.combatants
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.id == id)
    }

    pub fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.combatants.iter_mut().find(|c| c.id == id)
    }

    /// Living combatants on the given side, in roster order.
    pub fn living(&self, kind: CombatantKind) -> impl Iterator<Item = &Combatant> + '_ {
        self.combatants
            .iter()
            .filter(move |c| c.kind == kind && !c.is_defeated())
    }

    /// True when no living combatant remains on the given side.
    pub fn side_defeated(&self, kind: CombatantKind) -> bool {
        self.living(kind).next().is_none()
    }

    /// Clears every status effect, guard flag, and charge counter.
    ///
    /// Called when a terminal phase is reached: no effect outlives the
    /// encounter regardless of remaining duration.
    pub(crate) fn clear_all_effects(&mut self) {
        for combatant in &mut self.combatants {
            combatant.effects.clear();
            combatant.guarding = false;
            combatant.charge = 0;
        }
    }
}
