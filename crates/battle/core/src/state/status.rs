//! Active status effect instances on a combatant.
//!
//! Instances reference their state record by id; behaviour is always looked
//! up in the content database, so the state stays small and serializable
//! verbatim. Durations count rounds and are decremented once per full round
//! at round end.

use arrayvec::ArrayVec;

use crate::config::CombatConfig;
use crate::env::{StateBehaviour, StateDef};
use crate::state::CombatantId;

/// One applied status effect instance.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEffect {
    /// State record id in the content database.
    pub state: String,
    /// Rounds left; the instance is removed when this reaches 0.
    pub remaining_turns: u8,
    /// Combatant that applied the effect (redirect protector, poison owner).
    pub source: CombatantId,
    /// Remaining absorption for shield states; 0 for everything else.
    pub shield_hp: u32,
}

/// Outcome of applying a state to a combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// A new instance was added.
    Added,
    /// A non-stackable instance was already present; its duration was reset.
    Refreshed,
    /// The effect set is full; the application was dropped.
    Ignored,
}

/// Ordered set of active effects, bounded per combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEffects {
    effects: ArrayVec<ActiveEffect, { CombatConfig::MAX_ACTIVE_EFFECTS }>,
}

impl ActiveEffects {
    /// Creates an empty effect set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Checks whether any instance of the state is active.
    pub fn has(&self, state_id: &str) -> bool {
        self.effects.iter().any(|e| e.state == state_id)
    }

    /// Applies a state instance.
    ///
    /// Non-stackable states refresh the existing instance's duration to the
    /// new value (and reset its shield pool); stackable states add distinct
    /// instances that decrement independently.
    pub fn apply(
        &mut self,
        state_id: &str,
        def: &StateDef,
        turns: u8,
        source: CombatantId,
    ) -> ApplyOutcome {
        let shield_hp = match def.behaviour {
            StateBehaviour::Shield { capacity } => capacity,
            _ => 0,
        };

        if !def.stackable
            && let Some(existing) = self.effects.iter_mut().find(|e| e.state == state_id)
        {
            existing.remaining_turns = turns;
            existing.source = source;
            existing.shield_hp = shield_hp;
            return ApplyOutcome::Refreshed;
        }

        if self.effects.is_full() {
            return ApplyOutcome::Ignored;
        }

        self.effects.push(ActiveEffect {
            state: state_id.to_string(),
            remaining_turns: turns,
            source,
            shield_hp,
        });
        ApplyOutcome::Added
    }

    /// Removes every instance of the state. Returns true if any was present.
    pub fn remove(&mut self, state_id: &str) -> bool {
        let before = self.effects.len();
        self.effects.retain(|e| e.state != state_id);
        self.effects.len() != before
    }

    /// Decrements every instance once and drops the expired ones.
    ///
    /// Returns the state ids of removed instances, in order.
    pub fn decrement(&mut self) -> Vec<String> {
        let mut removed = Vec::new();
        for effect in self.effects.iter_mut() {
            effect.remaining_turns = effect.remaining_turns.saturating_sub(1);
        }
        self.effects.retain(|e| {
            if e.remaining_turns == 0 {
                removed.push(e.state.clone());
                false
            } else {
                true
            }
        });
        removed
    }

    /// Drops instances matching the predicate, returning removed state ids.
    pub fn retain_with_removed(
        &mut self,
        mut keep: impl FnMut(&ActiveEffect) -> bool,
    ) -> Vec<String> {
        let mut removed = Vec::new();
        self.effects.retain(|e| {
            if keep(e) {
                true
            } else {
                removed.push(e.state.clone());
                false
            }
        });
        removed
    }

    /// Removes every instance (combat end).
    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> + '_ {
        self.effects.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ActiveEffect> + '_ {
        self.effects.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
