//! Combat actions.
//!
//! A [`CombatAction`] is a request for one combatant's turn, supplied either
//! by the player-facing layer or by the enemy selector. Validation happens
//! inside the engine at execution time; an action that references a skill
//! the actor cannot currently use is rejected with [`ActionError`], never
//! resolved silently.

mod error;

pub use error::{ActionError, SetupError};

use crate::state::CombatantId;

/// Chosen target of a skill or item.
///
/// Group selections stay symbolic until execution so combatants defeated
/// earlier in the same round are excluded from the expansion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Target {
    /// One specific combatant.
    Single(CombatantId),
    /// Expand per the capability's declared targeting (all enemies, all
    /// allies, or self) at execution time.
    Group,
}

/// What the actor wants to do this turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ActionKind {
    /// Basic attack using the balance tables' attack profile. Always costs
    /// zero SP.
    Attack { target: CombatantId },

    /// Use a skill from the content database.
    Skill { skill: String, target: Target },

    /// Consume a carried item.
    Item { item: String, target: Target },

    /// Guard: halve incoming damage until the next own turn and bank one
    /// charge point.
    Defend,

    /// Attempt to escape; success ends combat in the `Fled` phase.
    Flee,
}

impl ActionKind {
    /// Short name for logging and error messages.
    pub const fn verb(&self) -> &'static str {
        match self {
            ActionKind::Attack { .. } => "attack",
            ActionKind::Skill { .. } => "skill",
            ActionKind::Item { .. } => "item",
            ActionKind::Defend => "defend",
            ActionKind::Flee => "flee",
        }
    }
}

/// A requested action for one combatant's turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatAction {
    pub actor: CombatantId,
    pub kind: ActionKind,
}

impl CombatAction {
    pub fn new(actor: CombatantId, kind: ActionKind) -> Self {
        Self { actor, kind }
    }

    /// Convenience constructor for a basic attack.
    pub fn attack(actor: CombatantId, target: CombatantId) -> Self {
        Self::new(actor, ActionKind::Attack { target })
    }

    /// Convenience constructor for a skill use.
    pub fn skill(actor: CombatantId, skill: impl Into<String>, target: Target) -> Self {
        Self::new(
            actor,
            ActionKind::Skill {
                skill: skill.into(),
                target,
            },
        )
    }

    /// Convenience constructor for an item use.
    pub fn item(actor: CombatantId, item: impl Into<String>, target: Target) -> Self {
        Self::new(
            actor,
            ActionKind::Item {
                item: item.into(),
                target,
            },
        )
    }
}
