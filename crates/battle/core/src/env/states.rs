//! Status state definitions.
//!
//! A state record describes one timed modifier: what it does while active
//! (behaviour), whether reapplication stacks or refreshes, and its default
//! duration. Records are plain immutable data looked up by string id; the
//! engine depends only on this shape, never on how content was authored.

use crate::stats::StatKind;

bitflags::bitflags! {
    /// Action types a restriction state forbids.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Restriction: u8 {
        const ATTACK = 1 << 0;
        const SKILL = 1 << 1;
        const ITEM = 1 << 2;
        const FLEE = 1 << 3;
    }
}

impl Restriction {
    /// True when every action type is forbidden; the turn is skipped.
    pub fn is_total(&self) -> bool {
        self.contains(Restriction::ATTACK | Restriction::SKILL | Restriction::ITEM)
    }
}

// bitflags' `serde` feature ships the helper functions but not the trait
// impls, so the flags-as-text format ("ATTACK | SKILL") is wired up here.
#[cfg(feature = "serde")]
impl serde::Serialize for Restriction {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        bitflags::serde::serialize(self, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Restriction {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        bitflags::serde::deserialize(deserializer)
    }
}

/// Direction of a periodic tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PeriodicKind {
    /// HP loss at the owner's turn start (poison, burn).
    Damage,
    /// HP recovery at the owner's turn start (regen).
    Heal,
}

/// What a state does while it is active.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StateBehaviour {
    /// Flat bonus/penalty on one attribute, live while active.
    StatValue { stat: StatKind, amount: i32 },

    /// Rate bonus/penalty on one attribute in per-mille (-300 = -30%).
    StatRate { stat: StatKind, per_mille: i32 },

    /// Forbids the flagged action types.
    Restrict { restriction: Restriction },

    /// Fixed HP change at the owner's turn start.
    Periodic { kind: PeriodicKind, amount: u32 },

    /// Single-target damage aimed at the owner is rerouted to the effect's
    /// source combatant at full value. Area damage bypasses this entirely.
    Redirect,

    /// Absorption pool that soaks damage before HP. Removed when depleted.
    Shield { capacity: u32 },

    /// Unavoidable parting damage dealt to the killer when the owner dies.
    OnDeath { damage: u32 },
}

/// One status state record from the content database.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateDef {
    pub name: String,
    pub behaviour: StateBehaviour,
    /// Non-stackable states refresh their duration on reapplication;
    /// stackable states add independent instances.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stackable: bool,
    /// Duration in rounds used when the applier does not declare one.
    pub default_turns: u8,
}

/// Read-only lookup of status state records.
pub trait StateOracle: Send + Sync {
    fn state(&self, id: &str) -> Option<&StateDef>;
}
