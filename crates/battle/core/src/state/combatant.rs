//! Combatant state.

use std::collections::{BTreeMap, BTreeSet};

use crate::combat::Affinities;
use crate::env::{Restriction, StateBehaviour, StateOracle};
use crate::stats::{Attributes, BonusStack, StatKind};

use super::status::ActiveEffects;

/// Stable identifier of one combat participant, unique within a combat
/// instance. Players are numbered before enemies in roster order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

/// Which side of the battle a combatant fights on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CombatantKind {
    Player,
    Enemy,
}

/// Bounded resource pool (HP or SP), clamped to `[0, max]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    current: u32,
    max: u32,
}

impl ResourceMeter {
    /// Creates a full meter.
    pub const fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Creates a meter with an explicit current value, clamped to max.
    pub const fn with_current(current: u32, max: u32) -> Self {
        Self {
            current: if current > max { max } else { current },
            max,
        }
    }

    pub const fn current(&self) -> u32 {
        self.current
    }

    pub const fn max(&self) -> u32 {
        self.max
    }

    pub const fn is_depleted(&self) -> bool {
        self.current == 0
    }

    /// Subtracts up to `amount`, returning the amount actually removed.
    pub fn deplete(&mut self, amount: u32) -> u32 {
        let actual = amount.min(self.current);
        self.current -= actual;
        actual
    }

    /// Adds up to `amount`, returning the amount actually restored.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let actual = amount.min(self.max - self.current);
        self.current += actual;
        actual
    }
}

/// One participant in a combat instance.
///
/// A combatant with depleted HP is *defeated*: it is skipped by turn order,
/// AI targeting, and group target expansion, but stays in the roster until
/// combat ends so death-triggered effects can still resolve.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: CombatantId,
    pub kind: CombatantKind,
    pub name: String,
    pub attributes: Attributes,
    pub hp: ResourceMeter,
    pub sp: ResourceMeter,
    #[cfg_attr(feature = "serde", serde(default))]
    pub affinities: Affinities,

    /// Skill ids this combatant can use, resolved against the content
    /// database at execution time.
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<String>,
    /// Carried consumables: item id -> count.
    #[cfg_attr(feature = "serde", serde(default))]
    pub items: BTreeMap<String, u32>,

    /// Active status effect instances.
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: ActiveEffects,
    /// Set by Defend; halves incoming damage until the next own turn.
    #[cfg_attr(feature = "serde", serde(default))]
    pub guarding: bool,
    /// Charge points banked by defending, spent by charge-scaling heals.
    #[cfg_attr(feature = "serde", serde(default))]
    pub charge: u32,
    /// Skills already used this battle (once-per-battle AI gating).
    #[cfg_attr(feature = "serde", serde(default))]
    pub used_skills: BTreeSet<String>,

    /// Content template id for enemies; None for players.
    #[cfg_attr(feature = "serde", serde(default))]
    pub template: Option<String>,
}

impl Combatant {
    pub fn is_defeated(&self) -> bool {
        self.hp.is_depleted()
    }

    /// Computes the effective value of an attribute under active effects.
    ///
    /// Recomputed on every call; stat modifiers are never baked into the
    /// base attributes, so expiry reverts them automatically.
    pub fn effective_stat(&self, kind: StatKind, states: &dyn StateOracle) -> i32 {
        let mut stack = BonusStack::new();
        for effect in self.effects.iter() {
            // Unknown ids are content bugs, not engine errors; skip them.
            let Some(def) = states.state(&effect.state) else {
                continue;
            };
            match def.behaviour {
                StateBehaviour::StatValue { stat, amount } if stat == kind => {
                    stack.add_flat(amount);
                }
                StateBehaviour::StatRate { stat, per_mille } if stat == kind => {
                    stack.add_rate(per_mille);
                }
                _ => {}
            }
        }
        stack.apply(self.attributes.get(kind))
    }

    /// Union of action restrictions from active effects.
    pub fn restriction(&self, states: &dyn StateOracle) -> Restriction {
        let mut combined = Restriction::empty();
        for effect in self.effects.iter() {
            if let Some(def) = states.state(&effect.state)
                && let StateBehaviour::Restrict { restriction } = def.behaviour
            {
                combined |= restriction;
            }
        }
        combined
    }
}
