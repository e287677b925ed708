//! Traits describing the read-only content database.
//!
//! Oracles expose skill, item, enemy, and state records plus balance tables
//! and the random source. The [`ContentEnv`] aggregate bundles them so the
//! engine can reach everything it needs without hard coupling to concrete
//! implementations. The engine only ever reads; it never writes content.

mod enemies;
mod items;
mod rng;
mod skills;
mod states;
mod tables;

pub use enemies::{DropEntry, EnemyDef, EnemyOracle, EnemySkill, ThreatPolicy, Trigger};
pub use items::{ItemDef, ItemEffect, ItemOracle};
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use skills::{AppliedState, Scaling, SkillDef, SkillKind, SkillOracle, Targeting};
pub use states::{PeriodicKind, Restriction, StateBehaviour, StateDef, StateOracle};
pub use tables::{BalanceTables, DamageParams, FleeParams, TablesOracle};

/// Aggregates the read-only oracles required by the combat engine.
///
/// All oracles are mandatory: a combat cannot start without its content
/// database, so there is no "partially wired" environment.
#[derive(Clone, Copy)]
pub struct ContentEnv<'a> {
    skills: &'a dyn SkillOracle,
    items: &'a dyn ItemOracle,
    enemies: &'a dyn EnemyOracle,
    states: &'a dyn StateOracle,
    tables: &'a dyn TablesOracle,
    rng: &'a dyn RngOracle,
}

impl<'a> ContentEnv<'a> {
    pub fn new(
        skills: &'a dyn SkillOracle,
        items: &'a dyn ItemOracle,
        enemies: &'a dyn EnemyOracle,
        states: &'a dyn StateOracle,
        tables: &'a dyn TablesOracle,
        rng: &'a dyn RngOracle,
    ) -> Self {
        Self {
            skills,
            items,
            enemies,
            states,
            tables,
            rng,
        }
    }

    pub fn skills(&self) -> &'a dyn SkillOracle {
        self.skills
    }

    pub fn items(&self) -> &'a dyn ItemOracle {
        self.items
    }

    pub fn enemies(&self) -> &'a dyn EnemyOracle {
        self.enemies
    }

    pub fn states(&self) -> &'a dyn StateOracle {
        self.states
    }

    pub fn tables(&self) -> &'a dyn TablesOracle {
        self.tables
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }
}

impl core::fmt::Debug for ContentEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ContentEnv").finish_non_exhaustive()
    }
}
