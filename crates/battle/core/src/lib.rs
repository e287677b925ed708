//! Deterministic turn-based combat rules and data types.
//!
//! `battle-core` defines the canonical combat logic (actions, damage and
//! status formulas, turn scheduling, enemy selection) and exposes pure APIs
//! reusable by game clients and offline tools. All state mutation flows
//! through [`engine::CombatEngine`]; content is read through the oracle
//! traits in [`env`], so the same engine runs against any content database.
//! With a fixed seed and action sequence a battle replays identically.

pub mod action;
pub mod ai;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod result;
pub mod state;
pub mod stats;

mod effect;

pub use action::{ActionError, ActionKind, CombatAction, SetupError, Target};
pub use combat::{
    Affinities, Affinity, DamageInput, Element, HealInput, calculate_damage, calculate_heal,
    check_hit, element_modifier,
};
pub use config::CombatConfig;
pub use engine::{CarriedEffect, CombatEngine, PartyMember};
pub use env::{
    AppliedState, BalanceTables, ContentEnv, DamageParams, DropEntry, EnemyDef, EnemyOracle,
    EnemySkill, FleeParams, ItemDef, ItemEffect, ItemOracle, PcgRng, PeriodicKind, Restriction,
    RngOracle, Scaling, SkillDef, SkillKind, SkillOracle, StateBehaviour, StateDef, StateOracle,
    TablesOracle, Targeting, ThreatPolicy, Trigger, compute_seed,
};
pub use error::{CombatError, ErrorSeverity};
pub use result::{AppliedValue, HitOutcome, HitRecord, TurnOrigin, TurnResult, TurnSummary};
pub use state::{
    ActiveEffect, ActiveEffects, ApplyOutcome, CombatRewards, CombatState, Combatant, CombatantId,
    CombatantKind, Phase, ResourceMeter, TurnState,
};
pub use stats::{Attributes, BonusStack, StatKind};
