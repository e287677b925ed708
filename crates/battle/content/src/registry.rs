//! In-memory content registry implementing the engine's oracle traits.

use std::collections::BTreeMap;

use battle_core::{
    BalanceTables, ContentEnv, EnemyDef, EnemyOracle, ItemDef, ItemOracle, RngOracle, SkillDef,
    SkillOracle, StateDef, StateOracle, TablesOracle,
};

/// Owns every content record for one campaign or test fixture.
///
/// Records are keyed by string id, the same ids combatants and encounter
/// lists carry. The registry is immutable once wired into a [`ContentEnv`];
/// builders are consumed before combat starts.
#[derive(Clone, Debug, Default)]
pub struct ContentRegistry {
    skills: BTreeMap<String, SkillDef>,
    items: BTreeMap<String, ItemDef>,
    enemies: BTreeMap<String, EnemyDef>,
    states: BTreeMap<String, StateDef>,
    tables: BalanceTables,
}

impl ContentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_skill(&mut self, id: impl Into<String>, def: SkillDef) {
        self.skills.insert(id.into(), def);
    }

    pub fn add_item(&mut self, id: impl Into<String>, def: ItemDef) {
        self.items.insert(id.into(), def);
    }

    pub fn add_enemy(&mut self, id: impl Into<String>, def: EnemyDef) {
        self.enemies.insert(id.into(), def);
    }

    pub fn add_state(&mut self, id: impl Into<String>, def: StateDef) {
        self.states.insert(id.into(), def);
    }

    pub fn set_tables(&mut self, tables: BalanceTables) {
        self.tables = tables;
    }

    #[must_use]
    pub fn with_skill(mut self, id: impl Into<String>, def: SkillDef) -> Self {
        self.add_skill(id, def);
        self
    }

    #[must_use]
    pub fn with_item(mut self, id: impl Into<String>, def: ItemDef) -> Self {
        self.add_item(id, def);
        self
    }

    #[must_use]
    pub fn with_enemy(mut self, id: impl Into<String>, def: EnemyDef) -> Self {
        self.add_enemy(id, def);
        self
    }

    #[must_use]
    pub fn with_state(mut self, id: impl Into<String>, def: StateDef) -> Self {
        self.add_state(id, def);
        self
    }

    pub fn skill_ids(&self) -> impl Iterator<Item = &str> {
        self.skills.keys().map(String::as_str)
    }

    pub fn enemy_ids(&self) -> impl Iterator<Item = &str> {
        self.enemies.keys().map(String::as_str)
    }

    /// Wires the registry and a random source into an engine environment.
    pub fn env<'a>(&'a self, rng: &'a dyn RngOracle) -> ContentEnv<'a> {
        ContentEnv::new(self, self, self, self, self, rng)
    }
}

impl SkillOracle for ContentRegistry {
    fn skill(&self, id: &str) -> Option<&SkillDef> {
        self.skills.get(id)
    }
}

impl ItemOracle for ContentRegistry {
    fn item(&self, id: &str) -> Option<&ItemDef> {
        self.items.get(id)
    }
}

impl EnemyOracle for ContentRegistry {
    fn template(&self, id: &str) -> Option<&EnemyDef> {
        self.enemies.get(id)
    }
}

impl StateOracle for ContentRegistry {
    fn state(&self, id: &str) -> Option<&StateDef> {
        self.states.get(id)
    }
}

impl TablesOracle for ContentRegistry {
    fn balance(&self) -> &BalanceTables {
        &self.tables
    }
}
