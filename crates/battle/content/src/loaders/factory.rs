//! Content factory for building a registry from a data directory.

use std::path::{Path, PathBuf};

use battle_core::{SkillOracle, StateOracle};

use crate::loaders::{EnemyLoader, ItemLoader, LoadResult, SkillLoader, StateLoader, TablesLoader};
use crate::registry::ContentRegistry;

/// Loads a complete content set from a campaign data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── skills.ron
/// ├── items.ron
/// ├── enemies.ron
/// ├── states.ron
/// └── tables.toml
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Loads every catalog plus the balance tables into one registry.
    ///
    /// Cross-references are checked after loading: an enemy skill, innate
    /// state, drop item, or skill rider that names a missing record fails
    /// the load. Catching dangling ids here keeps them out of combat setup.
    pub fn load_registry(&self) -> LoadResult<ContentRegistry> {
        let mut registry = ContentRegistry::new();

        for (id, def) in SkillLoader::load(&self.data_dir.join("skills.ron"))? {
            registry.add_skill(id, def);
        }
        for (id, def) in ItemLoader::load(&self.data_dir.join("items.ron"))? {
            registry.add_item(id, def);
        }
        for (id, def) in StateLoader::load(&self.data_dir.join("states.ron"))? {
            registry.add_state(id, def);
        }
        for (id, def) in EnemyLoader::load(&self.data_dir.join("enemies.ron"))? {
            registry.add_enemy(id, def);
        }
        registry.set_tables(TablesLoader::load(&self.data_dir.join("tables.toml"))?);

        self.validate(&registry)?;
        Ok(registry)
    }

    fn validate(&self, registry: &ContentRegistry) -> LoadResult<()> {
        use battle_core::{EnemyOracle, ItemOracle};

        let skill_ids: Vec<String> = registry.skill_ids().map(str::to_string).collect();
        for id in &skill_ids {
            let Some(def) = registry.skill(id) else {
                continue;
            };
            if let Some(rider) = &def.applies
                && registry.state(&rider.state).is_none()
            {
                anyhow::bail!("skill {id:?} applies unknown state {:?}", rider.state);
            }
        }

        let enemy_ids: Vec<String> = registry.enemy_ids().map(str::to_string).collect();
        for id in &enemy_ids {
            let Some(template) = registry.template(id) else {
                continue;
            };
            for entry in &template.skills {
                if registry.skill(&entry.skill).is_none() {
                    anyhow::bail!("enemy {id:?} references unknown skill {:?}", entry.skill);
                }
            }
            for state_id in &template.innate_states {
                if registry.state(state_id).is_none() {
                    anyhow::bail!("enemy {id:?} references unknown state {state_id:?}");
                }
            }
            let mut total = 0u32;
            for drop in &template.drops {
                if registry.item(&drop.item).is_none() {
                    anyhow::bail!("enemy {id:?} drops unknown item {:?}", drop.item);
                }
                total += drop.per_mille;
            }
            if total > 1000 {
                anyhow::bail!("enemy {id:?} drop weights exceed 1000 per-mille ({total})");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_keeps_its_data_dir() {
        let factory = ContentFactory::new("/tmp/campaign");
        assert_eq!(factory.data_dir(), Path::new("/tmp/campaign"));
    }
}
