//! Catalog loaders for RON content files.
//!
//! Every catalog uses the same file shape: a RON list of `(id, record)`
//! pairs. Duplicate ids are rejected so a typo cannot silently shadow an
//! earlier record.

use std::path::Path;

use battle_core::{EnemyDef, ItemDef, SkillDef, StateDef};
use serde::de::DeserializeOwned;

use crate::loaders::{LoadResult, read_file};

fn load_pairs<T: DeserializeOwned>(path: &Path, what: &str) -> LoadResult<Vec<(String, T)>> {
    let content = read_file(path)?;
    let records: Vec<(String, T)> = ron::from_str(&content)
        .map_err(|e| anyhow::anyhow!("failed to parse {what} RON at {}: {e}", path.display()))?;

    for (index, (id, _)) in records.iter().enumerate() {
        if records[..index].iter().any(|(other, _)| other == id) {
            anyhow::bail!("duplicate {what} id {id:?} in {}", path.display());
        }
    }
    Ok(records)
}

/// Loader for the skill catalog.
///
/// RON format: `[("strike", (name: "Strike", kind: physical, ...)), ...]`
pub struct SkillLoader;

impl SkillLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<(String, SkillDef)>> {
        load_pairs(path, "skill")
    }
}

/// Loader for the item catalog.
pub struct ItemLoader;

impl ItemLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<(String, ItemDef)>> {
        load_pairs(path, "item")
    }
}

/// Loader for enemy templates.
pub struct EnemyLoader;

impl EnemyLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<(String, EnemyDef)>> {
        load_pairs(path, "enemy")
    }
}

/// Loader for status state records.
pub struct StateLoader;

impl StateLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<(String, StateDef)>> {
        load_pairs(path, "state")
    }
}
