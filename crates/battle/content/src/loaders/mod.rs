//! Content loaders for reading combat data from files.
//!
//! Catalogs (skills, items, enemies, states) are RON; the balance tables
//! are TOML. Loaders deserialize straight into `battle-core` types, so the
//! file formats track the engine's definitions with no mapping layer.

pub mod catalog;
pub mod factory;
pub mod tables;

pub use catalog::{EnemyLoader, ItemLoader, SkillLoader, StateLoader};
pub use factory::ContentFactory;
pub use tables::TablesLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read file {}: {}", path.display(), e))
}
