//! Balance tables loader.

use std::path::Path;

use battle_core::BalanceTables;

use crate::loaders::{LoadResult, read_file};

/// Loader for the balance tables from a TOML file.
pub struct TablesLoader;

impl TablesLoader {
    pub fn load(path: &Path) -> LoadResult<BalanceTables> {
        let content = read_file(path)?;
        let tables: BalanceTables = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("failed to parse tables TOML: {e}"))?;
        Ok(tables)
    }
}
