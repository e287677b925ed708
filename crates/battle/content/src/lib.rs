//! Data-driven combat content and loaders.
//!
//! This crate houses the content database the engine reads through its
//! oracle traits:
//! - [`ContentRegistry`]: in-memory oracle set keyed by string ids
//! - [`builtin::demo_registry`]: a built-in demo catalog
//! - RON catalog loaders (skills, items, enemies, states) and a TOML
//!   balance tables loader, behind the `loaders` feature
//!
//! Content is consumed by the engine's oracles and never appears in combat
//! state; loaders deserialize straight into `battle-core` types.

pub mod builtin;
pub mod registry;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use builtin::demo_registry;
pub use registry::ContentRegistry;

#[cfg(feature = "loaders")]
pub use loaders::{
    ContentFactory, EnemyLoader, ItemLoader, SkillLoader, StateLoader, TablesLoader,
};
