//! Data-driven content definitions and loaders.
//!
//! This crate houses static tower content and provides loaders for RON/TOML data files:
//! - Enemy catalogs (data-driven via RON)
//! - Relic tables for floor rewards (data-driven via RON)
//! - Combat configuration and starter deck (data-driven via TOML)
//!
//! The canonical tables are compiled in, so callers without a data directory
//! still get the shipped content. Content is consumed by the engine and the
//! runtime and never appears in battle state.

pub mod relics;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use relics::{RelicDefinition, RelicId, RelicTable, canonical_relics};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentBundle, ContentFactory, EnemyLoader, RelicLoader};

use tower_core::EnemyCatalog;

/// The four shipped enemies.
pub fn canonical_catalog() -> EnemyCatalog {
    EnemyCatalog::canonical()
}
