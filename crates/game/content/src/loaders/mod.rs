//! Content loaders for reading tower data from files.
//!
//! Enemy and relic tables are RON, combat configuration is TOML. Every loader
//! validates what it reads before handing it out.

pub mod config;
pub mod enemies;
pub mod factory;
pub mod relics;

pub use config::ConfigLoader;
pub use enemies::EnemyLoader;
pub use factory::{ContentBundle, ContentFactory};
pub use relics::RelicLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
