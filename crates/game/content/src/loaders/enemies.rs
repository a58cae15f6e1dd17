//! Enemy catalog loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tower_core::{EnemyCatalog, EnemyDefinition};

use crate::loaders::{LoadResult, read_file};

/// Enemy catalog structure for RON files.
///
/// Patterns are fixed-size, so a pattern that is not exactly three steps
/// long fails to parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyFile {
    pub enemies: Vec<EnemyDefinition>,
}

/// Loader for enemy catalogs from RON files.
pub struct EnemyLoader;

impl EnemyLoader {
    /// Load an enemy catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<EnemyCatalog> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Parse and validate an enemy catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<EnemyCatalog> {
        let file: EnemyFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy catalog RON: {}", e))?;

        EnemyCatalog::new(file.enemies)
            .map_err(|e| anyhow::anyhow!("Invalid enemy catalog: {}", e))
    }
}
