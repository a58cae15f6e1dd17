//! Content factory for building tables from data files.

use std::path::{Path, PathBuf};

use tower_core::{CombatConfig, EnemyCatalog};

use crate::loaders::{ConfigLoader, EnemyLoader, LoadResult, RelicLoader};
use crate::relics::RelicTable;

/// Everything a run needs, loaded together.
#[derive(Clone, Debug)]
pub struct ContentBundle {
    pub catalog: EnemyCatalog,
    pub config: CombatConfig,
    pub relics: RelicTable,
}

impl ContentBundle {
    /// The compiled-in tables and default tuning.
    pub fn canonical() -> Self {
        Self {
            catalog: EnemyCatalog::canonical(),
            config: CombatConfig::default(),
            relics: RelicTable::canonical(),
        }
    }
}

/// Content factory that loads all tower content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── enemies.ron
/// └── relics.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data directory shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load combat configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load the enemy catalog from `enemies.ron`.
    pub fn load_enemies(&self) -> LoadResult<EnemyCatalog> {
        let path = self.data_dir.join("enemies.ron");
        EnemyLoader::load(&path)
    }

    /// Load the relic table from `relics.ron`.
    pub fn load_relics(&self) -> LoadResult<RelicTable> {
        let path = self.data_dir.join("relics.ron");
        RelicLoader::load(&path)
    }

    /// Load every table. Fails on the first missing or invalid file.
    pub fn load_all(&self) -> LoadResult<ContentBundle> {
        Ok(ContentBundle {
            catalog: self.load_enemies()?,
            config: self.load_config()?,
            relics: self.load_relics()?,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
