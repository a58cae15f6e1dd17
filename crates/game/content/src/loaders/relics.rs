//! Relic table loader.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};
use crate::relics::{RelicDefinition, RelicTable};

/// Relic table structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelicFile {
    pub relics: Vec<RelicDefinition>,
}

/// Loader for relic tables from RON files.
pub struct RelicLoader;

impl RelicLoader {
    pub fn load(path: &Path) -> LoadResult<RelicTable> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Parse a relic table, rejecting duplicate ids.
    pub fn parse(content: &str) -> LoadResult<RelicTable> {
        let file: RelicFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse relic table RON: {}", e))?;

        let mut seen = HashSet::new();
        for relic in &file.relics {
            if !seen.insert(relic.id.clone()) {
                anyhow::bail!("relic '{}' is defined more than once", relic.id);
            }
        }

        Ok(RelicTable::new(file.relics))
    }
}
