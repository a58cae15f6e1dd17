//! Combat configuration loader.

use std::path::Path;

use tower_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`CombatConfig::default`].
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Parse config from TOML text.
    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.ap_per_turn == 0 {
            anyhow::bail!("ap_per_turn must be at least 1");
        }
        if config.player_max_hp == 0 {
            anyhow::bail!("player_max_hp must be at least 1");
        }

        Ok(config)
    }
}
