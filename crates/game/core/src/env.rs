//! Read-only facts the engine consults.
//!
//! [`CombatEnv`] bundles the enemy catalog, combat tuning and the RNG so the
//! engine never reaches for global tables. Everything in it is shared and
//! immutable for the lifetime of an encounter.

use crate::catalog::EnemyCatalog;
use crate::config::CombatConfig;
use crate::rng::PcgRng;

#[derive(Clone, Copy, Debug)]
pub struct CombatEnv<'a> {
    catalog: &'a EnemyCatalog,
    config: &'a CombatConfig,
    rng: PcgRng,
}

impl<'a> CombatEnv<'a> {
    pub fn new(catalog: &'a EnemyCatalog, config: &'a CombatConfig) -> Self {
        Self {
            catalog,
            config,
            rng: PcgRng,
        }
    }

    pub fn catalog(&self) -> &'a EnemyCatalog {
        self.catalog
    }

    pub fn config(&self) -> &'a CombatConfig {
        self.config
    }

    pub fn rng(&self) -> &PcgRng {
        &self.rng
    }
}
