//! Enemy selection policy for each floor.
use tower_core::{EnemyCatalog, EnemyDefinition, PcgRng, RngOracle, SeedContext, compute_seed};

/// Picks the enemy met on a floor.
///
/// Implementations must be deterministic in `(run_seed, floor)` so that a
/// run replays identically.
pub trait EnemySelector {
    fn select<'c>(
        &self,
        catalog: &'c EnemyCatalog,
        run_seed: u64,
        floor: u32,
    ) -> Option<&'c EnemyDefinition>;
}

/// Uniform pick across the whole catalog.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformSelector {
    rng: PcgRng,
}

impl EnemySelector for UniformSelector {
    fn select<'c>(
        &self,
        catalog: &'c EnemyCatalog,
        run_seed: u64,
        floor: u32,
    ) -> Option<&'c EnemyDefinition> {
        let seed = compute_seed(
            run_seed,
            u64::from(floor),
            0,
            SeedContext::EnemySelection as u32,
        );
        catalog.get(self.rng.pick_index(seed, catalog.len()))
    }
}

/// Always meets the same enemy. Useful for fixtures and balancing runs.
#[derive(Clone, Debug)]
pub struct FixedSelector {
    enemy_id: String,
}

impl FixedSelector {
    pub fn new(enemy_id: impl Into<String>) -> Self {
        Self {
            enemy_id: enemy_id.into(),
        }
    }
}

impl EnemySelector for FixedSelector {
    fn select<'c>(
        &self,
        catalog: &'c EnemyCatalog,
        _run_seed: u64,
        _floor: u32,
    ) -> Option<&'c EnemyDefinition> {
        catalog.lookup(&self.enemy_id)
    }
}
