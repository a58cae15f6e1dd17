//! Run configuration with environment overrides.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use tower_core::CombatConfig;

/// Gold and relic payout for cleared floors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RewardConfig {
    pub gold_base: u32,
    pub gold_per_floor: u32,
    /// A relic is drawn whenever the cleared-floor count is a multiple of
    /// this value. Zero disables relic rewards.
    pub relic_every: u32,
}

impl RewardConfig {
    pub const DEFAULT_GOLD_BASE: u32 = 10;
    pub const DEFAULT_GOLD_PER_FLOOR: u32 = 2;
    pub const DEFAULT_RELIC_EVERY: u32 = 3;

    /// Gold paid for clearing `floor`.
    pub fn gold_for(&self, floor: u32) -> u32 {
        self.gold_base
            .saturating_add(self.gold_per_floor.saturating_mul(floor))
    }

    /// Whether clearing the `floors_cleared`-th floor earns a relic.
    pub fn grants_relic(&self, floors_cleared: u32) -> bool {
        self.relic_every != 0 && floors_cleared != 0 && floors_cleared % self.relic_every == 0
    }
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            gold_base: Self::DEFAULT_GOLD_BASE,
            gold_per_floor: Self::DEFAULT_GOLD_PER_FLOOR,
            relic_every: Self::DEFAULT_RELIC_EVERY,
        }
    }
}

/// Runtime configuration for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Base seed every run-level roll derives from.
    pub seed: u64,
    /// First floor of a run. Floor 0 is honored and scales like any other.
    pub start_floor: u32,
    /// `Runtime::run_encounter` gives up once an encounter reaches this turn.
    pub max_turns: u32,
    /// Content directory. `None` uses the compiled-in tables.
    pub data_dir: Option<PathBuf>,
    /// Overrides applied on top of the loaded combat config.
    pub player_max_hp: Option<u32>,
    pub ap_per_turn: Option<u32>,
    pub rewards: RewardConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            start_floor: 1,
            max_turns: Self::DEFAULT_MAX_TURNS,
            data_dir: None,
            player_max_hp: None,
            ap_per_turn: None,
            rewards: RewardConfig::default(),
        }
    }
}

impl RuntimeConfig {
    pub const DEFAULT_MAX_TURNS: u32 = 500;

    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(seed) = read_env::<u64>("TOWER_SEED") {
            config.seed = seed;
        }
        if let Some(floor) = read_env::<u32>("TOWER_START_FLOOR") {
            config.start_floor = floor;
        }
        if let Some(turns) = read_env::<u32>("TOWER_MAX_TURNS") {
            config.max_turns = turns.max(1);
        }
        config.data_dir = env::var("TOWER_DATA_DIR").ok().map(PathBuf::from);
        config.player_max_hp = read_env::<u32>("TOWER_PLAYER_MAX_HP").filter(|hp| *hp > 0);
        config.ap_per_turn = read_env::<u32>("TOWER_AP_PER_TURN").filter(|ap| *ap > 0);

        config
    }

    /// Applies the HP and AP overrides to a loaded combat config.
    pub fn apply_overrides(&self, combat: &mut CombatConfig) {
        if let Some(hp) = self.player_max_hp {
            combat.player_max_hp = hp;
        }
        if let Some(ap) = self.ap_per_turn {
            combat.ap_per_turn = ap;
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    env::var(key).ok()?.parse().ok()
}
