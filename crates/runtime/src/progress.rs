//! Run and meta progression.
//!
//! [`RunState`] tracks one climb; [`MetaProgress`] accumulates across runs.
//! Both change only when a finished encounter is folded in.

use tower_content::{RelicId, RelicTable};
use tower_core::{EncounterOutcome, EnemyId, PcgRng, RngOracle, SeedContext, compute_seed};

use crate::config::RewardConfig;

/// Payout for a cleared floor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reward {
    pub gold: u32,
    pub relic: Option<RelicId>,
}

/// Summary of one finished encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FloorResult {
    pub floor: u32,
    pub enemy_id: EnemyId,
    pub outcome: EncounterOutcome,
    /// Player HP when the encounter ended.
    pub player_hp: u32,
    pub reward: Option<Reward>,
}

/// State of a single climb.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunState {
    pub seed: u64,
    /// Floor of the next (or current) encounter.
    pub floor: u32,
    /// HP carried into the next encounter. `None` means full HP.
    pub player_hp: Option<u32>,
    pub gold: u32,
    pub relics: Vec<RelicId>,
    pub floors_cleared: u32,
    /// Highest floor cleared in this run, 0 before the first victory.
    pub best_floor: u32,
    /// Set once the run is over, with the outcome that ended it.
    pub ended: Option<EncounterOutcome>,
    pub history: Vec<FloorResult>,
}

impl RunState {
    pub fn new(seed: u64, start_floor: u32) -> Self {
        Self {
            seed,
            floor: start_floor,
            player_hp: None,
            gold: 0,
            relics: Vec::new(),
            floors_cleared: 0,
            best_floor: 0,
            ended: None,
            history: Vec::new(),
        }
    }

    pub fn is_over(&self) -> bool {
        self.ended.is_some()
    }

    /// Folds a terminal encounter into the run.
    ///
    /// Victory advances the floor, carries HP over and pays the reward.
    /// Defeat and surrender end the run without a reward.
    pub fn fold_outcome(
        &mut self,
        enemy_id: EnemyId,
        outcome: EncounterOutcome,
        player_hp: u32,
        rewards: &RewardConfig,
        relics: &RelicTable,
    ) -> &FloorResult {
        let floor = self.floor;
        let reward = match outcome {
            EncounterOutcome::Victory => {
                self.floors_cleared += 1;
                self.best_floor = self.best_floor.max(floor);
                self.floor = floor.saturating_add(1);
                self.player_hp = Some(player_hp);

                let reward = self.draw_reward(floor, rewards, relics);
                self.gold = self.gold.saturating_add(reward.gold);
                if let Some(relic) = &reward.relic {
                    self.relics.push(relic.clone());
                }
                Some(reward)
            }
            EncounterOutcome::Defeat | EncounterOutcome::Abandoned => {
                self.player_hp = Some(player_hp);
                self.ended = Some(outcome);
                None
            }
        };

        self.history.push(FloorResult {
            floor,
            enemy_id,
            outcome,
            player_hp,
            reward,
        });
        &self.history[self.history.len() - 1]
    }

    /// Reward for clearing `floor`. The relic roll only considers relics the
    /// run does not own yet.
    fn draw_reward(&self, floor: u32, rewards: &RewardConfig, relics: &RelicTable) -> Reward {
        let gold = rewards.gold_for(floor);
        if !rewards.grants_relic(self.floors_cleared) {
            return Reward { gold, relic: None };
        }

        let unowned: Vec<&RelicId> = relics
            .iter()
            .map(|relic| &relic.id)
            .filter(|id| !self.relics.contains(id))
            .collect();
        let seed = compute_seed(
            self.seed,
            u64::from(self.floors_cleared),
            0,
            SeedContext::Reward as u32,
        );
        let relic = unowned
            .get(PcgRng.pick_index(seed, unowned.len()))
            .map(|id| (*id).clone());

        Reward { gold, relic }
    }
}

/// Progress kept across runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetaProgress {
    pub best_floor: u32,
    pub runs_played: u32,
    pub lifetime_gold: u64,
}

impl MetaProgress {
    /// Records a finished run. Runs still in progress are ignored.
    pub fn record_run(&mut self, run: &RunState) {
        if !run.is_over() {
            return;
        }
        self.runs_played += 1;
        self.best_floor = self.best_floor.max(run.best_floor);
        self.lifetime_gold += u64::from(run.gold);
    }
}
