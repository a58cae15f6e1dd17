//! High-level runtime orchestrator.
//!
//! The runtime owns the loaded content, the run and meta progression, and at
//! most one encounter in progress. It exposes a builder-based API for callers
//! to drive floors one action at a time or through an [`ActionProvider`].

use tracing::{info, warn};

use tower_content::{ContentBundle, ContentFactory};
use tower_core::{
    ActionOutcome, BattleState, CardId, CombatEnv, EncounterSpec, SeedContext, compute_seed,
};

use crate::api::{
    ActionProvider, EnemySelector, PlayerAction, Result, RuntimeError, UniformSelector,
};
use crate::config::RuntimeConfig;
use crate::progress::{FloorResult, MetaProgress, RunState};
use crate::session::EncounterSession;

/// Main runtime that sequences encounters up the tower.
pub struct Runtime {
    config: RuntimeConfig,
    content: ContentBundle,
    selector: Box<dyn EnemySelector>,
    run: RunState,
    meta: MetaProgress,
    session: Option<EncounterSession>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn content(&self) -> &ContentBundle {
        &self.content
    }

    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn meta(&self) -> &MetaProgress {
        &self.meta
    }

    /// Battle of the encounter in progress, if any.
    pub fn battle(&self) -> Option<&BattleState> {
        self.session.as_ref().map(EncounterSession::state)
    }

    /// Starts the encounter for the current floor.
    ///
    /// The enemy comes from the selector and the deck seed from the run seed
    /// and floor, so a run replays identically.
    pub fn begin_encounter(&mut self) -> Result<&BattleState> {
        if self.run.is_over() {
            return Err(RuntimeError::RunEnded);
        }
        if self.session.is_some() {
            return Err(RuntimeError::EncounterInProgress {
                floor: self.run.floor,
            });
        }

        let floor = self.run.floor;
        let enemy = self
            .selector
            .select(&self.content.catalog, self.run.seed, floor)
            .ok_or(RuntimeError::EmptyCatalog)?;

        let seed = compute_seed(
            self.run.seed,
            u64::from(floor),
            0,
            SeedContext::Shuffle as u32,
        );
        let mut spec = EncounterSpec::new(enemy.id.as_str(), floor).with_seed(seed);
        if let Some(hp) = self.run.player_hp {
            spec = spec.with_player_hp(hp);
        }

        let env = CombatEnv::new(&self.content.catalog, &self.content.config);
        let session = EncounterSession::start(&env, &spec)?;
        Ok(self.session.insert(session).state())
    }

    /// Plays a card in the current encounter.
    pub fn play_card(&mut self, card: CardId) -> Result<ActionOutcome> {
        self.act(PlayerAction::Play(card))
    }

    pub fn end_turn(&mut self) -> Result<ActionOutcome> {
        self.act(PlayerAction::EndTurn)
    }

    pub fn surrender(&mut self) -> Result<ActionOutcome> {
        self.act(PlayerAction::Surrender)
    }

    /// Applies one player decision. When it ends the encounter, the result is
    /// folded into the run and the session is closed.
    pub fn act(&mut self, action: PlayerAction) -> Result<ActionOutcome> {
        let session = self
            .session
            .as_mut()
            .ok_or(RuntimeError::NoActiveEncounter)?;

        let env = CombatEnv::new(&self.content.catalog, &self.content.config);
        let outcome = session.apply(env, action)?;

        if outcome.outcome.is_some() {
            self.close_encounter();
        }
        Ok(outcome)
    }

    /// Plays the current floor to its end with decisions from `provider`.
    ///
    /// A rejected decision is replaced by ending the turn. Fails with
    /// [`RuntimeError::TurnLimit`] once the battle reaches `config.max_turns`;
    /// the encounter then stays open for the caller to surrender or continue.
    pub fn run_encounter(&mut self, provider: &mut dyn ActionProvider) -> Result<FloorResult> {
        if self.session.is_none() {
            self.begin_encounter()?;
        }

        while let Some(session) = &self.session {
            let turn = session.state().turn;
            if turn >= self.config.max_turns {
                warn!(floor = self.run.floor, turn, "encounter hit the turn limit");
                return Err(RuntimeError::TurnLimit {
                    floor: self.run.floor,
                    turns: turn,
                });
            }

            let action = provider.provide_action(session.state());
            match self.act(action) {
                Ok(_) => {}
                Err(err) if err.is_recoverable() => {
                    warn!(?action, error = %err, "provider action rejected, ending turn");
                    self.act(PlayerAction::EndTurn)?;
                }
                Err(err) => return Err(err),
            }
        }

        self.run
            .history
            .last()
            .cloned()
            .ok_or(RuntimeError::NoActiveEncounter)
    }

    /// Climbs until the run ends or `max_floors` encounters have been played.
    pub fn climb(
        &mut self,
        provider: &mut dyn ActionProvider,
        max_floors: u32,
    ) -> Result<&RunState> {
        for _ in 0..max_floors {
            if self.run.is_over() {
                break;
            }
            self.run_encounter(provider)?;
        }
        Ok(&self.run)
    }

    /// Replaces the current run with a fresh one. Meta progress is kept.
    pub fn start_new_run(&mut self, seed: u64) -> Result<&RunState> {
        if self.session.is_some() {
            return Err(RuntimeError::EncounterInProgress {
                floor: self.run.floor,
            });
        }
        self.run = RunState::new(seed, self.config.start_floor);
        info!(seed, floor = self.run.floor, "run started");
        Ok(&self.run)
    }

    fn close_encounter(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        let state = session.into_state();
        let Some(outcome) = state.outcome() else {
            return;
        };

        let result = self.run.fold_outcome(
            state.enemy_id.clone(),
            outcome,
            state.player.hp,
            &self.config.rewards,
            &self.content.relics,
        );
        info!(
            floor = result.floor,
            enemy = %result.enemy_id,
            %outcome,
            gold = result.reward.as_ref().map_or(0, |r| r.gold),
            relic = result.reward.as_ref().and_then(|r| r.relic.as_ref()).map(|r| r.as_str()),
            "floor folded into run"
        );

        if self.run.is_over() {
            self.meta.record_run(&self.run);
            info!(
                best_floor = self.run.best_floor,
                gold = self.run.gold,
                runs_played = self.meta.runs_played,
                "run ended"
            );
        }
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    content: Option<ContentBundle>,
    selector: Option<Box<dyn EnemySelector>>,
    meta: MetaProgress,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            content: None,
            selector: None,
            meta: MetaProgress::default(),
        }
    }

    /// Set runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Use already loaded content instead of reading `config.data_dir`.
    pub fn content(mut self, content: ContentBundle) -> Self {
        self.content = Some(content);
        self
    }

    /// Set the enemy selection policy (uniform by default).
    pub fn selector(mut self, selector: impl EnemySelector + 'static) -> Self {
        self.selector = Some(Box::new(selector));
        self
    }

    /// Continue from earlier meta progress.
    pub fn meta(mut self, meta: MetaProgress) -> Self {
        self.meta = meta;
        self
    }

    /// Build the runtime.
    ///
    /// Content comes from, in order: [`Self::content`], `config.data_dir`,
    /// the compiled-in tables. HP and AP overrides from the config are
    /// applied last.
    pub fn build(self) -> Result<Runtime> {
        let mut content = match (self.content, &self.config.data_dir) {
            (Some(content), _) => content,
            (None, Some(dir)) => ContentFactory::new(dir)
                .load_all()
                .map_err(RuntimeError::Content)?,
            (None, None) => ContentBundle::canonical(),
        };
        self.config.apply_overrides(&mut content.config);

        if content.catalog.is_empty() {
            return Err(RuntimeError::EmptyCatalog);
        }

        let run = RunState::new(self.config.seed, self.config.start_floor);
        info!(
            seed = run.seed,
            floor = run.floor,
            enemies = content.catalog.len(),
            relics = content.relics.len(),
            "run started"
        );

        Ok(Runtime {
            config: self.config,
            content,
            selector: self
                .selector
                .unwrap_or_else(|| Box::new(UniformSelector::default())),
            run,
            meta: self.meta,
            session: None,
        })
    }
}
