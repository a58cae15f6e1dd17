//! Turn resolution and operation pipeline.
//!
//! The [`CombatEngine`] is the authoritative reducer for [`BattleState`]. It
//! routes each player operation through the transition phases and surfaces
//! rich error information to the caller.
//!
//! Operations are atomic: the transition runs against a working copy that
//! replaces the caller's state only after every phase succeeds. A rejected
//! operation leaves the state bit-for-bit unchanged.

mod actions;
mod errors;
mod transition;
mod turn;

pub use actions::{EndTurn, PlayCard, Surrender};
pub use errors::{CombatError, ExecuteError, TransitionPhase, TransitionPhaseError};
pub use transition::CombatTransition;

use crate::card::{CardId, Deck};
use crate::catalog::EnemyId;
use crate::env::CombatEnv;
use crate::intent::telegraph;
use crate::state::{
    BattleFields, BattleState, Combatant, CombatLog, CombatLogEntry, EncounterOutcome,
    EncounterPhase, LogSource,
};
use crate::status::StatusBook;

use transition::drive_transition;

/// Parameters of a new encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterSpec {
    pub enemy_id: EnemyId,
    pub floor: u32,
    /// Seed for deck shuffles.
    pub seed: u64,
    /// HP carried in from earlier floors. `None` starts at full HP.
    pub player_hp: Option<u32>,
}

impl EncounterSpec {
    pub fn new(enemy_id: impl Into<String>, floor: u32) -> Self {
        Self {
            enemy_id: EnemyId::new(enemy_id),
            floor,
            seed: 0,
            player_hp: None,
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_player_hp(mut self, hp: u32) -> Self {
        self.player_hp = Some(hp);
        self
    }
}

/// Result of one successful operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Which parts of the state changed.
    pub fields: BattleFields,
    /// Log entries the operation appended, in order.
    pub entries: Vec<CombatLogEntry>,
    /// Set when the operation ended the encounter.
    pub outcome: Option<EncounterOutcome>,
}

/// Creates a battle for `spec`, with the turn 1 intent telegraphed and the
/// opening hand drawn.
pub fn start_encounter(
    env: &CombatEnv<'_>,
    spec: &EncounterSpec,
) -> Result<BattleState, CombatError> {
    let config = env.config();
    let enemy = env
        .catalog()
        .lookup(spec.enemy_id.as_str())
        .ok_or_else(|| CombatError::unknown_enemy(spec.enemy_id.as_str()))?;

    let enemy_hp = enemy.hp_on_floor(spec.floor, config.enemy_hp_per_floor);
    let player_hp = spec
        .player_hp
        .unwrap_or(config.player_max_hp)
        .clamp(1, config.player_max_hp.max(1));

    let mut log = CombatLog::new();
    log.push(
        LogSource::System,
        1,
        format!("Floor {}: {} appears.", spec.floor, enemy.name),
    );

    let mut state = BattleState {
        seed: spec.seed,
        floor: spec.floor,
        turn: 1,
        enemy_id: enemy.id.clone(),
        enemy_name: enemy.name.clone(),
        player: Combatant::new(player_hp, config.player_max_hp.max(1)),
        enemy: Combatant::new(enemy_hp, enemy_hp),
        ap: 0,
        deck: Deck::build(&config.starter_deck, &config.cards, spec.seed, env.rng()),
        intent: telegraph(enemy, 1, spec.floor),
        statuses: StatusBook::new(),
        counter_armed: false,
        phase: EncounterPhase::AwaitingIntentTelegraph,
        log,
    };

    turn::open_turn(&mut state, env)?;
    Ok(state)
}

/// Combat engine bound to one battle.
///
/// All state mutations flow through the three-phase pipeline:
/// pre_validate → apply → post_validate
pub struct CombatEngine<'a> {
    state: &'a mut BattleState,
    env: CombatEnv<'a>,
}

impl<'a> CombatEngine<'a> {
    /// Creates a new engine over the given state.
    pub fn new(state: &'a mut BattleState, env: CombatEnv<'a>) -> Self {
        Self { state, env }
    }

    pub fn state(&self) -> &BattleState {
        self.state
    }

    /// Plays a card from the hand.
    ///
    /// Fails with `InsufficientActionPoints` when the card costs more than the
    /// remaining AP and with `UnknownCard` when it is not in hand.
    pub fn play_card(&mut self, card: CardId) -> Result<ActionOutcome, ExecuteError> {
        self.execute(&PlayCard { card }, ExecuteError::PlayCard)
    }

    /// Ends the player's turn and resolves the enemy's telegraphed action.
    pub fn end_turn(&mut self) -> Result<ActionOutcome, ExecuteError> {
        self.execute(&EndTurn, ExecuteError::EndTurn)
    }

    /// Abandons the encounter without an enemy action.
    pub fn surrender(&mut self) -> Result<ActionOutcome, ExecuteError> {
        self.execute(&Surrender, ExecuteError::Surrender)
    }

    fn execute<T>(
        &mut self,
        transition: &T,
        wrap: fn(TransitionPhaseError<CombatError>) -> ExecuteError,
    ) -> Result<ActionOutcome, ExecuteError>
    where
        T: CombatTransition<Error = CombatError>,
    {
        let mut working = self.state.clone();
        drive_transition(transition, &mut working, &self.env).map_err(wrap)?;

        let fields = BattleFields::from_states(self.state, &working);
        let entries = working.log.since(self.state.log.len()).to_vec();
        let outcome = working.outcome();
        *self.state = working;

        Ok(ActionOutcome {
            fields,
            entries,
            outcome,
        })
    }
}
