//! One encounter in progress, with tracing around every operation.

use tracing::{Span, debug, info, info_span, warn};

use tower_core::{
    ActionOutcome, BattleState, CombatEngine, CombatEnv, EncounterSpec, ExecuteError, GameError,
    start_encounter,
};

use crate::api::{PlayerAction, Result, RuntimeError};

/// Owns the battle state of the current floor.
///
/// Every operation runs inside an `encounter` span tagged with the enemy id
/// and floor.
#[derive(Debug)]
pub struct EncounterSession {
    state: BattleState,
    span: Span,
}

impl EncounterSession {
    pub fn start(env: &CombatEnv<'_>, spec: &EncounterSpec) -> Result<Self> {
        let span = info_span!("encounter", enemy = %spec.enemy_id, floor = spec.floor);
        let guard = span.enter();

        let state = start_encounter(env, spec).map_err(|err| {
            warn!(code = err.error_code(), error = %err, "encounter failed to start");
            RuntimeError::Encounter(err)
        })?;

        info!(
            enemy_hp = state.enemy.hp,
            player_hp = state.player.hp,
            intent = %state.intent.step,
            "encounter started"
        );

        drop(guard);
        Ok(Self { state, span })
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn into_state(self) -> BattleState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    /// Applies one player decision through the engine.
    ///
    /// A rejected action leaves the state unchanged and is returned as
    /// [`RuntimeError::Rejected`].
    pub fn apply(&mut self, env: CombatEnv<'_>, action: PlayerAction) -> Result<ActionOutcome> {
        let _guard = self.span.enter();

        let mut engine = CombatEngine::new(&mut self.state, env);
        let result = match action {
            PlayerAction::Play(card) => engine.play_card(card),
            PlayerAction::EndTurn => engine.end_turn(),
            PlayerAction::Surrender => engine.surrender(),
        };

        match result {
            Ok(outcome) => {
                debug!(
                    ?action,
                    turn = self.state.turn,
                    player_hp = self.state.player.hp,
                    enemy_hp = self.state.enemy.hp,
                    entries = outcome.entries.len(),
                    "action resolved"
                );
                if let Some(end) = outcome.outcome {
                    info!(
                        outcome = %end,
                        turns = self.state.turn,
                        player_hp = self.state.player.hp,
                        "encounter finished"
                    );
                }
                Ok(outcome)
            }
            Err(err) => {
                log_rejection(&action, &err);
                Err(err.into())
            }
        }
    }
}

fn log_rejection(action: &PlayerAction, err: &ExecuteError) {
    warn!(
        ?action,
        code = err.error_code(),
        severity = err.severity().as_str(),
        phase = err.phase().as_str(),
        error = %err,
        "action rejected"
    );
}
