//! Player-facing operations as pipeline transitions.

use crate::card::CardId;
use crate::env::CombatEnv;
use crate::state::{BattleState, EncounterOutcome, EncounterPhase};

use super::errors::CombatError;
use super::transition::CombatTransition;
use super::turn::{close_turn, conclude, context, resolve_card};

/// Shared guard: the encounter is live and waiting for the player.
fn ensure_awaiting_player(state: &BattleState) -> Result<(), CombatError> {
    if let Some(outcome) = state.outcome() {
        return Err(CombatError::already_terminal(outcome, context(state)));
    }
    if state.phase != EncounterPhase::AwaitingPlayerAction {
        return Err(CombatError::UnexpectedPhase {
            phase: state.phase,
            context: context(state),
        });
    }
    Ok(())
}

/// Between operations a battle rests in `AwaitingPlayerAction` or a
/// terminal phase, and no HP exceeds its maximum.
fn ensure_resting(state: &BattleState) -> Result<(), CombatError> {
    if !state.is_terminal() && state.phase != EncounterPhase::AwaitingPlayerAction {
        return Err(CombatError::InvariantViolation {
            reason: "operation left the encounter mid-turn",
            context: context(state),
        });
    }
    if state.player.hp > state.player.max_hp || state.enemy.hp > state.enemy.max_hp {
        return Err(CombatError::InvariantViolation {
            reason: "hp above maximum",
            context: context(state),
        });
    }
    Ok(())
}

/// Play one card from the hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayCard {
    pub card: CardId,
}

impl CombatTransition for PlayCard {
    type Error = CombatError;

    fn pre_validate(&self, state: &BattleState, _env: &CombatEnv<'_>) -> Result<(), Self::Error> {
        ensure_awaiting_player(state)?;

        let card = state
            .deck
            .find_in_hand(self.card)
            .ok_or_else(|| CombatError::unknown_card(self.card, context(state)))?;

        if card.cost > state.ap {
            return Err(CombatError::insufficient_action_points(
                card.cost,
                state.ap,
                context(state),
            ));
        }
        Ok(())
    }

    fn apply(&self, state: &mut BattleState, env: &CombatEnv<'_>) -> Result<(), Self::Error> {
        state.phase = EncounterPhase::ResolvingPlayerAction;

        let card = state
            .deck
            .play(self.card)
            .ok_or_else(|| CombatError::unknown_card(self.card, context(state)))?;
        state.ap = state.ap.saturating_sub(card.cost);

        resolve_card(state, env, card);

        if !state.is_terminal() {
            state.phase = EncounterPhase::AwaitingPlayerAction;
        }
        Ok(())
    }

    fn post_validate(&self, state: &BattleState, _env: &CombatEnv<'_>) -> Result<(), Self::Error> {
        ensure_resting(state)
    }
}

/// End the player's turn; the enemy acts and the next turn opens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EndTurn;

impl CombatTransition for EndTurn {
    type Error = CombatError;

    fn pre_validate(&self, state: &BattleState, _env: &CombatEnv<'_>) -> Result<(), Self::Error> {
        ensure_awaiting_player(state)
    }

    fn apply(&self, state: &mut BattleState, env: &CombatEnv<'_>) -> Result<(), Self::Error> {
        close_turn(state, env)
    }

    fn post_validate(&self, state: &BattleState, _env: &CombatEnv<'_>) -> Result<(), Self::Error> {
        ensure_resting(state)
    }
}

/// Abandon the encounter. The enemy does not act.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Surrender;

impl CombatTransition for Surrender {
    type Error = CombatError;

    fn pre_validate(&self, state: &BattleState, _env: &CombatEnv<'_>) -> Result<(), Self::Error> {
        ensure_awaiting_player(state)
    }

    fn apply(&self, state: &mut BattleState, _env: &CombatEnv<'_>) -> Result<(), Self::Error> {
        conclude(state, EncounterOutcome::Abandoned);
        Ok(())
    }
}
