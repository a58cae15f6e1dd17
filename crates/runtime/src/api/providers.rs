//! Abstraction for sourcing player decisions.
//!
//! Runtime users plug in [`ActionProvider`] implementations so an encounter
//! can run with human input, scripted fixtures, or simple policies.
use std::collections::VecDeque;

use tower_core::{BattleState, CardId, CardKind};

/// One player decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerAction {
    Play(CardId),
    EndTurn,
    Surrender,
}

/// Trait for providing player actions based on the current battle.
///
/// Implementations only see a read-only view. The runtime validates every
/// returned action through the engine.
pub trait ActionProvider {
    fn provide_action(&mut self, state: &BattleState) -> PlayerAction;
}

/// Plays the first affordable card by preference order, then ends the turn.
///
/// Prefers damage while the enemy telegraphs a non-attack and defense while
/// it telegraphs an attack.
#[derive(Clone, Copy, Debug, Default)]
pub struct AutopilotProvider;

impl AutopilotProvider {
    const OFFENSE: [CardKind; 4] = [
        CardKind::StrongAttack,
        CardKind::DoubleAttack,
        CardKind::Counter,
        CardKind::Defend,
    ];
    const DEFENSE: [CardKind; 4] = [
        CardKind::Counter,
        CardKind::Defend,
        CardKind::StrongAttack,
        CardKind::DoubleAttack,
    ];
}

impl ActionProvider for AutopilotProvider {
    fn provide_action(&mut self, state: &BattleState) -> PlayerAction {
        let order = if state.intent.step.is_attack() {
            &Self::DEFENSE
        } else {
            &Self::OFFENSE
        };

        order
            .iter()
            .find_map(|kind| state.playable_cards().find(|card| card.kind == *kind))
            .map_or(PlayerAction::EndTurn, |card| PlayerAction::Play(card.id))
    }
}

/// Replays a fixed list of actions, then ends turns forever.
#[derive(Clone, Debug, Default)]
pub struct ScriptedProvider {
    actions: VecDeque<PlayerAction>,
}

impl ScriptedProvider {
    pub fn new(actions: impl IntoIterator<Item = PlayerAction>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.actions.len()
    }
}

impl ActionProvider for ScriptedProvider {
    fn provide_action(&mut self, _state: &BattleState) -> PlayerAction {
        self.actions.pop_front().unwrap_or(PlayerAction::EndTurn)
    }
}
