//! Authoritative battle state representation.
//!
//! This module owns the data structures that describe one encounter. Callers
//! clone or query the state but mutate it exclusively through the engine.
mod delta;
mod fingerprint;
mod log;

pub use delta::BattleFields;
pub use fingerprint::compute_fingerprint;
pub use log::{CombatLog, CombatLogEntry, LogSource};

use crate::card::{ActionCard, Deck};
use crate::catalog::EnemyId;
use crate::intent::Intent;
use crate::status::{Side, StatusBook};

/// Hit points and block of one side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub hp: u32,
    pub max_hp: u32,
    /// Absorbs attack damage before HP.
    pub block: u32,
}

impl Combatant {
    pub fn new(hp: u32, max_hp: u32) -> Self {
        Self {
            hp: hp.min(max_hp),
            max_hp,
            block: 0,
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }
}

/// Position of an encounter in the turn state machine.
///
/// Between engine calls a live encounter always rests in
/// `AwaitingPlayerAction`; the other non-terminal phases are only
/// observable while an operation runs.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EncounterPhase {
    AwaitingIntentTelegraph,
    AwaitingPlayerAction,
    ResolvingPlayerAction,
    ResolvingEnemyAction,
    CheckingEnd,
    Victory,
    Defeat,
    Abandoned,
}

impl EncounterPhase {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Victory | Self::Defeat | Self::Abandoned)
    }

    pub const fn outcome(self) -> Option<EncounterOutcome> {
        match self {
            Self::Victory => Some(EncounterOutcome::Victory),
            Self::Defeat => Some(EncounterOutcome::Defeat),
            Self::Abandoned => Some(EncounterOutcome::Abandoned),
            _ => None,
        }
    }
}

/// How a finished encounter ended.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EncounterOutcome {
    Victory,
    Defeat,
    Abandoned,
}

/// Canonical snapshot of one encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    /// Seed for deck shuffles. Fixed at encounter start.
    pub seed: u64,
    pub floor: u32,
    /// 1-based turn counter.
    pub turn: u32,

    pub enemy_id: EnemyId,
    pub enemy_name: String,

    pub player: Combatant,
    pub enemy: Combatant,

    /// Action points left this turn.
    pub ap: u32,
    pub deck: Deck,

    /// Enemy action telegraphed for the current turn.
    pub intent: Intent,
    pub statuses: StatusBook,
    /// Retaliation is armed until the next player turn starts.
    pub counter_armed: bool,

    pub phase: EncounterPhase,
    pub log: CombatLog,
}

impl BattleState {
    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn outcome(&self) -> Option<EncounterOutcome> {
        self.phase.outcome()
    }

    pub fn hand(&self) -> &[ActionCard] {
        self.deck.hand()
    }

    /// Cards in hand the player can currently afford.
    pub fn playable_cards(&self) -> impl Iterator<Item = &ActionCard> {
        let ap = self.ap;
        self.deck.hand().iter().filter(move |card| card.cost <= ap)
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    pub fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }

    /// Display name of a side, used as the subject of log lines.
    pub fn side_label(&self, side: Side) -> &str {
        match side {
            Side::Player => "Player",
            Side::Enemy => &self.enemy_name,
        }
    }

    /// SHA-256 digest of the deterministic state, for replay checks.
    pub fn fingerprint(&self) -> [u8; 32] {
        compute_fingerprint(self)
    }
}
