//! Status stacks attached to the two sides of a battle.
//!
//! Every `(side, status)` pair owns at most one entry. Stacks are additive,
//! and an entry whose stacks reach zero is removed immediately, so queries
//! never observe a zero-stack status.

use arrayvec::ArrayVec;

use crate::config::{CombatConfig, StatusTuning};

/// Participant in an encounter.
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
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub const fn opponent(self) -> Self {
        match self {
            Self::Player => Self::Enemy,
            Self::Enemy => Self::Player,
        }
    }
}

/// Kinds of status effect.
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
pub enum StatusType {
    /// Lose HP equal to stacks at the start of the afflicted side's turn.
    Bleed,
    /// Attacks deal less damage.
    Weak,
    /// Attacks taken deal more damage.
    Vulnerable,
    /// Next turn is skipped.
    Stun,
}

impl StatusType {
    /// Whether the status loses stacks at the end of the afflicted side's turn.
    /// Stun is consumed by skipped turns instead.
    pub const fn decays_at_end_of_turn(self) -> bool {
        !matches!(self, Self::Stun)
    }
}

/// A stack of one status on one side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusInstance {
    pub side: Side,
    pub status: StatusType,
    pub stacks: u32,
}

/// Result of turn-start status processing. Not stored in the battle state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnStartOutcome {
    /// The side loses its action this turn.
    pub skipped: bool,
    /// HP the side loses to bleed. Ignores block.
    pub bleed_damage: u32,
    /// Log lines describing what happened, in order.
    pub lines: Vec<String>,
}

/// All active statuses in an encounter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusBook {
    entries: ArrayVec<StatusInstance, { CombatConfig::MAX_STATUS_ENTRIES }>,
}

impl StatusBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current stacks of `status` on `side`; zero when absent.
    pub fn stacks(&self, side: Side, status: StatusType) -> u32 {
        self.entries
            .iter()
            .find(|entry| entry.side == side && entry.status == status)
            .map_or(0, |entry| entry.stacks)
    }

    pub fn has(&self, side: Side, status: StatusType) -> bool {
        self.stacks(side, status) > 0
    }

    /// Adds stacks to an existing entry, or creates one. Zero stacks is a no-op.
    pub fn apply_status(&mut self, side: Side, status: StatusType, stacks: u32) {
        if stacks == 0 {
            return;
        }

        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| entry.side == side && entry.status == status)
        {
            entry.stacks = entry.stacks.saturating_add(stacks);
            return;
        }

        // Capacity covers every (side, status) pair.
        if !self.entries.is_full() {
            self.entries.push(StatusInstance {
                side,
                status,
                stacks,
            });
        }
    }

    /// Removes up to `amount` stacks and returns how many were removed.
    ///
    /// Stacks saturate at zero and the emptied entry is pruned.
    pub fn reduce(&mut self, side: Side, status: StatusType, amount: u32) -> u32 {
        let Some(position) = self
            .entries
            .iter()
            .position(|entry| entry.side == side && entry.status == status)
        else {
            return 0;
        };

        let entry = &mut self.entries[position];
        let removed = entry.stacks.min(amount);
        entry.stacks -= removed;
        if entry.stacks == 0 {
            self.entries.remove(position);
        }
        removed
    }

    /// Processes the start of `side`'s turn.
    ///
    /// Bleed is reported (the caller applies it to HP). A stunned side is
    /// marked skipped and loses `stun_per_skip` stun stacks.
    pub fn consume_turn_start(
        &mut self,
        side: Side,
        subject: &str,
        tuning: &StatusTuning,
    ) -> TurnStartOutcome {
        let mut outcome = TurnStartOutcome::default();

        let bleed = self.stacks(side, StatusType::Bleed);
        if bleed > 0 {
            outcome.bleed_damage = bleed;
            outcome
                .lines
                .push(format!("{subject} bleeds for {bleed} damage."));
        }

        if self.has(side, StatusType::Stun) {
            self.reduce(side, StatusType::Stun, tuning.stun_per_skip.max(1));
            outcome.skipped = true;
            outcome
                .lines
                .push(format!("{subject} is stunned and loses the turn."));
        }

        outcome
    }

    /// Removes `decay_per_turn` stacks of every decaying status on `side`.
    pub fn decay_end_of_turn(&mut self, side: Side, tuning: &StatusTuning) {
        for status in [StatusType::Bleed, StatusType::Weak, StatusType::Vulnerable] {
            debug_assert!(status.decays_at_end_of_turn());
            self.reduce(side, status, tuning.decay_per_turn);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusInstance> {
        self.entries.iter()
    }

    /// Entries attached to one side.
    pub fn for_side(&self, side: Side) -> impl Iterator<Item = &StatusInstance> {
        self.entries.iter().filter(move |entry| entry.side == side)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
