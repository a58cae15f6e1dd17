//! Enemy pattern steps.
//!
//! Each step kind carries exactly the fields it needs. A magnitude of `0`
//! means "scale with floor" and is replaced by the X-value when the step is
//! resolved (see [`crate::intent::resolve_step`]).

use crate::config::CombatConfig;

/// Hit count used by multi-hit steps that do not specify one.
pub const DEFAULT_MULTI_HIT_COUNT: u32 = 2;

/// One step of an enemy's repeating behaviour loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PatternStep {
    /// Single hit.
    Attack { damage: u32, weapon: bool },

    /// Gain block.
    Block { block: u32 },

    /// Gain block, then hit. Both fields default independently.
    BlockAndAttack {
        block: u32,
        damage: u32,
        weapon: bool,
    },

    /// Several hits of the same size. `hits: None` means [`DEFAULT_MULTI_HIT_COUNT`].
    MultiHitAttack {
        per_hit: u32,
        hits: Option<u32>,
        weapon: bool,
    },
}

impl PatternStep {
    /// Floor-scaled attack (`Attack { damage: 0 }`).
    pub const fn scaled_attack() -> Self {
        Self::Attack {
            damage: 0,
            weapon: false,
        }
    }

    /// Floor-scaled block (`Block { block: 0 }`).
    pub const fn scaled_block() -> Self {
        Self::Block { block: 0 }
    }

    pub const fn kind(&self) -> PatternStepKind {
        match self {
            Self::Attack { .. } => PatternStepKind::Attack,
            Self::Block { .. } => PatternStepKind::Block,
            Self::BlockAndAttack { .. } => PatternStepKind::BlockAndAttack,
            Self::MultiHitAttack { .. } => PatternStepKind::MultiHitAttack,
        }
    }

    /// Cosmetic weapon flag; never affects damage.
    pub const fn uses_weapon(&self) -> bool {
        match self {
            Self::Attack { weapon, .. }
            | Self::BlockAndAttack { weapon, .. }
            | Self::MultiHitAttack { weapon, .. } => *weapon,
            Self::Block { .. } => false,
        }
    }
}

/// Discriminant of [`PatternStep`], used in logs and intent display.
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
pub enum PatternStepKind {
    Attack,
    Block,
    BlockAndAttack,
    MultiHitAttack,
}

/// A complete enemy pattern: exactly [`CombatConfig::PATTERN_LEN`] steps.
pub type Pattern = [PatternStep; CombatConfig::PATTERN_LEN];

/// Index into a pattern for a 1-based turn number.
///
/// Turn 1 uses step 0; the sequence repeats every `PATTERN_LEN` turns.
pub const fn step_index(turn: u32) -> usize {
    (turn.saturating_sub(1) as usize) % CombatConfig::PATTERN_LEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_index_cycles() {
        assert_eq!(step_index(1), 0);
        assert_eq!(step_index(2), 1);
        assert_eq!(step_index(3), 2);
        assert_eq!(step_index(4), 0);
        assert_eq!(step_index(301), 0);
    }

    #[test]
    fn kind_names_are_snake_case() {
        assert_eq!(PatternStepKind::MultiHitAttack.as_ref(), "multi_hit_attack");
        assert_eq!(
            "block_and_attack".parse::<PatternStepKind>(),
            Ok(PatternStepKind::BlockAndAttack)
        );
    }

    #[test]
    fn weapon_flag_is_reported() {
        let step = PatternStep::MultiHitAttack {
            per_hit: 4,
            hits: Some(2),
            weapon: true,
        };
        assert!(step.uses_weapon());
        assert!(!PatternStep::scaled_block().uses_weapon());
    }
}
