//! Pattern resolution and intent telegraphing.
//!
//! An intent is computed before the player acts and stored in the battle
//! state. The enemy executes exactly the stored values at the end of the
//! turn; nothing is re-resolved in between.

use crate::catalog::{DEFAULT_MULTI_HIT_COUNT, EnemyDefinition, PatternStep, PatternStepKind};
use crate::scaling::resolve_x;

/// A pattern step with every magnitude made concrete.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResolvedStep {
    Attack { damage: u32 },
    Block { block: u32 },
    BlockAndAttack { block: u32, damage: u32 },
    MultiHitAttack { per_hit: u32, hits: u32 },
}

impl ResolvedStep {
    pub const fn kind(&self) -> PatternStepKind {
        match self {
            Self::Attack { .. } => PatternStepKind::Attack,
            Self::Block { .. } => PatternStepKind::Block,
            Self::BlockAndAttack { .. } => PatternStepKind::BlockAndAttack,
            Self::MultiHitAttack { .. } => PatternStepKind::MultiHitAttack,
        }
    }

    /// Block gained by the enemy when the step executes.
    pub const fn block(&self) -> u32 {
        match self {
            Self::Block { block } | Self::BlockAndAttack { block, .. } => *block,
            Self::Attack { .. } | Self::MultiHitAttack { .. } => 0,
        }
    }

    /// Raw damage of each hit, in order, before modifiers.
    pub fn hits(&self) -> impl Iterator<Item = u32> {
        let (per_hit, count) = match *self {
            Self::Attack { damage } | Self::BlockAndAttack { damage, .. } => (damage, 1),
            Self::MultiHitAttack { per_hit, hits } => (per_hit, hits),
            Self::Block { .. } => (0, 0),
        };
        core::iter::repeat_n(per_hit, count as usize)
    }

    /// Total raw damage across all hits.
    pub fn total_damage(&self) -> u32 {
        self.hits().fold(0u32, |acc, hit| acc.saturating_add(hit))
    }

    pub const fn is_attack(&self) -> bool {
        !matches!(self, Self::Block { .. })
    }
}

impl core::fmt::Display for ResolvedStep {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Attack { damage } => write!(f, "attack({damage})"),
            Self::Block { block } => write!(f, "block({block})"),
            Self::BlockAndAttack { block, damage } => {
                write!(f, "block_and_attack(block={block}, attack={damage})")
            }
            Self::MultiHitAttack { per_hit, hits } => {
                write!(f, "multi_hit_attack({per_hit}x{hits})")
            }
        }
    }
}

/// Replace zero magnitudes with `x`. Each field defaults on its own.
pub fn resolve_step(step: &PatternStep, x: u32) -> ResolvedStep {
    let or_x = |value: u32| if value == 0 { x } else { value };
    match *step {
        PatternStep::Attack { damage, .. } => ResolvedStep::Attack {
            damage: or_x(damage),
        },
        PatternStep::Block { block } => ResolvedStep::Block {
            block: or_x(block),
        },
        PatternStep::BlockAndAttack { block, damage, .. } => ResolvedStep::BlockAndAttack {
            block: or_x(block),
            damage: or_x(damage),
        },
        PatternStep::MultiHitAttack { per_hit, hits, .. } => ResolvedStep::MultiHitAttack {
            per_hit: or_x(per_hit),
            hits: match hits {
                Some(0) | None => DEFAULT_MULTI_HIT_COUNT,
                Some(hits) => hits,
            },
        },
    }
}

/// The enemy's telegraphed action for one turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Intent {
    /// 1-based turn the intent belongs to.
    pub turn: u32,
    /// X-value the step was resolved with.
    pub x: u32,
    pub step: ResolvedStep,
    /// Cosmetic weapon flag copied from the pattern step.
    pub weapon: bool,
}

/// Resolve the intent of `enemy` for `turn` on `floor`.
///
/// The X-value is computed exactly once here.
pub fn telegraph(enemy: &EnemyDefinition, turn: u32, floor: u32) -> Intent {
    let x = resolve_x(floor);
    let pattern_step = enemy.step_for_turn(turn);
    Intent {
        turn,
        x,
        step: resolve_step(pattern_step, x),
        weapon: pattern_step.uses_weapon(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EnemyCatalog;

    #[test]
    fn zero_magnitude_takes_x() {
        assert_eq!(
            resolve_step(&PatternStep::scaled_attack(), 9),
            ResolvedStep::Attack { damage: 9 }
        );
        assert_eq!(
            resolve_step(&PatternStep::Attack { damage: 3, weapon: false }, 9),
            ResolvedStep::Attack { damage: 3 }
        );
    }

    #[test]
    fn block_and_attack_fields_default_independently() {
        let step = PatternStep::BlockAndAttack {
            block: 5,
            damage: 0,
            weapon: false,
        };
        assert_eq!(
            resolve_step(&step, 7),
            ResolvedStep::BlockAndAttack { block: 5, damage: 7 }
        );

        let step = PatternStep::BlockAndAttack {
            block: 0,
            damage: 2,
            weapon: false,
        };
        assert_eq!(
            resolve_step(&step, 7),
            ResolvedStep::BlockAndAttack { block: 7, damage: 2 }
        );
    }

    #[test]
    fn multi_hit_defaults_hit_count_to_two() {
        let step = PatternStep::MultiHitAttack {
            per_hit: 0,
            hits: None,
            weapon: false,
        };
        let resolved = resolve_step(&step, 6);
        assert_eq!(resolved, ResolvedStep::MultiHitAttack { per_hit: 6, hits: 2 });
        assert_eq!(resolved.total_damage(), 12);
        assert_eq!(resolved.hits().collect::<Vec<_>>(), vec![6, 6]);
    }

    #[test]
    fn punisher_cycle_on_floor_one() {
        let catalog = EnemyCatalog::canonical();
        let punisher = catalog.lookup("punisher_v1").unwrap();
        let steps: Vec<_> = (1..=4).map(|turn| telegraph(punisher, turn, 1).step).collect();
        assert_eq!(
            steps,
            vec![
                ResolvedStep::Attack { damage: 6 },
                ResolvedStep::Attack { damage: 6 },
                ResolvedStep::Block { block: 6 },
                ResolvedStep::Attack { damage: 6 },
            ]
        );
    }

    #[test]
    fn punisher_scales_on_floor_ten() {
        let catalog = EnemyCatalog::canonical();
        let punisher = catalog.lookup("punisher_v1").unwrap();
        let intent = telegraph(punisher, 1, 10);
        assert_eq!(intent.x, 11);
        assert_eq!(intent.step, ResolvedStep::Attack { damage: 11 });
    }

    #[test]
    fn feiyancha_double_hit_is_fixed() {
        let catalog = EnemyCatalog::canonical();
        let feiyancha = catalog.lookup("feiyancha_v1").unwrap();
        for floor in [0, 1, 10, 99] {
            for turn in [1, 2] {
                let intent = telegraph(feiyancha, turn, floor);
                assert_eq!(intent.step, ResolvedStep::MultiHitAttack { per_hit: 4, hits: 2 });
                assert_eq!(intent.step.total_damage(), 8);
                assert!(intent.weapon);
            }
        }
    }

    #[test]
    fn intent_repeats_every_three_turns() {
        let catalog = EnemyCatalog::canonical();
        for enemy in catalog.iter() {
            for floor in [0, 3, 17] {
                for turn in 1..20 {
                    assert_eq!(
                        telegraph(enemy, turn, floor).step,
                        telegraph(enemy, turn + 3, floor).step,
                        "{} turn {turn} floor {floor}",
                        enemy.id
                    );
                }
            }
        }
    }
}
