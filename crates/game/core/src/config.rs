use crate::card::CardKind;

/// Combat configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Player hit points at the start of a run.
    pub player_max_hp: u32,
    /// Action points restored at the start of every player turn.
    pub ap_per_turn: u32,
    /// Cards dealt at the start of every player turn (clamped to `MAX_HAND`).
    pub hand_size: usize,
    /// Extra enemy HP granted per floor on top of the definition's base HP.
    pub enemy_hp_per_floor: u32,
    /// Card kinds the player owns when an encounter starts.
    pub starter_deck: Vec<CardKind>,
    pub cards: CardTuning,
    pub statuses: StatusTuning,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Number of steps in every enemy pattern.
    pub const PATTERN_LEN: usize = 3;
    pub const MAX_HAND: usize = 10;
    /// One entry per (side, status type) pair.
    pub const MAX_STATUS_ENTRIES: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_PLAYER_MAX_HP: u32 = 60;
    pub const DEFAULT_AP_PER_TURN: u32 = 3;
    pub const DEFAULT_HAND_SIZE: usize = 5;
    pub const DEFAULT_ENEMY_HP_PER_FLOOR: u32 = 4;

    pub fn new() -> Self {
        Self {
            player_max_hp: Self::DEFAULT_PLAYER_MAX_HP,
            ap_per_turn: Self::DEFAULT_AP_PER_TURN,
            hand_size: Self::DEFAULT_HAND_SIZE,
            enemy_hp_per_floor: Self::DEFAULT_ENEMY_HP_PER_FLOOR,
            starter_deck: Self::default_starter_deck(),
            cards: CardTuning::default(),
            statuses: StatusTuning::default(),
        }
    }

    /// Hand size actually dealt, never above the hand capacity.
    pub fn effective_hand_size(&self) -> usize {
        self.hand_size.min(Self::MAX_HAND)
    }

    fn default_starter_deck() -> Vec<CardKind> {
        let mut deck = Vec::with_capacity(13);
        deck.extend(core::iter::repeat_n(CardKind::StrongAttack, 4));
        deck.extend(core::iter::repeat_n(CardKind::DoubleAttack, 3));
        deck.extend(core::iter::repeat_n(CardKind::Defend, 4));
        deck.extend(core::iter::repeat_n(CardKind::Counter, 2));
        deck
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Numeric effects of each card kind.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CardTuning {
    pub strong_attack_cost: u32,
    pub strong_attack_damage: u32,
    pub strong_attack_vulnerable: u32,
    /// Stun applied when the target was already vulnerable before the hit.
    pub strong_attack_stun: u32,

    pub double_attack_cost: u32,
    pub double_attack_hit: u32,
    pub double_attack_hits: u32,
    pub double_attack_bleed: u32,

    pub defend_cost: u32,
    pub defend_block: u32,

    pub counter_cost: u32,
    pub counter_block: u32,
    /// Damage dealt back for every enemy attack hit while the counter is armed.
    pub counter_retaliation: u32,
    pub counter_weak: u32,
}

impl CardTuning {
    /// Action point cost of a card kind.
    pub fn cost(&self, kind: CardKind) -> u32 {
        match kind {
            CardKind::StrongAttack => self.strong_attack_cost,
            CardKind::DoubleAttack => self.double_attack_cost,
            CardKind::Defend => self.defend_cost,
            CardKind::Counter => self.counter_cost,
        }
    }
}

impl Default for CardTuning {
    fn default() -> Self {
        Self {
            strong_attack_cost: 2,
            strong_attack_damage: 10,
            strong_attack_vulnerable: 2,
            strong_attack_stun: 1,
            double_attack_cost: 1,
            double_attack_hit: 4,
            double_attack_hits: 2,
            double_attack_bleed: 2,
            defend_cost: 1,
            defend_block: 6,
            counter_cost: 1,
            counter_block: 3,
            counter_retaliation: 3,
            counter_weak: 2,
        }
    }
}

/// Modifier and decay rules for status effects.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatusTuning {
    /// Percentage removed from attack damage dealt by a weakened side.
    pub weak_percent: u32,
    /// Percentage added to attack damage taken by a vulnerable side.
    pub vulnerable_percent: u32,
    /// Stacks of bleed/weak/vulnerable removed at the end of the afflicted side's turn.
    pub decay_per_turn: u32,
    /// Stun stacks consumed by each skipped turn.
    pub stun_per_skip: u32,
}

impl Default for StatusTuning {
    fn default() -> Self {
        Self {
            weak_percent: 25,
            vulnerable_percent: 50,
            decay_per_turn: 1,
            stun_per_skip: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_deck_has_thirteen_cards() {
        let config = CombatConfig::default();
        assert_eq!(config.starter_deck.len(), 13);
        assert_eq!(
            config
                .starter_deck
                .iter()
                .filter(|k| **k == CardKind::Counter)
                .count(),
            2
        );
    }

    #[test]
    fn hand_size_is_clamped() {
        let config = CombatConfig {
            hand_size: 50,
            ..CombatConfig::default()
        };
        assert_eq!(config.effective_hand_size(), CombatConfig::MAX_HAND);
    }
}
