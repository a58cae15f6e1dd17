//! Change tracking between two battle snapshots.

use bitflags::bitflags;

use super::BattleState;

bitflags! {
    /// Tracks which fields of a [`BattleState`] changed during an operation.
    ///
    /// Each bit represents one field group. Only metadata is recorded, never
    /// the values themselves.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct BattleFields: u16 {
        const TURN          = 1 << 0;
        const PHASE         = 1 << 1;
        const PLAYER_HP     = 1 << 2;
        const PLAYER_BLOCK  = 1 << 3;
        const ENEMY_HP      = 1 << 4;
        const ENEMY_BLOCK   = 1 << 5;
        const ACTION_POINTS = 1 << 6;
        const HAND          = 1 << 7;
        const PILES         = 1 << 8;
        const INTENT        = 1 << 9;
        const STATUSES      = 1 << 10;
        const COUNTER       = 1 << 11;
        const LOG           = 1 << 12;
    }
}

impl BattleFields {
    /// Compares two snapshots field by field.
    pub fn from_states(before: &BattleState, after: &BattleState) -> Self {
        let mut fields = Self::empty();

        fields.set(Self::TURN, before.turn != after.turn);
        fields.set(Self::PHASE, before.phase != after.phase);
        fields.set(Self::PLAYER_HP, before.player.hp != after.player.hp);
        fields.set(Self::PLAYER_BLOCK, before.player.block != after.player.block);
        fields.set(Self::ENEMY_HP, before.enemy.hp != after.enemy.hp);
        fields.set(Self::ENEMY_BLOCK, before.enemy.block != after.enemy.block);
        fields.set(Self::ACTION_POINTS, before.ap != after.ap);
        fields.set(Self::HAND, before.deck.hand() != after.deck.hand());
        fields.set(
            Self::PILES,
            before.deck.draw_pile_len() != after.deck.draw_pile_len()
                || before.deck.discard_pile_len() != after.deck.discard_pile_len(),
        );
        fields.set(Self::INTENT, before.intent != after.intent);
        fields.set(Self::STATUSES, before.statuses != after.statuses);
        fields.set(Self::COUNTER, before.counter_armed != after.counter_armed);
        fields.set(Self::LOG, before.log.len() != after.log.len());

        fields
    }
}
