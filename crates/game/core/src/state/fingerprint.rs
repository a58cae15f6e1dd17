//! Deterministic digest of a battle snapshot.
//!
//! Two encounters replayed from the same seed and the same action sequence
//! must produce identical fingerprints after every step. Integers are fed to
//! the hasher as little-endian bytes and strings are length-prefixed, so the
//! digest does not depend on any serialization format.

use sha2::{Digest, Sha256};

use super::BattleState;
use crate::intent::ResolvedStep;

/// SHA-256 over the deterministic fields of a battle.
pub fn compute_fingerprint(state: &BattleState) -> [u8; 32] {
    let mut hasher = Sha256::new();

    hasher.update(state.seed.to_le_bytes());
    hasher.update(state.floor.to_le_bytes());
    hasher.update(state.turn.to_le_bytes());
    update_str(&mut hasher, state.enemy_id.as_str());
    update_str(&mut hasher, state.phase.as_ref());

    for combatant in [&state.player, &state.enemy] {
        hasher.update(combatant.hp.to_le_bytes());
        hasher.update(combatant.max_hp.to_le_bytes());
        hasher.update(combatant.block.to_le_bytes());
    }
    hasher.update(state.ap.to_le_bytes());
    hasher.update([u8::from(state.counter_armed)]);

    hasher.update((state.deck.hand().len() as u32).to_le_bytes());
    for card in state.deck.hand() {
        hasher.update(card.id.0.to_le_bytes());
        update_str(&mut hasher, card.kind.as_ref());
        hasher.update(card.cost.to_le_bytes());
    }
    hasher.update((state.deck.draw_pile_len() as u32).to_le_bytes());
    hasher.update((state.deck.discard_pile_len() as u32).to_le_bytes());
    hasher.update(state.deck.reshuffles().to_le_bytes());

    hasher.update(state.intent.turn.to_le_bytes());
    hasher.update(state.intent.x.to_le_bytes());
    update_step(&mut hasher, &state.intent.step);

    for instance in state.statuses.iter() {
        update_str(&mut hasher, instance.side.as_ref());
        update_str(&mut hasher, instance.status.as_ref());
        hasher.update(instance.stacks.to_le_bytes());
    }

    hasher.update((state.log.len() as u32).to_le_bytes());
    for entry in state.log.iter() {
        update_str(&mut hasher, entry.source.as_ref());
        hasher.update(entry.turn.to_le_bytes());
        update_str(&mut hasher, &entry.message);
    }

    hasher.finalize().into()
}

fn update_str(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u32).to_le_bytes());
    hasher.update(value.as_bytes());
}

fn update_step(hasher: &mut Sha256, step: &ResolvedStep) {
    update_str(hasher, step.kind().as_ref());
    let (a, b) = match *step {
        ResolvedStep::Attack { damage } => (damage, 0),
        ResolvedStep::Block { block } => (block, 0),
        ResolvedStep::BlockAndAttack { block, damage } => (block, damage),
        ResolvedStep::MultiHitAttack { per_hit, hits } => (per_hit, hits),
    };
    hasher.update(a.to_le_bytes());
    hasher.update(b.to_le_bytes());
}
