//! Damage calculation and application.

use crate::config::StatusTuning;

// ============================================================================
// Damage Calculation
// ============================================================================

/// Modifiers active on one hit. Only presence matters, not stack count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HitModifiers {
    /// The attacker is weakened.
    pub attacker_weak: bool,
    /// The defender is vulnerable.
    pub defender_vulnerable: bool,
}

/// Calculate the damage of one attack hit before block.
///
/// # Formula
///
/// ```text
/// damage = base
/// if attacker weak:       damage = damage * (100 - weak_percent) / 100
/// if defender vulnerable: damage = damage * (100 + vulnerable_percent) / 100
/// ```
///
/// Both steps round down. Weak is applied first.
pub fn calculate_attack_damage(base: u32, modifiers: HitModifiers, tuning: &StatusTuning) -> u32 {
    let mut damage = u64::from(base);

    if modifiers.attacker_weak {
        let keep = 100u64.saturating_sub(u64::from(tuning.weak_percent));
        damage = damage * keep / 100;
    }

    if modifiers.defender_vulnerable {
        damage = damage * (100 + u64::from(tuning.vulnerable_percent)) / 100;
    }

    u32::try_from(damage).unwrap_or(u32::MAX)
}

// ============================================================================
// Damage Application
// ============================================================================

/// Split of one hit between block and HP.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Absorption {
    /// Damage stopped by block.
    pub blocked: u32,
    /// Damage that reaches HP.
    pub hp_loss: u32,
    /// Block left after the hit.
    pub remaining_block: u32,
}

/// Run `damage` through `block`.
pub fn absorb(block: u32, damage: u32) -> Absorption {
    let blocked = block.min(damage);
    Absorption {
        blocked,
        hp_loss: damage - blocked,
        remaining_block: block - blocked,
    }
}

/// Apply damage to current HP.
///
/// # Returns
///
/// New HP value (clamped to 0)
pub fn apply_damage(current_hp: u32, damage: u32) -> u32 {
    current_hp.saturating_sub(damage)
}
