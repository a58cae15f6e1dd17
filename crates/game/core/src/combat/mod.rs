//! Combat arithmetic.
//!
//! Pure functions with no access to the battle state. The engine feeds them
//! base values and status flags and writes the results back.
//!
//! - `calculate_attack_damage`: weak/vulnerable modifiers on one hit
//! - `absorb`: split a hit between block and HP
//! - `apply_damage`: HP reduction (clamped to 0)

pub mod damage;

pub use damage::{Absorption, HitModifiers, absorb, apply_damage, calculate_attack_damage};
