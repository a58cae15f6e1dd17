//! Deterministic random number generation.
//!
//! Combat itself is deterministic; randomness only enters through deck
//! shuffles and run-level picks (enemy selection, rewards). Every roll is a
//! pure function of a seed so that an encounter replays identically.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Pick an index in `0..len`. Returns 0 for empty or single-element ranges.
    fn pick_index(&self, seed: u64, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        (self.next_u32(seed) as usize) % len
    }

    /// Shuffle a slice in place (Fisher-Yates), deriving one roll per swap.
    fn shuffle<T>(&self, seed: u64, items: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..items.len()).rev() {
            let roll_seed = compute_seed(seed, i as u64, 0, SeedContext::Shuffle as u32);
            let j = self.pick_index(roll_seed, i + 1);
            items.swap(i, j);
        }
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Distinguishes independent random streams derived from the same base seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum SeedContext {
    Shuffle = 0,
    DeckRecycle = 1,
    EnemySelection = 2,
    Reward = 3,
}

/// Compute a deterministic seed from a base seed and the roll's coordinates.
///
/// * `base_seed` - seed fixed at run or encounter start
/// * `nonce` - sequence number of the roll (shuffle count, floor, ...)
/// * `salt` - extra discriminator inside one stream
/// * `context` - which stream the roll belongs to
pub fn compute_seed(base_seed: u64, nonce: u64, salt: u32, context: u32) -> u64 {
    // SplitMix64 / FxHash style mixing
    let mut hash = base_seed;

    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (salt as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
