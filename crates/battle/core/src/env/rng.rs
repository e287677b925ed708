//! Deterministic random number source.
//!
//! Every roll in the engine (accuracy, variance, criticals, AI target picks,
//! drop tables) goes through [`RngOracle`] with an explicit seed derived from
//! `(combat_seed, nonce, actor, context)`. A fixed seed plus a fixed action
//! sequence therefore replays an identical battle, which is what the
//! determinism tests and any replay tooling rely on.

/// Stateless random oracle.
///
/// Implementations must be pure: the same seed always produces the same
/// value. State lives in the seed derivation, never in the oracle.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a d100 (1-100 inclusive), for percentage mechanics like hit rate.
    fn roll_d100(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 100) + 1
    }

    /// Roll a per-mille value (0-999 inclusive), for drop tables and flee.
    fn roll_per_mille(&self, seed: u64) -> u32 {
        self.next_u32(seed) % 1000
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = max - min + 1;
        min + (self.next_u32(seed) % span)
    }

    /// Roll a variance multiplier from the symmetric band around 1.0x.
    ///
    /// `band_per_mille` is the declared half-width (100 = +/-10%). A zero
    /// band always answers exactly 1000.
    fn variance_roll(&self, seed: u64, band_per_mille: u32) -> u32 {
        if band_per_mille == 0 {
            return 1000;
        }
        self.range(seed, 1000 - band_per_mille.min(999), 1000 + band_per_mille)
    }
}

/// PCG random number generator (PCG-XSH-RR variant).
///
/// Small state, fast, and statistically solid. The oracle is stateless: each
/// call steps the LCG once from the supplied seed and permutes the result.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    /// Advance the LCG state by one step.
    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation: xorshift high bits, then random rotate.
    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Compute a deterministic seed for one random event.
///
/// # Arguments
///
/// * `combat_seed` - Base seed fixed at combat start
/// * `nonce` - Action sequence number (increments per executed action)
/// * `actor` - Combatant the event belongs to
/// * `context` - Distinguishes multiple rolls within the same action
///   (hit check, variance, critical, status chance, ...)
pub fn compute_seed(combat_seed: u64, nonce: u64, actor: u32, context: u32) -> u64 {
    // SplitMix64/FxHash-style mix combiners with a final avalanche.
    let mut hash = combat_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
