use std::hash::BuildHasher as _;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::foundation::math::Fnv1a64;

/// Source of uniform random numbers consumed by randomized designs.
///
/// Production renders use [`SplitMix64::from_entropy`]; tests pass a seeded generator (or a
/// scripted implementation) to make randomized output reproducible.
pub trait RandomSource {
    /// Next sample, uniform in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize {
        let i = (self.next_f64() * len as f64) as usize;
        i.min(len.saturating_sub(1))
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Small, fast, seedable PRNG (SplitMix64).
#[derive(Clone, Debug)]
pub struct SplitMix64 {
    state: u64,
}

static ENTROPY_COUNTER: AtomicU64 = AtomicU64::new(0);

impl SplitMix64 {
    /// Seeded generator; equal seeds yield equal sequences.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Generator seeded from wall-clock time, process id and the std hasher's random keys.
    pub fn from_entropy() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let keyed = std::collections::hash_map::RandomState::new()
            .hash_one(ENTROPY_COUNTER.fetch_add(1, Ordering::Relaxed));

        let mut h = Fnv1a64::new_default();
        h.write_bytes(&nanos.to_le_bytes());
        h.write_u64(u64::from(std::process::id()));
        h.write_u64(keyed);
        Self::new(h.finish())
    }

    /// Next raw 64-bit output.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

impl RandomSource for SplitMix64 {
    fn next_f64(&mut self) -> f64 {
        // 53 high bits -> [0, 1)
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/rng.rs"]
mod tests;
