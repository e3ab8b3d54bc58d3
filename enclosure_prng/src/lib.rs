// Deterministic, portable pseudo-random number generator for enclosure
// generation.
//
// xoshiro256++ (Blackman & Vigna, 2019) seeded through SplitMix64. Every
// probabilistic decision the generator makes (pit depth, site choice, growth
// acceptance, cover, fences, spawns, decorations) draws from one `PitRng`
// threaded through the call, so a seed plus a terrain snapshot reproduces the
// whole excavation.
//
// The draw vocabulary mirrors what a world-generation feature needs:
// bounded integers (`next_below`), unit floats (`next_f32`), Bernoulli trials
// (`chance`), and uniform picks from a slice (`pick`).
//
// **Critical constraint: determinism.** Output must depend only on the prior
// state. No OS entropy, no stdlib hashers, no platform-dependent float paths
// in the core generator.

use serde::{Deserialize, Serialize};

/// Xoshiro256++ generator, the only source of randomness for a placement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitRng {
    s: [u64; 4],
}

impl PitRng {
    /// Seed a generator from a single `u64` via SplitMix64 expansion.
    pub fn new(seed: u64) -> Self {
        let mut sm = seed;
        Self {
            s: [
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
            ],
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        let result = (self.s[0].wrapping_add(self.s[3]))
            .rotate_left(23)
            .wrapping_add(self.s[0]);

        let t = self.s[1] << 17;

        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];

        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);

        result
    }

    /// Upper 32 bits of the next `u64`.
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Uniform `f32` in [0, 1), built from the top 24 bits.
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform integer in `[0, bound)`.
    ///
    /// Rejection sampling keeps the distribution unbiased. Panics if
    /// `bound == 0`.
    pub fn next_below(&mut self, bound: u32) -> u32 {
        assert!(bound > 0, "next_below: bound must be positive");
        let bound = bound as u64;
        if bound.is_power_of_two() {
            return (self.next_u64() & (bound - 1)) as u32;
        }
        let threshold = bound.wrapping_neg() % bound;
        loop {
            let r = self.next_u64();
            if r >= threshold {
                return (r % bound) as u32;
            }
        }
    }

    /// `true` with probability `p`.
    ///
    /// `p <= 0.0` never succeeds and `p >= 1.0` always does, since
    /// `next_f32` lies in [0, 1).
    pub fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }

    /// A uniformly chosen element, or `None` for an empty slice. Consumes no
    /// randomness when the slice is empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = self.next_below(items.len() as u32) as usize;
        items.get(index)
    }
}

fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
