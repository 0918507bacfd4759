//! Seeded random source for deterministic event resolution.
//!
//! Every engine invocation derives one `SeededRng` from a string seed
//! (optionally combined with an action counter) and draws all of its
//! randomness from that single stream. Given the same seed the stream is
//! identical on every platform, which is what makes actions replayable.

use sha2::{Digest, Sha256};

/// Deterministic random stream producing floats in `[0, 1)`.
///
/// Internally a PCG-XSH-RR generator (64-bit state, 32-bit output). PCG is
/// small, fast, and passes the usual statistical batteries, which is more
/// than enough for loot and event rolls.
#[derive(Clone, Copy, Debug)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Create a stream from an arbitrary seed string.
    ///
    /// The string is hashed with SHA-256 and the first eight bytes become
    /// the initial PCG state, so any caller-supplied seed (user ids, dates,
    /// free text) maps onto the full state space.
    pub fn new(seed: &str) -> Self {
        let digest = Sha256::digest(seed.as_bytes());
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        Self {
            state: u64::from_le_bytes(bytes),
        }
    }

    /// Create the stream for one numbered action: seeds as `"{seed}:{n}"`.
    ///
    /// Replaying the same `(seed, counter)` pair reproduces the identical
    /// event and outcome.
    pub fn for_action(seed: &str, action_counter: u64) -> Self {
        Self::new(&format!("{seed}:{action_counter}"))
    }

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

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = Self::step(self.state);
        // Divide by 2^32 so the upper bound stays exclusive.
        f64::from(Self::output(self.state)) / 4_294_967_296.0
    }

    /// Uniform index in `[0, len)`. `len` must be non-zero.
    pub fn next_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        let idx = (self.next_f64() * len as f64) as usize;
        idx.min(len - 1)
    }
}
