//! Deterministic RNG for reproducible quiz runs.
//!
//! Runs are never stored in full — they are regenerated from `(unitId, seed,
//! runId)` whenever an answer is checked. That only works if every random
//! decision comes from this generator and consumes it in a fixed order, so
//! the bit-level behaviour here is part of the engine's contract.

/// xorshift32 generator. Small and sufficient for non-crypto randomness.
#[derive(Debug, Clone)]
pub struct QuizRng {
    state: u32,
}

impl QuizRng {
    /// Seed the generator. Seed `0` is remapped to a fixed nonzero constant
    /// because the all-zero state is a fixed point of xorshift.
    pub fn new(seed: u32) -> Self {
        let state = if seed == 0 { 0x6d2b_79f5 } else { seed };
        QuizRng { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform-ish index in `0..max`; panics if `max == 0`.
    ///
    /// Computed as `next_u32() % max`, which carries a small modulo bias for
    /// `max` values that don't divide 2^32. That bias is deliberate: mapping
    /// the raw stream any other way would change every sequence derived from
    /// a seed, and the pools here are tiny anyway.
    pub fn next_index(&mut self, max: usize) -> usize {
        assert!(max > 0, "next_index max must be positive, got {max}");
        self.next_u32() as usize % max
    }

    /// Non-mutating Fisher-Yates shuffle: returns a new `Vec` in shuffled
    /// order, walking `i` from the end down to `1` and swapping with
    /// `next_index(i + 1)`.
    pub fn shuffle<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut arr = items.to_vec();
        for i in (1..arr.len()).rev() {
            let j = self.next_index(i + 1);
            arr.swap(i, j);
        }
        arr
    }
}

/// FNV-1a 32-bit hash over UTF-16 code units, for deriving a seed from an
/// arbitrary string id (run ids are UUIDs, unit ids are short strings).
///
/// Processes one code unit at a time: XOR the unit, then multiply by the FNV
/// prime with 32-bit wraparound.
pub fn seed_from_string(input: &str) -> u32 {
    let mut hash: u32 = 0x811c_9dc5;
    for unit in input.encode_utf16() {
        hash ^= u32::from(unit);
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}
