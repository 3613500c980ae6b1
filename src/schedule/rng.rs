//! Stable string hash and a seeded Mulberry32 stream.
//!
//! The hash runs over UTF-16 code units so seeds and palette picks agree with
//! the browser client that renders the same week.

/// `h = h * 31 + unit`, wrapping at 32 bits.
pub fn stable_hash(text: &str) -> u32 {
    text.encode_utf16()
        .fold(0u32, |acc, unit| acc.wrapping_mul(31).wrapping_add(u32::from(unit)))
}

/// Hash-derived position in a list of `len` variants. 0 for an empty list.
pub fn pick_index(key: &str, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    stable_hash(key) as usize % len
}

/// Reproducible stream of floats in `[0, 1)`. Two generators built from the
/// same seed yield identical sequences.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// `floor(next_f64() * len)`; consumes one draw even when `len == 0`.
    pub fn next_index(&mut self, len: usize) -> usize {
        let r = self.next_f64();
        if len == 0 {
            return 0;
        }
        ((r * len as f64) as usize).min(len - 1)
    }
}
