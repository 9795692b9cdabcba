//! Deterministic random number generation.
//!
//! RULE: Nothing in the desk may call any platform RNG.
//! All randomness flows through StreamRng instances derived
//! from the single master seed in DeskConfig.
//!
//! Each concern gets its own stream, seeded from
//! (master_seed XOR slot_index * golden-ratio constant). This means:
//!   - Drawing more analytics filler never shifts the borrower roster.
//!   - Each stream is fully reproducible in isolation.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for a single concern.
pub struct StreamRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl StreamRng {
    /// Create a stream from the master seed and a stable slot index.
    /// The index must never change once assigned.
    pub fn new(master_seed: u64, slot_index: u64) -> Self {
        let derived_seed = master_seed ^ (slot_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Roll an i64 in [low, high). `high` must exceed `low`.
    pub fn next_i64_in(&mut self, low: i64, high: i64) -> i64 {
        assert!(high > low, "empty range {low}..{high}");
        low + self.next_u64_below((high - low) as u64) as i64
    }

    /// Pick one element of a non-empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.next_u64_below(items.len() as u64) as usize]
    }
}

/// All streams for one desk, indexed by stable slot.
#[derive(Debug, Clone, Copy)]
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn for_stream(&self, slot: StreamSlot) -> StreamRng {
        StreamRng::new(self.master_seed, slot as u64).with_name(slot.name())
    }
}

/// Stable stream slot assignments.
/// NEVER reorder or remove entries, only append.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum StreamSlot {
    Borrowers = 0,
    Analytics = 1,
    Roster = 2,
}

impl StreamSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Borrowers => "borrowers",
            Self::Analytics => "analytics",
            Self::Roster => "roster",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_slot_same_stream() {
        let bank = RngBank::new(7);
        let mut a = bank.for_stream(StreamSlot::Borrowers);
        let mut b = bank.for_stream(StreamSlot::Borrowers);
        for _ in 0..32 {
            assert_eq!(a.next_u64_below(1_000_000), b.next_u64_below(1_000_000));
        }
    }

    #[test]
    fn slots_are_independent() {
        let bank = RngBank::new(7);
        let mut a = bank.for_stream(StreamSlot::Borrowers);
        let mut b = bank.for_stream(StreamSlot::Analytics);
        let draws_a: Vec<u64> = (0..8).map(|_| a.next_u64_below(u64::MAX)).collect();
        let draws_b: Vec<u64> = (0..8).map(|_| b.next_u64_below(u64::MAX)).collect();
        assert_ne!(draws_a, draws_b);
    }

    #[test]
    fn ranged_draws_stay_in_bounds() {
        let mut rng = RngBank::new(99).for_stream(StreamSlot::Roster);
        for _ in 0..1_000 {
            let v = rng.next_i64_in(-30, 30);
            assert!((-30..30).contains(&v), "{v} out of range");
            let f = rng.next_f64();
            assert!((0.0..1.0).contains(&f));
        }
    }
}
