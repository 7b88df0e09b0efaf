//! Injectable randomness for the engines that need it.
//!
//! Graph generation, sort input generation and randomized pivot selection all
//! draw from a [`RandomSource`] passed in by the caller, never from global
//! state. [`Xorshift64`] is the default source: the same seed always produces
//! the same sequence on every platform, so tests can assert exact outputs.

use serde::{Deserialize, Serialize};

/// A source of uniformly distributed 64-bit values.
///
/// Only [`next_u64`](RandomSource::next_u64) is required; the derived
/// helpers map it onto floats and bounded integers.
pub trait RandomSource {
    /// Returns the next raw 64-bit value.
    fn next_u64(&mut self) -> u64;

    /// Returns a uniformly distributed f64 in [0, 1).
    ///
    /// Uses the upper 53 bits of `next_u64()` divided by 2^53 for
    /// full mantissa precision.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Returns a uniformly distributed f64 in [min, max).
    fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Returns a uniformly distributed usize in [0, max).
    ///
    /// Uses simple modulo reduction; the bias is negligible for the small
    /// bounds the engines use.
    ///
    /// # Panics
    ///
    /// Panics if `max` is 0.
    fn next_usize(&mut self, max: usize) -> usize {
        (self.next_u64() % max as u64) as usize
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u64(&mut self) -> u64 {
        (**self).next_u64()
    }
}

/// Xorshift64 deterministic PRNG. Same seed always produces the same sequence.
///
/// Uses the standard shift parameters (13, 7, 17). Seed of 0 is replaced with
/// a non-zero fallback to avoid the all-zeros fixed point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Creates a new PRNG with the given seed (0 maps to a fixed fallback).
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }
}

impl RandomSource for Xorshift64 {
    fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed list of raw values, cycling when exhausted.
    struct Scripted {
        values: Vec<u64>,
        cursor: usize,
    }

    impl RandomSource for Scripted {
        fn next_u64(&mut self) -> u64 {
            let v = self.values[self.cursor % self.values.len()];
            self.cursor += 1;
            v
        }
    }

    fn draws(seed: u64, count: usize) -> Vec<u64> {
        let mut rng = Xorshift64::new(seed);
        (0..count).map(|_| rng.next_u64()).collect()
    }

    #[test]
    fn seed_42_first_draw_is_pinned() {
        // Every seeded graph and sort input in the test suites depends on this.
        assert_eq!(draws(42, 1), vec![45_454_805_674]);
    }

    #[test]
    fn zero_seed_uses_fallback_state() {
        assert_eq!(draws(0, 8), draws(Xorshift64::FALLBACK_SEED, 8));
        assert!(draws(0, 8).iter().all(|&v| v != 0));
    }

    #[test]
    fn equal_seeds_replay_and_distinct_seeds_diverge() {
        assert_eq!(draws(1234, 500), draws(1234, 500));
        assert_ne!(draws(1234, 4), draws(1235, 4));
    }

    #[test]
    fn next_usize_covers_small_bound() {
        let mut rng = Xorshift64::new(7777);
        let mut seen = [false; 6];
        for _ in 0..1_000 {
            seen[rng.next_usize(6)] = true;
        }
        assert!(seen.iter().all(|&s| s), "some index in 0..6 never drawn");
    }

    #[test]
    fn scripted_source_drives_derived_helpers() {
        let mut src = Scripted {
            values: vec![0, 7, 25],
            cursor: 0,
        };
        assert_eq!(src.next_f64(), 0.0);
        assert_eq!(src.next_usize(5), 2);
        assert_eq!(src.next_usize(20), 5);
        assert_eq!(src.next_range(10.0, 20.0), 10.0);
    }

    #[test]
    fn mutable_reference_forwards_to_inner_source() {
        fn first(mut src: impl RandomSource) -> u64 {
            src.next_u64()
        }
        let mut rng = Xorshift64::new(42);
        assert_eq!(first(&mut rng), 45_454_805_674);
        assert_ne!(rng.next_u64(), 45_454_805_674);
    }

    #[test]
    fn state_survives_json_snapshot() {
        let mut live = Xorshift64::new(99);
        live.next_u64();
        let mut saved: Xorshift64 =
            serde_json::from_value(serde_json::to_value(&live).unwrap()).unwrap();
        let ahead: Vec<u64> = (0..20).map(|_| live.next_u64()).collect();
        let resumed: Vec<u64> = (0..20).map(|_| saved.next_u64()).collect();
        assert_eq!(ahead, resumed);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn unit_floats_stay_below_one(seed: u64) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_f64();
                    prop_assert!((0.0..1.0).contains(&v), "seed {seed} drew {v}");
                }
            }

            #[test]
            fn canvas_coordinates_stay_in_range(
                seed: u64,
                lo in 0.0_f64..100.0,
                span in 1.0_f64..500.0,
            ) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_range(lo, lo + span);
                    prop_assert!(v >= lo && v < lo + span, "seed {seed} drew {v}");
                }
            }

            #[test]
            fn bounded_indices_stay_below_bound(seed: u64, bound in 1_usize..1_000) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    prop_assert!(rng.next_usize(bound) < bound);
                }
            }
        }
    }
}
