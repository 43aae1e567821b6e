//! Random sources for level generation
//!
//! The generator only ever needs "a uniform float in [0, 1)", so that is the
//! whole interface. Games default to a PCG stream seeded from the thread RNG;
//! tests feed fixed sequences.

use rand::rngs::ThreadRng;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniform floats in `[0, 1)`
pub trait RandomSource {
    fn next_uniform(&mut self) -> f32;

    /// Roll a percent chance: true when `percent > u * 100`
    fn chance(&mut self, percent: f32) -> bool {
        percent > self.next_uniform() * 100.0
    }
}

impl RandomSource for Pcg32 {
    fn next_uniform(&mut self) -> f32 {
        self.random::<f32>()
    }
}

impl RandomSource for ThreadRng {
    fn next_uniform(&mut self) -> f32 {
        self.random::<f32>()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_uniform(&mut self) -> f32 {
        (**self).next_uniform()
    }
}

/// Build the default seeded source
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Fresh seed from the thread RNG
pub fn random_seed() -> u64 {
    rand::rng().random()
}

/// Replays a fixed list of values, cycling when exhausted
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceSource {
    pub fn new(values: Vec<f32>) -> Self {
        Self {
            values,
            cursor: 0,
        }
    }

    /// Number of values consumed so far
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceSource {
    fn next_uniform(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_cycles() {
        let mut source = SequenceSource::new(vec![0.1, 0.9]);
        assert_eq!(source.next_uniform(), 0.1);
        assert_eq!(source.next_uniform(), 0.9);
        assert_eq!(source.next_uniform(), 0.1);
        assert_eq!(source.consumed(), 3);
    }

    #[test]
    fn test_empty_sequence_yields_zero() {
        let mut source = SequenceSource::new(Vec::new());
        assert_eq!(source.next_uniform(), 0.0);
    }

    #[test]
    fn test_chance_threshold() {
        // 0.19 * 100 = 19 < 20
        assert!(SequenceSource::new(vec![0.19]).chance(20.0));
        assert!(!SequenceSource::new(vec![0.2]).chance(20.0));
        assert!(!SequenceSource::new(vec![0.0]).chance(0.0));
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = seeded(42);
        let mut b = seeded(42);
        for _ in 0..16 {
            let (x, y) = (a.next_uniform(), b.next_uniform());
            assert_eq!(x, y);
            assert!((0.0..1.0).contains(&x));
        }
    }
}
