//! Random number sources

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Uniform integer source used by loot generation
pub trait RandomSource: Send + Sync {
    /// Uniform integer in `[min, max]`, inclusive. Returns `min` when `max < min`.
    fn gen_range(&self, min: i32, max: i32) -> i32;

    /// Uniform index in `[0, len)`. Returns 0 for an empty or single range.
    fn gen_index(&self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        let upper = i32::try_from(len - 1).unwrap_or(i32::MAX);
        self.gen_range(0, upper).max(0) as usize
    }
}

/// Thread-local OS-seeded generator
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        rand::thread_rng().gen_range(min..=max)
    }
}

/// Reproducible generator
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.rng.lock().gen_range(min..=max)
    }
}

/// Always returns the same value, clamped into the requested range
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub i32);

impl RandomSource for FixedRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        self.0.clamp(min, max.max(min))
    }
}

/// Replays scripted values in order, each clamped into the requested range
///
/// Once the script runs out every call returns `min`.
#[derive(Debug, Default)]
pub struct SequenceRandom {
    values: Mutex<VecDeque<i32>>,
}

impl SequenceRandom {
    pub fn new(values: impl IntoIterator<Item = i32>) -> Self {
        Self {
            values: Mutex::new(values.into_iter().collect()),
        }
    }

    /// Number of unused values
    pub fn remaining(&self) -> usize {
        self.values.lock().len()
    }
}

impl RandomSource for SequenceRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        match self.values.lock().pop_front() {
            Some(value) => value.clamp(min, max.max(min)),
            None => min,
        }
    }
}
