//! Injectable randomness for mock addresses and fabricated hashes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform picks. Implementations must return a value in `0..len`
/// for any `len > 0`.
pub trait RandomSource: Send + Sync {
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Thread-local OS-seeded generator; the production default.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Reproducible generator for tests and demos.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

/// Replays a fixed list of picks, cycling when exhausted. Each pick is reduced
/// modulo the requested length.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    picks: Vec<usize>,
    pos: usize,
}

impl ScriptedRandom {
    pub fn new(picks: impl Into<Vec<usize>>) -> Self {
        Self {
            picks: picks.into(),
            pos: 0,
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        if self.picks.is_empty() {
            return 0;
        }
        let pick = self.picks[self.pos % self.picks.len()];
        self.pos = self.pos.wrapping_add(1);
        pick % len
    }
}

pub fn choose<'a, T>(rng: &mut dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.pick_index(items.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_sources_repeat() {
        let mut a = SeededRandom::new(7);
        let mut b = SeededRandom::new(7);
        let xs: Vec<usize> = (0..16).map(|_| a.pick_index(32)).collect();
        let ys: Vec<usize> = (0..16).map(|_| b.pick_index(32)).collect();
        assert_eq!(xs, ys);
        assert!(xs.iter().all(|x| *x < 32));
    }

    #[test]
    fn scripted_source_cycles_and_wraps() {
        let mut rng = ScriptedRandom::new(vec![1, 5]);
        assert_eq!(rng.pick_index(3), 1);
        assert_eq!(rng.pick_index(3), 2);
        assert_eq!(rng.pick_index(3), 1);
    }

    #[test]
    fn choose_handles_empty_slices() {
        let mut rng = ThreadRandom;
        let empty: [u8; 0] = [];
        assert!(choose(&mut rng, &empty).is_none());
        assert_eq!(choose(&mut rng, &[42]), Some(&42));
    }
}
