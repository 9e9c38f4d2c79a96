//! Injected randomness
//!
//! Every stage that makes a random choice draws from a [`RandomSource`]
//! passed in by the caller. Any `rand::Rng` is a source, so a seeded
//! `StdRng` reproduces an envelope byte for byte.

use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform draws used by the engine
pub trait RandomSource {
    /// Uniform draw in `[0, 1)`
    fn next_unit(&mut self) -> f64;

    /// True with the given probability
    fn chance(&mut self, probability: f64) -> bool {
        if probability <= 0.0 {
            return false;
        }
        self.next_unit() < probability
    }

    /// Uniform index into a collection of `len` items. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "pick_index on empty collection");
        let idx = (self.next_unit() * len as f64) as usize;
        idx.min(len.saturating_sub(1))
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Pick one element uniformly, `None` when empty
pub fn pick<'a, T, S>(source: &mut S, items: &'a [T]) -> Option<&'a T>
where
    S: RandomSource + ?Sized,
{
    if items.is_empty() {
        None
    } else {
        items.get(source.pick_index(items.len()))
    }
}

/// Entropy-seeded generator for callers that do not supply one
pub fn system_source() -> StdRng {
    StdRng::from_entropy()
}

/// Generator shared between threads.
///
/// Clones draw from the same underlying stream; each draw takes the lock.
#[derive(Debug, Clone)]
pub struct SharedSource {
    inner: Arc<Mutex<StdRng>>,
}

impl SharedSource {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            inner: Arc::new(Mutex::new(StdRng::from_entropy())),
        }
    }
}

impl RandomSource for SharedSource {
    fn next_unit(&mut self) -> f64 {
        self.inner.lock().gen::<f64>()
    }
}

/// Always returns the same draw. `FixedSource(0.0)` takes every chance,
/// `FixedSource(0.999)` declines every chance below that value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSource(pub f64);

impl RandomSource for FixedSource {
    fn next_unit(&mut self) -> f64 {
        self.0.clamp(0.0, 0.999_999)
    }
}
