//! Reply selection among equally valid templates.
//!
//! Production wiring uses `RandomPicker`; tests and the `--seed`/demo paths
//! pin the choice with a seeded generator or a `FixedPicker`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Chooses an index in `0..len`.
pub trait ReplyPicker: Send {
    /// Return an index into a candidate list of length `len`.
    ///
    /// Callers never pass `len == 0`; implementations return 0 in that case.
    fn pick(&mut self, len: usize) -> usize;
}

/// Uniform random choice backed by `StdRng`.
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    /// Seed from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplyPicker for RandomPicker {
    fn pick(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.rng.random_range(0..len)
    }
}

/// Always picks the same index, clamped to the last candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPicker(pub usize);

impl ReplyPicker for FixedPicker {
    fn pick(&mut self, len: usize) -> usize {
        self.0.min(len.saturating_sub(1))
    }
}

/// Pick one element of `items` with `picker`.
pub fn choose<'a, T>(picker: &mut dyn ReplyPicker, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let index = picker.pick(items.len()).min(items.len() - 1);
    items.get(index)
}
