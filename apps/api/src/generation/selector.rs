//! Template selection seam.
//!
//! Template and phrase tables are sampled through a `TemplateSelector` so the
//! sampling policy is injectable: randomized in production, seeded for
//! reproducible batches, first-index for deterministic tests.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks an index into a candidate list of `len` entries.
///
/// Implementations must return a value in `0..len` for `len >= 1`; callers
/// never pass `len == 0`.
pub trait TemplateSelector: Send + Sync {
    fn pick(&self, len: usize) -> usize;
}

/// Production selector backed by the thread-local rng.
pub struct ThreadRngSelector;

impl TemplateSelector for ThreadRngSelector {
    fn pick(&self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        rand::rng().random_range(0..len)
    }
}

/// Seeded selector: same seed, same batch output.
pub struct SeededSelector {
    rng: Mutex<StdRng>,
}

impl SeededSelector {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl TemplateSelector for SeededSelector {
    fn pick(&self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.random_range(0..len)
    }
}

/// Always picks the first candidate. Deterministic first-fit sampling.
pub struct FirstSelector;

impl TemplateSelector for FirstSelector {
    fn pick(&self, _len: usize) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_selector_always_picks_zero() {
        let selector = FirstSelector;
        assert_eq!(selector.pick(1), 0);
        assert_eq!(selector.pick(5), 0);
    }

    #[test]
    fn test_seeded_selector_is_reproducible() {
        let a = SeededSelector::new(42);
        let b = SeededSelector::new(42);
        let picks_a: Vec<usize> = (0..16).map(|_| a.pick(7)).collect();
        let picks_b: Vec<usize> = (0..16).map(|_| b.pick(7)).collect();
        assert_eq!(picks_a, picks_b);
    }

    #[test]
    fn test_picks_stay_in_range() {
        let selector = ThreadRngSelector;
        for _ in 0..64 {
            assert!(selector.pick(3) < 3);
        }
        assert_eq!(selector.pick(1), 0);
    }
}
