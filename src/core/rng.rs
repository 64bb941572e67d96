//! Deterministic random source for lesson simulation.
//!
//! The engine itself never owns randomness: every operation that shuffles,
//! rolls a chance or picks a generated card calls the randomness function
//! injected through [`EngineContext`](super::EngineContext). `GameRng` is the
//! default source behind [`EngineContext::seeded`](super::EngineContext::seeded).
//!
//! ```
//! use lesson_engine::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.next_f64(), b.next_f64());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG producing uniform `f64` values in `[0, 1)`.
///
/// Uses ChaCha8 for speed while keeping a well distributed sequence.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Next uniform value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }
}

/// Pick an index in `0..len` from a uniform value in `[0, 1)`.
///
/// Returns `None` for an empty range. Values outside `[0, 1)` are clamped so a
/// misbehaving injected source can never index out of bounds.
#[must_use]
pub fn pick_index(len: usize, roll: f64) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let scaled = (roll.clamp(0.0, 1.0) * len as f64).floor() as usize;
    Some(scaled.min(len - 1))
}
