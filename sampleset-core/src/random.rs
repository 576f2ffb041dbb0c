use log::warn;
use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::fmt;
use std::sync::{Mutex, MutexGuard};

/// An injectable source of randomness for wrappers that draw at access time.
///
/// Wrappers own their `RandomSource` exclusively. The generator sits behind a
/// `Mutex` so draws can happen through `&self` accessors.
///
/// # Example
///
/// ```rust
/// use sampleset_core::RandomSource;
///
/// let a = RandomSource::seeded(7);
/// let b = RandomSource::seeded(7);
/// assert_eq!(a.gen_index(100), b.gen_index(100));
/// ```
pub struct RandomSource {
    rng: Mutex<Box<dyn RngCore + Send>>,
    seed: Option<u64>,
}

impl RandomSource {
    /// Creates a source seeded from the operating system (ambient randomness).
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(Box::new(StdRng::from_entropy())),
            seed: None,
        }
    }

    /// Creates a deterministic source: the same seed yields the same draws.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(Box::new(StdRng::seed_from_u64(seed))),
            seed: Some(seed),
        }
    }

    /// Seeded when `seed` is set, ambient otherwise.
    pub fn from_seed_opt(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// Wraps an arbitrary generator, e.g. `rand::rngs::mock::StepRng` in tests.
    pub fn from_rng<R: RngCore + Send + 'static>(rng: R) -> Self {
        Self {
            rng: Mutex::new(Box::new(rng)),
            seed: None,
        }
    }

    /// The seed this source was created with, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Draws a uniform index in `[0, upper)`.
    ///
    /// # Panics
    /// Panics if `upper` is zero; callers validate non-empty ranges up front.
    pub fn gen_index(&self, upper: usize) -> usize {
        self.lock().gen_range(0..upper)
    }

    /// Draws one value from `distribution`.
    pub fn sample<T, D: Distribution<T>>(&self, distribution: &D) -> T {
        let mut rng = self.lock();
        distribution.sample(&mut *rng)
    }

    fn lock(&self) -> MutexGuard<'_, Box<dyn RngCore + Send>> {
        self.rng.lock().unwrap_or_else(|poisoned| {
            warn!("RandomSource: generator lock was poisoned. Recovering.");
            poisoned.into_inner()
        })
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl fmt::Debug for RandomSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomSource")
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "random_test.rs"]
mod tests;
