//! Standard-normal position sampling for lazy seeding.

use ndarray::Array1;
use rand::prelude::*;
use rand_distr::StandardNormal;

/// Source of standard-normal vectors.
///
/// The engine only calls this when seeding an empty graph, so a test double
/// returning a fixed sequence makes every run reproducible.
pub trait GaussianSampler {
    /// Draw a vector of `dim` independent `N(0, 1)` values.
    fn sample_gaussian(&mut self, dim: usize) -> Array1<f64>;
}

/// Standard-normal sampler backed by a [`StdRng`].
#[derive(Debug, Clone)]
pub struct StdNormalSampler {
    rng: StdRng,
}

impl StdNormalSampler {
    /// Sampler seeded from the thread-local generator.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Sampler with a fixed seed for reproducibility.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for StdNormalSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl GaussianSampler for StdNormalSampler {
    fn sample_gaussian(&mut self, dim: usize) -> Array1<f64> {
        Array1::from_iter((0..dim).map(|_| self.rng.sample::<f64, _>(StandardNormal)))
    }
}

/// Sampler replaying a fixed sequence of values, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct SequenceSampler {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceSampler {
    /// Replay `values` in order. An empty sequence yields zeros.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl GaussianSampler for SequenceSampler {
    fn sample_gaussian(&mut self, dim: usize) -> Array1<f64> {
        if self.values.is_empty() {
            return Array1::zeros(dim);
        }
        Array1::from_iter((0..dim).map(|_| {
            let v = self.values[self.cursor % self.values.len()];
            self.cursor += 1;
            v
        }))
    }
}
