// sampleset-data/src/samplers/mixture_weights.rs

use log::debug;
use rand::distributions::WeightedIndex;
use sampleset_core::{RandomSource, Result, SampleSetError};
use serde::{Deserialize, Serialize};

/// Mixture weights as written in a configuration.
///
/// A scalar `f` stands for the two-way split `[f, 1 - f]`, except that `1.0`
/// over a single dataset means "always that dataset". A sequence gives one
/// relative weight per dataset and need not sum to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MixtureWeights {
    Scalar(f64),
    Sequence(Vec<f64>),
}

impl MixtureWeights {
    /// Expands the configured weights for `num_datasets` datasets.
    ///
    /// # Errors
    ///
    /// Returns `SampleSetError::Configuration` if the number of weights does
    /// not match `num_datasets`.
    pub fn normalize(&self, num_datasets: usize) -> Result<Vec<f64>> {
        let weights = match self {
            MixtureWeights::Scalar(f) if *f == 1.0 && num_datasets == 1 => vec![1.0],
            MixtureWeights::Scalar(f) => vec![*f, 1.0 - *f],
            MixtureWeights::Sequence(weights) => weights.clone(),
        };
        if weights.len() != num_datasets {
            return Err(SampleSetError::config(format!(
                "got {} mixture weights {:?} for {} datasets",
                weights.len(),
                weights,
                num_datasets
            )));
        }
        Ok(weights)
    }
}

impl From<f64> for MixtureWeights {
    fn from(f: f64) -> Self {
        MixtureWeights::Scalar(f)
    }
}

impl From<Vec<f64>> for MixtureWeights {
    fn from(weights: Vec<f64>) -> Self {
        MixtureWeights::Sequence(weights)
    }
}

/// Picks a source position with probability proportional to its weight.
#[derive(Debug, Clone)]
pub struct WeightedSourceSampler {
    weights: Vec<f64>,
    distribution: WeightedIndex<f64>,
}

impl WeightedSourceSampler {
    /// Creates the sampler.
    ///
    /// # Errors
    ///
    /// Returns `SampleSetError::Configuration` if a weight is negative or not
    /// finite, or if no weight is positive.
    pub fn new(weights: Vec<f64>) -> Result<Self> {
        if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(SampleSetError::config(format!(
                "mixture weights must be finite and non-negative, got {} in {:?}",
                bad, weights
            )));
        }
        let distribution = WeightedIndex::new(&weights).map_err(|e| {
            SampleSetError::config(format!("invalid mixture weights {:?}: {}", weights, e))
        })?;
        debug!("WeightedSourceSampler: weights = {:?}", weights);
        Ok(Self {
            weights,
            distribution,
        })
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Draws a source position.
    pub fn sample(&self, rng: &RandomSource) -> usize {
        rng.sample(&self.distribution)
    }
}

#[cfg(test)]
#[path = "mixture_weights_test.rs"]
mod tests;
