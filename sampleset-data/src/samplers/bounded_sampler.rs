// sampleset-data/src/samplers/bounded_sampler.rs

use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;
use sampleset_core::{Result, SampleSetError};

use crate::config::LimitedConfig;

/// Selects a seeded, size-bounded subset of dataset indices.
///
/// Without `max_items` every index is kept in order. Otherwise `max_items`
/// distinct indices are drawn with a `StdRng` seeded from `seed`, and either
/// exposed once or tiled up to the target count.
#[derive(Debug, Clone)]
pub struct BoundedSampler {
    config: LimitedConfig,
}

impl BoundedSampler {
    pub fn new(config: LimitedConfig) -> Self {
        BoundedSampler { config }
    }

    pub fn config(&self) -> &LimitedConfig {
        &self.config
    }

    /// Number of indices the tiled selection spans for a dataset of
    /// `dataset_len` samples: `floor(dataset_len * target_size)`, or
    /// `dataset_len` without a target size.
    ///
    /// # Errors
    ///
    /// Returns `SampleSetError::Configuration` for a negative or non-finite
    /// `target_size`.
    pub fn target_count(&self, dataset_len: usize) -> Result<usize> {
        match self.config.target_size {
            None => Ok(dataset_len),
            Some(target_size) if target_size.is_finite() && target_size >= 0.0 => {
                Ok((dataset_len as f64 * target_size).floor() as usize)
            }
            Some(target_size) => Err(SampleSetError::config(format!(
                "target_size must be a finite, non-negative fraction, got {}",
                target_size
            ))),
        }
    }

    /// Computes the index sequence for a dataset of `dataset_len` samples.
    ///
    /// # Errors
    ///
    /// Returns `SampleSetError::Configuration` if `max_items` exceeds the
    /// target count or the dataset size, if `keep_original_size` is off while
    /// a `target_size` is set, or if an empty draw would have to be tiled.
    pub fn indices(&self, dataset_len: usize) -> Result<Vec<usize>> {
        let max_items = match self.config.max_items {
            None => return Ok((0..dataset_len).collect()),
            Some(max_items) => max_items,
        };

        let target_count = self.target_count(dataset_len)?;
        if max_items > target_count {
            return Err(SampleSetError::config(format!(
                "max_items {} is larger than the number of samples {} in the dataset",
                max_items, target_count
            )));
        }
        if max_items > dataset_len {
            return Err(SampleSetError::config(format!(
                "cannot draw {} distinct indices from a dataset of {} samples",
                max_items, dataset_len
            )));
        }
        if !self.config.keep_original_size && self.config.target_size.is_some() {
            return Err(SampleSetError::config(
                "target_size requires keep_original_size to be enabled",
            ));
        }

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let drawn = index::sample(&mut rng, dataset_len, max_items).into_vec();
        debug!("BoundedSampler: selected indices: {:?}", drawn);

        if !self.config.keep_original_size {
            return Ok(drawn);
        }
        if drawn.is_empty() && target_count > 0 {
            return Err(SampleSetError::config(format!(
                "cannot repeat an empty selection up to {} samples",
                target_count
            )));
        }
        let repeated: Vec<usize> = drawn.iter().copied().cycle().take(target_count).collect();
        info!(
            "BoundedSampler: {} drawn indices repeated to {} samples",
            drawn.len(),
            repeated.len()
        );
        Ok(repeated)
    }
}

#[cfg(test)]
#[path = "bounded_sampler_test.rs"]
mod tests;
