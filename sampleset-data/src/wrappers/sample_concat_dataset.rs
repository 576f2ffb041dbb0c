use log::info;
use sampleset_core::{DataInfo, MetaInfo, RandomSource, Result, SampleSetError};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::build::{DatasetFactory, DatasetSource};
use crate::config::SampleConcatConfig;
use crate::datasets::{BoxedDataset, ConcatDataset, Dataset};
use crate::samplers::WeightedSourceSampler;

/// A weighted mixture over several datasets with a fixed logical length `n`.
///
/// Every access first picks a dataset with probability proportional to its
/// weight, then a uniformly random sample of that dataset. Both draws are
/// independent across accesses: sampling is with replacement, nothing is
/// cached or exhausted.
///
/// Initialization and meta information come from the wrapped
/// [`ConcatDataset`]; only length and access are overridden. Accesses on a
/// lazily initialized mixture initialize it first.
pub struct SampleConcatDataset<I: Send + 'static> {
    concat: ConcatDataset<I>,
    n: usize,
    sampler: WeightedSourceSampler,
    rng: RandomSource,
    // Set once every weighted dataset is known to be non-empty.
    sources_checked: AtomicBool,
}

impl<I: Send + 'static> SampleConcatDataset<I> {
    /// Creates the mixture.
    ///
    /// # Errors
    ///
    /// Returns `SampleSetError::Configuration` if the weights do not match the
    /// datasets, cannot drive a weighted choice, or give weight to an empty
    /// dataset, as well as any error of the underlying [`ConcatDataset`].
    pub fn new(config: SampleConcatConfig, datasets: Vec<BoxedDataset<I>>) -> Result<Self> {
        let concat = ConcatDataset::new(datasets, config.lazy_init, &config.ignore_keys)?;
        let weights = config.f.normalize(concat.num_datasets())?;
        let sampler = WeightedSourceSampler::new(weights)?;
        info!(
            "SampleConcatDataset: n={}, f={:?}",
            config.n,
            sampler.weights()
        );

        let mixture = Self {
            concat,
            n: config.n,
            sampler,
            rng: RandomSource::from_seed_opt(config.seed),
            sources_checked: AtomicBool::new(false),
        };
        if mixture.concat.is_fully_initialized() {
            mixture.check_weighted_sources()?;
        }
        Ok(mixture)
    }

    /// Builds every dataset from its source first.
    pub fn from_sources(
        config: SampleConcatConfig,
        sources: Vec<DatasetSource<I>>,
        factory: &dyn DatasetFactory<I>,
    ) -> Result<Self> {
        let datasets = sources
            .into_iter()
            .map(|source| source.resolve(factory))
            .collect::<Result<Vec<_>>>()?;
        Self::new(config, datasets)
    }

    /// Replaces the random source, e.g. with a seeded one in tests.
    pub fn with_random_source(mut self, rng: RandomSource) -> Self {
        self.rng = rng;
        self
    }

    /// The normalized mixture weights, one per dataset.
    pub fn weights(&self) -> &[f64] {
        self.sampler.weights()
    }

    pub fn concat(&self) -> &ConcatDataset<I> {
        &self.concat
    }

    /// Draws `(dataset index, sample index)` for one access.
    ///
    /// # Errors
    ///
    /// Returns any error of initializing the datasets, and
    /// `SampleSetError::Configuration` if a weighted dataset turned out empty.
    pub fn draw_source_index(&self) -> Result<(usize, usize)> {
        self.check_weighted_sources()?;
        let dataset_idx = self.sampler.sample(&self.rng);
        let dataset_len = self.concat.dataset_len(dataset_idx)?;
        if dataset_len == 0 {
            return Err(SampleSetError::IndexOutOfBounds { index: 0, len: 0 });
        }
        Ok((dataset_idx, self.rng.gen_index(dataset_len)))
    }

    // A dataset that can be picked must have something to draw from. Only a
    // passing check is remembered.
    fn check_weighted_sources(&self) -> Result<()> {
        if self.sources_checked.load(Ordering::Acquire) {
            return Ok(());
        }
        for (position, weight) in self.sampler.weights().iter().enumerate() {
            if *weight > 0.0 && self.concat.dataset_len(position)? == 0 {
                return Err(SampleSetError::config(format!(
                    "dataset {} has mixture weight {} but no samples",
                    position, weight
                )));
            }
        }
        self.sources_checked.store(true, Ordering::Release);
        Ok(())
    }
}

impl<I: Send + 'static> Dataset for SampleConcatDataset<I> {
    type Item = I;

    fn get(&self, _index: usize) -> Result<I> {
        let (dataset_idx, sample_idx) = self.draw_source_index()?;
        self.concat.get_from(dataset_idx, sample_idx)
    }

    fn len(&self) -> usize {
        self.n
    }

    fn metainfo(&self) -> MetaInfo {
        self.concat.metainfo()
    }

    fn full_init(&mut self) -> Result<()> {
        self.concat.full_init()?;
        self.check_weighted_sources()
    }

    fn get_data_info(&self, _index: usize) -> Result<DataInfo> {
        let (dataset_idx, sample_idx) = self.draw_source_index()?;
        self.concat.get_data_info_from(dataset_idx, sample_idx)
    }
}

#[cfg(test)]
#[path = "sample_concat_dataset_test.rs"]
mod tests;
