use log::{debug, info};
use sampleset_core::{DataInfo, MetaInfo, RandomSource, Result, SampleSetError};

use crate::build::{DatasetFactory, DatasetSource};
use crate::config::RandomSampleConfig;
use crate::datasets::{BoxedDataset, Dataset};

/// Serves a uniformly random sample of the wrapped dataset on every access.
///
/// The reported length is the configured `num_items`, independent of the size
/// of the wrapped dataset. The requested index is ignored: each `get` draws a
/// fresh index, so two accesses with the same index may return different
/// samples.
#[derive(Debug)]
pub struct RandomSampleDataset<D: Dataset> {
    dataset: D,
    metainfo: MetaInfo,
    num_samples: usize,
    num_items: usize,
    rng: RandomSource,
}

impl<D: Dataset> RandomSampleDataset<D> {
    /// Initializes `dataset` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns `SampleSetError::Configuration` if `dataset` is empty while
    /// `num_items` is positive, or any error of the dataset's `full_init`.
    pub fn new(mut dataset: D, config: RandomSampleConfig) -> Result<Self> {
        dataset.full_init()?;
        let metainfo = dataset.metainfo();
        let num_samples = dataset.len();
        let num_items = config.num_items.unwrap_or(num_samples);
        if num_samples == 0 && num_items > 0 {
            return Err(SampleSetError::config(format!(
                "cannot serve {} random items from an empty dataset",
                num_items
            )));
        }
        info!(
            "RandomSampleDataset: {} items drawn from {} samples",
            num_items, num_samples
        );
        Ok(Self {
            dataset,
            metainfo,
            num_samples,
            num_items,
            rng: RandomSource::from_seed_opt(config.seed),
        })
    }

    /// Replaces the random source, e.g. with a seeded one in tests.
    pub fn with_random_source(mut self, rng: RandomSource) -> Self {
        self.rng = rng;
        self
    }

    /// Size of the wrapped dataset.
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    pub fn inner(&self) -> &D {
        &self.dataset
    }

    /// Draws the index of the wrapped dataset the next access would read.
    pub fn draw_index(&self) -> Result<usize> {
        if self.num_samples == 0 {
            return Err(SampleSetError::IndexOutOfBounds { index: 0, len: 0 });
        }
        Ok(self.rng.gen_index(self.num_samples))
    }
}

impl<I: Send + 'static> RandomSampleDataset<BoxedDataset<I>> {
    /// Builds the wrapped dataset from `source` first.
    pub fn from_source(
        source: DatasetSource<I>,
        factory: &dyn DatasetFactory<I>,
        config: RandomSampleConfig,
    ) -> Result<Self> {
        Self::new(source.resolve(factory)?, config)
    }
}

impl<D: Dataset> Dataset for RandomSampleDataset<D> {
    type Item = D::Item;

    fn get(&self, _index: usize) -> Result<Self::Item> {
        self.dataset.get(self.draw_index()?)
    }

    fn len(&self) -> usize {
        self.num_items
    }

    fn metainfo(&self) -> MetaInfo {
        self.metainfo.clone()
    }

    /// The wrapped dataset is initialized at construction; this is a no-op.
    fn full_init(&mut self) -> Result<()> {
        debug!("RandomSampleDataset: initialized at construction, skipping full_init");
        Ok(())
    }

    /// Annotation info of the wrapped dataset at the same index.
    fn get_data_info(&self, index: usize) -> Result<DataInfo> {
        self.dataset.get_data_info(index)
    }

    fn flag(&self) -> Option<&[u8]> {
        self.dataset.flag()
    }
}

#[cfg(test)]
#[path = "random_sample_dataset_test.rs"]
mod tests;
