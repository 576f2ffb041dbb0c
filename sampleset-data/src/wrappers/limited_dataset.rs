use log::{debug, info};
use sampleset_core::{DataInfo, MetaInfo, Result, SampleSetError};

use crate::build::{DatasetFactory, DatasetSource};
use crate::config::LimitedConfig;
use crate::datasets::{BoxedDataset, Dataset};
use crate::samplers::BoundedSampler;

/// Exposes a seeded, size-limited and optionally repeated subset of a dataset.
///
/// The index sequence is computed once at construction by a
/// [`BoundedSampler`]; item `i` of the wrapper is item `indices[i]` of the
/// wrapped dataset.
///
/// # Example
///
/// ```rust
/// use sampleset_data::config::LimitedConfig;
/// use sampleset_data::datasets::{Dataset, VecDataset};
/// use sampleset_data::wrappers::LimitedDataset;
///
/// let dataset = VecDataset::new((0..100).collect::<Vec<u32>>());
/// // 10 distinct samples, repeated until the original 100 are reached.
/// let limited = LimitedDataset::new(dataset, LimitedConfig::new(Some(10)).seed(42)).unwrap();
/// assert_eq!(limited.len(), 100);
/// assert_eq!(limited.get(0).unwrap(), limited.get(10).unwrap());
/// ```
#[derive(Debug)]
pub struct LimitedDataset<D: Dataset> {
    dataset: D,
    metainfo: MetaInfo,
    num_samples: usize,
    indices: Vec<usize>,
}

impl<D: Dataset> LimitedDataset<D> {
    /// Initializes `dataset` and selects its indices according to `config`.
    ///
    /// # Errors
    ///
    /// Returns `SampleSetError::Configuration` if `config` cannot be satisfied
    /// for the size of `dataset`, or any error of the dataset's `full_init`.
    pub fn new(mut dataset: D, config: LimitedConfig) -> Result<Self> {
        dataset.full_init()?;
        let metainfo = dataset.metainfo();
        let num_samples = dataset.len();
        let indices = BoundedSampler::new(config).indices(num_samples)?;
        info!(
            "LimitedDataset: exposing {} indices over {} samples",
            indices.len(),
            num_samples
        );
        Ok(Self {
            dataset,
            metainfo,
            num_samples,
            indices,
        })
    }

    /// The selected indices into the wrapped dataset.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Size of the wrapped dataset.
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    pub fn inner(&self) -> &D {
        &self.dataset
    }

    fn source_index(&self, index: usize) -> Result<usize> {
        self.indices
            .get(index)
            .copied()
            .ok_or(SampleSetError::IndexOutOfBounds {
                index,
                len: self.indices.len(),
            })
    }
}

impl<I: Send + 'static> LimitedDataset<BoxedDataset<I>> {
    /// Builds the wrapped dataset from `source` first.
    pub fn from_source(
        source: DatasetSource<I>,
        factory: &dyn DatasetFactory<I>,
        config: LimitedConfig,
    ) -> Result<Self> {
        Self::new(source.resolve(factory)?, config)
    }
}

impl<D: Dataset> Dataset for LimitedDataset<D> {
    type Item = D::Item;

    fn get(&self, index: usize) -> Result<Self::Item> {
        self.dataset.get(self.source_index(index)?)
    }

    fn len(&self) -> usize {
        self.indices.len()
    }

    fn metainfo(&self) -> MetaInfo {
        self.metainfo.clone()
    }

    /// The wrapped dataset is initialized at construction; this is a no-op.
    fn full_init(&mut self) -> Result<()> {
        debug!("LimitedDataset: initialized at construction, skipping full_init");
        Ok(())
    }

    fn get_data_info(&self, index: usize) -> Result<DataInfo> {
        self.dataset.get_data_info(self.source_index(index)?)
    }

    fn flag(&self) -> Option<&[u8]> {
        self.dataset.flag()
    }
}

#[cfg(test)]
#[path = "limited_dataset_test.rs"]
mod tests;
