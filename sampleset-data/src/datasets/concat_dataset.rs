use log::{debug, warn};
use sampleset_core::metainfo::first_mismatch;
use sampleset_core::{DataInfo, MetaInfo, Result, SampleSetError};
use std::sync::{Mutex, MutexGuard, OnceLock};

use super::traits::{BoxedDataset, Dataset};

/// Concatenates several datasets end-to-end.
///
/// The meta information of the first dataset is used for the whole
/// concatenation; every other dataset must agree with it on all keys except
/// `ignore_keys`.
///
/// With `lazy_init`, the member datasets are initialized on the first access
/// that needs their sizes (or on an explicit [`Dataset::full_init`]). A failed
/// initialization is not recorded, so the next access tries again.
pub struct ConcatDataset<I: Send + 'static> {
    datasets: Mutex<Vec<BoxedDataset<I>>>,
    num_datasets: usize,
    metainfo: MetaInfo,
    cumulative_sizes: OnceLock<Vec<usize>>,
}

impl<I: Send + 'static> ConcatDataset<I> {
    /// Creates the concatenation.
    ///
    /// # Errors
    ///
    /// Returns `SampleSetError::Configuration` if `datasets` is empty or if the
    /// meta information of a dataset disagrees with the first one.
    pub fn new(
        datasets: Vec<BoxedDataset<I>>,
        lazy_init: bool,
        ignore_keys: &[String],
    ) -> Result<Self> {
        let first = datasets
            .first()
            .ok_or_else(|| SampleSetError::config("ConcatDataset needs at least one dataset"))?;
        let metainfo = first.metainfo();
        for (position, dataset) in datasets.iter().enumerate().skip(1) {
            let other = dataset.metainfo();
            if let Some(key) = first_mismatch(&metainfo, &other, ignore_keys) {
                return Err(SampleSetError::config(format!(
                    "the meta information of dataset {} differs from dataset 0 on key `{}`",
                    position, key
                )));
            }
        }

        let mut concat = Self {
            num_datasets: datasets.len(),
            datasets: Mutex::new(datasets),
            metainfo,
            cumulative_sizes: OnceLock::new(),
        };
        if !lazy_init {
            concat.full_init()?;
        }
        Ok(concat)
    }

    pub fn num_datasets(&self) -> usize {
        self.num_datasets
    }

    pub fn is_fully_initialized(&self) -> bool {
        self.cumulative_sizes.get().is_some()
    }

    /// Cumulative member sizes, initializing the members on first need.
    fn cumulative_sizes(&self) -> Result<&[usize]> {
        if let Some(sizes) = self.cumulative_sizes.get() {
            return Ok(sizes.as_slice());
        }
        let mut datasets = self.lock();
        // Another caller may have finished while this one waited for the lock.
        if let Some(sizes) = self.cumulative_sizes.get() {
            return Ok(sizes.as_slice());
        }
        let sizes = initialize_members(&mut datasets)?;
        Ok(self.cumulative_sizes.get_or_init(|| sizes).as_slice())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<BoxedDataset<I>>> {
        self.datasets.lock().unwrap_or_else(|poisoned| {
            warn!("ConcatDataset: dataset lock was poisoned. Recovering.");
            poisoned.into_inner()
        })
    }

    /// Maps a global index to `(dataset index, sample index)`.
    pub fn locate(&self, index: usize) -> Result<(usize, usize)> {
        let cumulative_sizes = self.cumulative_sizes()?;
        let total = cumulative_sizes.last().copied().unwrap_or(0);
        if index >= total {
            return Err(SampleSetError::IndexOutOfBounds { index, len: total });
        }
        let dataset_idx = cumulative_sizes.partition_point(|&cum| cum <= index);
        let offset = if dataset_idx == 0 {
            0
        } else {
            cumulative_sizes[dataset_idx - 1]
        };
        Ok((dataset_idx, index - offset))
    }

    /// Size of member `dataset_idx`.
    pub fn dataset_len(&self, dataset_idx: usize) -> Result<usize> {
        let cumulative_sizes = self.cumulative_sizes()?;
        let end = *cumulative_sizes.get(dataset_idx).ok_or(SampleSetError::IndexOutOfBounds {
            index: dataset_idx,
            len: self.num_datasets,
        })?;
        let start = match dataset_idx {
            0 => 0,
            _ => cumulative_sizes[dataset_idx - 1],
        };
        Ok(end - start)
    }

    /// Item `sample_idx` of member `dataset_idx`.
    pub fn get_from(&self, dataset_idx: usize, sample_idx: usize) -> Result<I> {
        self.cumulative_sizes()?;
        let datasets = self.lock();
        member(&datasets, dataset_idx)?.get(sample_idx)
    }

    /// Annotation info of item `sample_idx` of member `dataset_idx`.
    pub fn get_data_info_from(&self, dataset_idx: usize, sample_idx: usize) -> Result<DataInfo> {
        self.cumulative_sizes()?;
        let datasets = self.lock();
        member(&datasets, dataset_idx)?.get_data_info(sample_idx)
    }
}

fn member<I: Send + 'static>(
    datasets: &[BoxedDataset<I>],
    dataset_idx: usize,
) -> Result<&BoxedDataset<I>> {
    datasets.get(dataset_idx).ok_or(SampleSetError::IndexOutOfBounds {
        index: dataset_idx,
        len: datasets.len(),
    })
}

fn initialize_members<I: Send + 'static>(datasets: &mut [BoxedDataset<I>]) -> Result<Vec<usize>> {
    let mut total = 0;
    let mut cumulative_sizes = Vec::with_capacity(datasets.len());
    for dataset in datasets.iter_mut() {
        dataset.full_init()?;
        total += dataset.len();
        cumulative_sizes.push(total);
    }
    debug!(
        "ConcatDataset: initialized {} datasets, {} samples in total",
        datasets.len(),
        total
    );
    Ok(cumulative_sizes)
}

impl<I: Send + 'static> Dataset for ConcatDataset<I> {
    type Item = I;

    fn get(&self, index: usize) -> Result<I> {
        let (dataset_idx, sample_idx) = self.locate(index)?;
        self.get_from(dataset_idx, sample_idx)
    }

    /// Total number of samples. Initializes the members if needed; 0 if that
    /// fails.
    fn len(&self) -> usize {
        match self.cumulative_sizes() {
            Ok(sizes) => sizes.last().copied().unwrap_or(0),
            Err(e) => {
                warn!("ConcatDataset: initialization failed while computing len: {}", e);
                0
            }
        }
    }

    fn metainfo(&self) -> MetaInfo {
        self.metainfo.clone()
    }

    fn full_init(&mut self) -> Result<()> {
        if self.is_fully_initialized() {
            debug!("ConcatDataset: already initialized, skipping full_init");
            return Ok(());
        }
        let datasets = self.datasets.get_mut().unwrap_or_else(|poisoned| {
            warn!("ConcatDataset: dataset lock was poisoned. Recovering.");
            poisoned.into_inner()
        });
        let sizes = initialize_members(datasets)?;
        self.cumulative_sizes = OnceLock::from(sizes);
        Ok(())
    }

    fn get_data_info(&self, index: usize) -> Result<DataInfo> {
        let (dataset_idx, sample_idx) = self.locate(index)?;
        self.get_data_info_from(dataset_idx, sample_idx)
    }
}

#[cfg(test)]
#[path = "concat_dataset_test.rs"]
mod tests;
