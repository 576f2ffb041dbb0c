use sampleset_core::{DataInfo, MetaInfo, Result, SampleSetError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::traits::Dataset;

/// A simple dataset that wraps a `Vec` of items.
///
/// Each item in the `Vec` corresponds to a sample in the dataset. Meta
/// information, per-sample data infos and a group flag can be attached with
/// the `with_*` builders.
///
/// # Type Parameters
///
/// * `T`: The type of the items stored in the dataset. Must be `Clone + Send + 'static`.
#[derive(Debug, Clone)]
pub struct VecDataset<T: Clone + Send + 'static> {
    data: Vec<T>,
    metainfo: MetaInfo,
    data_infos: Option<Vec<DataInfo>>,
    flag: Option<Vec<u8>>,
    init_calls: Arc<AtomicUsize>,
    initialized: bool,
}

impl<T: Clone + Send + 'static> VecDataset<T> {
    /// Creates a new `VecDataset` from a vector of items.
    ///
    /// # Arguments
    ///
    /// * `data` - A vector of items that will constitute the dataset.
    pub fn new(data: Vec<T>) -> Self {
        Self {
            data,
            metainfo: MetaInfo::new(),
            data_infos: None,
            flag: None,
            init_calls: Arc::new(AtomicUsize::new(0)),
            initialized: false,
        }
    }

    pub fn with_metainfo(mut self, metainfo: MetaInfo) -> Self {
        self.metainfo = metainfo;
        self
    }

    /// Attaches one annotation record per item.
    ///
    /// # Errors
    ///
    /// Returns `SampleSetError::Configuration` if the number of records differs
    /// from the number of items.
    pub fn with_data_infos(mut self, data_infos: Vec<DataInfo>) -> Result<Self> {
        if data_infos.len() != self.data.len() {
            return Err(SampleSetError::config(format!(
                "got {} data infos for {} items",
                data_infos.len(),
                self.data.len()
            )));
        }
        self.data_infos = Some(data_infos);
        Ok(self)
    }

    pub fn with_flag(mut self, flag: Vec<u8>) -> Self {
        self.flag = Some(flag);
        self
    }

    /// Shared counter of the `full_init` calls that did actual work.
    ///
    /// Clones of the dataset share the counter, so it stays observable after
    /// the dataset was moved into a wrapper.
    pub fn init_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.init_calls)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl<T: Clone + Send + 'static> Dataset for VecDataset<T> {
    type Item = T;

    /// Returns the item at the given index.
    ///
    /// Clones the item before returning.
    ///
    /// # Errors
    ///
    /// Returns `SampleSetError::IndexOutOfBounds` if the index is out of bounds.
    fn get(&self, index: usize) -> Result<Self::Item> {
        self.data
            .get(index)
            .cloned()
            .ok_or(SampleSetError::IndexOutOfBounds {
                index,
                len: self.data.len(),
            })
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn metainfo(&self) -> MetaInfo {
        self.metainfo.clone()
    }

    fn full_init(&mut self) -> Result<()> {
        if self.initialized {
            return Ok(());
        }
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        self.initialized = true;
        Ok(())
    }

    fn get_data_info(&self, index: usize) -> Result<DataInfo> {
        let infos = self.data_infos.as_ref().ok_or_else(|| {
            SampleSetError::UnsupportedOperation(
                "this VecDataset carries no data infos".to_string(),
            )
        })?;
        infos
            .get(index)
            .cloned()
            .ok_or(SampleSetError::IndexOutOfBounds {
                index,
                len: infos.len(),
            })
    }

    fn flag(&self) -> Option<&[u8]> {
        self.flag.as_deref()
    }
}

#[cfg(test)]
#[path = "vec_dataset_test.rs"]
mod tests;
