use sampleset_core::{DataInfo, MetaInfo, Result, SampleSetError};

/// Represents a dataset that can be accessed by index.
///
/// This is the narrow interface the wrappers consume: length, item access,
/// meta information and a one-time initialization hook. Wrappers never mutate
/// the datasets they wrap after initialization.
pub trait Dataset {
    /// The type of a single item returned by the dataset.
    ///
    /// Wrappers pass items through unmodified.
    type Item: Send + 'static;

    /// Returns the item at the given index.
    ///
    /// # Errors
    ///
    /// Returns `SampleSetError` if the index is out of bounds or if the
    /// dataset was not initialized yet.
    fn get(&self, index: usize) -> Result<Self::Item>;

    /// Returns the total number of items in the dataset.
    fn len(&self) -> usize;

    /// Checks if the dataset is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an owned copy of the dataset's meta information.
    fn metainfo(&self) -> MetaInfo {
        MetaInfo::new()
    }

    /// Performs the one-time initialization of the dataset.
    ///
    /// Must be idempotent: calling it on an initialized dataset is a no-op.
    fn full_init(&mut self) -> Result<()> {
        Ok(())
    }

    /// Returns the annotation information of the item at `index`.
    fn get_data_info(&self, _index: usize) -> Result<DataInfo> {
        Err(SampleSetError::UnsupportedOperation(
            "get_data_info is not provided by this dataset".to_string(),
        ))
    }

    /// Per-sample group flag (e.g. aspect-ratio group), if the dataset has one.
    fn flag(&self) -> Option<&[u8]> {
        None
    }
}

/// A type-erased dataset, as produced by the build-spec layer.
pub type BoxedDataset<I> = Box<dyn Dataset<Item = I>>;

impl<D: Dataset + ?Sized> Dataset for Box<D> {
    type Item = D::Item;

    fn get(&self, index: usize) -> Result<Self::Item> {
        (**self).get(index)
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn metainfo(&self) -> MetaInfo {
        (**self).metainfo()
    }

    fn full_init(&mut self) -> Result<()> {
        (**self).full_init()
    }

    fn get_data_info(&self, index: usize) -> Result<DataInfo> {
        (**self).get_data_info(index)
    }

    fn flag(&self) -> Option<&[u8]> {
        (**self).flag()
    }
}
