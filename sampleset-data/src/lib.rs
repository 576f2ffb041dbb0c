//! Dataset wrappers for training pipelines: a seeded size-limiting/repeating
//! wrapper, a uniform random resampler and a weighted mixture of datasets.

pub mod build;
pub mod config;
pub mod datasets;
pub mod samplers;
pub mod wrappers;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export main components
pub use build::{build_dataset, BaseDatasetSpec, DatasetFactory, DatasetSource, DatasetSpec};
pub use config::{LimitedConfig, RandomSampleConfig, SampleConcatConfig};
pub use datasets::{BoxedDataset, ConcatDataset, Dataset, VecDataset};
pub use samplers::MixtureWeights;
pub use wrappers::{LimitedDataset, RandomSampleDataset, SampleConcatDataset};
