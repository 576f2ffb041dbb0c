pub mod limited_dataset;
pub mod random_sample_dataset;
pub mod sample_concat_dataset;

pub use limited_dataset::LimitedDataset;
pub use random_sample_dataset::RandomSampleDataset;
pub use sample_concat_dataset::SampleConcatDataset;
