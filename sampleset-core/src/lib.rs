//! Core types shared by the sampleset crates: the error type, metadata values
//! and the injectable random source.

pub mod error;
pub mod metainfo;
pub mod random;

// Re-export the main types so they are reachable as `sampleset_core::X`
pub use error::SampleSetError;
pub use metainfo::{DataInfo, MetaInfo};
pub use random::RandomSource;

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, SampleSetError>;
