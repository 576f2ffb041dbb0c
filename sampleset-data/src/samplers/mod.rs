pub mod bounded_sampler;
pub mod mixture_weights;

pub use bounded_sampler::BoundedSampler;
pub use mixture_weights::{MixtureWeights, WeightedSourceSampler};
