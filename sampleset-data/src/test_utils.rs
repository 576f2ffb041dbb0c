use sampleset_core::MetaInfo;
use serde_json::Value;

use crate::datasets::{BoxedDataset, VecDataset};

/// Turns a `json!` object literal into a `MetaInfo`.
pub(crate) fn meta(value: Value) -> MetaInfo {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}

/// A dataset whose items are their own indices: `0..len`.
pub(crate) fn range_dataset(len: usize) -> VecDataset<usize> {
    VecDataset::new((0..len).collect())
}

/// A boxed dataset of `(tag, index)` pairs, handy to see where a mixture
/// sample was routed to.
pub(crate) fn tagged_dataset(tag: &'static str, len: usize) -> BoxedDataset<(&'static str, usize)> {
    Box::new(VecDataset::new((0..len).map(|i| (tag, i)).collect()))
}
