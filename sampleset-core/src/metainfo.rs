//! Metadata and annotation-info values exchanged with datasets.

use serde_json::{Map, Value};

/// Dataset-level meta information (class names, palette, ...).
///
/// Datasets hand it out by value, so callers always get their own copy and
/// can mutate it freely.
pub type MetaInfo = Map<String, Value>;

/// Per-sample annotation information, as returned by `get_data_info`.
pub type DataInfo = Map<String, Value>;

/// Returns the first key on which `a` and `b` differ, skipping `ignore_keys`.
///
/// A key present on only one side counts as a difference.
pub fn first_mismatch<'a>(
    a: &'a MetaInfo,
    b: &'a MetaInfo,
    ignore_keys: &[String],
) -> Option<&'a str> {
    let ignored = |key: &str| ignore_keys.iter().any(|k| k == key);
    a.iter()
        .filter(|(key, _)| !ignored(key))
        .find(|(key, value)| b.get(key.as_str()) != Some(*value))
        .map(|(key, _)| key.as_str())
        .or_else(|| {
            b.keys()
                .filter(|key| !ignored(key))
                .find(|key| !a.contains_key(key.as_str()))
                .map(|key| key.as_str())
        })
}
