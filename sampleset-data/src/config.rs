//! Configuration of the dataset wrappers.
//!
//! Every struct deserializes from the matching entry of a JSON build spec and
//! its `Default` mirrors the defaults of the programmatic constructors.

use serde::{Deserialize, Deserializer, Serialize};

use crate::samplers::MixtureWeights;

/// Configuration of a [`LimitedDataset`](crate::wrappers::LimitedDataset).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitedConfig {
    /// Number of distinct samples to draw. `None` keeps the whole dataset.
    pub max_items: Option<usize>,
    /// Seed of the draw.
    pub seed: u64,
    /// Length of the tiled selection as a fraction of the dataset size.
    pub target_size: Option<f64>,
    /// Repeat the draw up to the target length instead of exposing it once.
    pub keep_original_size: bool,
}

impl Default for LimitedConfig {
    fn default() -> Self {
        Self {
            max_items: None,
            seed: 0,
            target_size: None,
            keep_original_size: true,
        }
    }
}

impl LimitedConfig {
    pub fn new(max_items: Option<usize>) -> Self {
        Self {
            max_items,
            ..Self::default()
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn target_size(mut self, target_size: f64) -> Self {
        self.target_size = Some(target_size);
        self
    }

    pub fn keep_original_size(mut self, keep: bool) -> Self {
        self.keep_original_size = keep;
        self
    }
}

/// Configuration of a [`RandomSampleDataset`](crate::wrappers::RandomSampleDataset).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomSampleConfig {
    /// Logical length. Defaults to the length of the wrapped dataset.
    pub num_items: Option<usize>,
    /// Seeds the access-time draws; ambient randomness when unset.
    pub seed: Option<u64>,
}

impl RandomSampleConfig {
    pub fn new(num_items: usize) -> Self {
        Self {
            num_items: Some(num_items),
            seed: None,
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Configuration of a [`SampleConcatDataset`](crate::wrappers::SampleConcatDataset).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleConcatConfig {
    /// Logical length.
    pub n: usize,
    /// Mixture weights, a scalar fraction or one weight per dataset.
    pub f: MixtureWeights,
    #[serde(default)]
    pub lazy_init: bool,
    /// Meta information keys allowed to differ between the datasets.
    #[serde(default, deserialize_with = "one_or_many")]
    pub ignore_keys: Vec<String>,
    /// Seeds the access-time draws; ambient randomness when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SampleConcatConfig {
    pub fn new(n: usize, f: impl Into<MixtureWeights>) -> Self {
        Self {
            n,
            f: f.into(),
            lazy_init: false,
            ignore_keys: Vec::new(),
            seed: None,
        }
    }

    pub fn lazy_init(mut self, lazy_init: bool) -> Self {
        self.lazy_init = lazy_init;
        self
    }

    pub fn ignore_keys<S: Into<String>>(mut self, keys: impl IntoIterator<Item = S>) -> Self {
        self.ignore_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Accepts `"key"`, `["a", "b"]` or `null`.
fn one_or_many<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(key)) => vec![key],
        Some(OneOrMany::Many(keys)) => keys,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_limited_config_defaults() {
        let config: LimitedConfig = serde_json::from_value(json!({"max_items": 5})).unwrap();
        assert_eq!(config, LimitedConfig::new(Some(5)));
        assert!(config.keep_original_size);
        assert_eq!(config.seed, 0);
    }

    #[test]
    fn test_limited_config_builders() {
        let config = LimitedConfig::new(Some(3)).seed(9).target_size(0.5).keep_original_size(false);
        assert_eq!(config.seed, 9);
        assert_eq!(config.target_size, Some(0.5));
        assert!(!config.keep_original_size);
    }

    #[test]
    fn test_random_sample_config_ignores_unknown_keys() {
        let config: RandomSampleConfig =
            serde_json::from_value(json!({"type": "RandomSampleDataset", "num_items": 12})).unwrap();
        assert_eq!(config, RandomSampleConfig::new(12));
    }

    #[test]
    fn test_sample_concat_config_ignore_keys_forms() {
        let single: SampleConcatConfig =
            serde_json::from_value(json!({"n": 4, "f": 0.5, "ignore_keys": "name"})).unwrap();
        assert_eq!(single.ignore_keys, vec!["name".to_string()]);

        let many: SampleConcatConfig =
            serde_json::from_value(json!({"n": 4, "f": [1.0, 2.0], "ignore_keys": ["a", "b"]}))
                .unwrap();
        assert_eq!(many.ignore_keys.len(), 2);
        assert_eq!(many.f, MixtureWeights::Sequence(vec![1.0, 2.0]));

        let absent: SampleConcatConfig = serde_json::from_value(json!({"n": 4, "f": 0.5})).unwrap();
        assert!(absent.ignore_keys.is_empty());
        assert!(!absent.lazy_init);
    }

    #[test]
    fn test_sample_concat_config_requires_n() {
        let result: Result<SampleConcatConfig, _> = serde_json::from_value(json!({"f": 0.5}));
        assert!(result.is_err());
    }
}
