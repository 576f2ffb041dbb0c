//! # Build specs
//!
//! Declarative construction of dataset trees from JSON.
//!
//! A build spec is a JSON object with a `"type"` key. The three wrapper types
//! are handled here; every other type is a *base* dataset that a
//! [`DatasetFactory`] supplied by the caller knows how to build.
//!
//! ```rust
//! use sampleset_core::SampleSetError;
//! use sampleset_data::build::{build_dataset, BaseDatasetSpec, DatasetSpec};
//! use sampleset_data::datasets::{BoxedDataset, Dataset, VecDataset};
//! use serde_json::json;
//!
//! let factory = |spec: &BaseDatasetSpec| -> Result<BoxedDataset<usize>, SampleSetError> {
//!     match spec.kind.as_str() {
//!         "Range" => {
//!             let len: usize = spec.param("len")?;
//!             Ok(Box::new(VecDataset::new((0..len).collect())))
//!         }
//!         other => Err(SampleSetError::UnknownDatasetType(other.to_string())),
//!     }
//! };
//!
//! let spec = DatasetSpec::from_value(&json!({
//!     "type": "LimitedDataset",
//!     "max_items": 4,
//!     "seed": 1,
//!     "dataset": {"type": "Range", "len": 20}
//! }))
//! .unwrap();
//! let dataset = build_dataset::<usize>(&spec, &factory).unwrap();
//! assert_eq!(dataset.len(), 20);
//! ```

use sampleset_core::{Result, SampleSetError};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::config::{LimitedConfig, RandomSampleConfig, SampleConcatConfig};
use crate::datasets::{BoxedDataset, Dataset};
use crate::wrappers::{LimitedDataset, RandomSampleDataset, SampleConcatDataset};

/// Build spec of a dataset the caller's factory knows how to build.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseDatasetSpec {
    /// Value of the `"type"` key.
    pub kind: String,
    /// Every other key of the spec.
    pub params: Map<String, Value>,
}

impl BaseDatasetSpec {
    /// Deserializes the parameter `key`.
    ///
    /// # Errors
    ///
    /// Returns `SampleSetError::Configuration` if the key is missing or does
    /// not deserialize to `T`.
    pub fn param<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self.params.get(key).ok_or_else(|| {
            SampleSetError::config(format!("{} spec is missing `{}`", self.kind, key))
        })?;
        serde_json::from_value(value.clone()).map_err(|e| {
            SampleSetError::config(format!("invalid `{}` in {} spec: {}", key, self.kind, e))
        })
    }

    /// Deserializes all parameters into a typed struct.
    pub fn params_as<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(Value::Object(self.params.clone()))
            .map_err(|e| SampleSetError::config(format!("invalid {} spec: {}", self.kind, e)))
    }
}

/// A parsed build spec.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetSpec {
    Limited {
        dataset: Box<DatasetSpec>,
        config: LimitedConfig,
    },
    RandomSample {
        dataset: Box<DatasetSpec>,
        config: RandomSampleConfig,
    },
    SampleConcat {
        datasets: Vec<DatasetSpec>,
        config: SampleConcatConfig,
    },
    Base(BaseDatasetSpec),
}

impl DatasetSpec {
    /// Parses a build spec.
    ///
    /// # Errors
    ///
    /// Returns `SampleSetError::InvalidSource` if `value` (or a nested dataset
    /// entry) is not a JSON object, and `SampleSetError::Configuration` if the
    /// `"type"` key is missing or a wrapper's configuration is invalid.
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| SampleSetError::InvalidSource {
            found: json_kind(value).to_string(),
        })?;
        let kind = object
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| SampleSetError::config("build spec needs a string `type` key"))?;

        match kind {
            "LimitedDataset" => Ok(DatasetSpec::Limited {
                dataset: Box::new(Self::from_value(field(object, kind, "dataset")?)?),
                config: parse_config(kind, value)?,
            }),
            "RandomSampleDataset" => Ok(DatasetSpec::RandomSample {
                dataset: Box::new(Self::from_value(field(object, kind, "dataset")?)?),
                config: parse_config(kind, value)?,
            }),
            "SampleConcatDataset" => {
                let datasets = field(object, kind, "datasets")?
                    .as_array()
                    .ok_or_else(|| {
                        SampleSetError::config("SampleConcatDataset `datasets` must be a list")
                    })?
                    .iter()
                    .map(Self::from_value)
                    .collect::<Result<Vec<_>>>()?;
                Ok(DatasetSpec::SampleConcat {
                    datasets,
                    config: parse_config(kind, value)?,
                })
            }
            _ => {
                let mut params = object.clone();
                params.remove("type");
                Ok(DatasetSpec::Base(BaseDatasetSpec {
                    kind: kind.to_string(),
                    params,
                }))
            }
        }
    }

    /// Parses a build spec from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| SampleSetError::config(format!("build spec is not valid JSON: {}", e)))?;
        Self::from_value(&value)
    }
}

fn field<'a>(object: &'a Map<String, Value>, kind: &str, key: &str) -> Result<&'a Value> {
    object
        .get(key)
        .ok_or_else(|| SampleSetError::config(format!("{} spec is missing `{}`", kind, key)))
}

fn parse_config<T: DeserializeOwned>(kind: &str, value: &Value) -> Result<T> {
    serde_json::from_value(value.clone())
        .map_err(|e| SampleSetError::config(format!("invalid {} spec: {}", kind, e)))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

/// Builds base datasets from their specs.
///
/// Any `Fn(&BaseDatasetSpec) -> Result<BoxedDataset<I>>` closure is a factory.
/// Factories should answer unknown kinds with
/// `SampleSetError::UnknownDatasetType`.
pub trait DatasetFactory<I: Send + 'static> {
    fn build(&self, spec: &BaseDatasetSpec) -> Result<BoxedDataset<I>>;
}

impl<I: Send + 'static, F> DatasetFactory<I> for F
where
    F: Fn(&BaseDatasetSpec) -> Result<BoxedDataset<I>>,
{
    fn build(&self, spec: &BaseDatasetSpec) -> Result<BoxedDataset<I>> {
        self(spec)
    }
}

/// Builds the whole dataset tree described by `spec`.
pub fn build_dataset<I: Send + 'static>(
    spec: &DatasetSpec,
    factory: &dyn DatasetFactory<I>,
) -> Result<BoxedDataset<I>> {
    match spec {
        DatasetSpec::Base(base) => factory.build(base),
        DatasetSpec::Limited { dataset, config } => Ok(Box::new(LimitedDataset::new(
            build_dataset(dataset, factory)?,
            config.clone(),
        )?)),
        DatasetSpec::RandomSample { dataset, config } => Ok(Box::new(RandomSampleDataset::new(
            build_dataset(dataset, factory)?,
            config.clone(),
        )?)),
        DatasetSpec::SampleConcat { datasets, config } => {
            let datasets = datasets
                .iter()
                .map(|dataset| build_dataset(dataset, factory))
                .collect::<Result<Vec<_>>>()?;
            Ok(Box::new(SampleConcatDataset::new(config.clone(), datasets)?))
        }
    }
}

/// Where a wrapper gets its dataset from: a ready instance or a build spec.
pub enum DatasetSource<I: Send + 'static> {
    Instance(BoxedDataset<I>),
    Config(Value),
}

impl<I: Send + 'static> DatasetSource<I> {
    pub fn instance<D: Dataset<Item = I> + 'static>(dataset: D) -> Self {
        DatasetSource::Instance(Box::new(dataset))
    }

    /// Returns the instance, or builds it from the spec with `factory`.
    ///
    /// # Errors
    ///
    /// Returns `SampleSetError::InvalidSource` if the config is not a mapping,
    /// plus any error of parsing or building the spec.
    pub fn resolve(self, factory: &dyn DatasetFactory<I>) -> Result<BoxedDataset<I>> {
        match self {
            DatasetSource::Instance(dataset) => Ok(dataset),
            DatasetSource::Config(value) => build_dataset(&DatasetSpec::from_value(&value)?, factory),
        }
    }
}

impl<I: Send + 'static> From<Value> for DatasetSource<I> {
    fn from(value: Value) -> Self {
        DatasetSource::Config(value)
    }
}

impl<I: Send + 'static> From<BoxedDataset<I>> for DatasetSource<I> {
    fn from(dataset: BoxedDataset<I>) -> Self {
        DatasetSource::Instance(dataset)
    }
}

#[cfg(test)]
#[path = "build_test.rs"]
mod tests;
