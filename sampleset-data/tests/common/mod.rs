use sampleset_core::{MetaInfo, Result, SampleSetError};
use sampleset_data::Dataset;
use serde_json::{json, Value};

/// A sample as a detection dataset would hand it out: which dataset it came
/// from and its position there.
#[derive(Debug, Clone, PartialEq)]
pub struct DetSample {
    pub source: &'static str,
    pub img_id: usize,
}

/// Dataset that refuses to serve anything before `full_init`.
pub struct DetDataset {
    name: &'static str,
    len: usize,
    metainfo: MetaInfo,
    initialized: bool,
}

impl DetDataset {
    pub fn new(name: &'static str, len: usize) -> Self {
        Self {
            name,
            len,
            metainfo: metainfo(json!({"classes": ["person", "car"], "palette": [[220, 20, 60], [0, 0, 142]]})),
            initialized: false,
        }
    }
}

impl Dataset for DetDataset {
    type Item = DetSample;

    fn get(&self, index: usize) -> Result<DetSample> {
        if !self.initialized {
            return Err(SampleSetError::UninitializedAccess(self.name.to_string()));
        }
        if index >= self.len {
            return Err(SampleSetError::IndexOutOfBounds { index, len: self.len });
        }
        Ok(DetSample {
            source: self.name,
            img_id: index,
        })
    }

    fn len(&self) -> usize {
        self.len
    }

    fn metainfo(&self) -> MetaInfo {
        self.metainfo.clone()
    }

    fn full_init(&mut self) -> Result<()> {
        self.initialized = true;
        Ok(())
    }
}

#[allow(dead_code)]
pub fn metainfo(value: Value) -> MetaInfo {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}

/// Pearson's chi-square statistic of `counts` against a uniform expectation.
#[allow(dead_code)]
pub fn chi_square_uniform(counts: &[usize]) -> f64 {
    let total: usize = counts.iter().sum();
    let expected = total as f64 / counts.len() as f64;
    counts
        .iter()
        .map(|&observed| {
            let diff = observed as f64 - expected;
            diff * diff / expected
        })
        .sum()
}
