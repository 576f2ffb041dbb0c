//! Builds a mixture of two limited/resampled datasets from a JSON build spec
//! and prints where each drawn sample came from.

use sampleset_core::SampleSetError;
use sampleset_data::{
    build_dataset, BaseDatasetSpec, BoxedDataset, Dataset, DatasetFactory, DatasetSpec, VecDataset,
};

// Stand-in for a real image dataset: items are `(dataset name, image id)`.
fn synthetic_factory(spec: &BaseDatasetSpec) -> Result<BoxedDataset<(String, usize)>, SampleSetError> {
    match spec.kind.as_str() {
        "SyntheticDataset" => {
            let name: String = spec.param("name")?;
            let len: usize = spec.param("len")?;
            Ok(Box::new(VecDataset::new(
                (0..len).map(|i| (name.clone(), i)).collect(),
            )))
        }
        other => Err(SampleSetError::UnknownDatasetType(other.to_string())),
    }
}

fn main() -> Result<(), SampleSetError> {
    let spec = DatasetSpec::from_json_str(
        r#"{
            "type": "SampleConcatDataset",
            "n": 12,
            "f": 0.7,
            "seed": 0,
            "datasets": [
                {
                    "type": "LimitedDataset",
                    "max_items": 5,
                    "seed": 42,
                    "dataset": {"type": "SyntheticDataset", "name": "labeled", "len": 100}
                },
                {
                    "type": "RandomSampleDataset",
                    "num_items": 1000,
                    "dataset": {"type": "SyntheticDataset", "name": "pseudo", "len": 300}
                }
            ]
        }"#,
    )?;

    let factory: &dyn DatasetFactory<(String, usize)> = &synthetic_factory;
    let dataset = build_dataset(&spec, factory)?;
    println!("\n--- Mixture of {} samples ---", dataset.len());
    for i in 0..dataset.len() {
        let (source, image_id) = dataset.get(i)?;
        println!("  sample {i:>2}: {source} #{image_id}");
    }
    Ok(())
}
