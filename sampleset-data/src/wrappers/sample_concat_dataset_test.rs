// sampleset-data/src/wrappers/sample_concat_dataset_test.rs

use super::*;
use crate::datasets::VecDataset;
use crate::test_utils::{meta, tagged_dataset};
use rand::rngs::mock::StepRng;
use serde_json::json;
use std::sync::atomic::Ordering;

#[test]
fn test_sample_concat_len_is_n() {
    let mixture = SampleConcatDataset::new(
        SampleConcatConfig::new(100, 0.7),
        vec![tagged_dataset("a", 10), tagged_dataset("b", 20)],
    )
    .unwrap();
    assert_eq!(mixture.len(), 100);
    assert_eq!(mixture.concat().len(), 30);
    assert_eq!(mixture.weights().len(), 2);
}

#[test]
fn test_sample_concat_routes_by_weight() {
    let mixture = SampleConcatDataset::new(
        SampleConcatConfig::new(100, 0.7).seed(21),
        vec![tagged_dataset("a", 10), tagged_dataset("b", 20)],
    )
    .unwrap();

    let draws = 10_000;
    let mut from_a = 0;
    for i in 0..draws {
        let (tag, sample) = mixture.get(i % 100).unwrap();
        match tag {
            "a" => {
                from_a += 1;
                assert!(sample < 10);
            }
            "b" => assert!(sample < 20),
            other => panic!("unexpected source {}", other),
        }
    }
    let fraction = from_a as f64 / draws as f64;
    assert!((fraction - 0.7).abs() < 0.03, "fraction routed to a: {}", fraction);
}

#[test]
fn test_sample_concat_single_dataset() {
    let mixture = SampleConcatDataset::new(
        SampleConcatConfig::new(5, 1.0),
        vec![tagged_dataset("only", 4)],
    )
    .unwrap();
    assert_eq!(mixture.weights(), &[1.0]);
    for i in 0..200 {
        let (tag, sample) = mixture.get(i).unwrap();
        assert_eq!(tag, "only");
        assert!(sample < 4);
    }
}

#[test]
fn test_sample_concat_weight_count_mismatch() {
    let result = SampleConcatDataset::new(
        SampleConcatConfig::new(10, vec![0.2, 0.3, 0.5]),
        vec![tagged_dataset("a", 2), tagged_dataset("b", 2)],
    );
    assert!(matches!(result, Err(SampleSetError::Configuration(_))));

    // A scalar other than 1.0 implies two datasets.
    let result = SampleConcatDataset::new(
        SampleConcatConfig::new(10, 0.4),
        vec![tagged_dataset("a", 2)],
    );
    assert!(matches!(result, Err(SampleSetError::Configuration(_))));
}

#[test]
fn test_sample_concat_sequence_weights() {
    let mixture = SampleConcatDataset::new(
        SampleConcatConfig::new(10, vec![0.0, 2.0, 0.0]).seed(4),
        vec![tagged_dataset("a", 3), tagged_dataset("b", 3), tagged_dataset("c", 3)],
    )
    .unwrap();
    for i in 0..100 {
        assert_eq!(mixture.get(i).unwrap().0, "b");
    }
}

#[test]
fn test_sample_concat_weighted_empty_dataset_fails() {
    let result = SampleConcatDataset::new(
        SampleConcatConfig::new(10, 0.5),
        vec![tagged_dataset("a", 3), tagged_dataset("empty", 0)],
    );
    assert!(matches!(result, Err(SampleSetError::Configuration(_))));

    // Without weight, an empty dataset is never picked.
    let mixture = SampleConcatDataset::new(
        SampleConcatConfig::new(10, 1.0).seed(1),
        vec![tagged_dataset("a", 3), tagged_dataset("empty", 0)],
    )
    .unwrap();
    assert_eq!(mixture.weights(), &[1.0, 0.0]);
    assert_eq!(mixture.get(0).unwrap().0, "a");
}

#[test]
fn test_sample_concat_lazy_init_on_first_access() {
    let a = VecDataset::new(vec![1, 2]);
    let b = VecDataset::new(vec![3, 4]);
    let (a_inits, b_inits) = (a.init_counter(), b.init_counter());
    let mut mixture = SampleConcatDataset::new(
        SampleConcatConfig::new(8, 0.5).lazy_init(true),
        vec![Box::new(a) as BoxedDataset<i32>, Box::new(b)],
    )
    .unwrap();
    assert_eq!(mixture.len(), 8);
    assert_eq!(a_inits.load(Ordering::SeqCst), 0);

    assert!(mixture.get(0).is_ok());
    assert!(mixture.concat().is_fully_initialized());
    mixture.full_init().unwrap();
    mixture.full_init().unwrap();
    assert!(mixture.get(1).is_ok());
    assert_eq!(a_inits.load(Ordering::SeqCst), 1);
    assert_eq!(b_inits.load(Ordering::SeqCst), 1);
}

#[test]
fn test_sample_concat_lazy_init_checks_empty_sources() {
    let mut mixture = SampleConcatDataset::new(
        SampleConcatConfig::new(8, 0.5).lazy_init(true),
        vec![tagged_dataset("a", 2), tagged_dataset("empty", 0)],
    )
    .unwrap();
    assert!(matches!(
        mixture.full_init(),
        Err(SampleSetError::Configuration(_))
    ));
    // The failure sticks: re-initializing does not hide the empty source.
    assert!(matches!(
        mixture.full_init(),
        Err(SampleSetError::Configuration(_))
    ));
    for i in 0..50 {
        assert!(matches!(
            mixture.get(i),
            Err(SampleSetError::Configuration(_))
        ));
        assert!(matches!(
            mixture.get_data_info(i),
            Err(SampleSetError::Configuration(_))
        ));
    }
}

#[test]
fn test_sample_concat_lazy_access_checks_empty_sources() {
    let mixture = SampleConcatDataset::new(
        SampleConcatConfig::new(8, 0.5).lazy_init(true),
        vec![tagged_dataset("a", 2), tagged_dataset("empty", 0)],
    )
    .unwrap();
    assert!(matches!(
        mixture.get(0),
        Err(SampleSetError::Configuration(_))
    ));
    assert!(matches!(
        mixture.draw_source_index(),
        Err(SampleSetError::Configuration(_))
    ));
}

#[test]
fn test_sample_concat_metainfo_from_first_dataset() {
    let a = VecDataset::new(vec![1]).with_metainfo(meta(json!({"classes": ["x"], "split": "train"})));
    let b = VecDataset::new(vec![2]).with_metainfo(meta(json!({"classes": ["x"], "split": "val"})));
    let mixture = SampleConcatDataset::new(
        SampleConcatConfig::new(4, 0.5).ignore_keys(["split"]),
        vec![Box::new(a) as BoxedDataset<i32>, Box::new(b)],
    )
    .unwrap();

    let mut copy = mixture.metainfo();
    assert_eq!(copy["split"], json!("train"));
    copy.remove("split");
    assert_eq!(mixture.metainfo()["split"], json!("train"));
}

#[test]
fn test_sample_concat_substituted_source() {
    // A generator stuck at zero always picks the first dataset and its first sample.
    let mixture = SampleConcatDataset::new(
        SampleConcatConfig::new(3, 0.5),
        vec![tagged_dataset("a", 5), tagged_dataset("b", 5)],
    )
    .unwrap()
    .with_random_source(RandomSource::from_rng(StepRng::new(0, 0)));
    assert_eq!(mixture.draw_source_index().unwrap(), (0, 0));
    assert_eq!(mixture.get(2).unwrap(), ("a", 0));
}

#[test]
fn test_sample_concat_data_info_routing() {
    let infos = (0..2).map(|i| meta(json!({"img_id": i}))).collect();
    let a = VecDataset::new(vec![0, 1]).with_data_infos(infos).unwrap();
    let mixture = SampleConcatDataset::new(
        SampleConcatConfig::new(3, 1.0),
        vec![Box::new(a) as BoxedDataset<i32>],
    )
    .unwrap();
    let info = mixture.get_data_info(0).unwrap();
    assert!(info["img_id"] == json!(0) || info["img_id"] == json!(1));
}
