//! Integration tests for selection, scaling, imputation and resampling properties

use ndarray::{array, Array1, Array2};
use polars::prelude::*;
use sensor_transform::preprocessing::{encode_label, FittedImputer, FILL_VALUE};
use sensor_transform::prelude::*;
use sensor_transform::schema::Schema;

fn sensor_frame() -> DataFrame {
    df!(
        "id" => &[1, 2, 3, 4, 5, 6],
        "aa_000" => &[Some(1.0), Some(5.0), None, Some(9.0), Some(1000.0), Some(3.0)],
        "ab_000" => &[4.0, 4.0, 4.0, 4.0, 4.0, 4.0],
        "class" => &["neg", "neg", "pos", "neg", "pos", "neg"],
    )
    .unwrap()
}

// ============================================================================
// Column selection and labels
// ============================================================================

#[test]
fn test_label_mapping_is_constant() {
    assert_eq!(encode_label("neg"), Some(0));
    assert_eq!(encode_label("pos"), Some(1));
    assert_eq!(encode_label("POS"), None);
    assert_eq!(encode_label(""), None);
}

#[test]
fn test_train_and_test_encode_identically() {
    let schema = Schema::new(["id"], "class");
    let selector = ColumnSelector::new(&schema);
    let train = selector.select(&sensor_frame(), "train").unwrap();
    let test = selector
        .select_features(&sensor_frame(), "test", &train.feature_names)
        .unwrap();
    assert_eq!(train.data.y(), test.data.y());
    assert_eq!(train.data.y().to_vec(), vec![0, 0, 1, 0, 1, 0]);
}

#[test]
fn test_non_numeric_feature_is_transform_error() {
    let df = df!(
        "aa_000" => &["high", "low"],
        "class" => &["neg", "pos"],
    )
    .unwrap();
    let schema = Schema::new(Vec::<String>::new(), "class");
    let err = ColumnSelector::new(&schema).select(&df, "train").unwrap_err();
    assert!(matches!(err, PipelineError::TransformError(_)));
}

// ============================================================================
// Fitted state
// ============================================================================

#[test]
fn test_fitting_twice_gives_identical_state() {
    let schema = Schema::new(["id"], "class");
    let x = ColumnSelector::new(&schema)
        .select(&sensor_frame(), "train")
        .unwrap()
        .data
        .x()
        .clone();

    let a = RobustScaler::new().fit(&x).unwrap();
    let b = RobustScaler::new().fit(&x).unwrap();
    assert_eq!(a, b);
    assert_eq!(ConstantImputer.fit(&x).unwrap(), ConstantImputer.fit(&x).unwrap());
}

#[test]
fn test_constant_column_passes_through_centered() {
    let x = array![[4.0, 1.0], [4.0, 2.0], [4.0, 3.0]];
    let scaler = RobustScaler::new().fit(&x).unwrap();
    assert_eq!(scaler.scale()[0], 1.0);

    let out = scaler.transform(&x).unwrap();
    assert!(out.column(0).iter().all(|&v| v == 0.0));
}

#[test]
fn test_transform_is_bit_identical() {
    let x = array![[1.0, f64::NAN], [2.0, 7.0], [30.0, 8.0], [4.0, 9.0]];
    let scaler = RobustScaler::new().fit(&x).unwrap();
    let imputer = ConstantImputer.fit(&x).unwrap();

    let run = |m: &Array2<f64>| imputer.transform(&scaler.transform(m).unwrap()).unwrap();
    let first = run(&x);
    let second = run(&x);
    let same_bits = first
        .iter()
        .zip(second.iter())
        .all(|(a, b)| a.to_bits() == b.to_bits());
    assert!(same_bits);
}

#[test]
fn test_test_split_uses_train_statistics() {
    let train = array![[1.0], [2.0], [3.0], [4.0], [5.0]];
    let test = array![[100.0], [200.0]];

    let scaler = RobustScaler::new().fit(&train).unwrap();
    let out = scaler.transform(&test).unwrap();
    // train median 3, IQR 2
    assert_eq!(out.column(0).to_vec(), vec![48.5, 98.5]);
}

#[test]
fn test_imputer_keeps_shape() {
    let x = array![[f64::NAN, 1.0], [2.0, f64::NAN], [f64::NAN, f64::NAN]];
    let out = FittedImputer::constant(2).transform(&x).unwrap();
    assert_eq!(out.dim(), x.dim());
    assert_eq!(out[[2, 1]], FILL_VALUE);
    assert_eq!(out[[1, 0]], 2.0);
}

#[test]
fn test_empty_input_is_transform_error() {
    let empty = Array2::<f64>::zeros((0, 3));
    assert!(matches!(
        RobustScaler::new().fit(&empty),
        Err(PipelineError::TransformError(_))
    ));
    assert!(matches!(
        ConstantImputer.fit(&empty),
        Err(PipelineError::TransformError(_))
    ));
}

// ============================================================================
// Resampling alignment
// ============================================================================

fn clustered(n_major: usize, n_minor: usize) -> LabeledData {
    let mut values = Vec::new();
    let mut labels = Vec::new();
    for i in 0..n_major {
        values.extend([(i % 7) as f64, (i / 7) as f64]);
        labels.push(0);
    }
    for i in 0..n_minor {
        values.extend([3.0 + 0.5 * (i % 3) as f64, 2.0 + 0.5 * (i / 3) as f64]);
        labels.push(1);
    }
    LabeledData::new(
        Array2::from_shape_vec((n_major + n_minor, 2), values).unwrap(),
        Array1::from_vec(labels),
    )
    .unwrap()
}

#[test]
fn test_resampled_rows_stay_aligned() {
    let data = clustered(30, 8);
    let result = SmoteTomek::default().fit_resample(&data).unwrap();

    assert_eq!(result.data.x().nrows(), result.data.y().len());
    assert_eq!(result.n_synthetic, 22);
    assert_eq!(
        result.data.n_rows(),
        data.n_rows() + result.n_synthetic - result.n_removed
    );

    // the minority class is never removed under the default strategy
    assert_eq!(result.data.class_counts()[&1], 30);

    let assembled = assemble_array(&result.data);
    assert_eq!(assembled.ncols(), data.n_features() + 1);
    for (i, &label) in result.data.y().iter().enumerate() {
        assert_eq!(assembled[[i, 2]], label as f64);
    }
}

#[test]
fn test_synthetic_rows_carry_minority_label() {
    let data = clustered(30, 8);
    let result = SmoteTomek::default().fit_resample(&data).unwrap();

    let y = result.data.y();
    let synthetic_labels: Vec<i64> = y.iter().rev().take(result.n_synthetic).copied().collect();
    assert!(synthetic_labels.iter().all(|&l| l == 1));
}

#[test]
fn test_tomek_strategy_on_balanced_split() {
    // balanced input: nothing is synthesized, rows 2 and 3 form the only link
    let data = LabeledData::new(
        array![[0.0], [1.0], [2.0], [2.1], [6.0], [7.0]],
        array![0, 0, 0, 1, 1, 1],
    )
    .unwrap();

    let majority = SmoteTomek::default().fit_resample(&data).unwrap();
    assert_eq!(majority.n_synthetic, 0);
    assert_eq!(majority.data.y().to_vec(), vec![0, 0, 1, 1, 1]);

    let config = ResamplerConfig::new().with_tomek_strategy(TomekStrategy::All);
    let all = SmoteTomek::new(&config).fit_resample(&data).unwrap();
    assert_eq!(all.n_removed, 2);
    assert_eq!(all.data.y().to_vec(), vec![0, 0, 1, 1]);
    assert_eq!(all.data.x().column(0).to_vec(), vec![0.0, 1.0, 6.0, 7.0]);
}
