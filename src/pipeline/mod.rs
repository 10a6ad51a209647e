//! Data transformation stage
//!
//! Wires the pieces together in their fixed order:
//! schema → column selection → robust scaling → constant imputation →
//! SMOTE-Tomek resampling → array assembly → atomic persistence.

mod assembler;
mod config;
mod transformation;

pub use assembler::{assemble_array, disassemble_array};
pub use config::{run_timestamp, PipelineConfig, TransformationConfig, TIMESTAMP_FORMAT};
pub use transformation::{DataTransformation, TransformedSplits};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{DataIngestionArtifact, DataValidationArtifact};
    use crate::error::PipelineError;
    use crate::schema::Schema;
    use crate::synthetic::{NeighborPolicy, ResamplerConfig};
    use polars::prelude::*;

    fn stage(resample_test: bool) -> DataTransformation {
        let config = PipelineConfig::new(
            Schema::new(["id"], "class"),
            TransformationConfig::in_run_dir("unused"),
        )
        .with_resampler(ResamplerConfig::new().with_neighbor_policy(NeighborPolicy::Shrink))
        .with_resample_test(resample_test);
        DataTransformation::new(
            DataIngestionArtifact::new("train.csv", "test.csv"),
            DataValidationArtifact::passed(),
            config,
        )
    }

    fn frames() -> (DataFrame, DataFrame) {
        let train = df!(
            "id" => &[1, 2, 3, 4, 5, 6, 7, 8],
            "aa_000" => &[Some(1.0), Some(2.0), Some(3.0), None, Some(5.0), Some(6.0), Some(40.0), Some(42.0)],
            "ab_000" => &[10, 11, 12, 13, 14, 15, 90, 95],
            "class" => &["neg", "neg", "neg", "neg", "neg", "neg", "pos", "pos"],
        )
        .unwrap();
        let test = df!(
            "class" => &["neg", "pos", "neg"],
            "ab_000" => &[12, 80, 11],
            "aa_000" => &[Some(2.5), None, Some(1.5)],
            "id" => &[9, 10, 11],
        )
        .unwrap();
        (train, test)
    }

    #[test]
    fn test_test_split_uses_train_column_order() {
        let (train, test) = frames();
        let splits = stage(false).transform_frames(&train, &test).unwrap();

        assert_eq!(splits.object.feature_names(), ["aa_000", "ab_000"]);
        // test row 0 holds aa_000 = 2.5, scaled with the train median 5.0
        let scale = splits.object.scaler().scale()[0];
        assert!((splits.test.x()[[0, 0]] - (2.5 - 5.0) / scale).abs() < 1e-12);
    }

    #[test]
    fn test_no_missing_values_survive() {
        let (train, test) = frames();
        let splits = stage(true).transform_frames(&train, &test).unwrap();
        assert!(splits.train.x().iter().all(|v| v.is_finite()));
        assert!(splits.test.x().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_keep_test_distribution() {
        let (train, test) = frames();
        let splits = stage(false).transform_frames(&train, &test).unwrap();
        assert_eq!(splits.test.y().to_vec(), vec![0, 1, 0]);

        let counts = splits.train.class_counts();
        assert!(counts[&1] > 2);
    }

    #[test]
    fn test_zero_neighbors_fails_before_fitting() {
        let (train, test) = frames();
        let config = stage(false)
            .config()
            .clone()
            .with_resampler(ResamplerConfig::new().with_k_neighbors(0));
        let stage = DataTransformation::new(
            DataIngestionArtifact::new("train.csv", "test.csv"),
            DataValidationArtifact::passed(),
            config,
        );
        let err = stage.transform_frames(&train, &test).unwrap_err();
        assert!(matches!(err, PipelineError::ConfigError(_)));
    }

    #[test]
    fn test_failed_validation_reads_nothing() {
        let config = PipelineConfig::new(
            Schema::new(["id"], "class"),
            TransformationConfig::in_run_dir("unused"),
        );
        let stage = DataTransformation::new(
            DataIngestionArtifact::new("/nonexistent/train.csv", "/nonexistent/test.csv"),
            DataValidationArtifact::failed("schema drift detected"),
            config,
        );
        let err = stage.initiate_data_transformation().unwrap_err();
        assert!(matches!(err, PipelineError::UpstreamValidationFailed(_)));
        assert_eq!(err.to_string(), "schema drift detected");
    }
}
