//! Stage configuration

use crate::constants::{
    ARTIFACT_DIR, DATA_TRANSFORMATION_DIR_NAME, DATA_TRANSFORMATION_TRANSFORMED_DATA_DIR,
    DATA_TRANSFORMATION_TRANSFORMED_OBJECT_DIR, PREPROCESSING_OBJECT_FILE_NAME, TEST_FILE_NAME,
    TRAIN_FILE_NAME,
};
use crate::error::Result;
use crate::schema::Schema;
use crate::synthetic::ResamplerConfig;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Timestamp format used for run directories and log files
pub const TIMESTAMP_FORMAT: &str = "%m_%d_%Y_%H_%M_%S";

/// Current local time formatted as a run directory name
pub fn run_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Output locations of the transformation stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformationConfig {
    /// Root of everything this stage writes
    pub data_transformation_dir: PathBuf,

    pub transformed_train_file_path: PathBuf,

    pub transformed_test_file_path: PathBuf,

    pub transformed_object_file_path: PathBuf,
}

impl Default for TransformationConfig {
    fn default() -> Self {
        Self::new(ARTIFACT_DIR)
    }
}

impl TransformationConfig {
    /// Lay out the stage under `<artifact_dir>/<timestamp>/data_transformation`
    pub fn new(artifact_dir: impl AsRef<Path>) -> Self {
        Self::in_run_dir(artifact_dir.as_ref().join(run_timestamp()))
    }

    /// Lay out the stage under `<run_dir>/data_transformation`
    pub fn in_run_dir(run_dir: impl AsRef<Path>) -> Self {
        let root = run_dir.as_ref().join(DATA_TRANSFORMATION_DIR_NAME);
        let data_dir = root.join(DATA_TRANSFORMATION_TRANSFORMED_DATA_DIR);
        Self {
            transformed_train_file_path: data_dir.join(TRAIN_FILE_NAME),
            transformed_test_file_path: data_dir.join(TEST_FILE_NAME),
            transformed_object_file_path: root
                .join(DATA_TRANSFORMATION_TRANSFORMED_OBJECT_DIR)
                .join(PREPROCESSING_OBJECT_FILE_NAME),
            data_transformation_dir: root,
        }
    }

    /// Builder method to place the train array elsewhere
    pub fn with_train_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.transformed_train_file_path = path.into();
        self
    }

    /// Builder method to place the test array elsewhere
    pub fn with_test_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.transformed_test_file_path = path.into();
        self
    }

    /// Builder method to place the transformer object elsewhere
    pub fn with_object_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.transformed_object_file_path = path.into();
        self
    }
}

/// Everything the transformation stage needs besides its inputs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub schema: Schema,

    pub transformation: TransformationConfig,

    pub resampler: ResamplerConfig,

    /// Whether the test split is rebalanced like the train split.
    ///
    /// On by default. Rebalancing the test split changes its class
    /// distribution, so metrics computed on it no longer reflect the field.
    pub resample_test: bool,
}

impl PipelineConfig {
    pub fn new(schema: Schema, transformation: TransformationConfig) -> Self {
        Self {
            schema,
            transformation,
            resampler: ResamplerConfig::default(),
            resample_test: true,
        }
    }

    /// Load the schema document and lay out outputs under `artifact_dir`
    pub fn from_schema_file(
        schema_path: impl AsRef<Path>,
        artifact_dir: impl AsRef<Path>,
    ) -> Result<Self> {
        let schema = Schema::from_yaml_file(schema_path)?;
        Ok(Self::new(schema, TransformationConfig::new(artifact_dir)))
    }

    /// Builder method to set the resampler configuration
    pub fn with_resampler(mut self, resampler: ResamplerConfig) -> Self {
        self.resampler = resampler;
        self
    }

    /// Builder method to keep the test split's class distribution
    pub fn with_resample_test(mut self, resample_test: bool) -> Self {
        self.resample_test = resample_test;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_layout() {
        let config = TransformationConfig::in_run_dir("artifact/01_02_2024_03_04_05");
        let root = Path::new("artifact/01_02_2024_03_04_05/data_transformation");

        assert_eq!(config.data_transformation_dir, root);
        assert_eq!(
            config.transformed_train_file_path,
            root.join("transformed").join("train.bin")
        );
        assert_eq!(
            config.transformed_test_file_path,
            root.join("transformed").join("test.bin")
        );
        assert_eq!(
            config.transformed_object_file_path,
            root.join("transformed_object").join("preprocessing.bin")
        );
    }

    #[test]
    fn test_output_paths_can_be_moved() {
        let config = TransformationConfig::in_run_dir("run")
            .with_train_path("out/train.bin")
            .with_test_path("out/test.bin")
            .with_object_path("models/preprocessing.bin");

        assert_eq!(config.transformed_train_file_path, Path::new("out/train.bin"));
        assert_eq!(config.transformed_test_file_path, Path::new("out/test.bin"));
        assert_eq!(config.transformed_object_file_path, Path::new("models/preprocessing.bin"));
        assert_eq!(config.data_transformation_dir, Path::new("run/data_transformation"));
    }

    #[test]
    fn test_timestamped_run_dir() {
        let config = TransformationConfig::new("out");
        let run_dir = config
            .data_transformation_dir
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap()
            .to_string();
        assert_eq!(run_dir.len(), "01_02_2024_03_04_05".len());
        assert_eq!(run_dir.split('_').count(), 6);
    }

    #[test]
    fn test_pipeline_defaults() {
        let config = PipelineConfig::new(
            Schema::new(["id"], "class"),
            TransformationConfig::in_run_dir("run"),
        );
        assert!(config.resample_test);
        assert_eq!(config.resampler, ResamplerConfig::default());

        let config = config.with_resample_test(false);
        assert!(!config.resample_test);
    }
}
