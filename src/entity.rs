//! Artifacts exchanged between pipeline stages

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Output of the ingestion stage: the two split files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataIngestionArtifact {
    pub trained_file_path: PathBuf,
    pub test_file_path: PathBuf,
}

impl DataIngestionArtifact {
    pub fn new(trained_file_path: impl Into<PathBuf>, test_file_path: impl Into<PathBuf>) -> Self {
        Self {
            trained_file_path: trained_file_path.into(),
            test_file_path: test_file_path.into(),
        }
    }
}

/// Output of the validation stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataValidationArtifact {
    pub validation_status: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub drift_report_file_path: Option<PathBuf>,
}

impl DataValidationArtifact {
    pub fn passed() -> Self {
        Self {
            validation_status: true,
            message: String::new(),
            drift_report_file_path: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            validation_status: false,
            message: message.into(),
            drift_report_file_path: None,
        }
    }

    /// Load a validation result written as JSON by the validation stage
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::ConfigError(format!(
                "cannot read validation result {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Fail with the upstream message when validation did not pass
    pub fn ensure_passed(&self) -> Result<()> {
        if self.validation_status {
            Ok(())
        } else {
            Err(PipelineError::UpstreamValidationFailed(self.message.clone()))
        }
    }
}

/// Durable locations written by the transformation stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataTransformationArtifact {
    transformed_object_file_path: PathBuf,
    transformed_train_file_path: PathBuf,
    transformed_test_file_path: PathBuf,
}

impl DataTransformationArtifact {
    pub(crate) fn new(object: PathBuf, train: PathBuf, test: PathBuf) -> Self {
        Self {
            transformed_object_file_path: object,
            transformed_train_file_path: train,
            transformed_test_file_path: test,
        }
    }

    pub fn transformed_object_file_path(&self) -> &Path {
        &self.transformed_object_file_path
    }

    pub fn transformed_train_file_path(&self) -> &Path {
        &self.transformed_train_file_path
    }

    pub fn transformed_test_file_path(&self) -> &Path {
        &self.transformed_test_file_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_gate() {
        assert!(DataValidationArtifact::passed().ensure_passed().is_ok());

        let err = DataValidationArtifact::failed("schema drift detected")
            .ensure_passed()
            .unwrap_err();
        assert!(matches!(err, PipelineError::UpstreamValidationFailed(_)));
        assert_eq!(err.to_string(), "schema drift detected");
    }

    #[test]
    fn test_validation_from_json() {
        let parsed: DataValidationArtifact =
            serde_json::from_str(r#"{"validation_status": false, "message": "drift"}"#).unwrap();
        assert!(!parsed.validation_status);
        assert_eq!(parsed.message, "drift");
        assert!(parsed.drift_report_file_path.is_none());
    }
}
