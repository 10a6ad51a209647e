//! Error types for the sensor transformation stage

use thiserror::Error;

/// Result type alias for transformation operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Main error type for the transformation stage
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Schema mismatch in {split} split: column '{column}' not found")]
    SchemaMismatch { split: String, column: String },

    #[error("Unknown label '{label}' in target column '{column}' of {split} split")]
    UnknownLabel {
        split: String,
        column: String,
        label: String,
    },

    #[error("Transform error: {0}")]
    TransformError(String),

    #[error("Insufficient samples in {split} split: {reason}")]
    InsufficientSamples { split: String, reason: String },

    /// Surfaces the validation collaborator's message verbatim.
    #[error("{0}")]
    UpstreamValidationFailed(String),

    #[error("Persistence error at {path}: {reason}")]
    PersistenceError { path: String, reason: String },

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },
}

impl PipelineError {
    /// Attach the split name to errors that carry one.
    pub fn in_split(self, name: &str) -> Self {
        match self {
            PipelineError::SchemaMismatch { column, .. } => PipelineError::SchemaMismatch {
                split: name.to_string(),
                column,
            },
            PipelineError::UnknownLabel { column, label, .. } => PipelineError::UnknownLabel {
                split: name.to_string(),
                column,
                label,
            },
            PipelineError::InsufficientSamples { reason, .. } => {
                PipelineError::InsufficientSamples {
                    split: name.to_string(),
                    reason,
                }
            }
            PipelineError::TransformError(msg) => {
                PipelineError::TransformError(format!("{} split: {}", name, msg))
            }
            other => other,
        }
    }

    pub(crate) fn persistence(path: impl AsRef<std::path::Path>, reason: impl ToString) -> Self {
        PipelineError::PersistenceError {
            path: path.as_ref().display().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<polars::error::PolarsError> for PipelineError {
    fn from(err: polars::error::PolarsError) -> Self {
        PipelineError::DataError(err.to_string())
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        PipelineError::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for PipelineError {
    fn from(err: serde_yaml::Error) -> Self {
        PipelineError::ConfigError(err.to_string())
    }
}

impl From<bincode::Error> for PipelineError {
    fn from(err: bincode::Error) -> Self {
        PipelineError::SerializationError(err.to_string())
    }
}

impl From<ndarray::ShapeError> for PipelineError {
    fn from(err: ndarray::ShapeError) -> Self {
        PipelineError::ShapeError {
            expected: "valid shape".to_string(),
            actual: err.to_string(),
        }
    }
}
