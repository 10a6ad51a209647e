//! Sensor Transform - data transformation stage of the APS sensor pipeline
//!
//! Turns validated train/test splits into model-ready numeric arrays:
//! - Schema-driven column selection and `neg`/`pos` target encoding
//! - Robust scaling fitted on the train split only
//! - Constant-zero imputation of missing readings
//! - SMOTE over-sampling followed by Tomek-link cleaning
//! - Atomic persistence of the arrays and the fitted transformer object
//!
//! # Modules
//!
//! ## Stage
//! - [`pipeline`] - The transformation stage and its configuration
//! - [`preprocessing`] - Column selection, scaling, imputation
//! - [`synthetic`] - Class-imbalance correction (SMOTE, Tomek links)
//! - [`export`] - Binary persistence of objects and arrays
//!
//! ## Collaborators
//! - [`data_access`] - Record store access with an explicit connection
//! - [`entity`] - Artifacts exchanged between stages
//! - [`estimator`] - Transformer object paired with a trained model
//!
//! ## Interfaces
//! - [`cli`] - Command-line interface

// Core error handling
pub mod error;

// Shared definitions
pub mod constants;
pub mod dataset;
pub mod entity;
pub mod schema;

// Stage
pub mod export;
pub mod pipeline;
pub mod preprocessing;
pub mod synthetic;

// Collaborators
pub mod data_access;
pub mod estimator;

// Utilities and interfaces
pub mod cli;
pub mod utils;

pub use error::{PipelineError, Result};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::dataset::LabeledData;
    pub use crate::entity::{DataIngestionArtifact, DataTransformationArtifact, DataValidationArtifact};
    pub use crate::error::{PipelineError, Result};
    pub use crate::estimator::{Predictor, SensorModel};
    pub use crate::export::{load_array, load_object, save_array, save_object, ArtifactWriter};
    pub use crate::pipeline::{assemble_array, DataTransformation, PipelineConfig, TransformationConfig};
    pub use crate::preprocessing::{
        ColumnSelector, ConstantImputer, FittedTransformer, RobustScaler, Transformer,
        TransformerObject,
    };
    pub use crate::schema::Schema;
    pub use crate::synthetic::{NeighborPolicy, ResamplerConfig, Sampler, SmoteTomek, TomekStrategy};
    pub use crate::utils::DataLoader;
}
