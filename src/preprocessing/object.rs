//! Persistable preprocessing object reused at inference time

use super::imputer::FittedImputer;
use super::scaler::FittedRobustScaler;
use super::selector::frame_to_matrix;
use super::FittedTransformer;
use crate::error::{PipelineError, Result};
use crate::export;
use ndarray::Array2;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// The fitted transformer written next to the transformed arrays.
///
/// Holds the train-fitted scaler and the feature columns it was fitted on, so
/// that raw inference frames can be transformed exactly like training data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformerObject {
    feature_names: Vec<String>,
    scaler: FittedRobustScaler,
}

impl TransformerObject {
    pub fn new(feature_names: Vec<String>, scaler: FittedRobustScaler) -> Result<Self> {
        if feature_names.len() != scaler.n_features_in() {
            return Err(PipelineError::ShapeError {
                expected: format!("{} feature names", scaler.n_features_in()),
                actual: format!("{} feature names", feature_names.len()),
            });
        }
        Ok(Self {
            feature_names,
            scaler,
        })
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn scaler(&self) -> &FittedRobustScaler {
        &self.scaler
    }

    /// Scale and impute an already selected feature matrix
    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        let scaled = self.scaler.transform(x)?;
        FittedImputer::constant(self.scaler.n_features_in()).transform(&scaled)
    }

    /// Select the fitted feature columns from a raw frame, then transform.
    ///
    /// Extra columns are ignored; a missing feature column is a schema mismatch.
    pub fn transform_frame(&self, df: &DataFrame) -> Result<Array2<f64>> {
        debug!(rows = df.height(), "transforming inference frame");
        let x = frame_to_matrix(df, &self.feature_names).map_err(|e| e.in_split("inference"))?;
        self.transform(&x).map_err(|e| e.in_split("inference"))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        export::load_object(path)
    }
}
