//! Pairing of the persisted transformer object with a trained model

use crate::error::{PipelineError, Result};
use crate::preprocessing::TransformerObject;
use ndarray::{Array1, Array2};
use polars::prelude::DataFrame;
use std::path::Path;
use tracing::debug;

/// A trained classifier over transformed feature rows
pub trait Predictor {
    /// One class per row of `x`
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<i64>>;
}

/// Runs raw sensor frames through the training-time transformation, then
/// through the model.
#[derive(Debug, Clone)]
pub struct SensorModel<M: Predictor> {
    preprocessor: TransformerObject,
    model: M,
}

impl<M: Predictor> SensorModel<M> {
    pub fn new(preprocessor: TransformerObject, model: M) -> Self {
        Self {
            preprocessor,
            model,
        }
    }

    /// Load the transformer object written by the transformation stage
    pub fn load(object_path: impl AsRef<Path>, model: M) -> Result<Self> {
        Ok(Self::new(TransformerObject::load(object_path)?, model))
    }

    pub fn preprocessor(&self) -> &TransformerObject {
        &self.preprocessor
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn predict(&self, df: &DataFrame) -> Result<Array1<i64>> {
        let x = self.preprocessor.transform_frame(df)?;
        let predictions = self.model.predict(&x)?;
        if predictions.len() != x.nrows() {
            return Err(PipelineError::ShapeError {
                expected: format!("{} predictions", x.nrows()),
                actual: format!("{} predictions", predictions.len()),
            });
        }
        debug!(rows = x.nrows(), "predicted sensor frame");
        Ok(predictions)
    }
}
