//! Constant-fill imputation of missing values

use super::{FittedTransformer, Transformer};
use crate::error::{PipelineError, Result};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Value written into every missing cell
pub const FILL_VALUE: f64 = 0.0;

/// Imputer that replaces every NaN with [`FILL_VALUE`].
///
/// Fitting learns nothing beyond the feature count; it exists so the imputer
/// follows the same fit-then-transform protocol as the scaler.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ConstantImputer;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FittedImputer {
    fill_value: f64,
    n_features: usize,
}

impl FittedImputer {
    /// Imputer for `n_features` columns, without a fit pass
    pub fn constant(n_features: usize) -> Self {
        Self {
            fill_value: FILL_VALUE,
            n_features,
        }
    }

    pub fn fill_value(&self) -> f64 {
        self.fill_value
    }
}

impl Transformer for ConstantImputer {
    type Fitted = FittedImputer;

    fn fit(&self, x: &Array2<f64>) -> Result<FittedImputer> {
        if x.nrows() == 0 {
            return Err(PipelineError::TransformError(
                "cannot fit imputer on empty input".to_string(),
            ));
        }
        Ok(FittedImputer::constant(x.ncols()))
    }
}

impl FittedTransformer for FittedImputer {
    fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        if x.ncols() != self.n_features {
            return Err(PipelineError::TransformError(format!(
                "expected {} features, got {}",
                self.n_features,
                x.ncols()
            )));
        }
        let fill = self.fill_value;
        Ok(x.mapv(|v| if v.is_nan() { fill } else { v }))
    }

    fn n_features_in(&self) -> usize {
        self.n_features
    }
}
