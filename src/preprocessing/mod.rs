//! Data preprocessing module
//!
//! Provides the fit/transform steps applied to each split:
//! - Schema-driven column selection and target encoding
//! - Robust feature scaling (median / IQR)
//! - Constant-fill imputation of missing values
//! - The persistable transformer object used at inference time
//!
//! Fitting never mutates a transformer. [`Transformer::fit`] returns a new
//! fitted value, and only that value can transform data, so the state learned
//! from the training split is the state applied to every other split.

mod imputer;
mod object;
mod scaler;
mod selector;

pub use imputer::{ConstantImputer, FittedImputer, FILL_VALUE};
pub use object::TransformerObject;
pub use scaler::{FittedRobustScaler, RobustScaler};
pub use selector::{encode_label, encode_target, frame_to_matrix, ColumnSelector, SelectedSplit};

use crate::error::Result;
use ndarray::Array2;

/// An unfitted transformer holding only its configuration
pub trait Transformer {
    type Fitted: FittedTransformer;

    /// Learn parameters from training features
    fn fit(&self, x: &Array2<f64>) -> Result<Self::Fitted>;

    /// Fit on `x`, then transform `x` with the fitted state
    fn fit_transform(&self, x: &Array2<f64>) -> Result<(Self::Fitted, Array2<f64>)> {
        let fitted = self.fit(x)?;
        let out = fitted.transform(x)?;
        Ok((fitted, out))
    }
}

/// Learned, immutable transformer state
pub trait FittedTransformer {
    fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>>;

    /// Number of feature columns seen during fit
    fn n_features_in(&self) -> usize;
}
