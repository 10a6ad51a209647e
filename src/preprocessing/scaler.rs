//! Robust feature scaling using median and IQR

use super::{FittedTransformer, Transformer};
use crate::error::{PipelineError, Result};
use ndarray::{Array2, ArrayView1};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Robust scaler (unfitted): `(x - median) / IQR` per column.
///
/// Statistics are computed over the observed values of each column; missing
/// values (NaN) are skipped during fit and stay missing after transform.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RobustScaler {
    /// Quantile range for the IQR, in [0, 1]
    quantile_range: (f64, f64),
}

impl Default for RobustScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl RobustScaler {
    pub fn new() -> Self {
        Self {
            quantile_range: (0.25, 0.75),
        }
    }
}

/// Parameters learned by a [`RobustScaler`]; immutable once fitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedRobustScaler {
    center: Vec<f64>,
    scale: Vec<f64>,
}

impl FittedRobustScaler {
    /// Per-column median
    pub fn center(&self) -> &[f64] {
        &self.center
    }

    /// Per-column IQR, with zero ranges replaced by 1
    pub fn scale(&self) -> &[f64] {
        &self.scale
    }
}

/// Linear interpolation between closest ranks of a sorted slice
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = (lower + 1).min(sorted.len() - 1);
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

fn column_params(column: ArrayView1<'_, f64>, (q_low, q_high): (f64, f64)) -> (f64, f64) {
    let mut observed: Vec<f64> = column.iter().copied().filter(|v| !v.is_nan()).collect();
    if observed.is_empty() {
        return (0.0, 1.0);
    }
    observed.sort_by(|a, b| a.total_cmp(b));

    let median = quantile(&observed, 0.5);
    let iqr = quantile(&observed, q_high) - quantile(&observed, q_low);
    (median, if iqr == 0.0 { 1.0 } else { iqr })
}

fn check_finite(x: &Array2<f64>) -> Result<()> {
    if x.iter().any(|v| v.is_infinite()) {
        return Err(PipelineError::TransformError(
            "input contains infinite values".to_string(),
        ));
    }
    Ok(())
}

impl Transformer for RobustScaler {
    type Fitted = FittedRobustScaler;

    fn fit(&self, x: &Array2<f64>) -> Result<FittedRobustScaler> {
        let (rows, cols) = x.dim();
        if rows == 0 || cols == 0 {
            return Err(PipelineError::TransformError(format!(
                "cannot fit robust scaler on empty input ({} rows, {} columns)",
                rows, cols
            )));
        }
        check_finite(x)?;

        let range = self.quantile_range;
        let (center, scale): (Vec<f64>, Vec<f64>) = (0..cols)
            .into_par_iter()
            .map(|j| column_params(x.column(j), range))
            .unzip();

        Ok(FittedRobustScaler { center, scale })
    }
}

impl FittedTransformer for FittedRobustScaler {
    fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        let (rows, cols) = x.dim();
        if rows == 0 {
            return Err(PipelineError::TransformError(
                "cannot transform empty input".to_string(),
            ));
        }
        if cols != self.n_features_in() {
            return Err(PipelineError::TransformError(format!(
                "expected {} features, got {}",
                self.n_features_in(),
                cols
            )));
        }
        check_finite(x)?;

        let mut out = x.to_owned();
        for (j, mut column) in out.columns_mut().into_iter().enumerate() {
            let (center, scale) = (self.center[j], self.scale[j]);
            column.mapv_inplace(|v| (v - center) / scale);
        }
        Ok(out)
    }

    fn n_features_in(&self) -> usize {
        self.center.len()
    }
}
