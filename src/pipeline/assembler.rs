//! Joins features and target into the persisted array layout

use crate::dataset::LabeledData;
use crate::error::{PipelineError, Result};
use ndarray::{s, Array1, Array2};

/// Append the target as a trailing column: shape `[rows, features + 1]`
pub fn assemble_array(data: &LabeledData) -> Array2<f64> {
    let (rows, cols) = data.x().dim();
    let mut out = Array2::zeros((rows, cols + 1));
    out.slice_mut(s![.., ..cols]).assign(data.x());
    out.column_mut(cols).assign(&data.y().mapv(|label| label as f64));
    out
}

/// Split an assembled array back into features and integer target
pub fn disassemble_array(array: &Array2<f64>) -> Result<LabeledData> {
    let cols = array.ncols();
    if cols == 0 {
        return Err(PipelineError::ShapeError {
            expected: "at least one column".to_string(),
            actual: "0 columns".to_string(),
        });
    }
    let x = array.slice(s![.., ..cols - 1]).to_owned();
    let target = array.column(cols - 1);
    if let Some(bad) = target.iter().find(|v| v.fract() != 0.0 || !v.is_finite()) {
        return Err(PipelineError::DataError(format!(
            "target column holds non-class value {}",
            bad
        )));
    }
    let y: Array1<i64> = target.mapv(|v| v as i64);
    LabeledData::new(x, y)
}
