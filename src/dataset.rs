//! Feature matrix and target vector kept in row lockstep

use crate::error::{PipelineError, Result};
use ndarray::{Array1, Array2, Axis};
use std::collections::BTreeMap;

/// Feature rows paired with their encoded class labels.
///
/// Row `i` of `x` always belongs to label `i` of `y`; every constructor and
/// every mapping checks the row counts so a misaligned pair cannot exist.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledData {
    x: Array2<f64>,
    y: Array1<i64>,
}

impl LabeledData {
    pub fn new(x: Array2<f64>, y: Array1<i64>) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(PipelineError::ShapeError {
                expected: format!("{} target values", x.nrows()),
                actual: format!("{} target values", y.len()),
            });
        }
        Ok(Self { x, y })
    }

    pub fn x(&self) -> &Array2<f64> {
        &self.x
    }

    pub fn y(&self) -> &Array1<i64> {
        &self.y
    }

    pub fn n_rows(&self) -> usize {
        self.y.len()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    pub fn into_parts(self) -> (Array2<f64>, Array1<i64>) {
        (self.x, self.y)
    }

    /// Replace the features with `f(x)`, keeping the labels.
    ///
    /// Fails if `f` changes the number of rows.
    pub fn map_features<F>(self, f: F) -> Result<Self>
    where
        F: FnOnce(&Array2<f64>) -> Result<Array2<f64>>,
    {
        let x = f(&self.x)?;
        Self::new(x, self.y)
    }

    /// Keep only the rows at `indices`, in that order
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        Self {
            x: self.x.select(Axis(0), indices),
            y: self.y.select(Axis(0), indices),
        }
    }

    /// Row count per class label
    pub fn class_counts(&self) -> BTreeMap<i64, usize> {
        let mut counts = BTreeMap::new();
        for &label in self.y.iter() {
            *counts.entry(label).or_insert(0) += 1;
        }
        counts
    }
}
