//! Schema-driven column selection and target encoding

use crate::constants::{NEGATIVE_CLASS, NEGATIVE_LABEL, POSITIVE_CLASS, POSITIVE_LABEL};
use crate::dataset::LabeledData;
use crate::error::{PipelineError, Result};
use crate::schema::Schema;
use ndarray::{Array1, Array2};
use polars::prelude::*;

/// A split reduced to its numeric features and encoded target
#[derive(Debug, Clone)]
pub struct SelectedSplit {
    pub feature_names: Vec<String>,
    pub data: LabeledData,
}

/// Splits a frame into features and target according to a [`Schema`]
#[derive(Debug, Clone, Copy)]
pub struct ColumnSelector<'a> {
    schema: &'a Schema,
}

impl<'a> ColumnSelector<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Select features and encode the target of one split.
    ///
    /// Every drop column and the target must be present in `df`.
    pub fn select(&self, df: &DataFrame, split: &str) -> Result<SelectedSplit> {
        let feature_names: Vec<String> = self
            .check_columns(df, split)?
            .into_iter()
            .filter(|name| !self.schema.is_excluded(name))
            .collect();

        self.extract(df, split, feature_names)
    }

    /// Select the given feature columns, in that order, and encode the target.
    ///
    /// Used for the test split so its columns line up with the train split;
    /// columns the train split did not have are ignored.
    pub fn select_features(
        &self,
        df: &DataFrame,
        split: &str,
        feature_names: &[String],
    ) -> Result<SelectedSplit> {
        self.check_columns(df, split)?;
        self.extract(df, split, feature_names.to_vec())
    }

    /// Column names of `df`, after checking that the schema columns exist
    fn check_columns(&self, df: &DataFrame, split: &str) -> Result<Vec<String>> {
        let present: Vec<String> = df
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();

        for column in self
            .schema
            .drop_columns()
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.schema.target_column()))
        {
            if !present.iter().any(|p| p == column) {
                return Err(PipelineError::SchemaMismatch {
                    split: split.to_string(),
                    column: column.to_string(),
                });
            }
        }
        Ok(present)
    }

    fn extract(&self, df: &DataFrame, split: &str, feature_names: Vec<String>) -> Result<SelectedSplit> {
        let x = frame_to_matrix(df, &feature_names).map_err(|e| e.in_split(split))?;

        let target = df
            .column(self.schema.target_column())?
            .as_materialized_series();
        let y = encode_target(target).map_err(|e| e.in_split(split))?;

        Ok(SelectedSplit {
            feature_names,
            data: LabeledData::new(x, y)?,
        })
    }
}

/// Map a raw label to its class: `neg` to 0, `pos` to 1
pub fn encode_label(label: &str) -> Option<i64> {
    match label {
        NEGATIVE_LABEL => Some(NEGATIVE_CLASS),
        POSITIVE_LABEL => Some(POSITIVE_CLASS),
        _ => None,
    }
}

/// Encode a label series; any value outside the vocabulary is an error
pub fn encode_target(series: &Series) -> Result<Array1<i64>> {
    let column = series.name().to_string();
    let as_str = series.cast(&DataType::String)?;
    let ca = as_str.str()?;

    ca.into_iter()
        .map(|label| {
            let label = label.unwrap_or("<missing>");
            encode_label(label).ok_or_else(|| PipelineError::UnknownLabel {
                split: String::new(),
                column: column.clone(),
                label: label.to_string(),
            })
        })
        .collect::<Result<Vec<i64>>>()
        .map(Array1::from_vec)
}

/// Build a row-major feature matrix from the named columns.
///
/// Missing values become NaN. A column is accepted when its dtype is numeric
/// or when it holds no value at all.
pub fn frame_to_matrix(df: &DataFrame, columns: &[String]) -> Result<Array2<f64>> {
    let n_rows = df.height();
    let mut values: Vec<Vec<f64>> = Vec::with_capacity(columns.len());

    for name in columns {
        let column = df.column(name).map_err(|_| PipelineError::SchemaMismatch {
            split: String::new(),
            column: name.clone(),
        })?;
        values.push(column_values(column.as_materialized_series())?);
    }

    Ok(Array2::from_shape_fn((n_rows, columns.len()), |(i, j)| {
        values[j][i]
    }))
}

fn column_values(series: &Series) -> Result<Vec<f64>> {
    if series.null_count() == series.len() {
        return Ok(vec![f64::NAN; series.len()]);
    }
    if !is_numeric_dtype(series.dtype()) {
        return Err(PipelineError::TransformError(format!(
            "column '{}' has non-numeric dtype {}",
            series.name(),
            series.dtype()
        )));
    }

    let cast = series.cast(&DataType::Float64)?;
    let ca = cast.f64()?;
    Ok(ca.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}
