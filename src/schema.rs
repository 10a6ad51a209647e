//! Declarative schema for column selection

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

/// Columns to exclude from the features and the name of the target column.
///
/// Loaded once per run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "drop_col", default)]
    drop_columns: BTreeSet<String>,
    #[serde(rename = "target")]
    target_column: String,
}

impl Schema {
    pub fn new<I, S>(drop_columns: I, target_column: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            drop_columns: drop_columns.into_iter().map(Into::into).collect(),
            target_column: target_column.into(),
        }
    }

    /// Load a schema document from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            PipelineError::ConfigError(format!("cannot open schema {}: {}", path.display(), e))
        })?;
        let schema: Schema = serde_yaml::from_reader(file)?;
        schema.validate()?;
        Ok(schema)
    }

    /// Parse a schema document from a YAML string
    pub fn from_yaml_str(document: &str) -> Result<Self> {
        let schema: Schema = serde_yaml::from_str(document)?;
        schema.validate()?;
        Ok(schema)
    }

    fn validate(&self) -> Result<()> {
        if self.target_column.trim().is_empty() {
            return Err(PipelineError::ConfigError(
                "schema target column must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn drop_columns(&self) -> &BTreeSet<String> {
        &self.drop_columns
    }

    pub fn target_column(&self) -> &str {
        &self.target_column
    }

    /// True if the column never enters the feature matrix
    pub fn is_excluded(&self, column: &str) -> bool {
        column == self.target_column || self.drop_columns.contains(column)
    }
}
