//! Data loading utilities

use crate::constants::MISSING_TOKEN;
use crate::error::{PipelineError, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Loader for the comma-separated split files
#[derive(Debug, Clone)]
pub struct DataLoader {
    /// Tokens parsed as missing in addition to empty fields
    null_tokens: Vec<String>,
    /// Rows scanned for dtype inference; `None` scans the whole file
    infer_schema_length: Option<usize>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    /// Create a loader that treats `na` as missing
    pub fn new() -> Self {
        Self {
            null_tokens: vec![MISSING_TOKEN.to_string()],
            infer_schema_length: None,
        }
    }

    /// Add another token that marks a missing value
    pub fn with_null_token(mut self, token: impl Into<String>) -> Self {
        self.null_tokens.push(token.into());
        self
    }

    /// Limit dtype inference to the first `n` rows
    pub fn with_infer_schema_length(mut self, n: usize) -> Self {
        self.infer_schema_length = Some(n);
        self
    }

    /// Load a CSV file with a header row
    pub fn load_csv(&self, path: impl AsRef<Path>) -> Result<DataFrame> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| PipelineError::DataError(format!("{}: {}", path.display(), e)))?;

        let null_values = NullValues::AllColumns(
            self.null_tokens.iter().map(|t| t.as_str().into()).collect(),
        );
        let parse_opts = CsvParseOptions::default().with_null_values(Some(null_values));

        CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(self.infer_schema_length)
            .with_parse_options(parse_opts)
            .into_reader_with_file_handle(file)
            .finish()
            .map_err(|e| PipelineError::DataError(format!("{}: {}", path.display(), e)))
    }
}

/// Save DataFrames back to disk
pub struct DataSaver;

impl DataSaver {
    /// Save to CSV
    pub fn save_csv(df: &mut DataFrame, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut file = File::create(path)
            .map_err(|e| PipelineError::DataError(format!("{}: {}", path.display(), e)))?;

        CsvWriter::new(&mut file)
            .finish(df)
            .map_err(|e| PipelineError::DataError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_sensor_csv() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "class,aa_000,ab_000").unwrap();
        writeln!(file, "neg,76698,na").unwrap();
        writeln!(file, "pos,33058,0").unwrap();
        writeln!(file, "neg,41040,na").unwrap();
        file
    }

    #[test]
    fn test_load_csv() {
        let file = create_sensor_csv();
        let df = DataLoader::new().load_csv(file.path()).unwrap();

        assert_eq!(df.height(), 3);
        assert_eq!(df.width(), 3);
    }

    #[test]
    fn test_na_token_is_missing() {
        let file = create_sensor_csv();
        let df = DataLoader::new().load_csv(file.path()).unwrap();

        let col = df.column("ab_000").unwrap();
        assert_eq!(col.null_count(), 2);
        assert_eq!(col.dtype(), &DataType::Int64);
    }

    #[test]
    fn test_extra_null_token() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "class,aa_000,ab_000").unwrap();
        writeln!(file, "neg,76698,?").unwrap();
        writeln!(file, "pos,na,0").unwrap();
        writeln!(file, "neg,41040,?").unwrap();

        let df = DataLoader::new()
            .with_null_token("?")
            .with_infer_schema_length(2)
            .load_csv(file.path())
            .unwrap();

        let ab = df.column("ab_000").unwrap();
        assert_eq!(ab.null_count(), 2);
        assert_eq!(ab.dtype(), &DataType::Int64);
        // the default token still applies
        assert_eq!(df.column("aa_000").unwrap().null_count(), 1);
    }

    #[test]
    fn test_missing_file_is_data_error() {
        let err = DataLoader::new().load_csv("/nonexistent/train.csv").unwrap_err();
        assert!(matches!(err, PipelineError::DataError(_)));
    }

    #[test]
    fn test_save_csv_round_trip() {
        let mut df = df!(
            "a" => &[1, 2, 3],
            "b" => &["neg", "pos", "neg"],
        )
        .unwrap();

        let file = NamedTempFile::new().unwrap();
        DataSaver::save_csv(&mut df, file.path()).unwrap();

        let loaded = DataLoader::new().load_csv(file.path()).unwrap();
        assert_eq!(loaded.height(), 3);
        assert_eq!(loaded.width(), 2);
    }
}
