//! Artifact persistence
//!
//! Provides binary (bincode) persistence of:
//! - the fitted transformer object
//! - the assembled numeric arrays
//!
//! Every write goes through [`ArtifactWriter`], which stages to temporary
//! files and renames them into place only once all of them are written.

mod writer;

pub use writer::ArtifactWriter;

use crate::error::{PipelineError, Result};
use ndarray::Array2;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Save any serializable object to `path`
pub fn save_object<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let mut writer = ArtifactWriter::new();
    writer.stage_object(path, value)?;
    writer.commit().map(|_| ())
}

/// Load an object saved with [`save_object`]
pub fn load_object<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| PipelineError::persistence(path, e))?;
    Ok(bincode::deserialize_from(BufReader::new(file))?)
}

/// Save a numeric array to `path`
pub fn save_array(path: impl AsRef<Path>, array: &Array2<f64>) -> Result<()> {
    save_object(path, array)
}

/// Load an array saved with [`save_array`]
pub fn load_array(path: impl AsRef<Path>) -> Result<Array2<f64>> {
    load_object(path)
}
