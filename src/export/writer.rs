//! All-or-nothing writer for a group of artifact files

use crate::error::{PipelineError, Result};
use ndarray::Array2;
use serde::Serialize;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempPath};
use tracing::{debug, warn};

/// Stages several files and publishes them together.
///
/// Each staged file is written to a temporary sibling of its destination.
/// [`commit`](Self::commit) renames them in staging order; if one rename
/// fails, the files already renamed are removed, any files they replaced are
/// moved back, and the remaining temporary files are dropped. A crash between
/// two renames can still leave the earlier files in place.
#[derive(Debug, Default)]
pub struct ArtifactWriter {
    staged: Vec<(PathBuf, NamedTempFile)>,
}

impl ArtifactWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize `value` into a temporary file next to `path`
    pub fn stage_object<T: Serialize>(&mut self, path: impl AsRef<Path>, value: &T) -> Result<()> {
        let path = path.as_ref();
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(|e| PipelineError::persistence(path, e))?;

        let mut tmp = NamedTempFile::new_in(&parent).map_err(|e| PipelineError::persistence(path, e))?;
        {
            let mut out = BufWriter::new(tmp.as_file_mut());
            bincode::serialize_into(&mut out, value)
                .map_err(|e| PipelineError::persistence(path, e))?;
            out.flush().map_err(|e| PipelineError::persistence(path, e))?;
        }
        tmp.as_file()
            .sync_all()
            .map_err(|e| PipelineError::persistence(path, e))?;

        debug!(path = %path.display(), "staged artifact");
        self.staged.push((path.to_path_buf(), tmp));
        Ok(())
    }

    pub fn stage_array(&mut self, path: impl AsRef<Path>, array: &Array2<f64>) -> Result<()> {
        self.stage_object(path, array)
    }

    /// Number of files waiting to be committed
    pub fn len(&self) -> usize {
        self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    /// Move every staged file into place, or none of them
    pub fn commit(self) -> Result<Vec<PathBuf>> {
        let mut published: Vec<(PathBuf, Option<TempPath>)> = Vec::with_capacity(self.staged.len());

        for (path, tmp) in self.staged {
            let backup = match backup_existing(&path) {
                Ok(backup) => backup,
                Err(err) => {
                    rollback(published);
                    return Err(err);
                }
            };
            if let Err(err) = tmp.persist(&path) {
                if let Some(backup) = &backup {
                    restore(&path, backup);
                }
                rollback(published);
                return Err(PipelineError::persistence(&path, err.error));
            }
            published.push((path, backup));
        }

        // backups of replaced files are deleted when dropped
        Ok(published.into_iter().map(|(path, _)| path).collect())
    }
}

/// Move a file already at `path` aside so a failed commit can put it back
fn backup_existing(path: &Path) -> Result<Option<TempPath>> {
    if !path.is_file() {
        return Ok(None);
    }
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let backup = NamedTempFile::new_in(parent)
        .map_err(|e| PipelineError::persistence(path, e))?
        .into_temp_path();
    fs::rename(path, &backup).map_err(|e| PipelineError::persistence(path, e))?;
    debug!(path = %path.display(), "moved previous artifact aside");
    Ok(Some(backup))
}

fn restore(path: &Path, backup: &TempPath) {
    if let Err(e) = fs::rename(backup, path) {
        warn!(path = %path.display(), error = %e, "failed to restore previous artifact");
    }
}

fn rollback(published: Vec<(PathBuf, Option<TempPath>)>) {
    for (path, backup) in published.into_iter().rev() {
        if let Err(e) = fs::remove_file(&path) {
            warn!(path = %path.display(), error = %e, "failed to roll back artifact");
        }
        if let Some(backup) = backup {
            restore(&path, &backup);
        }
    }
}
