//! Access to the raw sensor record store
//!
//! The store is a directory tree: `<root>/<database>/<collection>.csv`. A
//! [`StoreConnection`] is opened explicitly and handed to the readers that
//! need it; nothing is cached in process-wide state.

use crate::constants::{DB_NAME, RECORD_ID_COLUMN, STORE_URL_KEY};
use crate::error::{PipelineError, Result};
use crate::utils::DataLoader;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// An open handle on the record store
#[derive(Debug)]
pub struct StoreConnection {
    root: PathBuf,
}

impl StoreConnection {
    /// Open the store rooted at `url`, a directory path or a `file://` URL
    pub fn open(url: &str) -> Result<Self> {
        let root = PathBuf::from(url.strip_prefix("file://").unwrap_or(url));
        if !root.is_dir() {
            return Err(PipelineError::ConfigError(format!(
                "record store {} is not a directory",
                root.display()
            )));
        }
        info!(root = %root.display(), "opened record store");
        Ok(Self { root })
    }

    /// Open the store named by the `SENSOR_STORE_URL` environment variable
    pub fn from_env() -> Result<Self> {
        let url = std::env::var(STORE_URL_KEY).map_err(|_| {
            PipelineError::ConfigError(format!("environment variable {} is not set", STORE_URL_KEY))
        })?;
        Self::open(&url)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the collections of `name`
    pub fn database(&self, name: &str) -> Result<PathBuf> {
        let dir = self.root.join(name);
        if !dir.is_dir() {
            return Err(PipelineError::DataError(format!(
                "database '{}' not found under {}",
                name,
                self.root.display()
            )));
        }
        Ok(dir)
    }

    /// End the connection's lifecycle
    pub fn close(self) {
        debug!(root = %self.root.display(), "closed record store");
    }
}

/// Exports sensor collections as data frames
#[derive(Debug)]
pub struct SensorData<'a> {
    connection: &'a StoreConnection,
    loader: DataLoader,
}

impl<'a> SensorData<'a> {
    pub fn new(connection: &'a StoreConnection) -> Self {
        Self {
            connection,
            loader: DataLoader::new(),
        }
    }

    /// Read a whole collection.
    ///
    /// The record id column is dropped and the `na` token becomes missing.
    /// `database` defaults to the sensor database.
    pub fn export_collection_as_dataframe(
        &self,
        collection: &str,
        database: Option<&str>,
    ) -> Result<DataFrame> {
        let db_dir = self.connection.database(database.unwrap_or(DB_NAME))?;
        let path = db_dir.join(format!("{}.csv", collection));
        if !path.is_file() {
            return Err(PipelineError::DataError(format!(
                "collection '{}' not found in {}",
                collection,
                db_dir.display()
            )));
        }

        let mut df = self.loader.load_csv(&path)?;
        if df.get_column_index(RECORD_ID_COLUMN).is_some() {
            df = df.drop(RECORD_ID_COLUMN)?;
        }
        info!(
            collection,
            rows = df.height(),
            columns = df.width(),
            "exported collection"
        );
        Ok(df)
    }
}
