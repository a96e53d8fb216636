//! File-based event store.
//!
//! Reads a JSON export of the fault-event table. The file may hold either a
//! bare array of items or a scan response (`{"Items": [...]}`); it is re-read
//! on every scan so external writers are picked up on the next refresh.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use super::{EventStore, ScanPage, StoreError};

#[derive(Deserialize)]
#[serde(untagged)]
enum ExportFile {
    Items(Vec<Value>),
    Page {
        #[serde(rename = "Items", default)]
        items: Vec<Value>,
        #[serde(rename = "LastEvaluatedKey", default)]
        last_evaluated_key: Option<Value>,
    },
}

/// An event store backed by a JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    description: String,
}

impl FileStore {
    /// Create a new file store for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventStore for FileStore {
    /// The whole file is one page. A `LastEvaluatedKey` recorded in the
    /// export is ignored since there is nothing more to read.
    fn scan_page(&mut self, _start_key: Option<&Value>) -> Result<ScanPage, StoreError> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| StoreError::Read(format!("{}: {}", self.path.display(), e)))?;

        let items = match serde_json::from_str(&content) {
            Ok(ExportFile::Items(items)) => items,
            Ok(ExportFile::Page { items, .. }) => items,
            Err(e) => return Err(StoreError::Parse(e.to_string())),
        };

        Ok(ScanPage {
            items,
            last_evaluated_key: None,
        })
    }

    fn description(&self) -> &str {
        &self.description
    }
}
