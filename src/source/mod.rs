//! Event store abstraction.
//!
//! The dashboard reads the fault-event log through a page-at-a-time scan
//! interface. Each page carries raw items and an optional continuation key;
//! [`scan_all`] follows keys until the store runs out or the page limit is
//! reached.
//!
//! Implementations:
//!
//! - [`FileStore`]: a JSON export file, re-read on every scan
//! - [`MemoryStore`]: items pushed through a watch channel (tests, embedding)
//! - [`ApiStore`]: the remote scan API over HTTP

mod api;
mod file;
mod memory;

pub use api::ApiStore;
pub use file::FileStore;
pub use memory::MemoryStore;

use std::fmt::Debug;

use serde_json::Value;
use thiserror::Error;
use tokio::runtime::Handle;
use tracing::{debug, warn};

use faultwatch_adapters::scan_api::ScanResponse;
use faultwatch_adapters::AdapterError;

use crate::data::RawItem;
use crate::settings::{Settings, StoreKind};

/// One page of raw items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanPage {
    pub items: Vec<RawItem>,
    /// Key to resume from; `None` on the last page.
    pub last_evaluated_key: Option<Value>,
}

impl From<ScanResponse> for ScanPage {
    fn from(response: ScanResponse) -> Self {
        Self {
            items: response.items,
            last_evaluated_key: response.last_evaluated_key,
        }
    }
}

/// Errors reading from an event store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Read error: {0}")]
    Read(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Adapter(#[from] AdapterError),

    #[error("Store closed: {0}")]
    Closed(String),
}

/// Trait for reading raw items from a fault-event store.
///
/// # Example
///
/// ```
/// use faultwatch::source::{scan_all, EventStore, MemoryStore};
/// use serde_json::json;
///
/// let mut store = MemoryStore::from_items("demo", vec![json!({"device_id": "a"})], 100);
/// let scan = scan_all(&mut store, 10).unwrap();
/// assert_eq!(scan.items.len(), 1);
/// ```
pub trait EventStore: Send + Debug {
    /// Fetch one page, starting after `start_key` when given.
    fn scan_page(&mut self, start_key: Option<&Value>) -> Result<ScanPage, StoreError>;

    /// Returns a human-readable description of the store.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;
}

/// Items gathered by [`scan_all`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanResult {
    pub items: Vec<RawItem>,
    pub pages: usize,
    /// True when the page limit stopped the scan before the store ran out.
    pub truncated: bool,
}

/// Scan the whole store, following continuation keys for at most
/// `page_limit` pages (minimum one).
pub fn scan_all(store: &mut dyn EventStore, page_limit: usize) -> Result<ScanResult, StoreError> {
    let page_limit = page_limit.max(1);
    let mut result = ScanResult::default();
    let mut start_key: Option<Value> = None;

    loop {
        let page = store.scan_page(start_key.as_ref())?;
        result.pages += 1;
        result.items.extend(page.items);

        match page.last_evaluated_key {
            None => break,
            Some(_) if result.pages >= page_limit => {
                result.truncated = true;
                warn!(
                    store = store.description(),
                    pages = result.pages,
                    "scan stopped at page limit; older items not read"
                );
                break;
            }
            Some(key) => start_key = Some(key),
        }
    }

    debug!(
        store = store.description(),
        items = result.items.len(),
        pages = result.pages,
        "scan complete"
    );
    Ok(result)
}

/// Open the store described by `settings`.
///
/// `runtime` drives the HTTP client of an [`ApiStore`].
pub fn open_store(settings: &Settings, runtime: Handle) -> Result<Box<dyn EventStore>, StoreError> {
    let store = &settings.store;
    match store.kind {
        StoreKind::File => {
            let path = store
                .path
                .as_ref()
                .ok_or_else(|| StoreError::Read("no store path configured".to_string()))?;
            Ok(Box::new(FileStore::new(path)))
        }
        StoreKind::Api => Ok(Box::new(ApiStore::from_settings(store, runtime)?)),
    }
}
