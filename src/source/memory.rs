//! In-memory event store.
//!
//! Holds the current table contents in a tokio watch channel. A producer
//! replaces the contents through the sender; every scan sees the latest
//! value. Pages are cut at `page_size` items with an offset continuation
//! key, so pagination behaves like a remote store.

use serde_json::{json, Value};
use tokio::sync::watch;

use super::{EventStore, ScanPage, StoreError};

/// An event store fed through a channel.
///
/// # Example
///
/// ```
/// use faultwatch::source::MemoryStore;
/// use serde_json::json;
///
/// let (tx, store) = MemoryStore::create("plant-sim", 100);
/// tx.send(vec![json!({"device_id": "press-04"})]).unwrap();
/// ```
#[derive(Debug)]
pub struct MemoryStore {
    receiver: watch::Receiver<Vec<Value>>,
    description: String,
    page_size: usize,
}

impl MemoryStore {
    /// Create a store reading from `receiver`.
    pub fn new(
        receiver: watch::Receiver<Vec<Value>>,
        source_description: &str,
        page_size: usize,
    ) -> Self {
        Self {
            receiver,
            description: format!("memory: {}", source_description),
            page_size: page_size.max(1),
        }
    }

    /// Create a channel pair. The sender replaces the table contents.
    pub fn create(source_description: &str, page_size: usize) -> (watch::Sender<Vec<Value>>, Self) {
        let (tx, rx) = watch::channel(Vec::new());
        (tx, Self::new(rx, source_description, page_size))
    }

    /// Create a store with fixed contents.
    pub fn from_items(source_description: &str, items: Vec<Value>, page_size: usize) -> Self {
        let (_tx, rx) = watch::channel(items);
        Self::new(rx, source_description, page_size)
    }
}

fn offset_of(key: Option<&Value>) -> Result<usize, StoreError> {
    match key {
        None => Ok(0),
        Some(key) => key["offset"]
            .as_u64()
            .map(|o| o as usize)
            .ok_or_else(|| StoreError::Parse(format!("bad continuation key {}", key))),
    }
}

impl EventStore for MemoryStore {
    fn scan_page(&mut self, start_key: Option<&Value>) -> Result<ScanPage, StoreError> {
        let offset = offset_of(start_key)?;
        let items = self.receiver.borrow();

        let end = (offset + self.page_size).min(items.len());
        let page = items.get(offset..end).map(<[Value]>::to_vec).unwrap_or_default();
        let last_evaluated_key = (end < items.len()).then(|| json!({"offset": end}));

        Ok(ScanPage {
            items: page,
            last_evaluated_key,
        })
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_replaces_contents() {
        let (tx, mut store) = MemoryStore::create("test", 10);
        assert!(store.scan_page(None).unwrap().items.is_empty());

        tx.send(vec![json!({"device_id": "a"}), json!({"device_id": "b"})]).unwrap();
        let page = store.scan_page(None).unwrap();
        assert_eq!(page.items.len(), 2);
        assert!(page.last_evaluated_key.is_none());
    }

    #[test]
    fn test_pages_with_offset_keys() {
        let items = (0..5).map(|i| json!({"n": i})).collect();
        let mut store = MemoryStore::from_items("test", items, 2);

        let first = store.scan_page(None).unwrap();
        assert_eq!(first.items, vec![json!({"n": 0}), json!({"n": 1})]);
        assert_eq!(first.last_evaluated_key, Some(json!({"offset": 2})));

        let last = store.scan_page(Some(&json!({"offset": 4}))).unwrap();
        assert_eq!(last.items, vec![json!({"n": 4})]);
        assert!(last.last_evaluated_key.is_none());
    }

    #[test]
    fn test_offset_past_end_is_empty() {
        let mut store = MemoryStore::from_items("test", vec![json!(1)], 2);
        let page = store.scan_page(Some(&json!({"offset": 9}))).unwrap();
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_bad_key() {
        let mut store = MemoryStore::from_items("test", vec![], 2);
        assert!(matches!(
            store.scan_page(Some(&json!("nope"))),
            Err(StoreError::Parse(_))
        ));
    }
}
