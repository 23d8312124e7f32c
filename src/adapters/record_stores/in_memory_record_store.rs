use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::core::errors::{KintaiError, Result};
use crate::core::models::attendance_record::RecordCollection;
use crate::core::traits::record_store::RecordStore;

/// Record store kept in process memory.
///
/// Clones share the same snapshot, so a test can hold one handle while a
/// service owns another. `set_offline(true)` makes every save fail.
#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    snapshot: Mutex<RecordCollection>,
    offline: AtomicBool,
    saves: AtomicUsize,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing snapshot.
    pub fn with_records(collection: RecordCollection) -> Self {
        let store = Self::new();
        *store.lock() = collection;
        store
    }

    pub fn set_offline(&self, offline: bool) {
        self.inner.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.inner.saves.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RecordCollection> {
        self.inner
            .snapshot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RecordStore for InMemoryRecordStore {
    fn load(&self) -> Result<RecordCollection> {
        Ok(self.lock().clone())
    }

    fn save(&self, collection: &RecordCollection) -> Result<()> {
        if self.inner.offline.load(Ordering::SeqCst) {
            return Err(KintaiError::StoreUnwritable {
                path: "memory".into(),
                detail: "store offline".into(),
            });
        }
        *self.lock() = collection.clone();
        self.inner.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::attendance_record::AttendanceRecord;
    use crate::core::models::category::Category;
    use chrono::{Local, TimeZone};

    fn sample() -> RecordCollection {
        RecordCollection::from_sorted(vec![AttendanceRecord {
            timestamp: Local.with_ymd_and_hms(2026, 2, 2, 19, 0, 0).unwrap(),
            author: "<@1>".into(),
            category: Category::Zangyo,
        }])
        .unwrap()
    }

    #[test]
    fn load_defaults_to_empty() {
        let store = InMemoryRecordStore::new();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn clones_share_snapshot() {
        let store = InMemoryRecordStore::new();
        let handle = store.clone();
        store.save(&sample()).unwrap();

        assert_eq!(handle.load().unwrap(), sample());
        assert_eq!(handle.save_count(), 1);
    }

    #[test]
    fn offline_save_keeps_previous_snapshot() {
        let store = InMemoryRecordStore::with_records(sample());
        store.set_offline(true);

        let result = store.save(&RecordCollection::new());
        assert!(matches!(result, Err(KintaiError::StoreUnwritable { .. })));
        assert_eq!(store.load().unwrap(), sample());
        assert_eq!(store.save_count(), 0);
    }
}
