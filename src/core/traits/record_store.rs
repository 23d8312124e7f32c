use crate::core::errors::Result;
use crate::core::models::attendance_record::RecordCollection;

/// Port for durable storage of the record cache.
///
/// Implementations live in `adapters::record_stores`. The collection is
/// always read and written as a whole.
pub trait RecordStore: Send + Sync {
    /// Load the persisted collection.
    ///
    /// Returns an empty collection when nothing was ever saved, and
    /// `StoreUnreadable` when persisted data cannot be decoded.
    fn load(&self) -> Result<RecordCollection>;

    /// Replace the persisted collection. A failed save must leave the
    /// previous snapshot readable.
    fn save(&self, collection: &RecordCollection) -> Result<()>;

    /// Human-readable location of the store (e.g. a file path).
    fn location(&self) -> String;
}
