use crate::core::errors::Result;
use crate::core::models::raw_message::{MessageCursor, RawMessage};

/// Port for reading a channel's history backward in time.
pub trait MessageSource: Send + Sync {
    /// Fetch up to `limit` messages older than `before` (or the newest
    /// messages when `before` is `None`), newest first.
    ///
    /// An empty page means the history is exhausted. Transient failures
    /// are reported as `SourceUnavailable`.
    fn fetch_batch(&self, before: Option<&MessageCursor>, limit: usize) -> Result<Vec<RawMessage>>;
}
