use std::sync::Mutex;

use chrono::{DateTime, Local};

use crate::core::errors::{KintaiError, Result};
use crate::core::models::attendance_record::{AttendanceRecord, RecordCollection};
use crate::core::models::category::Category;
use crate::core::models::raw_message::{MessageCursor, RawMessage};
use crate::core::services::classifier::classify;
use crate::core::traits::message_source::MessageSource;
use crate::core::traits::record_store::RecordStore;

/// Largest page a source is asked for.
pub const MAX_BATCH_SIZE: usize = 100;

/// Tuning knobs for a sync pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    /// Messages requested per page (1..=100).
    pub batch_size: usize,
    /// Attempts per page before a `SourceUnavailable` error aborts the pass.
    pub max_attempts: u32,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            batch_size: MAX_BATCH_SIZE,
            max_attempts: 3,
        }
    }
}

/// Why pagination ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A classified message at or before the cache head was reached.
    ReachedCache,
    /// The source returned an empty page.
    Exhausted,
}

/// Outcome of one sync pass.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    /// The merged collection, as persisted.
    pub collection: RecordCollection,
    /// Records discovered by this pass.
    pub added: usize,
    /// Pages fetched successfully.
    pub pages: usize,
    pub stop_reason: StopReason,
    /// Set when the stored snapshot could not be read and the pass
    /// started from an empty cache instead.
    pub recovered_from: Option<String>,
}

/// Brings the record cache up to date with a message source.
///
/// A pass reads the stored snapshot, pages backward through the source
/// until it reaches the snapshot's head (or the start of history),
/// prepends what it found and writes the result back. Passes through the
/// same service are serialized, and a pass refuses to save if the store's
/// head moved while it was running.
pub struct SyncService<S: RecordStore> {
    store: S,
    options: SyncOptions,
    pass: Mutex<()>,
}

impl<S: RecordStore> SyncService<S> {
    pub fn new(store: S, options: SyncOptions) -> Self {
        Self {
            store,
            options,
            pass: Mutex::new(()),
        }
    }

    /// Run a full pass against the stored snapshot.
    pub fn sync(&self, source: &dyn MessageSource) -> Result<SyncReport> {
        let _pass = self.lock_pass();
        let (existing, recovered_from) = self.load_existing()?;
        let mut report = self.run_pass(source, existing)?;
        report.recovered_from = recovered_from;
        Ok(report)
    }

    fn lock_pass(&self) -> std::sync::MutexGuard<'_, ()> {
        self.pass
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Load the stored snapshot, degrading to an empty cache when it is
    /// unreadable.
    fn load_existing(&self) -> Result<(RecordCollection, Option<String>)> {
        match self.store.load() {
            Ok(collection) => Ok((collection, None)),
            Err(e @ KintaiError::StoreUnreadable { .. }) => {
                tracing::warn!(
                    store = %self.store.location(),
                    error = %e,
                    "record store unreadable, rebuilding from full history"
                );
                Ok((RecordCollection::new(), Some(e.to_string())))
            }
            Err(e) => Err(e),
        }
    }

    fn run_pass(&self, source: &dyn MessageSource, existing: RecordCollection) -> Result<SyncReport> {
        let head = existing.head_timestamp();
        let found = collect_new_records(source, head, &self.options)?;
        let added = found.records.len();

        let mut collection = existing;
        collection.prepend(found.records);

        self.ensure_head_unchanged(head)?;
        self.store.save(&collection)?;

        tracing::info!(
            added,
            total = collection.len(),
            pages = found.pages,
            stop_reason = ?found.stop_reason,
            "sync pass complete"
        );

        Ok(SyncReport {
            collection,
            added,
            pages: found.pages,
            stop_reason: found.stop_reason,
            recovered_from: None,
        })
    }

    /// Compare-and-swap guard: the store head must still be the one the
    /// pass started from.
    fn ensure_head_unchanged(&self, expected: Option<DateTime<Local>>) -> Result<()> {
        // An unreadable store counts as empty, matching load_existing
        let actual = self.store.load().ok().and_then(|c| c.head_timestamp());
        if actual == expected {
            return Ok(());
        }
        Err(KintaiError::StaleSnapshot {
            expected: describe_head(expected),
            actual: describe_head(actual),
        })
    }
}

fn describe_head(head: Option<DateTime<Local>>) -> String {
    head.map(|t| t.to_rfc3339())
        .unwrap_or_else(|| "empty".to_string())
}

struct Pagination {
    records: Vec<AttendanceRecord>,
    pages: usize,
    stop_reason: StopReason,
}

/// Page backward through `source`, collecting records strictly newer than
/// `boundary` (everything when `boundary` is `None`), newest first.
fn collect_new_records(
    source: &dyn MessageSource,
    boundary: Option<DateTime<Local>>,
    options: &SyncOptions,
) -> Result<Pagination> {
    let limit = options.batch_size.clamp(1, MAX_BATCH_SIZE);
    let mut records = Vec::new();
    let mut before: Option<MessageCursor> = None;
    let mut last_seen: Option<DateTime<Local>> = None;
    let mut pages = 0;

    let stop_reason = loop {
        let batch = fetch_with_retry(source, before.as_ref(), limit, options.max_attempts)?;
        let Some(oldest) = batch.last() else {
            break StopReason::Exhausted;
        };
        pages += 1;
        tracing::debug!(page = pages, messages = batch.len(), "fetched page");

        let mut reached_cache = false;
        for message in &batch {
            let Some(category) = classify(&message.text) else {
                continue;
            };
            let timestamp = message.created_at.with_timezone(&Local);

            if let Some(previous) = last_seen
                && timestamp > previous
            {
                return Err(KintaiError::SourceOutOfOrder {
                    older: previous.to_rfc3339(),
                    newer: timestamp.to_rfc3339(),
                });
            }
            last_seen = Some(timestamp);

            if boundary.is_none_or(|b| timestamp > b) {
                records.push(to_record(message, timestamp, category));
            } else {
                reached_cache = true;
            }
        }

        if reached_cache {
            tracing::debug!(page = pages, "reached cached history");
            break StopReason::ReachedCache;
        }
        before = Some(oldest.cursor());
    };

    Ok(Pagination {
        records,
        pages,
        stop_reason,
    })
}

fn to_record(
    message: &RawMessage,
    timestamp: DateTime<Local>,
    category: Category,
) -> AttendanceRecord {
    AttendanceRecord {
        timestamp,
        author: message.author.clone(),
        category,
    }
}

fn fetch_with_retry(
    source: &dyn MessageSource,
    before: Option<&MessageCursor>,
    limit: usize,
    max_attempts: u32,
) -> Result<Vec<RawMessage>> {
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match source.fetch_batch(before, limit) {
            Ok(batch) => return Ok(batch),
            Err(e @ KintaiError::SourceUnavailable { .. }) if attempt < max_attempts => {
                tracing::warn!(attempt, max_attempts, error = %e, "fetch failed, retrying");
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
