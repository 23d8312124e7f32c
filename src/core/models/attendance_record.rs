use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::category::Category;

/// One classified event extracted from one chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// When the source message was posted, in local time.
    pub timestamp: DateTime<Local>,
    /// Stable handle of the message author (e.g. `<@1234>`).
    pub author: String,
    pub category: Category,
}

/// Cached records, most recent first.
///
/// The descending timestamp order is what makes head-boundary syncing and
/// the range query's binary search valid, so the only way to grow a
/// collection is [`RecordCollection::prepend`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordCollection {
    records: Vec<AttendanceRecord>,
}

impl RecordCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap records that are already sorted newest-first.
    ///
    /// Returns `None` when the order is violated.
    pub fn from_sorted(records: Vec<AttendanceRecord>) -> Option<Self> {
        is_descending(&records).then_some(Self { records })
    }

    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Timestamp of the most recent record.
    pub fn head_timestamp(&self) -> Option<DateTime<Local>> {
        self.records.first().map(|r| r.timestamp)
    }

    /// Place `fresh` ahead of the existing records.
    ///
    /// `fresh` must be newest-first and strictly newer than the current head.
    pub fn prepend(&mut self, mut fresh: Vec<AttendanceRecord>) {
        debug_assert!(is_descending(&fresh));
        debug_assert!(match (fresh.last(), self.head_timestamp()) {
            (Some(oldest_new), Some(head)) => oldest_new.timestamp > head,
            _ => true,
        });
        fresh.append(&mut self.records);
        self.records = fresh;
    }
}

fn is_descending(records: &[AttendanceRecord]) -> bool {
    records.windows(2).all(|w| w[0].timestamp >= w[1].timestamp)
}
