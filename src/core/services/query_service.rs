use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use chrono::{DateTime, Local, Months, NaiveDate, TimeDelta, TimeZone};
use regex::Regex;

use crate::core::errors::{KintaiError, Result};
use crate::core::models::attendance_record::AttendanceRecord;
use crate::core::models::category::Category;
use crate::core::services::sync_service::{SyncReport, SyncService};
use crate::core::traits::message_source::MessageSource;
use crate::core::traits::record_store::RecordStore;

static RELATIVE_WINDOW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,4})([dwm])$").expect("static pattern is valid"));

/// Records matching a range query, plus the sync pass that preceded it.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub records: Vec<AttendanceRecord>,
    /// `None` when the query was answered without syncing (no authors).
    pub sync: Option<SyncReport>,
}

/// Answers "all events by these authors after this date" against a
/// freshly synced cache.
pub struct QueryService<S: RecordStore> {
    pub sync: SyncService<S>,
}

impl<S: RecordStore> QueryService<S> {
    pub fn new(sync: SyncService<S>) -> Self {
        Self { sync }
    }

    /// Sync the cache, then return every record strictly after `since`
    /// whose author is in `authors`, newest first.
    ///
    /// Blank author handles are rejected before any I/O happens. An empty
    /// author set short-circuits to an empty result.
    pub fn records_since(
        &self,
        source: &dyn MessageSource,
        since: DateTime<Local>,
        authors: &BTreeSet<String>,
    ) -> Result<QueryResult> {
        validate_authors(authors)?;
        if authors.is_empty() {
            tracing::debug!("no authors requested, skipping sync");
            return Ok(QueryResult {
                records: Vec::new(),
                sync: None,
            });
        }

        let report = self.sync.sync(source)?;
        let prefix = records_after(report.collection.records(), since);
        let records = filter_by_authors(prefix, authors);
        tracing::debug!(
            window = prefix.len(),
            matched = records.len(),
            since = %since.to_rfc3339(),
            "range query answered"
        );

        Ok(QueryResult {
            records,
            sync: Some(report),
        })
    }
}

/// Reject blank author handles.
pub fn validate_authors(authors: &BTreeSet<String>) -> Result<()> {
    if authors.iter().any(|a| a.trim().is_empty()) {
        return Err(KintaiError::InvalidQuery {
            detail: "author handles must not be blank".into(),
        });
    }
    Ok(())
}

/// The prefix of `records` (newest-first) with timestamps strictly after
/// `since`. Binary search, O(log n).
pub fn records_after(records: &[AttendanceRecord], since: DateTime<Local>) -> &[AttendanceRecord] {
    let end = records.partition_point(|r| r.timestamp > since);
    &records[..end]
}

/// Keep records whose author is in `authors`, preserving order.
pub fn filter_by_authors(
    records: &[AttendanceRecord],
    authors: &BTreeSet<String>,
) -> Vec<AttendanceRecord> {
    records
        .iter()
        .filter(|r| authors.contains(&r.author))
        .cloned()
        .collect()
}

/// Count records per category. Categories with no records are included
/// with a zero count.
pub fn tally_by_category(records: &[AttendanceRecord]) -> BTreeMap<Category, usize> {
    let mut tally: BTreeMap<Category, usize> = crate::core::models::category::CATEGORIES
        .iter()
        .map(|spec| (spec.category, 0))
        .collect();
    for record in records {
        *tally.entry(record.category).or_default() += 1;
    }
    tally
}

/// Parse a `--since` value relative to `now`.
///
/// Accepts:
/// - `YYYY-MM-DD`: local midnight of that day
/// - RFC 3339 timestamps
/// - `Nd`, `Nw`, `Nm`: N days, weeks or months before `now`
///
/// With no value, the window is one month.
pub fn parse_since(input: Option<&str>, now: DateTime<Local>) -> Result<DateTime<Local>> {
    let Some(raw) = input.map(str::trim) else {
        return months_before(now, 1);
    };

    if let Some(caps) = RELATIVE_WINDOW.captures(raw) {
        let amount: u32 = caps[1].parse().map_err(|_| invalid_since(raw))?;
        return match &caps[2] {
            "d" => days_before(now, i64::from(amount)),
            "w" => days_before(now, i64::from(amount) * 7),
            _ => months_before(now, amount),
        };
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(|| invalid_since(raw))?;
        return Local
            .from_local_datetime(&midnight)
            .earliest()
            .ok_or_else(|| KintaiError::InvalidQuery {
                detail: format!("'{raw}' has no local midnight (time zone transition)"),
            });
    }

    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|_| invalid_since(raw))
}

fn days_before(now: DateTime<Local>, days: i64) -> Result<DateTime<Local>> {
    TimeDelta::try_days(days)
        .and_then(|delta| now.checked_sub_signed(delta))
        .ok_or_else(|| KintaiError::InvalidQuery {
            detail: format!("{days} days before now is out of range"),
        })
}

fn months_before(now: DateTime<Local>, months: u32) -> Result<DateTime<Local>> {
    now.checked_sub_months(Months::new(months))
        .ok_or_else(|| KintaiError::InvalidQuery {
            detail: format!("{months} months before now is out of range"),
        })
}

fn invalid_since(raw: &str) -> KintaiError {
    KintaiError::InvalidQuery {
        detail: format!(
            "cannot read '{raw}' as a date. Expected YYYY-MM-DD, an RFC 3339 timestamp, \
             or a window such as 7d, 2w, 1m"
        ),
    }
}
