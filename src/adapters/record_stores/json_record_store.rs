use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::core::errors::{KintaiError, Result};
use crate::core::models::attendance_record::{AttendanceRecord, RecordCollection};
use crate::core::traits::record_store::RecordStore;

/// Current layout version of the records file.
pub const STORE_FORMAT_VERSION: u32 = 1;

/// File-based record store that keeps the whole cache in one JSON document.
///
/// Example `records.json`:
/// ```text
/// {"format_version":1,"records":[
///   {"timestamp":"2026-03-02T19:04:11+09:00","author":"<@42>","category":"zangyo"},
///   {"timestamp":"2026-03-01T18:00:02+09:00","author":"<@42>","category":"teiji"}
/// ]}
/// ```
///
/// Saves go to a temporary file next to the target and are renamed over
/// it, so readers see either the old document or the new one.
#[derive(Clone)]
pub struct JsonRecordStore {
    path: PathBuf,
}

#[derive(Serialize)]
struct DocumentRef<'a> {
    format_version: u32,
    records: &'a [AttendanceRecord],
}

#[derive(Deserialize)]
struct Document {
    format_version: u32,
    records: Vec<AttendanceRecord>,
}

impl JsonRecordStore {
    /// Create a store backed by the given file path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[cfg(test)]
    fn path(&self) -> &Path {
        &self.path
    }

    fn unreadable(&self, detail: String) -> KintaiError {
        KintaiError::StoreUnreadable {
            path: self.path.clone(),
            detail,
        }
    }

    fn unwritable(&self, detail: String) -> KintaiError {
        KintaiError::StoreUnwritable {
            path: self.path.clone(),
            detail,
        }
    }
}

impl RecordStore for JsonRecordStore {
    fn load(&self) -> Result<RecordCollection> {
        if !self.path.exists() {
            return Ok(RecordCollection::new());
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| self.unreadable(format!("cannot read file: {e}")))?;

        let document: Document = serde_json::from_str(&content)
            .map_err(|e| self.unreadable(format!("malformed JSON: {e}")))?;

        if document.format_version > STORE_FORMAT_VERSION {
            return Err(self.unreadable(format!(
                "format version {} is newer than supported version {STORE_FORMAT_VERSION}",
                document.format_version
            )));
        }

        RecordCollection::from_sorted(document.records)
            .ok_or_else(|| self.unreadable("records are not sorted newest-first".into()))
    }

    fn save(&self, collection: &RecordCollection) -> Result<()> {
        let json = serde_json::to_string(&DocumentRef {
            format_version: STORE_FORMAT_VERSION,
            records: collection.records(),
        })
        .map_err(|e| self.unwritable(format!("failed to serialize records: {e}")))?;

        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)
            .map_err(|e| self.unwritable(format!("cannot create {}: {e}", parent.display())))?;

        let mut tmp = NamedTempFile::new_in(parent)
            .map_err(|e| self.unwritable(format!("cannot create temporary file: {e}")))?;
        tmp.write_all(json.as_bytes())
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| self.unwritable(format!("failed to write records: {e}")))?;
        tmp.persist(&self.path)
            .map_err(|e| self.unwritable(format!("failed to replace file: {}", e.error)))?;

        tracing::debug!(path = %self.path.display(), records = collection.len(), "record store saved");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
