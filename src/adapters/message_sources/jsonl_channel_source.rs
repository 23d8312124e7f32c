use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::core::errors::{KintaiError, Result};
use crate::core::models::raw_message::{MessageCursor, RawMessage};
use crate::core::traits::message_source::MessageSource;

/// Message source backed by a channel export: one JSON message per line.
///
/// Example `general.jsonl`:
/// ```text
/// {"id":"1001","text":"今日は :zangyo:","author":"<@42>","created_at":"2026-03-02T10:04:11Z"}
/// {"id":"1002","text":"お先に :teiji:","author":"<@7>","created_at":"2026-03-02T09:00:00Z"}
/// ```
///
/// Lines may appear in any order; pages are served newest-first. Message
/// ids must be unique, since they are the paging cursor.
pub struct JsonlChannelSource {
    messages: Vec<RawMessage>,
    /// Message id to its position in `messages`.
    positions: HashMap<String, usize>,
}

impl JsonlChannelSource {
    /// Read and index the export at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| KintaiError::SourceUnavailable {
            reason: format!("cannot read channel export {}: {e}", path.display()),
        })?;

        let mut messages = Vec::new();
        let mut first_seen: HashMap<String, usize> = HashMap::new();
        for (line_num, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let message: RawMessage =
                serde_json::from_str(trimmed).map_err(|e| KintaiError::SourceUnavailable {
                    reason: format!(
                        "malformed message at {}:{}: {e}",
                        path.display(),
                        line_num + 1
                    ),
                })?;
            if let Some(first) = first_seen.insert(message.id.clone(), line_num + 1) {
                return Err(KintaiError::SourceUnavailable {
                    reason: format!(
                        "duplicate message id '{}' at {}:{} (first seen on line {first})",
                        message.id,
                        path.display(),
                        line_num + 1
                    ),
                });
            }
            messages.push(message);
        }

        // Stable sort keeps export order for equal timestamps
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let positions = messages
            .iter()
            .enumerate()
            .map(|(pos, m)| (m.id.clone(), pos))
            .collect();

        tracing::debug!(path = %path.display(), messages = messages.len(), "channel export loaded");
        Ok(Self {
            messages,
            positions,
        })
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.messages.len()
    }
}

impl MessageSource for JsonlChannelSource {
    fn fetch_batch(&self, before: Option<&MessageCursor>, limit: usize) -> Result<Vec<RawMessage>> {
        let start = match before {
            None => 0,
            Some(cursor) => {
                let pos = self.positions.get(&cursor.0).ok_or_else(|| {
                    KintaiError::SourceUnavailable {
                        reason: format!("unknown message cursor '{}'", cursor.0),
                    }
                })?;
                pos + 1
            }
        };

        Ok(self.messages.iter().skip(start).take(limit).cloned().collect())
    }
}
