use std::path::PathBuf;

/// All domain errors for Kintai.
///
/// Each variant provides enough context to diagnose the issue
/// without needing a debugger.
#[derive(Debug, thiserror::Error)]
pub enum KintaiError {
    #[error(
        "Message source unavailable: {reason}\n\n  \
         The sync pass was aborted and nothing was saved.\n  \
         Check the channel export and run 'kintai sync' again."
    )]
    SourceUnavailable { reason: String },

    #[error(
        "Message source returned messages out of order: {newer} arrived after {older}\n\n  \
         Pages must be delivered newest-first, each page older than the previous one.\n  \
         The sync pass was aborted and nothing was saved."
    )]
    SourceOutOfOrder { older: String, newer: String },

    #[error(
        "Record store at {path} is unreadable: {detail}\n\n  \
         The next sync rebuilds it from the full channel history."
    )]
    StoreUnreadable { path: PathBuf, detail: String },

    #[error(
        "Failed to save records to {path}: {detail}\n\n  \
         The previous snapshot was left untouched."
    )]
    StoreUnwritable { path: PathBuf, detail: String },

    #[error(
        "Record store changed during sync (head moved from {expected} to {actual})\n\n  \
         Another sync finished first. Run the command again."
    )]
    StaleSnapshot { expected: String, actual: String },

    #[error("Invalid query: {detail}")]
    InvalidQuery { detail: String },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, KintaiError>;
