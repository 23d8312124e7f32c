use std::path::{Path, PathBuf};

use crate::adapters::message_sources::jsonl_channel_source::JsonlChannelSource;
use crate::adapters::record_stores::json_record_store::JsonRecordStore;
use crate::cli::output;
use crate::config::app_config::AppConfig;
use crate::core::errors::{KintaiError, Result};
use crate::core::services::sync_service::{StopReason, SyncReport, SyncService};

/// An initialized Kintai directory and its configuration.
pub struct Project {
    pub dir: PathBuf,
    pub config: AppConfig,
}

impl Project {
    /// Open the project at `dir`, failing if it was never initialized.
    pub fn open(dir: &Path) -> Result<Self> {
        if !dir.exists() {
            return Err(KintaiError::InvalidConfig {
                detail: format!(
                    "Kintai not initialized ({} missing). Run 'kintai init --channel <name>' first.",
                    dir.display()
                ),
            });
        }
        let config = AppConfig::load(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            config,
        })
    }

    pub fn record_store(&self) -> JsonRecordStore {
        JsonRecordStore::new(self.config.store_path(&self.dir))
    }

    pub fn export_path(&self) -> PathBuf {
        self.config.channel_export_path(&self.dir)
    }

    /// Sync service over this project's record file.
    pub fn sync_service(&self) -> Result<SyncService<JsonRecordStore>> {
        Ok(SyncService::new(self.record_store(), self.config.sync_options()?))
    }

    /// Message source reading this project's channel export.
    pub fn message_source(&self) -> Result<JsonlChannelSource> {
        JsonlChannelSource::open(&self.export_path())
    }
}

/// Tell the user what a sync pass did.
pub fn print_sync_report(report: &SyncReport) {
    if let Some(reason) = &report.recovered_from {
        output::warning("Cached records were unreadable and have been rebuilt");
        for line in reason.lines().take(1) {
            println!("    {line}");
        }
    }

    let plural = if report.added == 1 { "" } else { "s" };
    let how = match report.stop_reason {
        StopReason::ReachedCache => "caught up with cache",
        StopReason::Exhausted => "reached start of channel",
    };
    output::success(&format!(
        "{} new record{plural} ({how}, {} total)",
        report.added,
        report.collection.len()
    ));
}
