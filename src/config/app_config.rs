use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::cli::context::{validate_relative_dir, validate_simple_filename};
use crate::core::errors::{KintaiError, Result};
use crate::core::services::sync_service::{MAX_BATCH_SIZE, SyncOptions};

/// Top-level Kintai configuration read from `.kintai/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub kintai: KintaiSection,
    pub source: SourceSection,
    pub store: Option<StoreSection>,
    pub sync: Option<SyncSection>,
}

impl AppConfig {
    /// Load the configuration from `{kintai_dir}/config.toml`.
    ///
    /// After parsing, validates file names and the export directory (to
    /// keep the channel export and the store inside the Kintai directory)
    /// and the sync tuning values.
    pub fn load(kintai_dir: &Path) -> Result<Self> {
        let config_path = kintai_dir.join("config.toml");
        if !config_path.exists() {
            return Err(KintaiError::InvalidConfig {
                detail: format!(
                    "{} not found. Run 'kintai init --channel <name>' first.",
                    config_path.display()
                ),
            });
        }
        let content = std::fs::read_to_string(&config_path)?;
        Self::parse(&content)
    }

    /// Parse and validate configuration text.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| KintaiError::InvalidConfig {
            detail: format!("Failed to parse config.toml: {e}"),
        })?;

        if config.kintai.format_version > CURRENT_FORMAT_VERSION {
            return Err(KintaiError::InvalidConfig {
                detail: format!(
                    "config format version {} is newer than supported version {CURRENT_FORMAT_VERSION}",
                    config.kintai.format_version
                ),
            });
        }

        validate_simple_filename(&config.source.channel, "channel")?;
        if let Some(export_dir) = &config.source.export_dir {
            validate_relative_dir(export_dir, "export dir")?;
        }
        if let Some(store) = &config.store {
            validate_simple_filename(&store.file, "store file")?;
        }
        config.sync_options()?;

        Ok(config)
    }

    /// Path of the channel export the message source reads.
    pub fn channel_export_path(&self, kintai_dir: &Path) -> PathBuf {
        let export_dir = self
            .source
            .export_dir
            .as_deref()
            .unwrap_or(DEFAULT_EXPORT_DIR);
        kintai_dir
            .join(export_dir)
            .join(format!("{}.jsonl", self.source.channel))
    }

    /// Path of the record cache, defaulting to `records.json`.
    pub fn store_path(&self, kintai_dir: &Path) -> PathBuf {
        let file = self
            .store
            .as_ref()
            .map(|s| s.file.as_str())
            .unwrap_or(DEFAULT_STORE_FILE);
        kintai_dir.join(file)
    }

    /// Sync tuning, with defaults for anything unset.
    pub fn sync_options(&self) -> Result<SyncOptions> {
        let defaults = SyncOptions::default();
        let section = self.sync.clone().unwrap_or_default();
        let options = SyncOptions {
            batch_size: section.batch_size.unwrap_or(defaults.batch_size),
            max_attempts: section.max_attempts.unwrap_or(defaults.max_attempts),
        };

        if !(1..=MAX_BATCH_SIZE).contains(&options.batch_size) {
            return Err(KintaiError::InvalidConfig {
                detail: format!(
                    "sync.batch_size must be between 1 and {MAX_BATCH_SIZE}, got {}",
                    options.batch_size
                ),
            });
        }
        if options.max_attempts == 0 {
            return Err(KintaiError::InvalidConfig {
                detail: "sync.max_attempts must be at least 1".into(),
            });
        }
        Ok(options)
    }
}

/// Current format version supported by this build of Kintai.
pub const CURRENT_FORMAT_VERSION: u32 = 1;

pub const DEFAULT_EXPORT_DIR: &str = "channels";
pub const DEFAULT_STORE_FILE: &str = "records.json";

/// The `[kintai]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct KintaiSection {
    /// Format version for backward compatibility. Defaults to 1 if missing.
    #[serde(default = "default_format_version")]
    pub format_version: u32,
}

impl Default for KintaiSection {
    fn default() -> Self {
        Self {
            format_version: default_format_version(),
        }
    }
}

fn default_format_version() -> u32 {
    1
}

/// The `[source]` section: which channel to read.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceSection {
    pub channel: String,
    /// Directory holding `{channel}.jsonl`, relative to the Kintai directory.
    pub export_dir: Option<String>,
}

/// The `[store]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreSection {
    pub file: String,
}

/// The `[sync]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SyncSection {
    pub batch_size: Option<usize>,
    pub max_attempts: Option<u32>,
}
