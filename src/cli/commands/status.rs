use std::path::Path;

use colored::Colorize;

use crate::cli::commands::project_helpers::Project;
use crate::cli::output;
use crate::core::errors::{KintaiError, Result};
use crate::core::traits::record_store::RecordStore;

/// Execute the `kintai status` command.
///
/// Shows the configuration and the state of the local cache without
/// syncing.
pub fn execute(dir: &Path) -> Result<()> {
    let project = Project::open(dir)?;
    let options = project.config.sync_options()?;

    output::header("kintai status");
    output::field("Channel", &project.config.source.channel.cyan().to_string());
    output::field("Export", &project.export_path().display().to_string());
    output::field(
        "Batch",
        &format!("{} messages, {} attempts", options.batch_size, options.max_attempts),
    );

    let store = project.record_store();
    output::field("Store", &store.location());

    if !project.export_path().exists() {
        output::warning("Channel export not found; 'kintai sync' will fail until it exists");
    }

    match store.load() {
        Ok(collection) => {
            output::field("Records", &collection.len().to_string());
            if collection.is_empty() {
                println!("  Run 'kintai sync' to fill the cache");
            }
            match collection.head_timestamp() {
                Some(head) => output::field("Newest", &head.format("%Y-%m-%d %H:%M").to_string()),
                None => output::field("Newest", &"—".dimmed().to_string()),
            }
        }
        Err(e @ KintaiError::StoreUnreadable { .. }) => {
            output::warning(&format!("{e}"));
        }
        Err(e) => return Err(e),
    }

    Ok(())
}
