use std::path::Path;

use crate::cli::commands::project_helpers::{Project, print_sync_report};
use crate::cli::output;
use crate::core::errors::Result;

/// Execute the `kintai sync` command.
///
/// Runs one sync pass: pages back through the channel export until it
/// reaches cached history, then saves the merged records.
pub fn execute(dir: &Path) -> Result<()> {
    let project = Project::open(dir)?;
    let service = project.sync_service()?;
    let source = project.message_source()?;

    output::header(&format!("kintai sync #{}", project.config.source.channel));
    let report = service.sync(&source)?;
    print_sync_report(&report);

    Ok(())
}
