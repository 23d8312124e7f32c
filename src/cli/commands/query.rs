use std::collections::BTreeSet;
use std::path::Path;

use chrono::Local;
use colored::Colorize;

use crate::cli::commands::project_helpers::{Project, print_sync_report};
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::attendance_record::AttendanceRecord;
use crate::core::services::query_service::{
    QueryService, parse_since, tally_by_category, validate_authors,
};

/// Execute the `kintai query` command.
///
/// Validates the window and authors first, then syncs the cache and lists the
/// matching records (or per-category totals with `--summary`).
pub fn execute(dir: &Path, authors: &[String], since: Option<&str>, summary: bool) -> Result<()> {
    let since = parse_since(since, Local::now())?;
    let authors: BTreeSet<String> = authors.iter().map(|a| a.trim().to_string()).collect();
    validate_authors(&authors)?;

    let project = Project::open(dir)?;
    let service = QueryService::new(project.sync_service()?);
    let source = project.message_source()?;

    let result = service.records_since(&source, since, &authors)?;
    if let Some(report) = &result.sync
        && (report.added > 0 || report.recovered_from.is_some())
    {
        print_sync_report(report);
    }

    let window = since.format("%Y-%m-%d %H:%M");
    if result.records.is_empty() {
        output::header("kintai query");
        output::warning(&format!("No records since {window}"));
        println!("  Try a wider window, e.g. --since 3m");
        return Ok(());
    }

    output::header(&format!(
        "kintai query ({} records since {window})",
        result.records.len()
    ));
    println!();

    if summary {
        for (category, count) in tally_by_category(&result.records) {
            println!("  {:<10} {count}", output::category(category));
        }
    } else {
        for record in &result.records {
            print_record(record);
        }
    }

    Ok(())
}

/// Print a single record as a formatted row.
fn print_record(record: &AttendanceRecord) {
    let date = record.timestamp.format("%Y-%m-%d %H:%M");
    println!(
        "  {} {} {:<10} {}",
        date.to_string().dimmed(),
        "│".dimmed(),
        output::category(record.category),
        record.author,
    );
}
