use crate::cli::output;
use crate::core::errors::Result;
use crate::core::services::classifier::classify;

/// Execute the `kintai classify` command.
pub fn execute(text: &str) -> Result<()> {
    match classify(text) {
        Some(category) => output::success(&format!("Category: {}", output::category(category))),
        None => output::warning("No category marker found"),
    }
    Ok(())
}
