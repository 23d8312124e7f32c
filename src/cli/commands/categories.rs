use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::category::CATEGORIES;

/// Execute the `kintai categories` command.
///
/// Lists every category in classifier tie-break order.
pub fn execute() -> Result<()> {
    output::header("kintai categories");
    println!();
    for spec in CATEGORIES {
        println!(
            "  {:<10} {}  {}",
            output::category(spec.category),
            spec.display_color,
            spec.aliases.join(" "),
        );
    }
    Ok(())
}
