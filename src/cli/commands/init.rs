use std::path::Path;

use crate::cli::context::validate_simple_filename;
use crate::cli::output;
use crate::config::app_config::{DEFAULT_EXPORT_DIR, DEFAULT_STORE_FILE};
use crate::core::errors::{KintaiError, Result};

/// Execute the `kintai init` command.
///
/// Creates the Kintai directory with a default `config.toml` pointing at
/// `channel`, and an empty export directory for the channel history.
pub fn execute(dir: &Path, channel: &str) -> Result<()> {
    validate_simple_filename(channel, "channel")?;

    if dir.exists() {
        return Err(KintaiError::InvalidConfig {
            detail: format!(
                "Kintai is already initialized here ({} exists)",
                dir.display()
            ),
        });
    }

    output::header("Kintai — Initializing project");

    std::fs::create_dir_all(dir.join(DEFAULT_EXPORT_DIR))?;
    output::success(&format!("Created {}/", dir.display()));

    std::fs::write(dir.join("config.toml"), default_config(channel))?;
    output::success("Generated config.toml with defaults");

    let export = dir
        .join(DEFAULT_EXPORT_DIR)
        .join(format!("{channel}.jsonl"));
    println!(
        "\n  Place the channel history at {}\n  (one JSON message per line), then run 'kintai sync'.",
        export.display()
    );

    Ok(())
}

fn default_config(channel: &str) -> String {
    format!(
        r#"[kintai]
format_version = 1

[source]
channel = "{channel}"
export_dir = "{DEFAULT_EXPORT_DIR}"

[store]
file = "{DEFAULT_STORE_FILE}"

[sync]
batch_size = 100
max_attempts = 3
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::app_config::AppConfig;

    #[test]
    fn default_config_parses() {
        let config = AppConfig::parse(&default_config("general")).unwrap();
        assert_eq!(config.source.channel, "general");
    }
}
