use std::path::{Component, Path, PathBuf};

use crate::core::errors::{KintaiError, Result};

/// Default project directory, relative to the working directory.
pub const DEFAULT_DIR: &str = ".kintai";

/// Resolve the Kintai directory from the `--dir` flag.
pub fn kintai_dir(custom: Option<&str>) -> PathBuf {
    custom
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DIR))
}

/// Ensure `name` is a plain file name: no separators, no `..`, not empty.
///
/// `what` names the setting in the error message.
pub fn validate_simple_filename(name: &str, what: &str) -> Result<()> {
    let invalid = name.trim().is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\'])
        || name.contains('\0');
    if invalid {
        return Err(KintaiError::InvalidConfig {
            detail: format!("Invalid {what} '{name}': expected a plain file name"),
        });
    }
    Ok(())
}

/// Ensure `dir` is a relative path that stays below its base directory:
/// only plain components, no `..`, no root or drive prefix.
pub fn validate_relative_dir(dir: &str, what: &str) -> Result<()> {
    let path = Path::new(dir);
    let invalid = dir.trim().is_empty()
        || dir.contains('\0')
        || !path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if invalid {
        return Err(KintaiError::InvalidConfig {
            detail: format!("Invalid {what} '{dir}': expected a path inside the Kintai directory"),
        });
    }
    Ok(())
}
