//! Per-user application directory resolution.

use crate::error::ApiError;
use std::path::PathBuf;

/// Resolve the directory holding `config.json` and `requests.json`.
///
/// Returns `$UCACCESS_DATA_DIR` if set, otherwise the platform data
/// directory from `ProjectDirs` (e.g. `~/.local/share/ucaccess` on Linux).
pub fn data_dir() -> Result<PathBuf, ApiError> {
    if let Ok(dir) = std::env::var("UCACCESS_DATA_DIR") {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    let project_dirs = directories::ProjectDirs::from("", "guilding", "ucaccess").ok_or_else(
        || ApiError::ConfigError("Could not determine platform data directory".to_string()),
    )?;
    Ok(project_dirs.data_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test covers both branches; separate tests would race on the env var.
    #[test]
    fn test_env_override_wins_over_platform_default() {
        std::env::remove_var("UCACCESS_DATA_DIR");
        let default_path = data_dir().unwrap();
        assert!(default_path.to_string_lossy().contains("ucaccess"));

        std::env::set_var("UCACCESS_DATA_DIR", "/tmp/ucaccess-test");
        let overridden = data_dir();
        std::env::remove_var("UCACCESS_DATA_DIR");
        assert_eq!(overridden.unwrap(), PathBuf::from("/tmp/ucaccess-test"));
    }
}
