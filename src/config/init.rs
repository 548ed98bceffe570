//! Directory resolution and `pin init`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ConfigError;

use super::defaults::{APP_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_PIN_CONFIG_TEMPLATE};
use super::env::env_nonempty;
use super::ConfigInitResult;

/// Resolve the base config directory from env/home conventions.
pub fn config_root_dir() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    dirs::home_dir()
        .map(|home| home.join(".config"))
        .or_else(dirs::config_dir)
}

/// Resolve the base data directory (`~/.local/share` on Linux).
pub fn data_root_dir() -> Option<PathBuf> {
    dirs::data_dir()
}

/// `$PIN_HOME`, else `<config root>/pin`.
pub(super) fn home_dir_with<FEnv, FRoot>(env_lookup: &FEnv, config_root: &FRoot) -> Option<PathBuf>
where
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    env_nonempty(env_lookup, "PIN_HOME")
        .map(PathBuf::from)
        .or_else(|| config_root().map(|dir| dir.join(APP_DIR_NAME)))
}

/// `$PIN_DATA/pin`, else `<data root>/pin`.
pub(super) fn data_dir_with<FEnv, FRoot>(env_lookup: &FEnv, data_root: &FRoot) -> Option<PathBuf>
where
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    env_nonempty(env_lookup, "PIN_DATA")
        .map(PathBuf::from)
        .or_else(data_root)
        .map(|dir| dir.join(APP_DIR_NAME))
}

/// Config file path `pin init` writes to (`<home>/pin.toml`).
pub fn default_config_path() -> Option<PathBuf> {
    home_dir_with(&|name: &str| std::env::var(name).ok(), &config_root_dir)
        .map(|home| home.join(CONFIG_FILE_NAME))
}

/// Write the default `pin.toml`.
///
/// - Without `force`, returns `AlreadyInitialized` if the file exists.
/// - With `force`, backs up the existing file next to it under a
///   timestamped name, then rewrites it from the embedded template.
pub fn initialize_default_config(force: bool) -> Result<ConfigInitResult, ConfigError> {
    let path = default_config_path().ok_or_else(|| {
        ConfigError::Invalid("unable to resolve the pin config directory".to_string())
    })?;
    initialize_config_at_path(&path, force)
}

pub(super) fn initialize_config_at_path(
    path: &Path,
    force: bool,
) -> Result<ConfigInitResult, ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if path.exists() {
        if !force {
            return Ok(ConfigInitResult::AlreadyInitialized {
                path: path.to_path_buf(),
            });
        }
        let backup_path = timestamped_backup_path(path);
        std::fs::copy(path, &backup_path)?;
        std::fs::write(path, DEFAULT_PIN_CONFIG_TEMPLATE)?;
        return Ok(ConfigInitResult::Overwritten {
            path: path.to_path_buf(),
            backup_path,
        });
    }

    // create_new: another process may have created it since the check.
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(mut file) => {
            file.write_all(DEFAULT_PIN_CONFIG_TEMPLATE.as_bytes())?;
            Ok(ConfigInitResult::Created {
                path: path.to_path_buf(),
            })
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            Ok(ConfigInitResult::AlreadyInitialized {
                path: path.to_path_buf(),
            })
        }
        Err(e) => Err(ConfigError::Io(e)),
    }
}

/// Build a non-colliding backup path in the same directory as `path`.
fn timestamped_backup_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|value| value.to_string_lossy().into_owned())
        .unwrap_or_else(|| CONFIG_FILE_NAME.to_string());
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    for suffix in 0..1000usize {
        let candidate_name = if suffix == 0 {
            format!("{file_name}.{timestamp}.bak")
        } else {
            format!("{file_name}.{timestamp}.{suffix}.bak")
        };
        let candidate = path.with_file_name(candidate_name);
        if !candidate.exists() {
            return candidate;
        }
    }

    path.with_file_name(format!(
        "{file_name}.{timestamp}.{}.bak",
        std::process::id()
    ))
}
