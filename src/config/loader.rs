//! Top-level config loading pipeline.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::splice::Markers;

use super::env::apply_env_overrides;
use super::init::{config_root_dir, data_dir_with, data_root_dir, home_dir_with};
use super::sources::read_config_text_with_sources;
use super::{Config, FileConfig};

/// Load configuration from disk and environment.
///
/// `path_override` is an explicit config file path (from `--config`).
pub fn load_config(path_override: Option<&str>) -> Result<Config, ConfigError> {
    load_config_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        config_root_dir,
        data_root_dir,
    )
}

pub(super) fn load_config_from_sources<FRead, FEnv, FRoot, FData>(
    path_override: Option<&str>,
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
    data_root: FData,
) -> Result<Config, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
    FData: Fn() -> Option<PathBuf>,
{
    let home = home_dir_with(&env_lookup, &config_root).ok_or_else(|| {
        ConfigError::Invalid("unable to resolve the pin config directory".to_string())
    })?;
    let data = data_dir_with(&env_lookup, &data_root).ok_or_else(|| {
        ConfigError::Invalid("unable to resolve the pin data directory".to_string())
    })?;

    let (text, source) =
        read_config_text_with_sources(path_override, &home, &read_file, &config_root)?;
    let parsed: FileConfig = toml::from_str(&text)?;

    let mut config = Config::with_dirs(home, data);
    config.source = source.path().map(Path::to_path_buf);
    merge_file_config(&mut config, parsed);
    apply_env_overrides(&mut config, &env_lookup);
    validate(&config)?;
    Ok(config)
}

/// Overlay non-empty file values onto the defaults already in `config`.
fn merge_file_config(config: &mut Config, file: FileConfig) {
    if let Some(shell) = normalized(&file.shell) {
        config.shell = shell;
    }
    let start = normalized(&file.insert_start).unwrap_or_else(|| config.markers.start.clone());
    let end = normalized(&file.insert_end).unwrap_or_else(|| config.markers.end.clone());
    config.markers = Markers::new(start, end);
}

fn normalized(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.markers.start == config.markers.end {
        return Err(ConfigError::Invalid(format!(
            "insert_start and insert_end must differ (both are `{}`)",
            config.markers.start
        )));
    }
    Ok(())
}
