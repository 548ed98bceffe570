//! Config-file source discovery.
//!
//! Precedence: explicit path > `<home>/pin.toml` > `<config root>/pin/pin.toml`
//! > built-in defaults.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::defaults::{APP_DIR_NAME, CONFIG_FILE_NAME};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum ConfigSource {
    /// `--config PATH`.
    Explicit(PathBuf),
    /// `pin.toml` inside the resolved home dir (`$PIN_HOME`).
    Home(PathBuf),
    /// `<config root>/pin/pin.toml`.
    Global(PathBuf),
    /// No file found.
    BuiltInDefaults,
}

impl ConfigSource {
    pub(super) fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(path) | Self::Home(path) | Self::Global(path) => Some(path),
            Self::BuiltInDefaults => None,
        }
    }
}

/// Read config text from the highest-precedence available source.
pub(super) fn read_config_text_with_sources<FRead, FRoot>(
    path_override: Option<&str>,
    home: &Path,
    read_file: &FRead,
    config_root: &FRoot,
) -> Result<(String, ConfigSource), ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FRoot: Fn() -> Option<PathBuf>,
{
    // An explicit path must exist.
    if let Some(p) = path_override {
        let path = PathBuf::from(p);
        let text = read_file(&path)?;
        return Ok((text, ConfigSource::Explicit(path)));
    }

    let home_file = home.join(CONFIG_FILE_NAME);
    if let Ok(text) = read_file(&home_file) {
        return Ok((text, ConfigSource::Home(home_file)));
    }

    if let Some(dir) = config_root() {
        let global = dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME);
        if global != home_file {
            if let Ok(text) = read_file(&global) {
                return Ok((text, ConfigSource::Global(global)));
            }
        }
    }

    Ok((String::new(), ConfigSource::BuiltInDefaults))
}
