//! Configuration data model.

use std::path::PathBuf;

use serde::Deserialize;

use crate::splice::Markers;

use super::defaults::{
    ACTIVE_THEME_FILE, APPS_FILE, BASE_SCHEMES_DIR, CUSTOM_SCHEMES_DIR, DEFAULT_INSERT_END,
    DEFAULT_INSERT_START, DEFAULT_SHELL, TEMPLATES_DIR, THEME_HOOKS_FILE,
};

/// Raw `pin.toml` contents. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(super) struct FileConfig {
    pub shell: String,
    pub insert_start: String,
    pub insert_end: String,
}

/// Top-level runtime configuration, passed explicitly to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Hook command prefix, e.g. `sh -c`.
    pub shell: String,
    pub markers: Markers,
    pub paths: Paths,
    /// Config file the values came from; `None` when only defaults applied.
    pub source: Option<PathBuf>,
}

impl Config {
    /// Defaults rooted at explicit home and data directories.
    pub fn with_dirs(home: impl Into<PathBuf>, data: impl Into<PathBuf>) -> Self {
        Self {
            shell: DEFAULT_SHELL.to_string(),
            markers: Markers::new(DEFAULT_INSERT_START, DEFAULT_INSERT_END),
            paths: Paths::new(home, data),
            source: None,
        }
    }

    /// Shell prefix split into program and leading arguments.
    pub fn shell_prefix(&self) -> Vec<String> {
        self.shell.split_whitespace().map(str::to_string).collect()
    }
}

/// Resolved locations of every document the engine reads or writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub home: PathBuf,
    pub data: PathBuf,
    pub apps: PathBuf,
    pub templates: PathBuf,
    pub active_theme: PathBuf,
    pub theme_hooks: PathBuf,
    pub custom_schemes: PathBuf,
    pub base_schemes: PathBuf,
}

impl Paths {
    pub fn new(home: impl Into<PathBuf>, data: impl Into<PathBuf>) -> Self {
        let home = home.into();
        let data = data.into();
        let base_schemes = BASE_SCHEMES_DIR
            .iter()
            .fold(data.clone(), |dir, part| dir.join(part));
        Self {
            apps: home.join(APPS_FILE),
            templates: home.join(TEMPLATES_DIR),
            active_theme: home.join(ACTIVE_THEME_FILE),
            theme_hooks: home.join(THEME_HOOKS_FILE),
            custom_schemes: home.join(CUSTOM_SCHEMES_DIR),
            base_schemes,
            home,
            data,
        }
    }

    /// Template directory of one app.
    pub fn app_templates(&self, app: &str) -> PathBuf {
        self.templates.join(app)
    }
}

/// Result of `pin init`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigInitResult {
    Created { path: PathBuf },
    AlreadyInitialized { path: PathBuf },
    Overwritten { path: PathBuf, backup_path: PathBuf },
}
