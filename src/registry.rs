//! Application registry and the small state documents stored beside it.
//!
//! - `apps.yaml`: app name → [`App`] record.
//! - `themeHooks.yaml`: theme name → shell command.
//! - `activeTheme`: path of the scheme last applied.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::splice::WriteMode;

/// One registered application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "AppRecord")]
pub struct App {
    pub name: String,
    /// Target config file; empty when not wired yet.
    pub path: String,
    /// Selected template file; empty when none is chosen.
    pub template: String,
    /// Shell command run after an apply pass.
    pub hook: String,
    #[serde(rename = "writeMode")]
    pub write_mode: WriteMode,
    pub active: bool,
}

impl App {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Whether an apply pass should launch work for this app.
    pub fn is_ready(&self) -> bool {
        self.active && !self.path.is_empty() && !self.template.is_empty()
    }
}

/// On-disk shape, accepting the legacy `rewrite: bool` flag.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AppRecord {
    name: String,
    path: String,
    template: String,
    hook: String,
    #[serde(rename = "writeMode")]
    write_mode: Option<WriteMode>,
    rewrite: Option<bool>,
    active: bool,
}

impl From<AppRecord> for App {
    fn from(record: AppRecord) -> Self {
        let write_mode = match (record.write_mode, record.rewrite) {
            (Some(mode), _) => mode,
            (None, Some(true)) => WriteMode::Overwrite,
            (None, _) => WriteMode::Splice,
        };
        Self {
            name: record.name,
            path: record.path,
            template: record.template,
            hook: record.hook,
            write_mode,
            active: record.active,
        }
    }
}

/// The full `name → App` map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct AppRegistry {
    apps: BTreeMap<String, App>,
}

impl AppRegistry {
    pub fn from_yaml(text: &str) -> Result<Self, RegistryError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut registry: Self = serde_yaml::from_str(text)?;
        for (key, app) in registry.apps.iter_mut() {
            if app.name.is_empty() {
                app.name = key.clone();
            }
        }
        Ok(registry)
    }

    pub fn to_yaml(&self) -> Result<String, RegistryError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Read the registry. A missing file surfaces as an `Io` error with
    /// `NotFound`; see [`RegistryError::is_not_found`].
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    /// Read the registry, treating a missing file as empty.
    pub fn load_or_default(path: &Path) -> Result<Self, RegistryError> {
        match Self::load(path) {
            Err(e) if e.is_not_found() => Ok(Self::default()),
            other => other,
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), RegistryError> {
        let text = self.to_yaml()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Async [`AppRegistry::load`] for the apply pass.
    pub async fn load_async(path: &Path) -> Result<Self, RegistryError> {
        let text = tokio::fs::read_to_string(path).await?;
        Self::from_yaml(&text)
    }

    /// Async [`AppRegistry::save`] for the apply pass.
    pub async fn save_async(&self, path: &Path) -> Result<(), RegistryError> {
        let text = self.to_yaml()?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, text).await?;
        Ok(())
    }

    /// Map key of the app named `name`, ignoring ASCII case.
    pub fn key_for(&self, name: &str) -> Option<&str> {
        if self.apps.contains_key(name) {
            return self.apps.get_key_value(name).map(|(k, _)| k.as_str());
        }
        self.apps
            .keys()
            .find(|key| key.eq_ignore_ascii_case(name))
            .map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&App> {
        let key = self.key_for(name)?;
        self.apps.get(key)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut App> {
        let key = self.key_for(name)?.to_string();
        self.apps.get_mut(&key)
    }

    /// Insert or replace `app`, keyed by its name.
    pub fn insert(&mut self, app: App) -> Option<App> {
        self.apps.insert(app.name.clone(), app)
    }

    pub fn remove(&mut self, name: &str) -> Option<App> {
        let key = self.key_for(name)?.to_string();
        self.apps.remove(&key)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.key_for(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &App)> {
        self.apps.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut App)> {
        self.apps.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}

/// Theme name → hook command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ThemeHooks {
    hooks: BTreeMap<String, String>,
}

impl ThemeHooks {
    /// Read hooks; a missing or empty file means no hooks.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(&text)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), RegistryError> {
        let text = serde_yaml::to_string(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, text)?;
        Ok(())
    }

    pub fn get(&self, theme: &str) -> Option<&str> {
        self.hooks
            .get(theme)
            .map(String::as_str)
            .filter(|hook| !hook.trim().is_empty())
    }

    /// Set or, with an empty command, clear the hook for `theme`.
    pub fn set(&mut self, theme: &str, hook: &str) {
        let hook = hook.trim();
        if hook.is_empty() {
            self.hooks.remove(theme);
        } else {
            self.hooks.insert(theme.to_string(), hook.to_string());
        }
    }

    /// Move a hook when its theme is renamed.
    pub fn rename(&mut self, from: &str, to: &str) {
        if let Some(hook) = self.hooks.remove(from) {
            self.hooks.insert(to.to_string(), hook);
        }
    }
}

/// Read the active-theme pointer, if one was recorded.
pub fn read_active_theme(path: &Path) -> Option<PathBuf> {
    let text = std::fs::read_to_string(path).ok()?;
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
}

/// Record `scheme_path` as the active theme.
pub fn write_active_theme(path: &Path, scheme_path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, scheme_path.to_string_lossy().as_bytes())
}

/// Async [`write_active_theme`] for the apply pass.
pub async fn write_active_theme_async(path: &Path, scheme_path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, scheme_path.to_string_lossy().as_bytes()).await
}
