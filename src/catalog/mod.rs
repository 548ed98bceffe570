//! Management of themes, app registrations and per-app templates.
//!
//! Every operation reads the current state from disk and writes its change
//! back before returning; nothing is cached between calls.

mod apps;
mod templates;
mod themes;

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::CatalogError;
use crate::registry::{App, AppRegistry};

pub use apps::AppUpdate;
pub use templates::{TemplateEntry, TEMPLATE_EXTENSION};
pub use themes::Theme;

/// File-backed catalog rooted at the configured home and data dirs.
#[derive(Debug, Clone)]
pub struct Catalog {
    config: Config,
}

impl Catalog {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn load_registry(&self) -> Result<AppRegistry, CatalogError> {
        Ok(AppRegistry::load_or_default(&self.config.paths.apps)?)
    }

    fn save_registry(&self, registry: &AppRegistry) -> Result<(), CatalogError> {
        Ok(registry.save(&self.config.paths.apps)?)
    }

    /// Registered app named `name`, ignoring case.
    fn registered_app(&self, registry: &AppRegistry, name: &str) -> Result<App, CatalogError> {
        registry
            .get(name)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("app `{name}`")))
    }

    fn app_template_dir(&self, app: &str) -> PathBuf {
        self.config.paths.app_templates(app)
    }
}

/// Reject names that cannot be used as a single path component.
fn validate_name(kind: &str, name: &str) -> Result<(), CatalogError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::Invalid(format!("{kind} name must not be empty")));
    }
    if trimmed != name {
        return Err(CatalogError::Invalid(format!(
            "{kind} name `{name}` has surrounding whitespace"
        )));
    }
    if name.starts_with('.') || name.contains(['/', '\\']) {
        return Err(CatalogError::Invalid(format!(
            "{kind} name `{name}` must not start with `.` or contain path separators"
        )));
    }
    Ok(())
}

/// Display name of a catalog file: its file name up to the first `.`.
fn stem_before_first_dot(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_str()?;
    file_name.split('.').next().map(str::to_string)
}

/// Remove a file, treating an already-missing file as success.
fn remove_file_if_exists(path: &Path) -> std::io::Result<()> {
    match std::fs::remove_file(path) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
