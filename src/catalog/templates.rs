//! Per-app template files under `<home>/templates/<app>/`.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::CatalogError;
use crate::registry::App;
use crate::splice::extract_template;

use super::{remove_file_if_exists, stem_before_first_dot, validate_name, Catalog};

pub const TEMPLATE_EXTENSION: &str = "mustache";

/// One template file of an app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    pub name: String,
    pub path: PathBuf,
    /// Whether the app currently selects this file.
    pub selected: bool,
}

impl Catalog {
    /// Templates of `app`, sorted by file name.
    pub fn templates(&self, app: &str) -> Result<Vec<TemplateEntry>, CatalogError> {
        let registry = self.load_registry()?;
        let (dir, selected) = match registry.get(app) {
            Some(found) => (self.app_template_dir(&found.name), found.template.clone()),
            None => {
                let dir = self.app_template_dir(app);
                if !dir.is_dir() {
                    return Err(CatalogError::NotFound(format!("app `{app}`")));
                }
                (dir, String::new())
            }
        };
        let selected_name = Path::new(&selected).file_name();

        let mut entries = Vec::new();
        for path in template_files(&dir)? {
            let Some(name) = stem_before_first_dot(&path) else {
                continue;
            };
            entries.push(TemplateEntry {
                selected: selected_name.is_some() && path.file_name() == selected_name,
                name,
                path,
            });
        }
        Ok(entries)
    }

    /// Create `<name>.mustache` from the app's current target file.
    pub fn create_template(&self, app: &str, name: &str) -> Result<PathBuf, CatalogError> {
        validate_name("template", name)?;
        let registry = self.load_registry()?;
        let app = self.registered_app(&registry, app)?;
        let path = self.template_path(&app.name, name);
        if path.exists() {
            return Err(CatalogError::AlreadyExists(format!(
                "template `{name}` of app `{}`",
                app.name
            )));
        }
        let body = self.extract_from_target(&app);
        write_template(&path, &body)?;
        info!(app = %app.name, template = %name, "created template");
        Ok(path)
    }

    /// Duplicate a template as `<name>_<n>.mustache` with the first free `n`.
    pub fn copy_template(&self, app: &str, name: &str) -> Result<PathBuf, CatalogError> {
        let dir = self.existing_template_dir(app)?;
        let source = dir.join(format!("{name}.{TEMPLATE_EXTENSION}"));
        let body = match std::fs::read_to_string(&source) {
            Ok(body) => body,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CatalogError::NotFound(format!("template `{name}`")));
            }
            Err(e) => return Err(e.into()),
        };

        let copy = (1..)
            .map(|n| dir.join(format!("{name}_{n}.{TEMPLATE_EXTENSION}")))
            .find(|candidate| !candidate.exists())
            .ok_or_else(|| CatalogError::Invalid("no free template name".to_string()))?;
        write_template(&copy, &body)?;
        info!(template = %name, copy = %copy.display(), "copied template");
        Ok(copy)
    }

    /// Rename a template; an app selecting it follows the rename.
    pub fn rename_template(&self, app: &str, old: &str, new: &str) -> Result<PathBuf, CatalogError> {
        validate_name("template", new)?;
        let dir = self.existing_template_dir(app)?;
        let from = dir.join(format!("{old}.{TEMPLATE_EXTENSION}"));
        let to = dir.join(format!("{new}.{TEMPLATE_EXTENSION}"));
        if !from.is_file() {
            return Err(CatalogError::NotFound(format!("template `{old}`")));
        }
        if to.exists() {
            return Err(CatalogError::AlreadyExists(format!("template `{new}`")));
        }
        std::fs::rename(&from, &to)?;

        let mut registry = self.load_registry()?;
        if let Some(entry) = registry.get_mut(app) {
            if Path::new(&entry.template) == from {
                entry.template = to.to_string_lossy().into_owned();
                self.save_registry(&registry)?;
            }
        }
        Ok(to)
    }

    /// Delete a template; an app selecting it is left with none.
    pub fn delete_template(&self, app: &str, name: &str) -> Result<(), CatalogError> {
        let dir = self.existing_template_dir(app)?;
        let path = dir.join(format!("{name}.{TEMPLATE_EXTENSION}"));
        if !path.is_file() {
            return Err(CatalogError::NotFound(format!("template `{name}`")));
        }
        remove_file_if_exists(&path)?;

        let mut registry = self.load_registry()?;
        if let Some(entry) = registry.get_mut(app) {
            if Path::new(&entry.template) == path {
                entry.template.clear();
                self.save_registry(&registry)?;
            }
        }
        Ok(())
    }

    pub(super) fn template_path(&self, app: &str, name: &str) -> PathBuf {
        self.app_template_dir(app)
            .join(format!("{name}.{TEMPLATE_EXTENSION}"))
    }

    /// Template body recovered from the app's target file; empty when the
    /// target cannot be read.
    pub(super) fn extract_from_target(&self, app: &App) -> String {
        match std::fs::read_to_string(&app.path) {
            Ok(text) => extract_template(&text, &self.config.markers, app.write_mode),
            Err(e) => {
                warn!(app = %app.name, path = %app.path, error = %e, "target unreadable; starting from an empty template");
                String::new()
            }
        }
    }

    fn existing_template_dir(&self, app: &str) -> Result<PathBuf, CatalogError> {
        let registry = self.load_registry()?;
        let dir = match registry.get(app) {
            Some(found) => self.app_template_dir(&found.name),
            None => self.app_template_dir(app),
        };
        if dir.is_dir() {
            Ok(dir)
        } else {
            Err(CatalogError::NotFound(format!("templates of app `{app}`")))
        }
    }
}

pub(super) fn write_template(path: &Path, body: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, body)
}

fn template_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };
    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_fixtures::catalog_in;
    use crate::registry::AppRegistry;
    use crate::splice::WriteMode;
    use crate::testsupport::TestTempDir;

    fn register(tmp: &TestTempDir, app: App) {
        let path = tmp.child("home/apps.yaml");
        let mut registry = AppRegistry::load_or_default(&path).expect("load");
        registry.insert(app);
        registry.save(&path).expect("save");
    }

    fn kitty(tmp: &TestTempDir) -> App {
        let target = tmp.write_text(
            "kitty.conf",
            "font_size 11\n# START_PIN_HERE\nbackground #000000\n# END_PIN_HERE\n",
        );
        App {
            path: target.to_string_lossy().into_owned(),
            active: true,
            ..App::new("kitty")
        }
    }

    #[test]
    fn create_extracts_marker_region() {
        let tmp = TestTempDir::new("tpl-create");
        let catalog = catalog_in(&tmp);
        register(&tmp, kitty(&tmp));

        let path = catalog.create_template("Kitty", "dark").expect("create");
        assert_eq!(path, tmp.child("home/templates/kitty/dark.mustache"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "background #000000");
        assert!(matches!(
            catalog.create_template("kitty", "dark"),
            Err(CatalogError::AlreadyExists(_))
        ));
    }

    #[test]
    fn create_in_overwrite_mode_takes_whole_file() {
        let tmp = TestTempDir::new("tpl-overwrite");
        let catalog = catalog_in(&tmp);
        register(
            &tmp,
            App {
                write_mode: WriteMode::Overwrite,
                ..kitty(&tmp)
            },
        );
        let path = catalog.create_template("kitty", "all").expect("create");
        assert!(std::fs::read_to_string(&path).unwrap().starts_with("font_size 11"));
    }

    #[test]
    fn create_for_unknown_app_fails() {
        let tmp = TestTempDir::new("tpl-unknown");
        assert!(matches!(
            catalog_in(&tmp).create_template("nope", "x"),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn copy_picks_first_free_suffix() {
        let tmp = TestTempDir::new("tpl-copy");
        let catalog = catalog_in(&tmp);
        register(&tmp, kitty(&tmp));
        tmp.write_text("home/templates/kitty/base.mustache", "bg={{base00-hex}}");
        tmp.write_text("home/templates/kitty/base_1.mustache", "taken");

        let copy = catalog.copy_template("kitty", "base").expect("copy");
        assert_eq!(copy, tmp.child("home/templates/kitty/base_2.mustache"));
        assert_eq!(std::fs::read_to_string(&copy).unwrap(), "bg={{base00-hex}}");
    }

    #[test]
    fn listing_marks_selected_template() {
        let tmp = TestTempDir::new("tpl-list");
        let catalog = catalog_in(&tmp);
        let selected = tmp.write_text("home/templates/kitty/b.mustache", "");
        tmp.write_text("home/templates/kitty/a.mustache", "");
        register(
            &tmp,
            App {
                template: selected.to_string_lossy().into_owned(),
                ..kitty(&tmp)
            },
        );

        let entries = catalog.templates("kitty").expect("list");
        let summary: Vec<_> = entries
            .iter()
            .map(|e| (e.name.as_str(), e.selected))
            .collect();
        assert_eq!(summary, vec![("a", false), ("b", true)]);
    }

    #[test]
    fn rename_and_delete_follow_selection() {
        let tmp = TestTempDir::new("tpl-rename");
        let catalog = catalog_in(&tmp);
        let selected = tmp.write_text("home/templates/kitty/old.mustache", "x");
        register(
            &tmp,
            App {
                template: selected.to_string_lossy().into_owned(),
                ..kitty(&tmp)
            },
        );

        let renamed = catalog.rename_template("kitty", "old", "new").expect("rename");
        let registry = AppRegistry::load(&tmp.child("home/apps.yaml")).expect("load");
        assert_eq!(
            registry.get("kitty").map(|a| PathBuf::from(&a.template)),
            Some(renamed)
        );

        catalog.delete_template("kitty", "new").expect("delete");
        let registry = AppRegistry::load(&tmp.child("home/apps.yaml")).expect("load");
        assert_eq!(registry.get("kitty").map(|a| a.template.as_str()), Some(""));
        assert!(matches!(
            catalog.delete_template("kitty", "new"),
            Err(CatalogError::NotFound(_))
        ));
    }
}
