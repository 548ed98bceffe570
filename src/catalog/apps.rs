//! App registration.

use std::path::Path;

use tracing::info;

use crate::error::CatalogError;
use crate::registry::{App, AppRegistry};
use crate::splice::WriteMode;

use super::templates::write_template;
use super::{validate_name, Catalog};

/// Template written when an app is registered.
const BACKUP_TEMPLATE: &str = "Backup";

/// Field changes for [`Catalog::update_app`]; `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppUpdate {
    /// New name; the app's template dir moves with it.
    pub name: Option<String>,
    pub path: Option<String>,
    pub write_mode: Option<WriteMode>,
    pub hook: Option<String>,
    pub active: Option<bool>,
    /// Template name inside the app's template dir; empty clears it.
    pub template: Option<String>,
}

impl Catalog {
    /// Registered apps, plus template dirs nobody registered, sorted by name.
    pub fn apps(&self) -> Result<Vec<App>, CatalogError> {
        let registry = self.load_registry()?;
        let mut apps: Vec<App> = registry.iter().map(|(_, app)| app.clone()).collect();

        match std::fs::read_dir(&self.config.paths.templates) {
            Ok(entries) => {
                for entry in entries {
                    let entry = entry?;
                    if !entry.file_type()?.is_dir() {
                        continue;
                    }
                    let name = entry.file_name().to_string_lossy().into_owned();
                    if !registry.contains(&name) {
                        apps.push(App::new(name));
                    }
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        apps.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(apps)
    }

    /// Register `app`, snapshot its target into `Backup.mustache`, select
    /// that template and activate the app.
    pub fn add_app(&self, mut app: App) -> Result<App, CatalogError> {
        validate_name("app", &app.name)?;
        let mut registry = self.load_registry()?;
        if registry.contains(&app.name) {
            return Err(CatalogError::AlreadyExists(format!("app `{}`", app.name)));
        }

        let backup = self.template_path(&app.name, BACKUP_TEMPLATE);
        write_template(&backup, &self.extract_from_target(&app))?;
        app.template = backup.to_string_lossy().into_owned();
        app.active = true;

        registry.insert(app.clone());
        self.save_registry(&registry)?;
        info!(app = %app.name, path = %app.path, mode = app.write_mode.as_str(), "registered app");
        Ok(app)
    }

    /// Unregister an app and delete its template dir.
    pub fn remove_app(&self, name: &str) -> Result<App, CatalogError> {
        let mut registry = self.load_registry()?;
        let app = registry
            .remove(name)
            .ok_or_else(|| CatalogError::NotFound(format!("app `{name}`")))?;
        self.save_registry(&registry)?;

        match std::fs::remove_dir_all(self.app_template_dir(&app.name)) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => return Err(e.into()),
            _ => {}
        }
        info!(app = %app.name, "removed app");
        Ok(app)
    }

    pub fn update_app(&self, name: &str, update: AppUpdate) -> Result<App, CatalogError> {
        let mut registry = self.load_registry()?;
        let mut app = self.registered_app(&registry, name)?;

        if let Some(new_name) = update.name.filter(|new_name| *new_name != app.name) {
            self.rename_app(&mut registry, &mut app, new_name)?;
        }
        if let Some(path) = update.path {
            app.path = path.trim().to_string();
        }
        if let Some(mode) = update.write_mode {
            app.write_mode = mode;
        }
        if let Some(hook) = update.hook {
            app.hook = hook.trim().to_string();
        }
        if let Some(active) = update.active {
            app.active = active;
        }
        if let Some(template) = update.template {
            app.template = if template.is_empty() {
                String::new()
            } else {
                let path = self.template_path(&app.name, &template);
                if !path.is_file() {
                    return Err(CatalogError::NotFound(format!(
                        "template `{template}` of app `{}`",
                        app.name
                    )));
                }
                path.to_string_lossy().into_owned()
            };
        }

        registry.insert(app.clone());
        self.save_registry(&registry)?;
        Ok(app)
    }

    /// Re-key `app` in `registry` and move its template dir along.
    fn rename_app(
        &self,
        registry: &mut AppRegistry,
        app: &mut App,
        new_name: String,
    ) -> Result<(), CatalogError> {
        validate_name("app", &new_name)?;
        let case_only = new_name.eq_ignore_ascii_case(&app.name);
        let old_dir = self.app_template_dir(&app.name);
        let new_dir = self.app_template_dir(&new_name);
        if !case_only && (registry.contains(&new_name) || new_dir.exists()) {
            return Err(CatalogError::AlreadyExists(format!("app `{new_name}`")));
        }

        match std::fs::rename(&old_dir, &new_dir) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => return Err(e.into()),
            _ => {}
        }
        if let Some(file_name) = Path::new(&app.template).file_name() {
            app.template = new_dir.join(file_name).to_string_lossy().into_owned();
        }

        registry.remove(&app.name);
        info!(from = %app.name, to = %new_name, "renamed app");
        app.name = new_name;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_fixtures::catalog_in;
    use crate::testsupport::TestTempDir;

    fn waybar(tmp: &TestTempDir) -> App {
        let target = tmp.write_text(
            "waybar.css",
            "@define-color fg #fff;\n/* START_PIN_HERE */\n@define-color bg #000;\n/* END_PIN_HERE */",
        );
        App {
            path: target.to_string_lossy().into_owned(),
            hook: "pkill -SIGUSR2 waybar".into(),
            ..App::new("waybar")
        }
    }

    #[test]
    fn add_writes_backup_and_activates() {
        let tmp = TestTempDir::new("apps-add");
        let catalog = catalog_in(&tmp);

        let app = catalog.add_app(waybar(&tmp)).expect("add");
        assert!(app.active);
        assert_eq!(
            std::fs::read_to_string(&app.template).unwrap(),
            "@define-color bg #000;"
        );
        let registry = AppRegistry::load(&tmp.child("home/apps.yaml")).expect("load");
        assert_eq!(registry.get("waybar"), Some(&app));

        assert!(matches!(
            catalog.add_app(App::new("WAYBAR")),
            Err(CatalogError::AlreadyExists(_))
        ));
    }

    #[test]
    fn add_with_unreadable_target_gets_empty_backup() {
        let tmp = TestTempDir::new("apps-missing-target");
        let app = App {
            path: tmp.child("nowhere.conf").to_string_lossy().into_owned(),
            ..App::new("ghost")
        };
        let app = catalog_in(&tmp).add_app(app).expect("add");
        assert_eq!(std::fs::read_to_string(&app.template).unwrap(), "");
    }

    #[test]
    fn listing_includes_unregistered_template_dirs() {
        let tmp = TestTempDir::new("apps-list");
        let catalog = catalog_in(&tmp);
        catalog.add_app(waybar(&tmp)).expect("add");
        tmp.write_text("home/templates/alacritty/Backup.mustache", "");

        let apps = catalog.apps().expect("apps");
        let names: Vec<_> = apps.iter().map(|a| (a.name.as_str(), a.active)).collect();
        assert_eq!(names, vec![("alacritty", false), ("waybar", true)]);
    }

    #[test]
    fn remove_deletes_registration_and_templates() {
        let tmp = TestTempDir::new("apps-remove");
        let catalog = catalog_in(&tmp);
        catalog.add_app(waybar(&tmp)).expect("add");

        catalog.remove_app("Waybar").expect("remove");
        assert!(!tmp.child("home/templates/waybar").exists());
        assert!(catalog.apps().expect("apps").is_empty());
        assert!(matches!(
            catalog.remove_app("waybar"),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn update_changes_only_given_fields() {
        let tmp = TestTempDir::new("apps-update");
        let catalog = catalog_in(&tmp);
        let added = catalog.add_app(waybar(&tmp)).expect("add");
        tmp.write_text("home/templates/waybar/alt.mustache", "alt");

        let updated = catalog
            .update_app(
                "waybar",
                AppUpdate {
                    write_mode: Some(WriteMode::Overwrite),
                    active: Some(false),
                    template: Some("alt".into()),
                    ..AppUpdate::default()
                },
            )
            .expect("update");
        assert_eq!(updated.path, added.path);
        assert_eq!(updated.hook, added.hook);
        assert_eq!(updated.write_mode, WriteMode::Overwrite);
        assert!(!updated.active);
        assert!(updated.template.ends_with("alt.mustache"));

        assert!(matches!(
            catalog.update_app(
                "waybar",
                AppUpdate {
                    template: Some("missing".into()),
                    ..AppUpdate::default()
                }
            ),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn rename_moves_templates_and_rekeys_registry() {
        let tmp = TestTempDir::new("apps-rename");
        let catalog = catalog_in(&tmp);
        catalog.add_app(waybar(&tmp)).expect("add");
        tmp.write_text("home/templates/waybar/alt.mustache", "alt");

        let renamed = catalog
            .update_app(
                "waybar",
                AppUpdate {
                    name: Some("bar".into()),
                    ..AppUpdate::default()
                },
            )
            .expect("rename");
        assert_eq!(renamed.name, "bar");
        assert_eq!(
            Path::new(&renamed.template),
            tmp.child("home/templates/bar/Backup.mustache")
        );
        assert_eq!(
            std::fs::read_to_string(&renamed.template).unwrap(),
            "@define-color bg #000;"
        );
        assert!(tmp.child("home/templates/bar/alt.mustache").is_file());
        assert!(!tmp.child("home/templates/waybar").exists());

        let registry = AppRegistry::load(&tmp.child("home/apps.yaml")).expect("load");
        assert!(registry.get("waybar").is_none());
        assert_eq!(registry.get("bar"), Some(&renamed));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn rename_rejects_taken_and_invalid_names() {
        let tmp = TestTempDir::new("apps-rename-clash");
        let catalog = catalog_in(&tmp);
        catalog.add_app(waybar(&tmp)).expect("add");
        catalog
            .add_app(App {
                path: tmp.child("kitty.conf").to_string_lossy().into_owned(),
                ..App::new("kitty")
            })
            .expect("add kitty");
        let rename = |to: &str| AppUpdate {
            name: Some(to.into()),
            ..AppUpdate::default()
        };

        assert!(matches!(
            catalog.update_app("waybar", rename("KITTY")),
            Err(CatalogError::AlreadyExists(_))
        ));
        assert!(matches!(
            catalog.update_app("waybar", rename("a/b")),
            Err(CatalogError::Invalid(_))
        ));
        assert!(tmp.child("home/templates/waybar/Backup.mustache").is_file());
        let registry = AppRegistry::load(&tmp.child("home/apps.yaml")).expect("load");
        assert!(registry.get("waybar").is_some());
    }
}
