//! Theme discovery and custom theme management.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::CatalogError;
use crate::registry::{read_active_theme, write_active_theme, ThemeHooks};
use crate::scheme::Scheme;

use super::{remove_file_if_exists, stem_before_first_dot, validate_name, Catalog};

/// One scheme file available for applying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub path: PathBuf,
    /// Theme hook command; empty when none is set.
    pub hook: String,
    /// Whether the active-theme pointer names this file.
    pub active: bool,
    /// Custom schemes live under the home dir and may be edited.
    pub custom: bool,
}

impl Theme {
    /// A theme entry for an arbitrary scheme file.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: stem_before_first_dot(&path).unwrap_or_default(),
            path,
            hook: String::new(),
            active: false,
            custom: false,
        }
    }
}

impl Catalog {
    /// Custom schemes first, then the base collection; each in path order.
    pub fn themes(&self) -> Result<Vec<Theme>, CatalogError> {
        let paths = &self.config.paths;
        let pointer = read_active_theme(&paths.active_theme);
        let hooks = ThemeHooks::load(&paths.theme_hooks)?;

        let mut themes = Vec::new();
        for (dir, custom) in [(&paths.custom_schemes, true), (&paths.base_schemes, false)] {
            for path in scheme_files(dir)? {
                let Some(name) = stem_before_first_dot(&path) else {
                    continue;
                };
                themes.push(Theme {
                    hook: hooks.get(&name).unwrap_or_default().to_string(),
                    active: pointer_names(pointer.as_deref(), &path),
                    custom,
                    name,
                    path,
                });
            }
        }
        Ok(themes)
    }

    /// Look a theme up by exact name, then ignoring case.
    pub fn find_theme(&self, name: &str) -> Result<Theme, CatalogError> {
        let themes = self.themes()?;
        let exact = themes.iter().position(|t| t.name == name);
        let index = exact.or_else(|| {
            themes
                .iter()
                .position(|t| t.name.eq_ignore_ascii_case(name))
        });
        index
            .map(|i| themes[i].clone())
            .ok_or_else(|| CatalogError::NotFound(format!("theme `{name}`")))
    }

    /// Create a custom scheme from the active one, or from the default
    /// palette when no readable scheme is active.
    pub fn create_theme(&self, name: &str) -> Result<Theme, CatalogError> {
        validate_name("theme", name)?;
        let paths = &self.config.paths;
        let path = paths.custom_schemes.join(format!("{name}.yaml"));
        if path.exists() {
            return Err(CatalogError::AlreadyExists(format!("theme `{name}`")));
        }

        let active = read_active_theme(&paths.active_theme);
        let mut scheme = match active.as_deref().map(Scheme::load) {
            Some(Ok(scheme)) => scheme,
            Some(Err(e)) => {
                debug!(error = %e, "active scheme unreadable; using default palette");
                Scheme::with_default_palette(name)
            }
            None => Scheme::with_default_palette(name),
        };
        scheme.name = name.to_string();
        scheme.slug.clear();

        std::fs::create_dir_all(&paths.custom_schemes)?;
        std::fs::write(&path, scheme.to_yaml()?)?;
        info!(theme = %name, path = %path.display(), "created theme");

        Ok(Theme {
            name: name.to_string(),
            path,
            hook: String::new(),
            active: false,
            custom: true,
        })
    }

    /// Rename a custom theme's file, carrying its hook and the active
    /// pointer along.
    pub fn rename_theme(&self, old: &str, new: &str) -> Result<Theme, CatalogError> {
        validate_name("theme", new)?;
        let theme = self.editable_theme(old)?;
        let new_path = theme.path.with_file_name(format!("{new}.yaml"));
        if new_path.exists() {
            return Err(CatalogError::AlreadyExists(format!("theme `{new}`")));
        }
        std::fs::rename(&theme.path, &new_path)?;

        let paths = &self.config.paths;
        let mut hooks = ThemeHooks::load(&paths.theme_hooks)?;
        hooks.rename(&theme.name, new);
        hooks.save(&paths.theme_hooks)?;

        if read_active_theme(&paths.active_theme).as_deref() == Some(theme.path.as_path()) {
            write_active_theme(&paths.active_theme, &new_path)?;
        }
        info!(from = %theme.name, to = %new, "renamed theme");

        Ok(Theme {
            name: new.to_string(),
            path: new_path,
            ..theme
        })
    }

    /// Delete a custom theme and its hook.
    pub fn delete_theme(&self, name: &str) -> Result<Theme, CatalogError> {
        let theme = self.editable_theme(name)?;
        remove_file_if_exists(&theme.path)?;

        let paths = &self.config.paths;
        let mut hooks = ThemeHooks::load(&paths.theme_hooks)?;
        hooks.set(&theme.name, "");
        hooks.save(&paths.theme_hooks)?;
        info!(theme = %theme.name, "deleted theme");
        Ok(theme)
    }

    /// Set, or with an empty command clear, a theme's hook.
    pub fn set_theme_hook(&self, name: &str, hook: &str) -> Result<Theme, CatalogError> {
        let mut theme = self.find_theme(name)?;
        let paths = &self.config.paths;
        let mut hooks = ThemeHooks::load(&paths.theme_hooks)?;
        hooks.set(&theme.name, hook);
        hooks.save(&paths.theme_hooks)?;
        theme.hook = hooks.get(&theme.name).unwrap_or_default().to_string();
        Ok(theme)
    }

    fn editable_theme(&self, name: &str) -> Result<Theme, CatalogError> {
        let theme = self.find_theme(name)?;
        if !theme.custom {
            return Err(CatalogError::Invalid(format!(
                "theme `{}` belongs to the base scheme collection and cannot be changed",
                theme.name
            )));
        }
        Ok(theme)
    }
}

/// Whether the pointer names the same file as `path`.
fn pointer_names(pointer: Option<&Path>, path: &Path) -> bool {
    match (pointer.and_then(Path::file_name), path.file_name()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn is_scheme_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == "yaml" || ext == "yml")
}

/// Every scheme file below `dir`, sorted; a missing dir has none.
fn scheme_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    collect_scheme_files(dir, &mut out)?;
    Ok(out)
}

fn collect_scheme_files(dir: &Path, out: &mut Vec<PathBuf>) -> std::io::Result<()> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };
    let mut paths = entries
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()?;
    paths.sort();
    for path in paths {
        if path.is_dir() {
            collect_scheme_files(&path, out)?;
        } else if is_scheme_file(&path) {
            out.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_fixtures::catalog_in;
    use crate::testsupport::{flat_scheme, TestTempDir};

    const BASE: &str = "data/schemes/tinted-theming/base16";

    fn write_scheme(tmp: &TestTempDir, relative: &str, name: &str, fill: &str) -> PathBuf {
        let yaml = flat_scheme(name, fill).to_yaml().expect("yaml");
        tmp.write_text(relative, &yaml)
    }

    #[test]
    fn lists_custom_then_base_and_marks_active() {
        let tmp = TestTempDir::new("themes-list");
        let catalog = catalog_in(&tmp);
        write_scheme(&tmp, &format!("{BASE}/nord.yaml"), "Nord", "#000");
        write_scheme(&tmp, &format!("{BASE}/sub/ayu.yml"), "Ayu", "#000");
        let mine = write_scheme(&tmp, "home/schemes/mine.yaml", "Mine", "#111");
        tmp.write_text(&format!("{BASE}/README.md"), "not a scheme");
        tmp.write_text("home/activeTheme", &mine.to_string_lossy());
        tmp.write_text("home/themeHooks.yaml", "nord: notify-send nord\n");

        let themes = catalog.themes().expect("themes");
        let names: Vec<_> = themes.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["mine", "nord", "ayu"]);
        assert!(themes[0].active && themes[0].custom);
        assert!(!themes[1].active && !themes[1].custom);
        assert_eq!(themes[1].hook, "notify-send nord");
    }

    #[test]
    fn missing_scheme_dirs_mean_no_themes() {
        let tmp = TestTempDir::new("themes-empty");
        assert!(catalog_in(&tmp).themes().expect("themes").is_empty());
    }

    #[test]
    fn find_prefers_exact_then_case_insensitive() {
        let tmp = TestTempDir::new("themes-find");
        let catalog = catalog_in(&tmp);
        write_scheme(&tmp, &format!("{BASE}/Nord.yaml"), "Nord", "#000");
        write_scheme(&tmp, &format!("{BASE}/nord.yaml"), "nord", "#000");

        assert_eq!(catalog.find_theme("nord").expect("exact").name, "nord");
        assert_eq!(catalog.find_theme("NORD").expect("folded").name, "Nord");
        assert!(matches!(
            catalog.find_theme("dracula"),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn create_copies_active_scheme_under_new_name() {
        let tmp = TestTempDir::new("themes-create");
        let catalog = catalog_in(&tmp);
        let active = write_scheme(&tmp, &format!("{BASE}/nord.yaml"), "Nord", "#123456");
        tmp.write_text("home/activeTheme", &active.to_string_lossy());

        let theme = catalog.create_theme("my-nord").expect("create");
        assert!(theme.custom);
        let scheme = Scheme::load(&theme.path).expect("load");
        assert_eq!(scheme.name, "my-nord");
        assert_eq!(scheme.palette.get("base00").map(String::as_str), Some("#123456"));

        assert!(matches!(
            catalog.create_theme("my-nord"),
            Err(CatalogError::AlreadyExists(_))
        ));
    }

    #[test]
    fn create_without_active_uses_default_palette() {
        let tmp = TestTempDir::new("themes-default");
        let theme = catalog_in(&tmp).create_theme("fresh").expect("create");
        let scheme = Scheme::load(&theme.path).expect("load");
        assert_eq!(scheme.missing_slot(), None);
        assert_eq!(scheme.system, "base16");
    }

    #[test]
    fn rename_moves_hook_and_pointer() {
        let tmp = TestTempDir::new("themes-rename");
        let catalog = catalog_in(&tmp);
        let old = write_scheme(&tmp, "home/schemes/old.yaml", "Old", "#000");
        tmp.write_text("home/activeTheme", &old.to_string_lossy());
        catalog.set_theme_hook("old", "echo hi").expect("hook");

        let renamed = catalog.rename_theme("old", "new").expect("rename");
        assert!(!old.exists());
        assert!(renamed.path.exists());
        assert_eq!(renamed.hook, "echo hi");
        assert_eq!(
            read_active_theme(&tmp.child("home/activeTheme")),
            Some(renamed.path.clone())
        );
        assert_eq!(catalog.find_theme("new").expect("find").hook, "echo hi");
    }

    #[test]
    fn base_themes_are_read_only() {
        let tmp = TestTempDir::new("themes-readonly");
        let catalog = catalog_in(&tmp);
        write_scheme(&tmp, &format!("{BASE}/nord.yaml"), "Nord", "#000");
        assert!(matches!(
            catalog.delete_theme("nord"),
            Err(CatalogError::Invalid(_))
        ));
        assert!(matches!(
            catalog.rename_theme("nord", "x"),
            Err(CatalogError::Invalid(_))
        ));
    }

    #[test]
    fn delete_removes_file_and_hook() {
        let tmp = TestTempDir::new("themes-delete");
        let catalog = catalog_in(&tmp);
        let path = write_scheme(&tmp, "home/schemes/gone.yaml", "Gone", "#000");
        catalog.set_theme_hook("gone", "echo bye").expect("hook");

        catalog.delete_theme("gone").expect("delete");
        assert!(!path.exists());
        let hooks = ThemeHooks::load(&tmp.child("home/themeHooks.yaml")).expect("hooks");
        assert_eq!(hooks.get("gone"), None);
    }
}
