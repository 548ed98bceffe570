//! Default configuration constants and on-disk layout names.

/// Embedded default `pin.toml` written by `pin init`.
pub(super) const DEFAULT_PIN_CONFIG_TEMPLATE: &str = include_str!("../templates/pin.toml");
/// Hook command prefix.
pub(super) const DEFAULT_SHELL: &str = "sh -c";
pub(super) const DEFAULT_INSERT_START: &str = "START_PIN_HERE";
pub(super) const DEFAULT_INSERT_END: &str = "END_PIN_HERE";

/// Directory name under the config and data roots.
pub(super) const APP_DIR_NAME: &str = "pin";
pub(super) const CONFIG_FILE_NAME: &str = "pin.toml";

pub(super) const APPS_FILE: &str = "apps.yaml";
pub(super) const TEMPLATES_DIR: &str = "templates";
pub(super) const ACTIVE_THEME_FILE: &str = "activeTheme";
pub(super) const THEME_HOOKS_FILE: &str = "themeHooks.yaml";
pub(super) const CUSTOM_SCHEMES_DIR: &str = "schemes";
/// Base scheme collection, relative to the data dir.
pub(super) const BASE_SCHEMES_DIR: [&str; 3] = ["schemes", "tinted-theming", "base16"];
