//! Unified error types for the theme engine.
//!
//! Per-application failures during an apply pass are not errors; they are
//! reported as [`crate::apply::AppOutcome`] values. Only pass-fatal problems
//! surface through [`ApplyError`].

use std::fmt;

// ---------------------------------------------------------------------------
// ColorError
// ---------------------------------------------------------------------------

/// Errors from hex color parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// Input was not 3 or 6 hex digits (after an optional `#`).
    InvalidColorFormat(String),
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidColorFormat(raw) => write!(f, "invalid hex color `{raw}`"),
        }
    }
}

impl std::error::Error for ColorError {}

// ---------------------------------------------------------------------------
// SchemeError
// ---------------------------------------------------------------------------

/// Errors when loading a scheme document or expanding its variables.
#[derive(Debug)]
pub enum SchemeError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
    /// A required palette slot is absent.
    InvalidScheme(String),
    /// A palette slot holds a malformed color.
    Color { slot: String, source: ColorError },
}

impl fmt::Display for SchemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Yaml(e) => write!(f, "yaml: {e}"),
            Self::InvalidScheme(msg) => write!(f, "invalid scheme: {msg}"),
            Self::Color { slot, source } => write!(f, "palette slot `{slot}`: {source}"),
        }
    }
}

impl std::error::Error for SchemeError {}

impl From<std::io::Error> for SchemeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_yaml::Error> for SchemeError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml(e)
    }
}

// ---------------------------------------------------------------------------
// TemplateError
// ---------------------------------------------------------------------------

/// Errors from template parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// Malformed tag or unbalanced section. `offset` is a byte offset into
    /// the template source.
    Syntax { message: String, offset: usize },
    /// A close tag that does not match the innermost open section.
    UnknownSectionClose {
        name: String,
        expected: Option<String>,
    },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax { message, offset } => {
                write!(f, "template syntax error at byte {offset}: {message}")
            }
            Self::UnknownSectionClose {
                name,
                expected: Some(open),
            } => write!(f, "section close `{name}` does not match open section `{open}`"),
            Self::UnknownSectionClose {
                name,
                expected: None,
            } => write!(f, "section close `{name}` has no open section"),
        }
    }
}

impl std::error::Error for TemplateError {}

// ---------------------------------------------------------------------------
// RegistryError
// ---------------------------------------------------------------------------

/// Errors reading or writing the app registry and its sibling documents.
#[derive(Debug)]
pub enum RegistryError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
}

impl RegistryError {
    /// True when the underlying cause is a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Yaml(e) => write!(f, "yaml: {e}"),
        }
    }
}

impl std::error::Error for RegistryError {}

impl From<std::io::Error> for RegistryError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_yaml::Error> for RegistryError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml(e)
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// CatalogError
// ---------------------------------------------------------------------------

/// Errors from theme/template/app management operations.
#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Registry(RegistryError),
    Scheme(SchemeError),
    NotFound(String),
    AlreadyExists(String),
    Invalid(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Registry(e) => write!(f, "registry: {e}"),
            Self::Scheme(e) => write!(f, "scheme: {e}"),
            Self::NotFound(what) => write!(f, "{what} not found"),
            Self::AlreadyExists(what) => write!(f, "{what} already exists"),
            Self::Invalid(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<std::io::Error> for CatalogError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<RegistryError> for CatalogError {
    fn from(e: RegistryError) -> Self {
        Self::Registry(e)
    }
}

impl From<SchemeError> for CatalogError {
    fn from(e: SchemeError) -> Self {
        Self::Scheme(e)
    }
}

// ---------------------------------------------------------------------------
// ApplyError
// ---------------------------------------------------------------------------

/// Failures that abort a whole apply pass.
#[derive(Debug)]
pub enum ApplyError {
    /// The registry exists but could not be read or parsed.
    RegistryLoad(RegistryError),
    /// The scheme could not be read, parsed, or expanded.
    Scheme(SchemeError),
    /// Writing the registry back failed after app files were updated.
    RegistrySave(RegistryError),
    /// Writing the active-theme pointer failed.
    ActiveTheme(std::io::Error),
}

impl fmt::Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RegistryLoad(e) => write!(f, "failed to load app registry: {e}"),
            Self::Scheme(e) => write!(f, "failed to load scheme: {e}"),
            Self::RegistrySave(e) => write!(f, "failed to save app registry: {e}"),
            Self::ActiveTheme(e) => write!(f, "failed to record active theme: {e}"),
        }
    }
}

impl std::error::Error for ApplyError {}

impl From<SchemeError> for ApplyError {
    fn from(e: SchemeError) -> Self {
        Self::Scheme(e)
    }
}
