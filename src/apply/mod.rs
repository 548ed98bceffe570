//! The apply pass: render every active app's template against one theme.
//!
//! `LoadRegistry → LoadScheme → ExpandVariables → FanOutPerApp →
//! AwaitAllApps → RunHooks → PersistRegistry+ActiveTheme`.
//!
//! Registry, scheme and expansion failures abort the pass before any file
//! is touched. Everything that goes wrong for a single app is contained in
//! that app's [`AppOutcome`]; the other apps still update. A failure to
//! persist at the end fails the pass, but target files already written stay
//! written.

pub mod hooks;
mod unit;

use std::fmt;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::catalog::Theme;
use crate::config::Config;
use crate::error::{ApplyError, SchemeError};
use crate::registry::{write_active_theme_async, AppRegistry};
use crate::scheme::Scheme;
use crate::variables::VariableSet;

use hooks::{run_hooks, HookJob, HookOwner, HookResult};
use unit::{apply_app, UnitContext};

/// What happened to one app during a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppOutcome {
    /// Target file rewritten.
    Updated,
    /// Splice mode, but the target lacks a marker pair. Nothing written;
    /// the app stays active.
    MarkersMissing,
    /// Inactive, or missing a target path or template.
    Skipped,
    /// Template unreadable; the app's template was cleared and it was
    /// deactivated.
    TemplateMissing,
    /// Splice target unreadable; the app's path was cleared and it was
    /// deactivated.
    TargetMissing,
    RenderFailed(String),
    WriteFailed(String),
    /// The unit died before reporting; its registry entry is unchanged.
    Panicked,
}

impl AppOutcome {
    /// Outcomes the user should look at.
    pub fn is_problem(&self) -> bool {
        !matches!(self, Self::Updated | Self::Skipped)
    }
}

impl fmt::Display for AppOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Updated => f.write_str("updated"),
            Self::MarkersMissing => f.write_str("markers not found, file left unchanged"),
            Self::Skipped => f.write_str("skipped"),
            Self::TemplateMissing => f.write_str("template unreadable, app deactivated"),
            Self::TargetMissing => f.write_str("target unreadable, app deactivated"),
            Self::RenderFailed(msg) => write!(f, "render failed: {msg}"),
            Self::WriteFailed(msg) => write!(f, "write failed: {msg}"),
            Self::Panicked => f.write_str("apply task panicked"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppReport {
    pub app: String,
    pub outcome: AppOutcome,
}

/// Summary of a completed pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub theme: String,
    /// No registry existed; only the active-theme pointer was written.
    pub first_run: bool,
    /// One entry per registered app, in registry order.
    pub apps: Vec<AppReport>,
    pub hooks: Vec<HookResult>,
}

impl ApplyReport {
    pub fn outcome(&self, app: &str) -> Option<&AppOutcome> {
        self.apps
            .iter()
            .find(|report| report.app == app)
            .map(|report| &report.outcome)
    }

    pub fn updated_count(&self) -> usize {
        self.apps
            .iter()
            .filter(|report| report.outcome == AppOutcome::Updated)
            .count()
    }
}

/// Runs apply passes against one configuration.
#[derive(Debug, Clone)]
pub struct Applier {
    config: Config,
}

impl Applier {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn apply(&self, theme: &Theme) -> Result<ApplyReport, ApplyError> {
        let paths = &self.config.paths;
        let mut report = ApplyReport {
            theme: theme.name.clone(),
            ..ApplyReport::default()
        };

        let mut registry = match AppRegistry::load_async(&paths.apps).await {
            Ok(registry) => registry,
            Err(e) if e.is_not_found() => {
                info!(theme = %theme.name, "no app registry yet; recording active theme only");
                write_active_theme_async(&paths.active_theme, &theme.path)
                    .await
                    .map_err(ApplyError::ActiveTheme)?;
                report.first_run = true;
                return Ok(report);
            }
            Err(e) => return Err(ApplyError::RegistryLoad(e)),
        };

        let text = tokio::fs::read_to_string(&theme.path)
            .await
            .map_err(SchemeError::from)?;
        let scheme = Scheme::from_yaml(&text)?;
        let vars = Arc::new(VariableSet::from_scheme(&scheme)?);
        info!(theme = %theme.name, apps = registry.len(), "applying theme");

        let ctx = Arc::new(UnitContext {
            templates_dir: paths.templates.clone(),
            markers: self.config.markers.clone(),
            theme_name: theme.name.clone(),
            vars,
        });

        // Fan out: every eligible app gets its own task and its own copy.
        let mut units = Vec::new();
        for (key, app) in registry.iter_mut() {
            if app.is_ready() {
                let handle = tokio::spawn(apply_app(Arc::clone(&ctx), app.clone()));
                units.push((key.clone(), Some(handle)));
            } else {
                app.active = false;
                units.push((key.clone(), None));
            }
        }

        for (key, handle) in units {
            let outcome = match handle {
                None => AppOutcome::Skipped,
                Some(handle) => match handle.await {
                    Ok((app, outcome)) => {
                        if let Some(entry) = registry.get_mut(&key) {
                            *entry = app;
                        }
                        outcome
                    }
                    Err(e) => {
                        error!(app = %key, error = %e, "apply task did not complete");
                        AppOutcome::Panicked
                    }
                },
            };
            report.apps.push(AppReport { app: key, outcome });
        }

        report.hooks = run_hooks(&self.config.shell_prefix(), hook_jobs(theme, &registry)).await;

        if let Err(e) = registry.save_async(&paths.apps).await {
            error!(path = %paths.apps.display(), error = %e, "failed to save app registry; target files already written were not rolled back");
            return Err(ApplyError::RegistrySave(e));
        }
        if let Err(e) = write_active_theme_async(&paths.active_theme, &theme.path).await {
            error!(path = %paths.active_theme.display(), error = %e, "failed to record active theme; target files already written were not rolled back");
            return Err(ApplyError::ActiveTheme(e));
        }

        let problems = report.apps.iter().filter(|r| r.outcome.is_problem()).count();
        if problems > 0 {
            warn!(theme = %theme.name, problems, "theme applied with problems");
        }
        info!(theme = %theme.name, updated = report.updated_count(), "theme applied");
        Ok(report)
    }
}

/// The theme hook first, then every app hook in registry order.
fn hook_jobs(theme: &Theme, registry: &AppRegistry) -> Vec<HookJob> {
    let theme_hook = Some(theme.hook.trim())
        .filter(|hook| !hook.is_empty())
        .map(|hook| HookJob {
            owner: HookOwner::Theme(theme.name.clone()),
            command: hook.to_string(),
        });
    let app_hooks = registry
        .iter()
        .filter(|(_, app)| !app.hook.trim().is_empty())
        .map(|(key, app)| HookJob {
            owner: HookOwner::App(key.clone()),
            command: app.hook.trim().to_string(),
        });
    theme_hook.into_iter().chain(app_hooks).collect()
}
