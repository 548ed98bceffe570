//! One app's share of an apply pass.
//!
//! A unit owns a private copy of its [`App`] and hands it back together with
//! the outcome; the orchestrator merges both after the join.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::registry::App;
use crate::splice::{compose, Markers, Splice, WriteMode};
use crate::template;
use crate::variables::VariableSet;

use super::AppOutcome;

/// Read-only inputs shared by every unit of a pass.
#[derive(Debug)]
pub(super) struct UnitContext {
    pub templates_dir: PathBuf,
    pub markers: Markers,
    pub theme_name: String,
    pub vars: Arc<VariableSet>,
}

pub(super) async fn apply_app(ctx: Arc<UnitContext>, mut app: App) -> (App, AppOutcome) {
    let template_path = resolve_template(
        &ctx.templates_dir.join(&app.name),
        &ctx.theme_name,
        &app.template,
    )
    .await;

    let source = match tokio::fs::read_to_string(&template_path).await {
        Ok(source) => source,
        Err(e) => {
            warn!(app = %app.name, path = %template_path.display(), error = %e, "template unreadable; deactivating app");
            app.template.clear();
            app.active = false;
            return (app, AppOutcome::TemplateMissing);
        }
    };

    let rendered = match template::render(&source, ctx.vars.as_ref()) {
        Ok(rendered) => rendered,
        Err(e) => {
            warn!(app = %app.name, path = %template_path.display(), error = %e, "template failed to render");
            return (app, AppOutcome::RenderFailed(e.to_string()));
        }
    };

    let existing = match app.write_mode {
        WriteMode::Overwrite => String::new(),
        WriteMode::Splice => match tokio::fs::read_to_string(&app.path).await {
            Ok(text) => text,
            Err(e) => {
                warn!(app = %app.name, path = %app.path, error = %e, "target unreadable; deactivating app");
                app.path.clear();
                app.active = false;
                return (app, AppOutcome::TargetMissing);
            }
        },
    };

    let text = match compose(app.write_mode, &existing, &rendered, &ctx.markers) {
        Splice::Spliced(text) => text,
        Splice::Unchanged(_) => {
            warn!(app = %app.name, path = %app.path, start = %ctx.markers.start, end = %ctx.markers.end, "markers not found; target left untouched");
            return (app, AppOutcome::MarkersMissing);
        }
    };

    if let Err(e) = tokio::fs::write(&app.path, text).await {
        warn!(app = %app.name, path = %app.path, error = %e, "failed to write target");
        return (app, AppOutcome::WriteFailed(e.to_string()));
    }
    debug!(app = %app.name, path = %app.path, template = %template_path.display(), "updated");
    (app, AppOutcome::Updated)
}

/// A template in `dir` whose name (up to the first `.`) equals the theme
/// name wins; otherwise the app's selected template.
async fn resolve_template(dir: &Path, theme_name: &str, selected: &str) -> PathBuf {
    let mut names = Vec::new();
    if let Ok(mut entries) = tokio::fs::read_dir(dir).await {
        while let Ok(Some(entry)) = entries.next_entry().await {
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
    }
    names.sort();

    names
        .iter()
        .find(|name| name.split('.').next() == Some(theme_name))
        .map(|name| dir.join(name))
        .unwrap_or_else(|| PathBuf::from(selected))
}
