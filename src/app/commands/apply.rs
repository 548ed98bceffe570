//! `pin apply <THEME>`.

use pin::apply::hooks::{HookResult, HookStatus};
use pin::apply::{Applier, ApplyReport};
use pin::catalog::Catalog;
use pin::config::Config;
use pin::render::Renderer;

/// Find `theme_name`, run a pass and print the per-app summary.
pub(crate) async fn handle_apply(
    renderer: &Renderer,
    config: Config,
    theme_name: &str,
) -> Result<(), String> {
    let theme = Catalog::new(config.clone())
        .find_theme(theme_name)
        .map_err(|e| e.to_string())?;
    let report = Applier::new(config)
        .apply(&theme)
        .await
        .map_err(|e| format!("failed to apply theme `{}`: {e}", theme.name))?;
    render_report(renderer, &report);
    Ok(())
}

fn render_report(renderer: &Renderer, report: &ApplyReport) {
    renderer.activity(&format!("applied theme: {}", report.theme));
    if report.first_run {
        renderer.detail("no apps registered yet; add one with `pin app add`");
        return;
    }
    for app in &report.apps {
        if app.outcome.is_problem() {
            renderer.warn(&format!("{}: {}", app.app, app.outcome));
        } else {
            renderer.field(&app.app, &app.outcome.to_string());
        }
    }
    for hook in report.hooks.iter().filter(|hook| !hook.succeeded()) {
        renderer.warn(&hook_failure(hook));
    }
}

fn hook_failure(hook: &HookResult) -> String {
    let reason = match &hook.status {
        HookStatus::Succeeded => "succeeded".to_string(),
        HookStatus::Failed { code: Some(code), stderr } if !stderr.is_empty() => {
            format!("exited with {code}: {stderr}")
        }
        HookStatus::Failed { code: Some(code), .. } => format!("exited with {code}"),
        HookStatus::Failed { code: None, .. } => "killed by signal".to_string(),
        HookStatus::SpawnFailed(msg) => format!("could not start: {msg}"),
    };
    format!("hook for {} (`{}`) {reason}", hook.owner, hook.command)
}
