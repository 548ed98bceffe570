//! `pin apps` and `pin app ...`.

use std::borrow::Cow;
use std::path::Path;

use pin::catalog::{AppUpdate, Catalog};
use pin::registry::App;
use pin::render::Renderer;
use pin::splice::WriteMode;

pub(crate) fn list_apps(renderer: &Renderer, catalog: &Catalog) -> Result<(), String> {
    let apps = catalog.apps().map_err(|e| e.to_string())?;
    if apps.is_empty() {
        renderer.warn("No apps registered. Add one with `pin app add <NAME> --path <FILE>`.");
        return Ok(());
    }
    for app in &apps {
        renderer.entry(app.active, &app_row(app));
    }
    Ok(())
}

pub(crate) fn add_app(
    renderer: &Renderer,
    catalog: &Catalog,
    name: String,
    path: String,
    mode: WriteMode,
    hook: Option<String>,
) -> Result<(), String> {
    let app = App {
        path,
        write_mode: mode,
        hook: hook.unwrap_or_default(),
        ..App::new(name)
    };
    let app = catalog.add_app(app).map_err(|e| e.to_string())?;
    renderer.activity(&format!("registered app: {}", app.name));
    render_app_fields(renderer, &app);
    Ok(())
}

pub(crate) fn remove_app(renderer: &Renderer, catalog: &Catalog, name: &str) -> Result<(), String> {
    let app = catalog.remove_app(name).map_err(|e| e.to_string())?;
    renderer.activity(&format!("removed app: {}", app.name));
    Ok(())
}

pub(crate) fn update_app(
    renderer: &Renderer,
    catalog: &Catalog,
    name: &str,
    update: AppUpdate,
) -> Result<(), String> {
    if update == AppUpdate::default() {
        renderer.warn("Nothing to change; pass at least one of --name, --path, --mode, --hook, --active, --template.");
        return Ok(());
    }
    let app = catalog.update_app(name, update).map_err(|e| e.to_string())?;
    renderer.activity(&format!("updated app: {}", app.name));
    render_app_fields(renderer, &app);
    Ok(())
}

fn render_app_fields(renderer: &Renderer, app: &App) {
    renderer.field("path", &app.path);
    renderer.field("mode", app.write_mode.as_str());
    renderer.field("template", &app.template);
    renderer.field("active", if app.active { "yes" } else { "no" });
    if !app.hook.is_empty() {
        renderer.field("hook", &app.hook);
    }
}

fn app_row(app: &App) -> String {
    let path = if app.path.is_empty() { "-" } else { &app.path };
    let template = Path::new(&app.template)
        .file_name()
        .map_or(Cow::Borrowed("-"), |name| name.to_string_lossy());
    format!(
        "{}  [{}]  {path}  template: {template}",
        app.name,
        app.write_mode.as_str()
    )
}
