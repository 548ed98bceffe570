//! `pin templates <APP>` and `pin template ...`.

use std::path::Path;

use pin::catalog::Catalog;
use pin::render::Renderer;

pub(crate) fn list_templates(renderer: &Renderer, catalog: &Catalog, app: &str) -> Result<(), String> {
    let templates = catalog.templates(app).map_err(|e| e.to_string())?;
    if templates.is_empty() {
        renderer.warn(&format!("App `{app}` has no templates."));
        return Ok(());
    }
    for template in &templates {
        renderer.entry(template.selected, &template.name);
    }
    Ok(())
}

pub(crate) fn new_template(
    renderer: &Renderer,
    catalog: &Catalog,
    app: &str,
    name: &str,
) -> Result<(), String> {
    let path = catalog.create_template(app, name).map_err(|e| e.to_string())?;
    report_written(renderer, "created template", &path);
    Ok(())
}

pub(crate) fn copy_template(
    renderer: &Renderer,
    catalog: &Catalog,
    app: &str,
    name: &str,
) -> Result<(), String> {
    let path = catalog.copy_template(app, name).map_err(|e| e.to_string())?;
    report_written(renderer, "copied template", &path);
    Ok(())
}

pub(crate) fn rename_template(
    renderer: &Renderer,
    catalog: &Catalog,
    app: &str,
    old: &str,
    new: &str,
) -> Result<(), String> {
    let path = catalog
        .rename_template(app, old, new)
        .map_err(|e| e.to_string())?;
    report_written(renderer, "renamed template", &path);
    Ok(())
}

pub(crate) fn delete_template(
    renderer: &Renderer,
    catalog: &Catalog,
    app: &str,
    name: &str,
) -> Result<(), String> {
    catalog
        .delete_template(app, name)
        .map_err(|e| e.to_string())?;
    renderer.activity(&format!("deleted template: {app}/{name}"));
    Ok(())
}

fn report_written(renderer: &Renderer, what: &str, path: &Path) {
    renderer.activity(what);
    renderer.field("path", &path.display().to_string());
}
