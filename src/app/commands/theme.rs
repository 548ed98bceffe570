//! `pin themes` and `pin theme ...`.

use pin::catalog::{Catalog, Theme};
use pin::render::Renderer;

pub(crate) fn list_themes(renderer: &Renderer, catalog: &Catalog) -> Result<(), String> {
    let themes = catalog.themes().map_err(|e| e.to_string())?;
    if themes.is_empty() {
        renderer.warn("No themes found.");
        return Ok(());
    }
    for theme in &themes {
        renderer.entry(theme.active, &theme_row(theme));
    }
    Ok(())
}

pub(crate) fn new_theme(renderer: &Renderer, catalog: &Catalog, name: &str) -> Result<(), String> {
    let theme = catalog.create_theme(name).map_err(|e| e.to_string())?;
    renderer.activity(&format!("created theme: {}", theme.name));
    renderer.field("path", &theme.path.display().to_string());
    Ok(())
}

pub(crate) fn rename_theme(
    renderer: &Renderer,
    catalog: &Catalog,
    old: &str,
    new: &str,
) -> Result<(), String> {
    let theme = catalog.rename_theme(old, new).map_err(|e| e.to_string())?;
    renderer.activity(&format!("renamed theme: {old} -> {}", theme.name));
    renderer.field("path", &theme.path.display().to_string());
    Ok(())
}

pub(crate) fn delete_theme(renderer: &Renderer, catalog: &Catalog, name: &str) -> Result<(), String> {
    let theme = catalog.delete_theme(name).map_err(|e| e.to_string())?;
    renderer.activity(&format!("deleted theme: {}", theme.name));
    Ok(())
}

pub(crate) fn set_theme_hook(
    renderer: &Renderer,
    catalog: &Catalog,
    name: &str,
    hook: &str,
) -> Result<(), String> {
    let theme = catalog.set_theme_hook(name, hook).map_err(|e| e.to_string())?;
    if theme.hook.is_empty() {
        renderer.activity(&format!("cleared hook of theme: {}", theme.name));
    } else {
        renderer.activity(&format!("set hook of theme: {}", theme.name));
        renderer.field("hook", &theme.hook);
    }
    Ok(())
}

fn theme_row(theme: &Theme) -> String {
    let mut row = theme.name.clone();
    if theme.custom {
        row.push_str(" (custom)");
    }
    if !theme.hook.is_empty() {
        row.push_str(&format!("  hook: {}", theme.hook));
    }
    row
}
