//! `pin init [--force]`.

use pin::config::{initialize_default_config, ConfigInitResult};
use pin::render::Renderer;

pub(crate) fn handle_init(renderer: &Renderer, force: bool) -> Result<(), String> {
    let result =
        initialize_default_config(force).map_err(|e| format!("failed to write config: {e}"))?;
    match result {
        ConfigInitResult::Created { path } => {
            renderer.activity("wrote default config");
            renderer.field("path", &path.display().to_string());
        }
        ConfigInitResult::AlreadyInitialized { path } => {
            renderer.warn(&format!(
                "{} already exists; rerun with --force to overwrite it",
                path.display()
            ));
        }
        ConfigInitResult::Overwritten { path, backup_path } => {
            renderer.activity("rewrote default config");
            renderer.field("path", &path.display().to_string());
            renderer.field("backup", &backup_path.display().to_string());
        }
    }
    Ok(())
}
