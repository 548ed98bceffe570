//! Binary-local application wiring.
//!
//! `main.rs` parses arguments; this module sets up logging, loads config and
//! routes each command to its handler.

pub(crate) mod commands;
pub(crate) mod logging;

use pin::catalog::{AppUpdate, Catalog};
use pin::config::load_config;
use pin::render::Renderer;
use tracing::debug;

use crate::cli::{AppCommand, Command, TemplateCommand, ThemeCommand};

/// Run one command. `Err` carries the one-line diagnostic for stderr.
///
/// `init` runs without loading config so a broken `pin.toml` can be
/// replaced.
pub(crate) async fn dispatch(
    renderer: &Renderer,
    config_path: Option<&str>,
    command: Command,
) -> Result<(), String> {
    if let Command::Init { force } = command {
        return commands::init::handle_init(renderer, force);
    }

    let config = load_config(config_path).map_err(|e| format!("failed to load config: {e}"))?;
    match &config.source {
        Some(path) => debug!(path = %path.display(), "loaded config"),
        None => debug!("no config file found; using defaults"),
    }
    let catalog = Catalog::new(config.clone());

    match command {
        Command::Init { force } => commands::init::handle_init(renderer, force),
        Command::Apply { theme } => commands::apply::handle_apply(renderer, config, &theme).await,
        Command::Themes => commands::theme::list_themes(renderer, &catalog),
        Command::Theme(cmd) => match cmd {
            ThemeCommand::New { name } => commands::theme::new_theme(renderer, &catalog, &name),
            ThemeCommand::Rename { old, new } => {
                commands::theme::rename_theme(renderer, &catalog, &old, &new)
            }
            ThemeCommand::Delete { name } => {
                commands::theme::delete_theme(renderer, &catalog, &name)
            }
            ThemeCommand::Hook { name, command } => commands::theme::set_theme_hook(
                renderer,
                &catalog,
                &name,
                command.as_deref().unwrap_or_default(),
            ),
        },
        Command::Apps => commands::app::list_apps(renderer, &catalog),
        Command::App(cmd) => match cmd {
            AppCommand::Add {
                name,
                path,
                mode,
                hook,
            } => commands::app::add_app(renderer, &catalog, name, path, mode, hook),
            AppCommand::Remove { name } => commands::app::remove_app(renderer, &catalog, &name),
            AppCommand::Set {
                name,
                rename,
                path,
                mode,
                hook,
                active,
                template,
            } => {
                let update = AppUpdate {
                    name: rename,
                    path,
                    write_mode: mode,
                    hook,
                    active,
                    template,
                };
                commands::app::update_app(renderer, &catalog, &name, update)
            }
        },
        Command::Templates { app } => commands::template::list_templates(renderer, &catalog, &app),
        Command::Template(cmd) => match cmd {
            TemplateCommand::New { app, name } => {
                commands::template::new_template(renderer, &catalog, &app, &name)
            }
            TemplateCommand::Copy { app, name } => {
                commands::template::copy_template(renderer, &catalog, &app, &name)
            }
            TemplateCommand::Rename { app, old, new } => {
                commands::template::rename_template(renderer, &catalog, &app, &old, &new)
            }
            TemplateCommand::Delete { app, name } => {
                commands::template::delete_template(renderer, &catalog, &app, &name)
            }
        },
    }
}
