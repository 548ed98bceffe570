//! CLI argument parsing via clap.

use clap::{ArgAction, Parser, Subcommand};
use pin::splice::WriteMode;

use crate::build_info;

/// Apply base16/base24 color schemes to the config files of your apps.
#[derive(Debug, Parser)]
#[command(
    name = "pin",
    version = build_info::VERSION,
    long_version = build_info::LONG_VERSION,
    after_help = build_info::HELP_BUILD_METADATA
)]
pub struct Args {
    /// Theme to apply; shorthand for `pin apply <THEME>`.
    pub theme: Option<String>,

    /// Path to config file (default: $PIN_HOME/pin.toml or ~/.config/pin/pin.toml).
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Disable color output.
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Log more (-v info, -vv debug). `PIN_LOG` takes precedence.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Args {
    /// The command to run, folding the bare-theme shorthand into `apply`.
    pub fn resolved_command(&self) -> Option<Command> {
        match (&self.command, &self.theme) {
            (Some(command), _) => Some(command.clone()),
            (None, Some(theme)) => Some(Command::Apply {
                theme: theme.clone(),
            }),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Render every active app's template against a theme.
    Apply { theme: String },
    /// List available themes.
    Themes,
    /// Manage custom themes.
    #[command(subcommand)]
    Theme(ThemeCommand),
    /// List apps.
    Apps,
    /// Manage registered apps.
    #[command(subcommand)]
    App(AppCommand),
    /// List the templates of an app.
    Templates { app: String },
    /// Manage an app's templates.
    #[command(subcommand)]
    Template(TemplateCommand),
    /// Write the default config file.
    Init {
        /// Replace an existing config, keeping a timestamped backup.
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ThemeCommand {
    /// Copy the active scheme (or a default palette) into a new custom theme.
    New { name: String },
    Rename { old: String, new: String },
    Delete { name: String },
    /// Set the command run after this theme is applied. Omit to clear.
    Hook {
        name: String,
        command: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum AppCommand {
    /// Register an app and snapshot its target file as the `Backup` template.
    Add {
        name: String,
        /// Target file the rendered theme is written to.
        #[arg(long)]
        path: String,
        #[arg(long, default_value = "splice")]
        mode: WriteMode,
        /// Command run after each apply.
        #[arg(long)]
        hook: Option<String>,
    },
    /// Unregister an app and remove its templates.
    Remove { name: String },
    /// Change fields of a registered app.
    Set {
        name: String,
        /// Rename the app; its templates move along.
        #[arg(long = "name", value_name = "NEW_NAME")]
        rename: Option<String>,
        #[arg(long)]
        path: Option<String>,
        #[arg(long)]
        mode: Option<WriteMode>,
        #[arg(long)]
        hook: Option<String>,
        #[arg(long, value_name = "BOOL")]
        active: Option<bool>,
        /// Template to select; an empty string clears the selection.
        #[arg(long)]
        template: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum TemplateCommand {
    /// Create a template from the app's current target file.
    New { app: String, name: String },
    /// Duplicate a template as `<NAME>_<n>`.
    Copy { app: String, name: String },
    Rename {
        app: String,
        old: String,
        new: String,
    },
    Delete { app: String, name: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn bare_theme_is_apply_shorthand() {
        let args = Args::parse_from(["pin", "gruvbox-dark"]);
        assert_eq!(
            args.resolved_command(),
            Some(Command::Apply {
                theme: "gruvbox-dark".into()
            })
        );
    }

    #[test]
    fn subcommand_names_win_over_theme_shorthand() {
        let args = Args::parse_from(["pin", "themes"]);
        assert!(args.theme.is_none());
        assert_eq!(args.resolved_command(), Some(Command::Themes));
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let args = Args::parse_from(["pin", "apply", "nord", "-vv", "--no-color", "-c", "x.toml"]);
        assert_eq!(args.verbose, 2);
        assert!(args.no_color);
        assert_eq!(args.config.as_deref(), Some("x.toml"));
    }

    #[test]
    fn app_add_defaults_to_splice() {
        let args = Args::parse_from(["pin", "app", "add", "kitty", "--path", "/tmp/kitty.conf"]);
        assert_eq!(
            args.command,
            Some(Command::App(AppCommand::Add {
                name: "kitty".into(),
                path: "/tmp/kitty.conf".into(),
                mode: WriteMode::Splice,
                hook: None,
            }))
        );
    }

    #[test]
    fn app_set_parses_mode_and_active() {
        let args = Args::parse_from([
            "pin", "app", "set", "kitty", "--mode", "overwrite", "--active", "false",
        ]);
        let Some(Command::App(AppCommand::Set { mode, active, path, .. })) = args.command else {
            panic!("expected app set");
        };
        assert_eq!(mode, Some(WriteMode::Overwrite));
        assert_eq!(active, Some(false));
        assert!(path.is_none());
    }

    #[test]
    fn app_set_name_renames() {
        let args = Args::parse_from(["pin", "app", "set", "kitty", "--name", "term"]);
        let Some(Command::App(AppCommand::Set { name, rename, .. })) = args.command else {
            panic!("expected app set");
        };
        assert_eq!(name, "kitty");
        assert_eq!(rename.as_deref(), Some("term"));
    }

    #[test]
    fn unknown_write_mode_is_rejected() {
        let result = Args::try_parse_from(["pin", "app", "set", "kitty", "--mode", "append"]);
        assert!(result.is_err());
    }

    #[test]
    fn theme_hook_without_command_clears() {
        let args = Args::parse_from(["pin", "theme", "hook", "nord"]);
        assert_eq!(
            args.command,
            Some(Command::Theme(ThemeCommand::Hook {
                name: "nord".into(),
                command: None
            }))
        );
    }

    #[test]
    fn no_arguments_means_no_command() {
        let args = Args::parse_from(["pin"]);
        assert!(args.resolved_command().is_none());
    }
}
