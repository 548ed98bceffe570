//! Configuration loading from `pin.toml` and environment variables.
//!
//! Precedence (highest wins):
//! 1. `PIN_SHELL` for the hook shell.
//! 2. TOML file given with `--config`.
//! 3. `$PIN_HOME/pin.toml`.
//! 4. `$XDG_CONFIG_HOME/pin/pin.toml` (or `~/.config/pin/pin.toml`).
//! 5. Built-in defaults.
//!
//! The home dir (registry, templates, custom schemes, state) is `$PIN_HOME`
//! or `<config root>/pin`. The data dir holding the base scheme collection is
//! `$PIN_DATA/pin` or `<data root>/pin`.

mod defaults;
mod env;
mod init;
mod loader;
mod sources;
mod types;

pub use init::initialize_default_config;
pub use loader::load_config;
pub use types::{Config, ConfigInitResult, Paths};
use types::FileConfig;
