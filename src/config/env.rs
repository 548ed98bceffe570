//! Environment overrides.

use super::Config;

pub(super) fn apply_env_overrides<FEnv>(config: &mut Config, env_lookup: &FEnv)
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(shell) = env_nonempty(env_lookup, "PIN_SHELL") {
        config.shell = shell;
    }
}

/// Env value with surrounding whitespace removed; blank counts as unset.
pub(super) fn env_nonempty<FEnv>(env_lookup: &FEnv, name: &str) -> Option<String>
where
    FEnv: Fn(&str) -> Option<String>,
{
    env_lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
