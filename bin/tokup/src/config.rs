//! Layered settings: defaults, then Tokup.toml files, then the environment.

use std::path::Path;

use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use tokup_deploy::{Settings, TOKUP_CONF_FILENAME};

/// Environment prefix for settings, e.g. `TOKUP_DEPLOY__CONFIRMATION_TIMEOUT_SECS=120`.
const ENV_PREFIX: &str = "TOKUP_";

/// Load settings in the following order (later sources override earlier):
/// 1. Default values
/// 2. `Tokup.toml` in the current directory (if present)
/// 3. The given config file, or `Tokup.toml` inside the given directory
/// 4. Environment variables with the `TOKUP_` prefix, `__` separating nested keys
pub fn load(path: Option<&Path>) -> Result<Settings> {
    let mut figment = Figment::from(Serialized::defaults(Settings::default()))
        .merge(Toml::file(TOKUP_CONF_FILENAME));

    if let Some(path) = path {
        figment = figment.merge(Toml::file(Settings::config_file(path)?));
    }

    let settings: Settings = figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .context("Failed to load tokup settings")?;

    tracing::debug!(?settings, "Settings loaded");

    Ok(settings)
}

/// Render settings as TOML.
pub fn render(settings: &Settings) -> Result<String> {
    settings.to_toml()
}
