use anyhow::Context;
use meshdns_domain::config::DEFAULT_CONFIG_PATHS;
use meshdns_domain::{config::CliOverrides, Config};

/// Loads, overrides and validates the configuration.
pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// The file that config-editing commands act on: the explicit path, else the
/// first default location that exists, else the first default location.
pub fn config_file_path(explicit: Option<&str>) -> String {
    explicit
        .map(str::to_string)
        .or_else(Config::get_config_path)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATHS[0].to_string())
}
