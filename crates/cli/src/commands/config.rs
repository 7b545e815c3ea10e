use anyhow::{bail, Context};
use meshdns_domain::Config;
use std::path::Path;

/// Writes the default configuration to `path`. An existing file is only
/// replaced with `force`.
pub fn init(path: &str, force: bool) -> anyhow::Result<()> {
    if Path::new(path).exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path);
    }

    Config::default()
        .save(path)
        .with_context(|| format!("Failed to write configuration to {}", path))?;

    println!("Default configuration written to {}", path);
    Ok(())
}

pub fn show(config: &Config) -> anyhow::Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}
