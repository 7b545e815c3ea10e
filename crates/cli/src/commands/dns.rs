use anyhow::Context;
use meshdns_infrastructure::repositories::{add_upstream_server, remove_upstream_server};

pub fn add_server(config_path: &str, server: &str) -> anyhow::Result<()> {
    add_upstream_server(config_path, server)
        .with_context(|| format!("Failed to add upstream server to {}", config_path))?;
    println!("Added public upstream server {} to {}", server, config_path);
    Ok(())
}

pub fn remove_server(config_path: &str, server: &str) -> anyhow::Result<()> {
    remove_upstream_server(config_path, server)
        .with_context(|| format!("Failed to remove upstream server from {}", config_path))?;
    println!("Removed public upstream server {} from {}", server, config_path);
    Ok(())
}
