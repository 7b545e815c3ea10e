use meshdns_domain::{config::errors::ConfigError, UpstreamAddr};
use toml_edit::{Array, DocumentMut};

const UPSTREAM_KEY: &str = "public_upstream_servers";

/// Appends `server` to `dns.public_upstream_servers`, keeping the rest of
/// the file (comments, ordering, formatting) as it was.
pub fn add_upstream_server(path: &str, server: &str) -> Result<(), ConfigError> {
    let server = server.trim();
    let addr = parse_upstream(server)?;

    let mut doc = read_document(path)?;
    let servers = upstream_servers_mut(&mut doc)?;

    if position_of(servers, &addr).is_some() {
        return Err(ConfigError::Validation(format!(
            "Upstream server {} is already configured",
            server
        )));
    }

    servers.push(server);
    write_document(path, &doc)
}

/// Removes the entry equal to `server`. `1.1.1.1` and `1.1.1.1:53` name the
/// same upstream.
pub fn remove_upstream_server(path: &str, server: &str) -> Result<(), ConfigError> {
    let server = server.trim();
    let addr = parse_upstream(server)?;

    let mut doc = read_document(path)?;
    let servers = upstream_servers_mut(&mut doc)?;

    let index = position_of(servers, &addr).ok_or_else(|| {
        ConfigError::Validation(format!("Upstream server {} is not configured", server))
    })?;

    servers.remove(index);
    write_document(path, &doc)
}

fn parse_upstream(server: &str) -> Result<UpstreamAddr, ConfigError> {
    server
        .parse::<UpstreamAddr>()
        .map_err(|e| ConfigError::Validation(e.to_string()))
}

fn position_of(servers: &Array, addr: &UpstreamAddr) -> Option<usize> {
    servers.iter().position(|value| {
        value
            .as_str()
            .and_then(|s| s.parse::<UpstreamAddr>().ok())
            .is_some_and(|existing| &existing == addr)
    })
}

fn read_document(path: &str) -> Result<DocumentMut, ConfigError> {
    let existing = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;

    existing
        .parse::<DocumentMut>()
        .map_err(|e| ConfigError::Parse(format!("Failed to parse config file: {}", e)))
}

fn write_document(path: &str, doc: &DocumentMut) -> Result<(), ConfigError> {
    std::fs::write(path, doc.to_string())
        .map_err(|e| ConfigError::FileWrite(path.to_string(), e.to_string()))
}

fn upstream_servers_mut(doc: &mut DocumentMut) -> Result<&mut Array, ConfigError> {
    let dns = doc
        .entry("dns")
        .or_insert(toml_edit::table())
        .as_table_mut()
        .ok_or_else(|| ConfigError::Parse("[dns] must be a table".to_string()))?;

    dns.entry(UPSTREAM_KEY)
        .or_insert(toml_edit::value(Array::new()))
        .as_array_mut()
        .ok_or_else(|| ConfigError::Parse(format!("dns.{} must be an array", UPSTREAM_KEY)))
}
