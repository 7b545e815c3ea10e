use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use super::dns::DnsConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::network::NetworkConfig;
use super::server::ServerConfig;
use crate::dns_protocol::UpstreamAddr;
use crate::dns_request::validate_name;
use crate::nat64::Nat64Prefix;

/// Searched in order when no path is given on the command line.
pub const DEFAULT_CONFIG_PATHS: [&str; 2] = ["meshdns.toml", "/etc/meshdns/config.toml"];

/// Main configuration structure for meshdns
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (port, bind address)
    #[serde(default)]
    pub server: ServerConfig,

    /// The virtual network: own domain, hostname and peers
    #[serde(default)]
    pub network: NetworkConfig,

    /// Resolution configuration
    #[serde(default)]
    pub dns: DnsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. meshdns.toml in current directory
    /// 3. /etc/meshdns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path.map(str::to_string).or_else(Self::get_config_path) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        let domain = self.network.domain.trim();
        if domain.is_empty() || domain == "." {
            return Err(ConfigError::Validation(
                "network.domain cannot be empty".to_string(),
            ));
        }
        validate_name(domain).map_err(|e| ConfigError::Validation(e.to_string()))?;

        let mut seen = HashSet::new();
        for peer in &self.network.peers {
            if peer.name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "Peer name cannot be empty".to_string(),
                ));
            }
            if !seen.insert(peer.name.to_ascii_lowercase()) {
                return Err(ConfigError::Validation(format!(
                    "Duplicate peer '{}'",
                    peer.name
                )));
            }
        }

        // Checked even when NAT64 is off so a bad prefix never lies dormant.
        self.dns
            .nat64_prefix
            .parse::<Nat64Prefix>()
            .map_err(|e| ConfigError::Validation(e.to_string()))?;

        for server in &self.dns.public_upstream_servers {
            server
                .parse::<UpstreamAddr>()
                .map_err(|e| ConfigError::Validation(e.to_string()))?;
        }

        if self.dns.query_timeout == 0 {
            return Err(ConfigError::Validation(
                "dns.query_timeout cannot be 0".to_string(),
            ));
        }

        if self.dns.shutdown_timeout == 0 {
            return Err(ConfigError::Validation(
                "dns.shutdown_timeout cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }

    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string = self.to_toml()?;
        std::fs::write(path, toml_string)
            .map_err(|e| ConfigError::FileWrite(path.to_string(), e.to_string()))?;
        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        DEFAULT_CONFIG_PATHS
            .iter()
            .find(|path| Path::new(path).exists())
            .map(|path| path.to_string())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub log_level: Option<String>,
}
