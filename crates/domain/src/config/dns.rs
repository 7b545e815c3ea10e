use serde::{Deserialize, Serialize};

use crate::nat64::DEFAULT_NAT64_PREFIX;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    #[serde(default)]
    pub enable_nat64: bool,

    #[serde(default = "default_nat64_prefix")]
    pub nat64_prefix: String,

    /// Upstreams for names under public suffixes. Empty means the system
    /// resolver handles them too.
    #[serde(default)]
    pub public_upstream_servers: Vec<String>,

    /// Seconds allowed for one upstream exchange.
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,

    /// Seconds each transport is given to drain on shutdown.
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout: u64,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            enable_nat64: false,
            nat64_prefix: default_nat64_prefix(),
            public_upstream_servers: vec![],
            query_timeout: default_query_timeout(),
            shutdown_timeout: default_shutdown_timeout(),
        }
    }
}

fn default_nat64_prefix() -> String {
    DEFAULT_NAT64_PREFIX.to_string()
}

fn default_query_timeout() -> u64 {
    5
}

fn default_shutdown_timeout() -> u64 {
    5
}
