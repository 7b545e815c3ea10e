use serde::{Deserialize, Serialize};

/// A machine reachable on the virtual network.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct PeerConfig {
    pub name: String,

    #[serde(default)]
    pub addresses: Vec<String>,
}

/// The virtual network this node belongs to. `domain` is the zone the DNS
/// service answers authoritatively.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkConfig {
    #[serde(default = "default_domain")]
    pub domain: String,

    #[serde(default = "default_hostname")]
    pub hostname: String,

    #[serde(default)]
    pub addresses: Vec<String>,

    #[serde(default)]
    pub peers: Vec<PeerConfig>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            domain: default_domain(),
            hostname: default_hostname(),
            addresses: vec![],
            peers: vec![],
        }
    }
}

fn default_domain() -> String {
    "mesh.internal".to_string()
}

fn default_hostname() -> String {
    "localhost".to_string()
}
