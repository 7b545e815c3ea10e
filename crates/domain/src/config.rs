pub mod dns;
pub mod errors;
pub mod logging;
pub mod network;
pub mod root;
pub mod server;

pub use dns::DnsConfig;
pub use errors::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use network::{NetworkConfig, PeerConfig};
pub use root::{CliOverrides, Config, DEFAULT_CONFIG_PATHS};
pub use server::ServerConfig;
