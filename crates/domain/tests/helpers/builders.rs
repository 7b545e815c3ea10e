#![allow(dead_code)]
use meshdns_domain::config::PeerConfig;
use meshdns_domain::{Config, DnsQuery, RecordType};

pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        let mut config = Config::default();
        config.network.domain = "corp.internal".to_string();
        config.network.hostname = "gateway".to_string();
        Self { config }
    }

    pub fn domain(mut self, domain: &str) -> Self {
        self.config.network.domain = domain.to_string();
        self
    }

    pub fn peer(mut self, name: &str, addresses: &[&str]) -> Self {
        self.config.network.peers.push(PeerConfig {
            name: name.to_string(),
            addresses: addresses.iter().map(|a| a.to_string()).collect(),
        });
        self
    }

    pub fn upstream(mut self, server: &str) -> Self {
        self.config.dns.public_upstream_servers.push(server.to_string());
        self
    }

    pub fn nat64_prefix(mut self, prefix: &str) -> Self {
        self.config.dns.nat64_prefix = prefix.to_string();
        self
    }

    pub fn timeouts(mut self, query_secs: u64, shutdown_secs: u64) -> Self {
        self.config.dns.query_timeout = query_secs;
        self.config.dns.shutdown_timeout = shutdown_secs;
        self
    }

    pub fn dns_port(mut self, port: u16) -> Self {
        self.config.server.dns_port = port;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct QueryBuilder {
    name: String,
    record_type: RecordType,
    id: u16,
    recursion_desired: bool,
}

impl QueryBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            record_type: RecordType::A,
            id: 0x1234,
            recursion_desired: true,
        }
    }

    pub fn aaaa(mut self) -> Self {
        self.record_type = RecordType::AAAA;
        self
    }

    pub fn record_type(mut self, record_type: RecordType) -> Self {
        self.record_type = record_type;
        self
    }

    pub fn no_recursion(mut self) -> Self {
        self.recursion_desired = false;
        self
    }

    pub fn build(self) -> DnsQuery {
        DnsQuery::new(self.name.as_str(), self.record_type)
            .with_id(self.id)
            .with_recursion_desired(self.recursion_desired)
    }
}
