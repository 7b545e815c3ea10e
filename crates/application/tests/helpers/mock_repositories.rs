#![allow(dead_code)]

use async_trait::async_trait;
use meshdns_application::ports::{DnsResolution, DnsResolver, Network};
use meshdns_domain::{DnsRequest, DomainError};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct MockDnsResolver {
    responses: Arc<RwLock<HashMap<String, Vec<IpAddr>>>>,
    error_responses: Arc<RwLock<HashMap<String, DomainError>>>,
    calls: Arc<AtomicUsize>,
}

impl MockDnsResolver {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(RwLock::new(HashMap::new())),
            error_responses: Arc::new(RwLock::new(HashMap::new())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub async fn set_response(&self, domain: &str, addresses: &[&str]) {
        self.responses.write().await.insert(
            domain.to_string(),
            addresses.iter().map(|a| a.parse().unwrap()).collect(),
        );
    }

    pub async fn set_response_error(&self, domain: &str, error: DomainError) {
        self.error_responses
            .write()
            .await
            .insert(domain.to_string(), error);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockDnsResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn resolve(&self, request: &DnsRequest) -> Result<DnsResolution, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(err) = self.error_responses.read().await.get(request.domain.as_ref()) {
            return Err(err.clone());
        }

        self.responses
            .read()
            .await
            .get(request.domain.as_ref())
            .cloned()
            .map(DnsResolution::new)
            .ok_or(DomainError::NxDomain)
    }
}

/// A peer directory keyed by the exact name the client asked for.
#[derive(Clone)]
pub struct MockNetwork {
    domain: String,
    hosts: Arc<RwLock<HashMap<String, Vec<String>>>>,
    error_responses: Arc<RwLock<HashMap<String, DomainError>>>,
    lookups: Arc<AtomicUsize>,
}

impl MockNetwork {
    pub fn new(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            hosts: Arc::new(RwLock::new(HashMap::new())),
            error_responses: Arc::new(RwLock::new(HashMap::new())),
            lookups: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub async fn add_host(&self, name: &str, addresses: &[&str]) {
        self.hosts.write().await.insert(
            name.to_string(),
            addresses.iter().map(|a| a.to_string()).collect(),
        );
    }

    pub async fn set_lookup_error(&self, name: &str, error: DomainError) {
        self.error_responses
            .write()
            .await
            .insert(name.to_string(), error);
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Network for MockNetwork {
    fn domain(&self) -> Result<String, DomainError> {
        Ok(self.domain.clone())
    }

    fn hostname(&self) -> Result<String, DomainError> {
        Ok("gateway".to_string())
    }

    async fn lookup_host(&self, name: &str) -> Result<Vec<String>, DomainError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);

        if let Some(err) = self.error_responses.read().await.get(name) {
            return Err(err.clone());
        }

        self.hosts
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or(DomainError::NxDomain)
    }

    async fn listen_tcp(&self, port: u16) -> Result<TcpListener, DomainError> {
        TcpListener::bind(("127.0.0.1", port))
            .await
            .map_err(|e| DomainError::NetworkError(e.to_string()))
    }

    async fn listen_udp(&self, port: u16) -> Result<UdpSocket, DomainError> {
        UdpSocket::bind(("127.0.0.1", port))
            .await
            .map_err(|e| DomainError::NetworkError(e.to_string()))
    }
}
