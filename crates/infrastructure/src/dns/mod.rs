pub mod forwarding;
pub mod lifecycle;
pub mod resolver;
pub mod server;
pub mod service;
pub mod transport;

pub use lifecycle::{DnsServer, ServerState};
pub use resolver::{ResolverHandle, ResolverSet, ResolverSettings};
pub use server::DnsServerHandler;
pub use service::DnsService;
