pub mod config_persistence;

pub use config_persistence::{add_upstream_server, remove_upstream_server};
