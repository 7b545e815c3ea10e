//! meshdns application layer: ports and the query-answering use case.
pub mod ports;
pub mod services;
pub mod use_cases;
