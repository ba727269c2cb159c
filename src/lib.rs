//! Outpost - a small HTTP/1.1 server
//!
//! Raw request parsing, path-pattern routing and hand-built responses with
//! optional gzip bodies.

pub mod config;
pub mod handlers;
pub mod http;
pub mod router;
pub mod server;
pub mod store;
