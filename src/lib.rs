//! Kestrel - minimal HTTP/1.1 server
//!
//! Core library: request parsing, routing, file storage and the accept loop.

pub mod config;
pub mod files;
pub mod http;
pub mod router;
pub mod server;
