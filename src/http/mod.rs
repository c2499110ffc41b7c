//! HTTP protocol implementation.
//!
//! A deliberately small HTTP/1.1 subset: one request per connection, no
//! keep-alive, no chunked bodies.
//!
//! # Architecture
//!
//! - **`connection`**: Reads one request, dispatches it, writes the response, closes
//! - **`parser`**: Splits a raw read buffer into a `Request`
//! - **`request`**: Request representation with case-insensitive header lookup
//! - **`response`**: Status codes and the response builder
//! - **`writer`**: Serializes responses with a fixed header order
//! - **`encoding`**: Gzip body compression
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← One bounded read
//!        └──────┬──────┘
//!               │ Request parsed (else → Closed)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Route and build response
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ▼
//!        ┌──────────────────┐
//!        │    Closed        │
//!        └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use kestrel::http::connection::Connection;
//! use kestrel::router::Router;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:4221").await?;
//!     let router = Arc::new(Router::new(None));
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let router = Arc::clone(&router);
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, router);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod encoding;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
