//! Multi-client TCP line chat relay library
//!
//! A minimal chat relay: every newline-terminated line a client sends is
//! rebroadcast verbatim to all other connected clients.
//!
//! # Features
//! - Plain TCP, line-delimited text (no framing beyond `\n`)
//! - Broadcast fan-out that one slow peer cannot stall
//! - Join, welcome, and disconnect notices
//! - Per-connection disconnect handling
//!
//! # Architecture
//! Uses the Actor pattern with `mpsc` channels:
//! - `Registry` is the central actor owning the membership set
//! - Each connection has a handler task communicating with the registry
//! - No locks needed - all state access goes through message passing
//!
//! # Example
//! ```ignore
//! use tokio::net::TcpListener;
//! use tokio::sync::mpsc;
//! use chat_relay::{Registry, handle_connection};
//!
//! #[tokio::main]
//! async fn main() {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await.unwrap();
//!     let (cmd_tx, cmd_rx) = mpsc::channel(256);
//!
//!     tokio::spawn(Registry::new(cmd_rx).run());
//!
//!     while let Ok((stream, _)) = listener.accept().await {
//!         let cmd_tx = cmd_tx.clone();
//!         tokio::spawn(handle_connection(stream, cmd_tx));
//!     }
//! }
//! ```

pub mod connection;
pub mod error;
pub mod handler;
pub mod message;
pub mod peer;
pub mod registry;
pub mod types;

// Re-export main types for convenience
pub use connection::{Connection, LineReader, LineWriter};
pub use error::{AppError, SendError};
pub use handler::handle_connection;
pub use message::Notice;
pub use peer::Peer;
pub use registry::{Registry, RegistryCommand};
pub use types::ConnId;
