//! Error types for the relay
//!
//! Defines application-level errors and per-peer delivery errors.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Application-level errors
///
/// Fatal to a single connection handler, never to the registry or the
/// accept loop.
#[derive(Debug, Error)]
pub enum AppError {
    /// IO error on the connection (fatal for that connection)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Registry command channel closed (fatal - registry is gone)
    #[error("Registry channel closed")]
    RegistryClosed,
}

/// Per-peer delivery errors
///
/// Occurs when enqueueing a line onto one recipient's outbound queue fails.
/// Both variants affect only that recipient.
#[derive(Debug, Error)]
pub enum SendError {
    /// The peer's write task has stopped and dropped its receiver
    #[error("Peer channel closed")]
    Closed,

    /// The peer's outbound queue is full; the line is dropped for this peer
    #[error("Peer queue full")]
    Full,
}
