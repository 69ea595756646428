//! Peer struct definition
//!
//! The registry-side view of one connected client: its ID, remote address
//! for logging, and the sender half of the bounded queue feeding that
//! client's write task.

use bytes::Bytes;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::error::SendError;
use crate::types::ConnId;

/// Connected peer information
#[derive(Debug)]
pub struct Peer {
    /// Unique identifier for this connection
    pub id: ConnId,
    /// Remote address, diagnostics only
    pub addr: String,
    /// Registry → write task line queue
    pub sender: mpsc::Sender<Bytes>,
}

impl Peer {
    /// Create a new peer with the given ID, address, and sender channel
    pub fn new(id: ConnId, addr: String, sender: mpsc::Sender<Bytes>) -> Self {
        Self { id, addr, sender }
    }

    /// Enqueue a line for delivery to this peer
    ///
    /// Never blocks: a full queue drops the line for this peer only, and a
    /// closed queue means the peer's write task has already stopped. Either
    /// way the failure is local to this recipient.
    pub fn send(&self, line: Bytes) -> Result<(), SendError> {
        self.sender.try_send(line).map_err(|e| match e {
            TrySendError::Full(_) => SendError::Full,
            TrySendError::Closed(_) => SendError::Closed,
        })
    }
}
