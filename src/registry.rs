//! Broadcast registry actor implementation
//!
//! The central actor that owns the set of connected peers and performs
//! fan-out delivery. Uses the Actor pattern with mpsc channels: all
//! membership mutations and broadcasts go through one command loop, so
//! joins and leaves are linearized and every broadcast iterates over a
//! membership snapshot fixed between commands. No locks needed.

use std::collections::HashMap;

use bytes::Bytes;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::message::Notice;
use crate::peer::Peer;
use crate::types::ConnId;

/// Commands sent from connection handlers to the registry actor
#[derive(Debug)]
pub enum RegistryCommand {
    /// New connection accepted
    Join {
        id: ConnId,
        addr: String,
        sender: mpsc::Sender<Bytes>,
    },
    /// Connection's read loop observed a terminal error or EOF
    Leave { id: ConnId },
    /// Deliver a line to every peer except `exclude`
    ///
    /// `exclude` is the originator, or `None` for lines addressed to all.
    Broadcast {
        line: Bytes,
        exclude: Option<ConnId>,
    },
}

/// The broadcast registry actor
///
/// Membership reflects exactly the connections whose read loop has not yet
/// observed a terminal error. Created once at server start and lives for
/// the process lifetime.
pub struct Registry {
    /// All connected peers: ConnId -> Peer
    peers: HashMap<ConnId, Peer>,
    /// Command receiver channel
    receiver: mpsc::Receiver<RegistryCommand>,
}

impl Registry {
    /// Create a new registry with the given command receiver
    pub fn new(receiver: mpsc::Receiver<RegistryCommand>) -> Self {
        Self {
            peers: HashMap::new(),
            receiver,
        }
    }

    /// Run the registry event loop
    ///
    /// Continuously receives and processes commands until all senders are
    /// dropped.
    pub async fn run(mut self) {
        info!("Registry started");

        while let Some(cmd) = self.receiver.recv().await {
            self.handle_command(cmd);
        }

        info!("Registry shutting down");
    }

    /// Process a single command
    ///
    /// Never awaits: delivery is a non-blocking enqueue per recipient, so
    /// one slow peer cannot stall the command loop.
    fn handle_command(&mut self, cmd: RegistryCommand) {
        match cmd {
            RegistryCommand::Join { id, addr, sender } => {
                self.handle_join(id, addr, sender);
            }
            RegistryCommand::Leave { id } => {
                self.handle_leave(id);
            }
            RegistryCommand::Broadcast { line, exclude } => {
                self.handle_broadcast(line, exclude);
            }
        }
    }

    /// Handle a new connection joining
    fn handle_join(&mut self, id: ConnId, addr: String, sender: mpsc::Sender<Bytes>) {
        info!("Client {} connected from {}", id, addr);

        let peer = Peer::new(id, addr, sender);
        self.peers.insert(id, peer);

        let others = self.peers.len() - 1;

        // Welcome the joiner, announce it to everyone else
        if let Some(peer) = self.peers.get(&id) {
            if let Err(e) = peer.send(Notice::Welcome { others }.to_line()) {
                warn!("Failed to welcome client {}: {}", id, e);
            }
        }
        self.fan_out(Notice::Joined { others }.to_line(), Some(id));

        debug!("Total peers: {}", self.peers.len());
    }

    /// Handle a connection leaving
    ///
    /// Idempotent: removing an absent peer is a no-op and announces nothing.
    fn handle_leave(&mut self, id: ConnId) {
        let Some(peer) = self.peers.remove(&id) else {
            return;
        };

        info!("Client {} ({}) disconnected", id, peer.addr);

        let others = self.peers.len().saturating_sub(1);
        self.fan_out(Notice::Left { others }.to_line(), None);

        debug!("Total peers: {}", self.peers.len());
    }

    /// Handle a broadcast request
    fn handle_broadcast(&mut self, line: Bytes, exclude: Option<ConnId>) {
        debug!(
            "Broadcasting {} bytes to {} peers",
            line.len(),
            self.peers.len()
        );
        self.fan_out(line, exclude);
    }

    /// Deliver a line to every peer except `exclude`
    ///
    /// Each delivery is independent: a failed enqueue is logged and skips
    /// only that recipient. A send failure is not an eviction signal; the
    /// peer is removed only when its own read loop reports Leave.
    fn fan_out(&self, line: Bytes, exclude: Option<ConnId>) {
        for peer in self.peers.values() {
            if exclude == Some(peer.id) {
                continue;
            }

            if let Err(e) = peer.send(line.clone()) {
                warn!("Dropping line for client {} ({}): {}", peer.id, peer.addr, e);
            }
        }
    }
}
