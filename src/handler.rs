//! Per-connection handler
//!
//! Drives one accepted connection: registers it with the registry, pumps
//! received lines into broadcasts, drains the outbound queue into the
//! socket, and reports the disconnect exactly once.

use bytes::Bytes;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::connection::Connection;
use crate::error::AppError;
use crate::registry::RegistryCommand;
use crate::types::ConnId;

/// Outbound queue depth per connection
///
/// When a peer's socket stalls long enough for this to fill, further lines
/// are dropped for that peer instead of blocking the registry.
pub const OUTBOUND_QUEUE_SIZE: usize = 32;

/// Handle a new TCP connection
///
/// Joins the registry, runs the read and write loops until either ends,
/// then leaves. All I/O errors are terminal for this connection only and
/// never propagate to the registry or the accept loop.
pub async fn handle_connection(
    stream: TcpStream,
    cmd_tx: mpsc::Sender<RegistryCommand>,
) -> Result<(), AppError> {
    let conn = Connection::new(stream);
    let addr = conn.addr().to_string();
    let conn_id = ConnId::new();

    debug!("New TCP connection from {}", addr);

    let (mut reader, mut writer) = conn.split();

    // Create the outbound queue for registry -> this client lines
    let (line_tx, mut line_rx) = mpsc::channel::<Bytes>(OUTBOUND_QUEUE_SIZE);

    // Register with the registry
    if cmd_tx
        .send(RegistryCommand::Join {
            id: conn_id,
            addr: addr.clone(),
            sender: line_tx,
        })
        .await
        .is_err()
    {
        warn!("Failed to register client {} - registry closed", conn_id);
        return Err(AppError::RegistryClosed);
    }

    // Clone cmd_tx for the read task
    let cmd_tx_read = cmd_tx.clone();

    // Spawn read task (socket lines -> Broadcast commands)
    let read_task = tokio::spawn(async move {
        loop {
            match reader.recv_line().await {
                Ok(Some(line)) => {
                    debug!("Received {} bytes from client {}", line.len(), conn_id);
                    let cmd = RegistryCommand::Broadcast {
                        line,
                        exclude: Some(conn_id),
                    };
                    if cmd_tx_read.send(cmd).await.is_err() {
                        debug!("Registry closed, ending read task for {}", conn_id);
                        break;
                    }
                }
                Ok(None) => {
                    debug!("Client {} reached end of stream", conn_id);
                    break;
                }
                Err(e) => {
                    warn!("Read error for client {}: {}", conn_id, e);
                    break;
                }
            }
        }
        debug!("Read task ended for {}", conn_id);
    });

    // Spawn write task (outbound queue -> socket)
    let write_task = tokio::spawn(async move {
        while let Some(line) = line_rx.recv().await {
            if let Err(e) = writer.send(&line).await {
                debug!("Write failed for client {}: {}", conn_id, e);
                break;
            }
        }
        debug!("Write task ended for {}", conn_id);

        writer.close().await;
    });

    // Wait for either task to complete
    tokio::select! {
        _ = read_task => {
            debug!("Read task completed for {}", conn_id);
        }
        _ = write_task => {
            debug!("Write task completed for {}", conn_id);
        }
    }

    // Report the disconnect; a closed registry at this point is fine
    let _ = cmd_tx.send(RegistryCommand::Leave { id: conn_id }).await;

    info!("Client {} ({}) disconnected", conn_id, addr);

    Ok(())
}
